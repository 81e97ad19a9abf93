pub mod delivery;
pub mod health;
pub mod subscription;
