pub mod health;
pub mod notifier;
pub mod provider;
pub mod telemetry;
