mod helpers;
mod lead_magnet;
mod resource_email;
mod subscriptions;
