use std::sync::Arc;
use std::time::Duration;

use crate::domain::delivery::ports::DeliveryService;
use crate::domain::health::ports::HealthService;
use crate::domain::subscription::ports::SubscriptionService;

#[derive(Debug)]
pub struct SubscriptionState<SS: SubscriptionService> {
    subscription_service: SS,
}

#[derive(Debug)]
pub struct SharedSubscriptionState<SS: SubscriptionService>(Arc<SubscriptionState<SS>>);

impl<SS: SubscriptionService> SharedSubscriptionState<SS> {
    pub fn new(subscription_service: SS) -> Self {
        Self(Arc::new(SubscriptionState {
            subscription_service,
        }))
    }

    pub fn subscription_service(&self) -> &SS {
        &self.0.subscription_service
    }
}

impl<SS: SubscriptionService> Clone for SharedSubscriptionState<SS> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

#[derive(Debug)]
pub struct DeliveryState<DS: DeliveryService> {
    delivery_service: DS,
    lead_magnet_delay_minutes: i64,
}

#[derive(Debug)]
pub struct SharedDeliveryState<DS: DeliveryService>(Arc<DeliveryState<DS>>);

impl<DS: DeliveryService> SharedDeliveryState<DS> {
    pub fn new(delivery_service: DS, lead_magnet_delay_minutes: i64) -> Self {
        Self(Arc::new(DeliveryState {
            delivery_service,
            lead_magnet_delay_minutes,
        }))
    }

    pub fn delivery_service(&self) -> &DS {
        &self.0.delivery_service
    }

    pub fn lead_magnet_delay_minutes(&self) -> i64 {
        self.0.lead_magnet_delay_minutes
    }
}

impl<DS: DeliveryService> Clone for SharedDeliveryState<DS> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

#[derive(Debug)]
pub struct HealthState<HS: HealthService> {
    health_service: HS,
    timeout: Duration,
}

#[derive(Debug)]
pub struct SharedHealthState<HS: HealthService>(Arc<HealthState<HS>>);

impl<HS: HealthService> SharedHealthState<HS> {
    pub fn new(health_service: HS, timeout: Duration) -> Self {
        Self(Arc::new(HealthState {
            health_service,
            timeout,
        }))
    }

    pub fn health_service(&self) -> &HS {
        &self.0.health_service
    }

    pub fn timeout(&self) -> Duration {
        self.0.timeout
    }
}

impl<HS: HealthService> Clone for SharedHealthState<HS> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
