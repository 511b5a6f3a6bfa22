use std::sync::Arc;
use crate::domain::ports::{
    PaymentRepository, PropertyRepository, SubscriberRepository, TenantRepository, UnitRepository,
};
use crate::domain::services::{
    aggregator::AggregatorService, entitlement::EntitlementService, ledger::LedgerService,
    occupancy::OccupancyService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub subscriber_repo: Arc<dyn SubscriberRepository>,
    pub property_repo: Arc<dyn PropertyRepository>,
    pub unit_repo: Arc<dyn UnitRepository>,
    pub tenant_repo: Arc<dyn TenantRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub entitlement: Arc<EntitlementService>,
    pub occupancy: Arc<OccupancyService>,
    pub ledger: Arc<LedgerService>,
    pub aggregator: Arc<AggregatorService>,
}
