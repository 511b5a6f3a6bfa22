pub mod entitlement;
pub mod occupancy;
pub mod ledger;
pub mod aggregator;
pub mod notification;
