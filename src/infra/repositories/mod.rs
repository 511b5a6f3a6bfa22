pub mod sqlite_subscriber_repo;
pub mod sqlite_property_repo;
pub mod sqlite_unit_repo;
pub mod sqlite_tenant_repo;
pub mod sqlite_payment_repo;
