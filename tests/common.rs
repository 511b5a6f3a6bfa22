use immogest_core::{
    config::Config,
    domain::models::{
        property::Property,
        subscriber::{PlanTier, Subscriber},
        tenant::{NewTenantParams, Tenant},
        unit::Unit,
    },
    domain::services::ledger::DEFAULT_GRACE_DAYS,
    infra::factory::bootstrap_state,
    state::AppState,
};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub state: AppState,
    pub db_filename: String,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let config = Config {
            database_url: db_url,
            receipt_base_url: "http://localhost:3000".to_string(),
            grace_days: DEFAULT_GRACE_DAYS,
        };

        let state = bootstrap_state(&config).await;

        Self { state, db_filename }
    }

    pub async fn seed_subscriber(
        &self,
        plan: PlanTier,
        subscription_end: Option<DateTime<Utc>>,
    ) -> Subscriber {
        let subscriber = Subscriber::new(
            format!("{}@example.sn", Uuid::new_v4()),
            Some("+221 77 123 45 67".to_string()),
        );
        let created = self.state.subscriber_repo.create(&subscriber).await.unwrap();

        if plan == PlanTier::Free && subscription_end.is_none() {
            return created;
        }
        self.state
            .subscriber_repo
            .update_plan(&created.id, plan, subscription_end)
            .await
            .unwrap()
    }

    pub async fn seed_property(&self, owner: &Subscriber, name: &str) -> Property {
        self.state
            .property_repo
            .create(&Property::new(owner.id.clone(), name.to_string(), None))
            .await
            .unwrap()
    }

    pub async fn seed_unit(&self, property: &Property, door: &str, rent: f64) -> Unit {
        self.state
            .unit_repo
            .create(&Unit::new(property.id.clone(), door.to_string(), rent))
            .await
            .unwrap()
    }

    pub async fn seed_tenant(&self, unit: &Unit, name: &str) -> Tenant {
        self.state
            .occupancy
            .assign_tenant(
                unit,
                NewTenantParams {
                    full_name: name.to_string(),
                    phone: "+221 77 000 11 22".to_string(),
                    email: None,
                    entry_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                },
            )
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.db_filename, suffix));
        }
    }
}
