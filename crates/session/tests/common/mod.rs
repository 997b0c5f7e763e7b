//! Shared fixtures for session integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use civilcrm_core::client::ClientForm;
use civilcrm_core::material::MaterialForm;
use civilcrm_core::worker::WorkerForm;
use civilcrm_store::{MemoryStore, RecordStore};

pub const PROJECT: &str = "p1";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fresh in-memory store, returned both concretely (for offline
/// toggling) and as the trait object the services take.
pub fn store() -> (Arc<MemoryStore>, Arc<dyn RecordStore>) {
    let memory = Arc::new(MemoryStore::new());
    let store: Arc<dyn RecordStore> = memory.clone();
    (memory, store)
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

pub fn worker_form(name: &str, role: &str, wage: &str, regular: bool) -> WorkerForm {
    WorkerForm {
        name: name.to_string(),
        role: role.to_string(),
        wage: wage.to_string(),
        contact: "9876543210".to_string(),
        joining_date: None,
        address: String::new(),
        is_regular: regular,
    }
}

pub fn material_form(name: &str, quantity: &str, price: &str) -> MaterialForm {
    MaterialForm {
        name: name.to_string(),
        quantity: quantity.to_string(),
        unit: "bags".to_string(),
        price: price.to_string(),
        supplier: String::new(),
        date: None,
    }
}

pub fn client_form(name: &str, budget: &str, received: &str) -> ClientForm {
    ClientForm {
        name: name.to_string(),
        contact: "9876543210".to_string(),
        budget: budget.to_string(),
        received: received.to_string(),
        ..ClientForm::default()
    }
}
