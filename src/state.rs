use crate::storage::Storage;
use crate::webhook::Transmitter;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Mutex<Storage>>,
    pub transmitter: Arc<dyn Transmitter>,
}

impl AppState {
    pub fn new(storage: Storage, transmitter: Arc<dyn Transmitter>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            transmitter,
        }
    }
}
