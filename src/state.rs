use std::sync::Arc;

use crate::client::StoreClient;

#[derive(Clone)]
pub struct AppState {
    pub year: i32,
    pub client: Arc<StoreClient>,
}

impl AppState {
    pub fn new(year: i32, client: StoreClient) -> Self {
        Self {
            year,
            client: Arc::new(client),
        }
    }
}
