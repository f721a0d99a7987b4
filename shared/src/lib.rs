pub mod api;
pub mod capture;
pub mod device;
pub mod error;
pub mod image_processing;
pub mod session;
pub mod types;
pub mod validation;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::session::SessionStore;

/// Shared application state: the remote client plus the persisted session slot.
pub struct AppState {
    pub api: ApiClient,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(api: ApiClient, sessions: SessionStore) -> Arc<Self> {
        Arc::new(Self { api, sessions })
    }
}
