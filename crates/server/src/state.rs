use std::sync::Arc;

use cinedeck_metadata::provider::CatalogProvider;
use cinedeck_player::session::PlayerSession;
use tokio::sync::Mutex;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub player: Arc<Mutex<PlayerSession>>,
    pub image_base_url: String,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogProvider>, image_base_url: impl Into<String>) -> Self {
        Self {
            catalog,
            player: Arc::new(Mutex::new(PlayerSession::new())),
            image_base_url: image_base_url.into(),
        }
    }
}
