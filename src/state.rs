use std::sync::Arc;

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::identity::{AnonymousIdentity, IdentityProvider};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gemini: Arc<GeminiClient>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gemini = Arc::new(GeminiClient::new(&config.gemini));
        Self {
            config,
            gemini,
            identity: Arc::new(AnonymousIdentity),
        }
    }
}
