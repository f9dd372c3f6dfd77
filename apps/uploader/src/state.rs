use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::client::HttpParseClient;
use crate::config::Config;
use crate::controller::UploadController;
use crate::session::{MemorySessionStore, RedisSessionStore, SessionStore};

pub type PageController = UploadController<HttpParseClient, Box<dyn SessionStore>>;

/// Collaborators shared by every command.
pub struct AppState {
    pub config: Config,
    pub client: HttpParseClient,
    pub store: Box<dyn SessionStore>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let client = HttpParseClient::new(&config.api_base_url, config.parse_timeout)
            .context("Failed to build HTTP client")?;
        info!("Parse endpoint: {}", client.endpoint());

        let store: Box<dyn SessionStore> = match &config.redis_url {
            Some(url) => Box::new(
                RedisSessionStore::new(url, config.session_id.clone(), config.session_ttl)
                    .context("Invalid REDIS_URL")?,
            ),
            None => {
                warn!("REDIS_URL not set; results will not survive this process");
                Box::new(MemorySessionStore::new())
            }
        };

        Ok(Self {
            config,
            client,
            store,
        })
    }

    pub fn into_controller(self) -> PageController {
        UploadController::new(self.client, self.store, self.config.download_dir)
    }
}
