//! Site configuration read and update handlers.

use std::sync::Arc;

use crate::adapters::kv::SITE_CONFIG_KEY;
use crate::domain::site_config::{SiteConfig, DEFAULT_SITE_CONFIG};
use crate::ports::{KvError, KvStore};

/// Load the site config, falling back to the compiled-in default on
/// absence, corruption, or store errors. The public page must always
/// render something.
pub(crate) async fn load_site_config(kv: &dyn KvStore) -> SiteConfig {
    match kv.get(SITE_CONFIG_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "stored site config corrupt, serving default");
                DEFAULT_SITE_CONFIG.clone()
            }
        },
        Ok(None) => DEFAULT_SITE_CONFIG.clone(),
        Err(err) => {
            tracing::warn!(error = %err, "site config load failed, serving default");
            DEFAULT_SITE_CONFIG.clone()
        }
    }
}

/// Handler for reading the site configuration (public endpoint)
pub struct GetSiteConfigHandler {
    kv: Arc<dyn KvStore>,
}

impl GetSiteConfigHandler {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub async fn handle(&self) -> SiteConfig {
        load_site_config(self.kv.as_ref()).await
    }
}

/// Handler for admin updates to the site configuration.
///
/// Unlike reads, writes surface store failures: the admin needs to
/// know the update did not stick.
pub struct UpdateSiteConfigHandler {
    kv: Arc<dyn KvStore>,
}

impl UpdateSiteConfigHandler {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub async fn handle(&self, config: SiteConfig) -> Result<(), KvError> {
        let json = serde_json::to_string(&config).map_err(|e| KvError::Corrupt {
            key: SITE_CONFIG_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.kv.put(SITE_CONFIG_KEY, json).await?;
        tracing::info!("site config updated");
        Ok(())
    }
}
