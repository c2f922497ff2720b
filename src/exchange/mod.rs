pub mod http;
pub mod traits;

pub use http::HttpExchangeClient;
pub use traits::ExchangeClient;

use crate::config::Config;
use std::sync::Arc;
use std::time::Duration;

/// Factory: build the HTTP client from config.
pub fn create_client(config: &Config) -> Arc<dyn ExchangeClient> {
    Arc::new(HttpExchangeClient::new(
        &config.endpoint,
        Duration::from_secs(config.request_timeout_secs),
        Duration::from_secs(config.connect_timeout_secs),
    ))
}
