use crate::session::Turn;
use async_trait::async_trait;

/// One request/response cycle with the remote assistant endpoint.
///
/// A single attempt per call: implementations do not retry and surface any
/// transport-level failure as an error.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Send the prior conversation plus a new user message; resolves to the
    /// reply text, or an error on any transport failure.
    async fn exchange(&self, history: &[Turn], message: &str) -> anyhow::Result<String>;
}
