//! Conversation session: the in-memory transcript, pending input, and the
//! busy flag guarding the single outstanding exchange.
//!
//! Nothing here touches disk: the session lives and dies with the process.

pub mod state;
pub mod types;

pub use state::Session;
pub use types::{Role, Turn, EMPTY_INPUT_ERROR, EXCHANGE_FAILED_ERROR, SAMPLE_QUESTIONS};
