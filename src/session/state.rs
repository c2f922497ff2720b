use super::types::{Turn, EMPTY_INPUT_ERROR, EXCHANGE_FAILED_ERROR};
use crate::exchange::ExchangeClient;

/// Mutable session context passed to every operation.
///
/// `busy` is true only while an exchange is outstanding; submission and
/// clearing are refused during that window, editing the pending input is
/// not. Turns are appended only by completed exchanges and removed only by
/// [`Session::clear`], so the transcript stays in chronological order.
#[derive(Debug, Default)]
pub struct Session {
    transcript: Vec<Turn>,
    pending_input: String,
    error: Option<String>,
    busy: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Replace the pending input. Always permitted, including while an
    /// exchange is in flight; the in-flight message was snapshotted at
    /// submission and is unaffected.
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// First phase of a submission: validate and mark the session busy.
    ///
    /// Returns the trimmed message to exchange, or `None` when the session
    /// is already busy (silent no-op) or the trimmed input is empty (the
    /// validation error is set). The caller runs the exchange and must feed
    /// the outcome back through [`Session::complete_submit`].
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.busy {
            return None;
        }
        let message = self.pending_input.trim();
        if message.is_empty() {
            self.error = Some(EMPTY_INPUT_ERROR.to_string());
            return None;
        }
        let message = message.to_string();
        self.busy = true;
        self.error = None;
        Some(message)
    }

    /// Second phase of a submission: apply the exchange outcome.
    ///
    /// Success appends the user turn followed by the reply turn and clears
    /// the pending input; failure sets the transport error and leaves the
    /// transcript and pending input untouched. Either way the busy flag
    /// drops, exactly once per submission.
    pub fn complete_submit(&mut self, message: &str, outcome: anyhow::Result<String>) {
        match outcome {
            Ok(reply) => {
                self.transcript.push(Turn::user(message));
                self.transcript.push(Turn::model(reply));
                self.pending_input.clear();
            }
            Err(err) => {
                tracing::warn!(error = %err, "exchange failed");
                self.error = Some(EXCHANGE_FAILED_ERROR.to_string());
            }
        }
        self.busy = false;
    }

    /// Submit the pending input through `client` and apply the outcome.
    ///
    /// The client sees the transcript as it was before this submission; the
    /// new message rides alongside and only joins the transcript once the
    /// reply arrives.
    pub async fn submit(&mut self, client: &dyn ExchangeClient) {
        let Some(message) = self.begin_submit() else {
            return;
        };
        let outcome = client.exchange(&self.transcript, &message).await;
        self.complete_submit(&message, outcome);
    }

    /// Reset pending input, error, and transcript to the initial empty
    /// state. Refused while busy or when there is nothing to clear.
    /// Returns whether anything was reset.
    pub fn clear(&mut self) -> bool {
        if self.busy || (self.pending_input.is_empty() && self.transcript.is_empty()) {
            return false;
        }
        self.pending_input.clear();
        self.error = None;
        self.transcript.clear();
        true
    }
}
