//! HTTP client for the assistant endpoint.
//!
//! The request body is JSON (`{ history, message }`); the reply is consumed
//! as raw text and never parsed. That asymmetry matches the endpoint's wire
//! contract and is kept deliberately.

use crate::exchange::traits::ExchangeClient;
use crate::session::{Role, Turn};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub struct HttpExchangeClient {
    endpoint: String,
    client: Client,
}

// ── Wire types ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ExchangeRequest {
    history: Vec<HistoryTurn>,
    message: String,
}

/// Wire shape of a prior turn: the endpoint expects Gemini-style content
/// parts, not the flat text field the session keeps.
#[derive(Debug, Serialize)]
struct HistoryTurn {
    role: Role,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

impl HistoryTurn {
    fn from_turn(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        }
    }
}

impl HttpExchangeClient {
    pub fn new(endpoint: &str, request_timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: Client::builder()
                .timeout(request_timeout)
                .connect_timeout(connect_timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ExchangeClient for HttpExchangeClient {
    async fn exchange(&self, history: &[Turn], message: &str) -> anyhow::Result<String> {
        let request = ExchangeRequest {
            history: history.iter().map(HistoryTurn::from_turn).collect(),
            message: message.to_string(),
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            history_len = history.len(),
            "sending exchange"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("assistant endpoint error ({status}): {error_text}");
        }

        // The endpoint replies with the bare reply text, not JSON.
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialization() {
        let request = ExchangeRequest {
            history: vec![
                HistoryTurn::from_turn(&Turn::user("Is therapy confidential?")),
                HistoryTurn::from_turn(&Turn::model("Yes, within legal limits.")),
            ],
            message: "What are the limits?".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"role\":\"model\""));
        assert!(json.contains("\"parts\":[{\"text\":\"Is therapy confidential?\"}]"));
        assert!(json.contains("\"message\":\"What are the limits?\""));
    }

    #[test]
    fn history_preserves_transcript_order() {
        let turns = vec![
            Turn::user("one"),
            Turn::model("two"),
            Turn::user("three"),
            Turn::model("four"),
        ];
        let request = ExchangeRequest {
            history: turns.iter().map(HistoryTurn::from_turn).collect(),
            message: "five".to_string(),
        };

        let value: serde_json::Value = serde_json::from_str(
            &serde_json::to_string(&request).unwrap(),
        )
        .unwrap();
        let history = value["history"].as_array().unwrap();
        let texts: Vec<&str> = history
            .iter()
            .map(|entry| entry["parts"][0]["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, ["one", "two", "three", "four"]);
    }

    #[test]
    fn empty_history_serializes_as_empty_array() {
        let request = ExchangeRequest {
            history: Vec::new(),
            message: "hello".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"history\":[]"));
    }

    #[test]
    fn client_keeps_configured_endpoint() {
        let client = HttpExchangeClient::new(
            "http://localhost:8080/gemini/",
            Duration::from_secs(5),
            Duration::from_secs(2),
        );
        assert_eq!(client.endpoint(), "http://localhost:8080/gemini/");
    }
}
