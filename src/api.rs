//! Client for the prediction backend.
//!
//! [`PredictionBackend`] is the seam the chat session talks to; [`HttpBackend`]
//! is the reqwest implementation used by the app.

use crate::config::{ApiFlavor, ClientConfig};
use crate::error::{ApiError, ApiResult};
use crate::types::{ChatResponse, PredictRequest, SimplePrediction, SymptomsResponse};
use async_trait::async_trait;
use reqwest::Client;

const SYMPTOMS_PATH: &str = "/api/symptoms";

/// A decoded answer from one of the predict endpoints.
#[derive(Clone, Debug)]
pub enum PredictionOutcome {
    Chat(ChatResponse),
    Simple(SimplePrediction),
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PredictionBackend {
    /// Known symptom names for autocomplete.
    async fn symptoms(&self) -> ApiResult<Vec<String>>;

    async fn predict(&self, symptoms: &str) -> ApiResult<PredictionOutcome>;
}

pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = Client::builder().timeout(config.request_timeout).build()?;
        #[cfg(target_arch = "wasm32")]
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    async fn read_body(response: reqwest::Response) -> ApiResult<String> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::Status { status, body })
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PredictionBackend for HttpBackend {
    async fn symptoms(&self) -> ApiResult<Vec<String>> {
        let url = self.config.endpoint(SYMPTOMS_PATH);
        tracing::debug!(%url, "fetching symptom catalog");
        let response = self.client.get(&url).send().await?;
        let body = Self::read_body(response).await?;
        parse_symptoms(&body)
    }

    async fn predict(&self, symptoms: &str) -> ApiResult<PredictionOutcome> {
        let url = self.config.endpoint(self.config.flavor.predict_path());
        tracing::debug!(%url, "requesting prediction");
        let response = self
            .client
            .post(&url)
            .json(&PredictRequest { symptoms })
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        parse_prediction(self.config.flavor, &body)
    }
}

pub fn parse_symptoms(body: &str) -> ApiResult<Vec<String>> {
    let parsed: SymptomsResponse = serde_json::from_str(body)?;
    match (parsed.status.as_deref(), parsed.symptoms) {
        (Some("success"), Some(symptoms)) => Ok(symptoms),
        (_, _) => Err(ApiError::Backend(
            parsed
                .error
                .unwrap_or_else(|| "symptom list unavailable".to_string()),
        )),
    }
}

pub fn parse_prediction(flavor: ApiFlavor, body: &str) -> ApiResult<PredictionOutcome> {
    match flavor {
        ApiFlavor::Chat => Ok(PredictionOutcome::Chat(serde_json::from_str(body)?)),
        ApiFlavor::Simple => Ok(PredictionOutcome::Simple(serde_json::from_str(body)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symptom_catalog() {
        let body = r#"{"status":"success","symptoms":["itching","skin_rash"]}"#;
        assert_eq!(parse_symptoms(body).unwrap(), vec!["itching", "skin_rash"]);
    }

    #[test]
    fn symptom_error_payload_is_backend_error() {
        let body = r#"{"error":"Failed to get symptoms: boom"}"#;
        match parse_symptoms(body) {
            Err(ApiError::Backend(msg)) => assert!(msg.contains("boom")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_chat_prediction() {
        let body = r#"{"status":"success","messages":[{"type":"text","content":"hi"}]}"#;
        match parse_prediction(ApiFlavor::Chat, body).unwrap() {
            PredictionOutcome::Chat(resp) => {
                assert!(resp.is_success());
                assert!(!resp.is_unified_response);
                assert_eq!(resp.messages.map(|m| m.len()), Some(1));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_simple_prediction() {
        let body = r#"{"disease":"Flu","cure":"Rest"}"#;
        match parse_prediction(ApiFlavor::Simple, body).unwrap() {
            PredictionOutcome::Simple(pred) => {
                assert_eq!(pred.disease, "Flu");
                assert_eq!(pred.cure.as_deref(), Some("Rest"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn garbage_is_decode_error() {
        assert!(matches!(
            parse_prediction(ApiFlavor::Chat, "<html>"),
            Err(ApiError::Decode(_))
        ));
    }
}
