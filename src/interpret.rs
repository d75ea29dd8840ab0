use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::api_types::{
    InterpretRequest, InterpretResponse, InterpretSource, InterpretText, TextInterpretation,
};
use crate::error::CallError;

/// Managed ML prediction collaborator.
#[async_trait]
pub trait SentimentInterpreter: Send + Sync {
    async fn interpret(&self, text: &str) -> Result<TextInterpretation, CallError>;
}

/// Calls a prediction endpoint speaking the `textInterpretation` JSON shape.
/// Credentials, if any, are the deployment's concern (proxy, sidecar).
#[derive(Debug, Clone)]
pub struct HttpInterpreter {
    client: Client,
    endpoint: Url,
}

impl HttpInterpreter {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl SentimentInterpreter for HttpInterpreter {
    async fn interpret(&self, text: &str) -> Result<TextInterpretation, CallError> {
        let start = std::time::Instant::now();
        let endpoint = self.endpoint.as_str();

        debug!("Prediction call starting - text_length={} chars", text.len());

        let body = InterpretRequest {
            text: InterpretText {
                source: InterpretSource { text },
                kind: "ALL",
            },
        };

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| CallError::from_reqwest(endpoint, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CallError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let parsed: InterpretResponse = resp
            .json()
            .await
            .map_err(|e| CallError::from_reqwest(endpoint, e))?;

        let interpretation = parsed.text_interpretation.ok_or_else(|| {
            CallError::Prediction(format!("{endpoint} returned no textInterpretation"))
        })?;

        info!(
            "Prediction call completed - duration={:.2}s",
            start.elapsed().as_secs_f32()
        );

        Ok(interpretation)
    }
}
