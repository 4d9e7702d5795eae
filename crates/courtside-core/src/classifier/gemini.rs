//! Gemini `generateContent` classifier over HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::request::ClassifierRequest;
use super::VideoClassifier;
use crate::config::ClassifierConfig;
use crate::domain::{CourtsideError, Result};

/// HTTP client for the Gemini generative language API.
pub struct GeminiClassifier {
    config: ClassifierConfig,
    api_key: String,
    http_client: reqwest::Client,
}

impl GeminiClassifier {
    /// Build a client. Fails when no API key is configured.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| CourtsideError::InvalidConfig("GEMINI_API_KEY is not set".to_string()))?;
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("courtside/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| CourtsideError::Classifier(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            api_key,
            http_client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn send(&self, request: &ClassifierRequest) -> std::result::Result<String, String> {
        let response = self
            .http_client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_request(request))
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("classifier returned HTTP {status}"));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| format!("undecodable response body: {e}"))?;
        body.text().ok_or_else(|| "response carried no text".to_string())
    }
}

#[async_trait]
impl VideoClassifier for GeminiClassifier {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn classify(&self, request: &ClassifierRequest) -> Option<String> {
        if !request.has_frames() {
            debug!("no frames to classify");
            return None;
        }
        match self.send(request).await {
            Ok(text) => Some(text),
            Err(error) => {
                warn!(model = %self.config.model, error = %error, "classifier unavailable");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a ClassifierRequest) -> Self {
        let mut parts = vec![Part::Text {
            text: &request.prompt,
        }];
        parts.extend(request.frames.iter().map(|frame| Part::InlineData {
            inline_data: InlineData {
                mime_type: &frame.mime_type,
                data: &frame.data,
            },
        }));
        Self {
            contents: vec![Content { parts }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::request::Frame;

    #[test]
    fn test_new_requires_api_key() {
        let err = GeminiClassifier::new(ClassifierConfig::default())
            .err()
            .expect("missing key must fail");
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let config = ClassifierConfig {
            endpoint: "http://localhost:8080/".to_string(),
            ..ClassifierConfig::default()
        }
        .with_api_key("k");
        let classifier = GeminiClassifier::new(config).expect("client");
        assert_eq!(
            classifier.url(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = ClassifierRequest::new(&[Frame::from_bytes("image/png", b"abc")]);
        let body = serde_json::to_value(GenerateContentRequest::from_request(&request))
            .expect("serialize");
        let parts = &body["contents"][0]["parts"];
        assert!(parts[0]["text"].as_str().expect("text").contains("handball"));
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "YWJj");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "{\"isHandball\":"}, {"text": " true}"}]}}]
        }))
        .expect("deserialize");
        assert_eq!(body.text().as_deref(), Some("{\"isHandball\": true}"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let body: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).expect("deserialize");
        assert_eq!(body.text(), None);
    }

    #[tokio::test]
    async fn test_classify_without_frames_skips_network() {
        let classifier =
            GeminiClassifier::new(ClassifierConfig::default().with_api_key("k")).expect("client");
        assert_eq!(classifier.classify(&ClassifierRequest::new(&[])).await, None);
    }
}
