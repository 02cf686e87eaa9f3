use crate::core::prompt::{build_prompt, GenerateContentRequest};
use crate::core::response::{api_error, questions_from_body};
use crate::domain::model::Mcq;
use crate::domain::ports::{ConfigProvider, QuestionGenerator};
use crate::utils::error::{McqError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Client for the `generateContent` endpoint.
pub struct GeminiClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> GeminiClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Endpoint without the key; the key goes in the query string at send time.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base().trim_end_matches('/'),
            self.config.model()
        )
    }
}

#[async_trait]
impl<C: ConfigProvider> QuestionGenerator for GeminiClient<C> {
    async fn generate(&self, context: &str, num_questions: usize) -> Result<Vec<Mcq>> {
        let api_key = self.config.api_key().ok_or_else(|| McqError::MissingApiKey {
            env_var: self.config.api_key_env().to_string(),
        })?;

        let body = GenerateContentRequest::new(
            build_prompt(context, num_questions),
            self.config.structured_output(),
        );

        let endpoint = self.endpoint();
        tracing::info!(
            "🤖 Requesting {} questions from {} ({} chars of context)",
            num_questions,
            self.config.model(),
            context.chars().count()
        );
        tracing::debug!("POST {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", api_key.as_str())])
            .timeout(self.config.request_timeout())
            .json(&body)
            .send()
            .await
            .map_err(|e| McqError::Transport(e.without_url()))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let text = response
            .text()
            .await
            .map_err(|e| McqError::Transport(e.without_url()))?;

        if status != reqwest::StatusCode::OK {
            return Err(api_error(status.as_u16(), &text));
        }

        let questions = questions_from_body(&text)?;
        if questions.len() != num_questions {
            tracing::warn!(
                "Asked for {} questions, model returned {}",
                num_questions,
                questions.len()
            );
        }
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config_for(server: &MockServer, key_env: &str) -> GeneratorConfig {
        GeneratorConfig {
            api_base: server.url("/v1"),
            api_key_env: key_env.to_string(),
            timeout_seconds: 5,
            ..GeneratorConfig::default()
        }
    }

    fn mcq_envelope(count: usize) -> serde_json::Value {
        let questions: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "question": format!("Question {}?", i + 1),
                    "options": ["w", "x", "y", "z"],
                    "correct_answer": (["A", "B", "C", "D"][i % 4])
                })
            })
            .collect();
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": serde_json::to_string(&questions).unwrap() }] }
            }]
        })
    }

    #[tokio::test]
    async fn test_generate_success() {
        std::env::set_var("PDF_MCQ_GEMINI_TEST_OK", "  secret-key  ");
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/models/gemini-2.5-flash:generateContent")
                .query_param("key", "secret-key")
                .body_contains("generate exactly 3 Multiple Choice Questions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mcq_envelope(3));
        });

        let client = GeminiClient::new(config_for(&server, "PDF_MCQ_GEMINI_TEST_OK"));
        let questions = client.generate("Some context text.", 3).await.unwrap();

        api_mock.assert();
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q.options.len() == 4));
    }

    // No request is sent, so no runtime beyond a simple executor is needed.
    #[test]
    fn test_generate_without_key_makes_no_request() {
        std::env::remove_var("PDF_MCQ_GEMINI_TEST_UNSET");
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200);
        });

        let client = GeminiClient::new(config_for(&server, "PDF_MCQ_GEMINI_TEST_UNSET"));
        let err = tokio_test::block_on(client.generate("context", 2)).unwrap_err();

        api_mock.assert_hits(0);
        assert_eq!(
            err.to_string(),
            "PDF_MCQ_GEMINI_TEST_UNSET not found in environment variables."
        );
    }

    #[tokio::test]
    async fn test_generate_quota_error() {
        std::env::set_var("PDF_MCQ_GEMINI_TEST_QUOTA", "k");
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST);
            then.status(429)
                .header("Content-Type", "application/json")
                .json_body(json!({"error": {"message": "quota exceeded"}}));
        });

        let client = GeminiClient::new(config_for(&server, "PDF_MCQ_GEMINI_TEST_QUOTA"));
        let err = client.generate("context", 2).await.unwrap_err();

        api_mock.assert();
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "Google API 429: quota exceeded");
    }

    #[tokio::test]
    async fn test_generate_sends_schema_when_structured() {
        std::env::set_var("PDF_MCQ_GEMINI_TEST_SCHEMA", "k");
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).body_contains("responseSchema");
            then.status(200).json_body(mcq_envelope(1));
        });

        let mut config = config_for(&server, "PDF_MCQ_GEMINI_TEST_SCHEMA");
        config.structured_output = true;
        let questions = GeminiClient::new(config).generate("ctx", 1).await.unwrap();

        api_mock.assert();
        assert_eq!(questions.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_is_recoverable() {
        std::env::set_var("PDF_MCQ_GEMINI_TEST_DOWN", "k");
        let closed_port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = GeneratorConfig {
            api_base: format!("http://127.0.0.1:{}/v1", closed_port),
            api_key_env: "PDF_MCQ_GEMINI_TEST_DOWN".to_string(),
            timeout_seconds: 2,
            ..GeneratorConfig::default()
        };

        let err = GeminiClient::new(config).generate("ctx", 1).await.unwrap_err();
        assert!(matches!(err, McqError::Transport(_)));
        assert!(err.to_string().starts_with("Request failed: "));
        assert!(!err.to_string().contains("key="));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = GeneratorConfig {
            api_base: "https://example.com/v1/".to_string(),
            ..GeneratorConfig::default()
        };
        assert_eq!(
            GeminiClient::new(config).endpoint(),
            "https://example.com/v1/models/gemini-2.5-flash:generateContent"
        );
    }
}
