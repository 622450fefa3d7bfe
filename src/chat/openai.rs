use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{Completion, CompletionRequest, Role, Talk};
use crate::error::{Error, Result};
use crate::Config;

pub struct ChatClient {
    client: Client,
    api_key: String,
    url: String,
    retry: RetryPolicy,
}

impl ChatClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::completion(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: config.chat_url.clone(),
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff: Duration::from_millis(config.retry_backoff_ms),
            },
        })
    }

    async fn send_once(&self, body: &ChatRequest) -> std::result::Result<String, Failure> {
        let response = self.client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| Failure::Transient(format!("Failed to send request to {}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = format!("Request failed with status {}: {}", status, text);
            return Err(if is_retryable(status) {
                Failure::Transient(message)
            } else {
                Failure::Permanent(message)
            });
        }

        let response_body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Failure::Permanent(format!("Failed to parse completion response: {}", e)))?;

        response_body.into_content().map_err(Failure::Permanent)
    }
}

#[async_trait]
impl Completion for ChatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = ChatRequest::from(request);
        debug!("Submitting {} chars to model {}", body.messages[0].content.len(), body.model);
        with_retry(&self.retry, || self.send_once(&body)).await
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based), doubling each time.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

#[derive(Debug)]
pub enum Failure {
    Transient(String),
    Permanent(String),
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Runs `op` until it succeeds, fails permanently, or the retry budget is spent.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, Failure>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(Failure::Permanent(message)) => return Err(Error::Completion(message)),
            Err(Failure::Transient(message)) => {
                if attempt >= policy.max_retries {
                    return Err(Error::Completion(message));
                }
                let delay = policy.delay(attempt);
                warn!("Completion attempt {} failed ({}), retrying in {:?}", attempt + 1, message, delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
struct Choice {
    message: Talk,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ChatRequest {
    messages: Vec<Talk>,
    model: String,
    temperature: f32,
}

impl From<CompletionRequest> for ChatRequest {
    fn from(request: CompletionRequest) -> Self {
        Self {
            messages: vec![Talk::new(Role::User, request.prompt)],
            model: request.model,
            temperature: request.temperature,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ChatResponse {
    choices: Vec<Choice>,
}

impl ChatResponse {
    fn into_content(self) -> std::result::Result<String, String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| "Completion response contained no choices".to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn instant_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy { max_retries, backoff: Duration::ZERO }
    }

    #[test]
    fn test_request_body_shape() -> anyhow::Result<()> {
        let request = ChatRequest::from(CompletionRequest {
            prompt: "hello".to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.2,
        });
        let json = serde_json::to_value(&request)?;
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        Ok(())
    }

    #[test]
    fn test_response_content() -> anyhow::Result<()> {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Overview | 4"}}]}"#;
        let response: ChatResponse = serde_json::from_str(body)?;
        assert_eq!(response.into_content().unwrap(), "Overview | 4");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#)?;
        assert!(empty.into_content().is_err());
        Ok(())
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy { max_retries: 3, backoff: Duration::from_millis(500) };
        assert_eq!(policy.delay(0), Duration::from_millis(500));
        assert_eq!(policy.delay(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&instant_policy(1), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(Failure::Transient("timeout".to_string()))
                } else {
                    Ok("done")
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_retry(&instant_policy(2), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Failure::Transient("503".to_string())) }
        })
        .await;
        assert!(matches!(result, Err(Error::Completion(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_retry(&instant_policy(5), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Failure::Permanent("401 unauthorized".to_string())) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
