//! # Generation Pipeline
//!
//! Turns a component description into a [`GenerationRecord`]:
//!
//! ```text
//! prompt + framework
//!         │  (reject blank prompt, reject while busy)
//!         ▼
//!   build_prompt()
//!         │
//!         ▼
//!   ModelClient::generate_text()   ← deadline + cancellation token
//!         │
//!         ▼
//!   extract_code()
//!         │
//!         ▼
//!   GenerationRecord { prompt, framework, code, created_at }
//! ```
//!
//! The pipeline never touches storage; persisting the record is the caller's
//! job. Exactly one request is made per call and nothing is retried.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use componentai_core::{
    AppConfig, FailureCause, FrameworkChoice, GenerationError, GenerationRecord,
};
use tokio_util::sync::CancellationToken;

use crate::client::{GeminiClient, ModelClient};
use crate::extract::{extract_code, has_fence};
use crate::prompt::{PromptOptions, build_prompt};

// ============================================================================
// GenerationRequest
// ============================================================================

/// Everything needed for one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub framework: FrameworkChoice,
    pub options: PromptOptions,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, framework: FrameworkChoice) -> Self {
        Self {
            prompt: prompt.into(),
            framework,
            options: PromptOptions::default(),
        }
    }

    /// Ask for (or suppress) explanatory comments
    pub fn with_comments(mut self, include: bool) -> Self {
        self.options.include_comments = include;
        self
    }
}

// ============================================================================
// GenerationPipeline
// ============================================================================

/// Single-flight generation pipeline bound to one model client
pub struct GenerationPipeline {
    client: Arc<dyn ModelClient>,
    timeout: Duration,
    /// Token of the outstanding request; `Some` means busy
    in_flight: Mutex<Option<CancellationToken>>,
}

impl std::fmt::Debug for GenerationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationPipeline")
            .field("timeout", &self.timeout)
            .field("busy", &self.is_busy())
            .finish()
    }
}

impl GenerationPipeline {
    /// Create a pipeline around any model client
    pub fn new(client: Arc<dyn ModelClient>, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            in_flight: Mutex::new(None),
        }
    }

    /// Create a pipeline talking to Gemini as configured
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(GeminiClient::from_config(config)),
            config.request_timeout(),
        )
    }

    /// Request deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether a request is outstanding
    pub fn is_busy(&self) -> bool {
        self.slot().is_some()
    }

    /// Cancel the outstanding request, if any. Returns whether one was cancelled.
    pub fn cancel_in_flight(&self) -> bool {
        match self.slot().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Generate a component with the code-only instruction
    pub async fn generate(
        &self,
        prompt: &str,
        framework: FrameworkChoice,
    ) -> Result<GenerationRecord, GenerationError> {
        self.generate_request(GenerationRequest::new(prompt, framework))
            .await
    }

    /// Run one generation.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::EmptyPrompt`] if the prompt is blank (no request is made)
    /// - [`GenerationError::Busy`] if another request is outstanding (no request is made)
    /// - [`GenerationError::Failed`] for transport, service, timeout or cancellation failures
    pub async fn generate_request(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationRecord, GenerationError> {
        if request.prompt.trim().is_empty() {
            tracing::debug!("Rejected blank prompt");
            return Err(GenerationError::EmptyPrompt);
        }

        let (_guard, cancel) = self.acquire()?;
        let instruction = build_prompt(&request.prompt, request.framework, request.options);

        tracing::info!(
            "Requesting {} component ({} chars of description)",
            request.framework.value(),
            request.prompt.trim().len()
        );
        let started = Instant::now();

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FailureCause::Cancelled),
            result = tokio::time::timeout(self.timeout, self.client.generate_text(&instruction)) => {
                result.unwrap_or(Err(FailureCause::Timeout))
            }
        };

        match outcome {
            Ok(text) => {
                if !has_fence(&text) {
                    tracing::debug!("Response had no fenced block, using it verbatim");
                }
                let code = extract_code(&text);
                tracing::info!(
                    "Generated {} bytes of code in {:.1?}",
                    code.len(),
                    started.elapsed()
                );
                Ok(GenerationRecord::new(request.prompt, request.framework, code))
            }
            Err(cause) => {
                tracing::error!("Generation failed after {:.1?}: {}", started.elapsed(), cause);
                Err(GenerationError::Failed(cause))
            }
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claim the single in-flight slot
    fn acquire(&self) -> Result<(InFlightGuard<'_>, CancellationToken), GenerationError> {
        let mut slot = self.slot();
        if slot.is_some() {
            tracing::warn!("Rejected generation while another is in progress");
            return Err(GenerationError::Busy);
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        Ok((
            InFlightGuard {
                slot: &self.in_flight,
            },
            token,
        ))
    }
}

/// Releases the in-flight slot when the request finishes or is dropped
struct InFlightGuard<'a> {
    slot: &'a Mutex<Option<CancellationToken>>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Returns a fixed answer, optionally waiting for a release signal first
    struct ScriptedClient {
        answer: Result<String, FailureCause>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
        last_instruction: Mutex<String>,
    }

    impl ScriptedClient {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self::build(Ok(text.to_string()), None))
        }

        fn failing(cause: FailureCause) -> Arc<Self> {
            Arc::new(Self::build(Err(cause), None))
        }

        fn gated(text: &str, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self::build(Ok(text.to_string()), Some(gate)))
        }

        fn build(answer: Result<String, FailureCause>, gate: Option<Arc<Notify>>) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
                gate,
                last_instruction: Mutex::new(String::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn generate_text(&self, instruction: &str) -> Result<String, FailureCause> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_instruction.lock().unwrap() = instruction.to_string();
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.answer.clone()
        }
    }

    /// Never answers
    struct HangingClient;

    #[async_trait]
    impl ModelClient for HangingClient {
        async fn generate_text(&self, _instruction: &str) -> Result<String, FailureCause> {
            std::future::pending().await
        }
    }

    fn pipeline(client: Arc<dyn ModelClient>) -> GenerationPipeline {
        GenerationPipeline::new(client, Duration::from_secs(5))
    }

    async fn wait_until_busy(pipeline: &GenerationPipeline) {
        for _ in 0..200 {
            if pipeline.is_busy() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("pipeline never became busy");
    }

    #[tokio::test]
    async fn test_fenced_response_extracted() {
        let client = ScriptedClient::ok("Sure!\n```html\n<div>...</div>\n```\n");
        let record = pipeline(client.clone())
            .generate("a pricing card with three tiers", FrameworkChoice::HtmlTailwind)
            .await
            .unwrap();

        assert_eq!(record.code, "<div>...</div>");
        assert_eq!(record.framework.value(), "html-tailwind");
        assert_eq!(record.prompt, "a pricing card with three tiers");
        assert!(record.created_at > 0);
        assert_eq!(client.calls(), 1);

        let instruction = client.last_instruction.lock().unwrap().clone();
        assert!(instruction.contains("a pricing card with three tiers"));
        assert!(instruction.contains("Framework to use: html-tailwind"));
    }

    #[tokio::test]
    async fn test_unfenced_response_trimmed() {
        let client = ScriptedClient::ok("\n  <main>plain</main>  \n");
        let record = pipeline(client)
            .generate("hero", FrameworkChoice::HtmlCss)
            .await
            .unwrap();
        assert_eq!(record.code, "<main>plain</main>");
    }

    #[tokio::test]
    async fn test_blank_prompt_never_calls_client() {
        let client = ScriptedClient::ok("```html\n<p></p>\n```");
        let pipeline = pipeline(client.clone());

        for prompt in ["", "   ", "\n\t "] {
            let err = pipeline
                .generate(prompt, FrameworkChoice::HtmlCss)
                .await
                .unwrap_err();
            assert_eq!(err, GenerationError::EmptyPrompt);
        }
        assert_eq!(client.calls(), 0);
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_client_failure_surfaces() {
        let client = ScriptedClient::failing(FailureCause::Service {
            status: 500,
            message: "boom".into(),
        });
        let pipeline = pipeline(client);
        let err = pipeline
            .generate("card", FrameworkChoice::HtmlCss)
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::service(500, "boom"));
        assert!(!pipeline.is_busy(), "slot released after failure");
    }

    #[tokio::test]
    async fn test_deadline_resolves_as_timeout() {
        let pipeline = GenerationPipeline::new(Arc::new(HangingClient), Duration::from_millis(50));
        let err = pipeline
            .generate("card", FrameworkChoice::HtmlCss)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_second_call_rejected_while_busy() {
        let gate = Arc::new(Notify::new());
        let client = ScriptedClient::gated("```html\n<p>one</p>\n```", gate.clone());
        let pipeline = Arc::new(pipeline(client.clone()));

        let first = tokio::spawn({
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.generate("first", FrameworkChoice::HtmlCss).await }
        });
        wait_until_busy(&pipeline).await;

        let err = pipeline
            .generate("second", FrameworkChoice::HtmlCss)
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::Busy);
        assert_eq!(client.calls(), 1);

        gate.notify_one();
        let record = first.await.unwrap().unwrap();
        assert_eq!(record.code, "<p>one</p>");
        assert!(!pipeline.is_busy());

        // The slot is free again
        gate.notify_one();
        assert!(pipeline.generate("third", FrameworkChoice::HtmlCss).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_in_flight() {
        let pipeline = Arc::new(pipeline(Arc::new(HangingClient)));
        assert!(!pipeline.cancel_in_flight());

        let task = tokio::spawn({
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.generate("card", FrameworkChoice::HtmlCss).await }
        });
        wait_until_busy(&pipeline).await;

        assert!(pipeline.cancel_in_flight());
        let err = task.await.unwrap().unwrap_err();
        assert!(err.is_cancelled());
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_comment_option_reaches_instruction() {
        let client = ScriptedClient::ok("<p></p>");
        let pipeline = pipeline(client.clone());
        pipeline
            .generate_request(GenerationRequest::new("x", FrameworkChoice::HtmlCss).with_comments(false))
            .await
            .unwrap();
        let instruction = client.last_instruction.lock().unwrap().clone();
        assert!(instruction.contains("Do NOT include"));
    }

    #[tokio::test]
    async fn test_plain_generate_sends_code_only_instruction() {
        let client = ScriptedClient::ok("<p></p>");
        let pipeline = pipeline(client.clone());
        pipeline.generate("x", FrameworkChoice::HtmlCss).await.unwrap();
        let instruction = client.last_instruction.lock().unwrap().clone();
        assert!(instruction.contains("Do NOT include explanations, text, comments"));
        assert!(!instruction.contains("Add brief comments"));

        pipeline
            .generate_request(GenerationRequest::new("x", FrameworkChoice::HtmlCss).with_comments(true))
            .await
            .unwrap();
        let instruction = client.last_instruction.lock().unwrap().clone();
        assert!(instruction.contains("Add brief comments"));
    }
}
