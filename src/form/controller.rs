// src/form/controller.rs
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::backend::DocsBackend;
use crate::errors::{DocError, Result, ValidationError};
use crate::form::state::FormState;
use crate::form::validate::validate_repo_url;
use crate::models::GenerationResult;

/// How a single `submit` call ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend produced documentation; the form now shows it.
    Succeeded(GenerationResult),
    /// The request failed; the form shows `DocError::user_message`.
    Failed(DocError),
    /// The input did not pass validation; no request was made.
    Rejected(ValidationError),
    /// A request was already in flight; nothing changed.
    Busy,
    /// The response arrived after a reset and was dropped.
    Superseded,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

struct Shared {
    form: FormState,
    /// Bumped by every accepted submission and every reset. A response is
    /// applied only if the generation it was issued under is still current.
    generation: u64,
}

/// Owns the documentation form's state and the two operations that change it.
///
/// Clones share the same form, so one task can `reset` while another awaits
/// `submit`.
pub struct SubmissionController<B> {
    backend: Arc<B>,
    shared: Arc<RwLock<Shared>>,
    timeout: Duration,
}

impl<B> Clone for SubmissionController<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            shared: Arc::clone(&self.shared),
            timeout: self.timeout,
        }
    }
}

impl<B: DocsBackend + 'static> SubmissionController<B> {
    pub fn new(backend: B, timeout: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            shared: Arc::new(RwLock::new(Shared {
                form: FormState::default(),
                generation: 0,
            })),
            timeout,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn snapshot(&self) -> FormState {
        self.shared.read().await.form.clone()
    }

    /// Updates the URL input. Returns false, leaving the input untouched,
    /// while a request is in flight.
    pub async fn set_url(&self, url: &str) -> bool {
        let mut shared = self.shared.write().await;
        if shared.form.loading {
            return false;
        }
        shared.form.url = url.to_string();
        true
    }

    /// Submits whatever the URL input currently holds.
    pub async fn submit_current(&self) -> SubmitOutcome {
        let url = self.shared.read().await.form.url.clone();
        self.submit(&url).await
    }

    /// Validates `input`, requests documentation for it and records the
    /// outcome in the form.
    ///
    /// The request runs on its own task: dropping this future does not cancel
    /// it, and `loading` is cleared when it resolves either way.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let (token, repo_url) = {
            let mut shared = self.shared.write().await;
            if shared.form.loading {
                log::debug!("submit ignored, a request is already in flight");
                return SubmitOutcome::Busy;
            }

            shared.form.url = input.to_string();
            let repo_url = match validate_repo_url(input) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    log::debug!("rejected input {:?}: {}", input, e);
                    shared.form.error = Some(e.to_string());
                    return SubmitOutcome::Rejected(e);
                }
            };

            shared.generation += 1;
            shared.form.loading = true;
            shared.form.error = None;
            shared.form.result = None;
            (shared.generation, repo_url)
        };

        log::info!("submitting {} (generation {})", repo_url, token);

        let backend = Arc::clone(&self.backend);
        let shared = Arc::clone(&self.shared);
        let timeout = self.timeout;
        let task = tokio::spawn(async move {
            let outcome = request_with_timeout(backend.as_ref(), &repo_url, timeout).await;
            finish(&shared, token, outcome).await
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("generation task for generation {} failed: {}", token, e);
                finish(
                    &self.shared,
                    token,
                    Err(DocError::UnexpectedResponse(format!("request task failed: {}", e))),
                )
                .await
            }
        }
    }

    /// Clears the URL, result and error. Any response still outstanding will
    /// be discarded when it lands.
    pub async fn reset(&self) {
        let mut shared = self.shared.write().await;
        shared.form.url.clear();
        shared.form.result = None;
        shared.form.error = None;
        shared.generation += 1;
    }
}

async fn request_with_timeout<B: DocsBackend>(
    backend: &B,
    repo_url: &str,
    timeout: Duration,
) -> Result<GenerationResult> {
    match tokio::time::timeout(timeout, backend.generate(repo_url)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(DocError::Timeout { limit: timeout }),
    }
}

/// Records a resolved request. `loading` always drops since only one request
/// can be in flight; result and error are touched only for the current generation.
async fn finish(
    shared: &RwLock<Shared>,
    token: u64,
    outcome: Result<GenerationResult>,
) -> SubmitOutcome {
    let mut shared = shared.write().await;
    shared.form.loading = false;

    if shared.generation != token {
        log::info!(
            "discarding response for generation {} (current is {})",
            token,
            shared.generation
        );
        return SubmitOutcome::Superseded;
    }

    match outcome {
        Ok(result) => {
            log::info!("documentation ready at {}", result.doc_url);
            shared.form.result = Some(result.clone());
            shared.form.error = None;
            SubmitOutcome::Succeeded(result)
        }
        Err(e) => {
            log::warn!("documentation request failed: {}", e);
            shared.form.error = Some(e.user_message());
            shared.form.result = None;
            SubmitOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GENERIC_ERROR;
    use crate::form::Phase;
    use crate::models::HealthReport;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Notify, oneshot};

    type Reply = Result<GenerationResult>;

    /// Answers each call with the next queued reply, or never if none is queued.
    #[derive(Default)]
    struct ScriptedBackend {
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
        replies: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
        entered: Notify,
    }

    impl ScriptedBackend {
        fn queue(&self) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.replies.lock().unwrap().push_back(rx);
            tx
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DocsBackend for ScriptedBackend {
        async fn generate(&self, repo_url: &str) -> Result<GenerationResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(repo_url.to_string());
            let reply = self.replies.lock().unwrap().pop_front();
            self.entered.notify_one();
            match reply {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(DocError::UnexpectedResponse("reply dropped".to_string()))),
                None => std::future::pending().await,
            }
        }

        async fn health(&self) -> Result<HealthReport> {
            Ok(HealthReport {
                status: "healthy".to_string(),
                services: Default::default(),
            })
        }
    }

    fn controller() -> SubmissionController<ScriptedBackend> {
        SubmissionController::new(ScriptedBackend::default(), Duration::from_secs(5))
    }

    const REPO: &str = "https://github.com/user/repo";

    #[tokio::test]
    async fn blank_input_is_rejected_without_request() {
        let form = controller();
        for input in ["", "   ", "\t"] {
            let outcome = form.submit(input).await;
            assert!(matches!(outcome, SubmitOutcome::Rejected(ValidationError::EmptyUrl)));
            let state = form.snapshot().await;
            assert_eq!(state.error.as_deref(), Some("Please enter a repository URL"));
            assert!(!state.loading);
        }
        assert_eq!(form.backend().calls(), 0);
    }

    #[tokio::test]
    async fn non_github_input_is_rejected_without_request() {
        let form = controller();
        let outcome = form.submit("https://gitlab.com/user/repo").await;
        assert!(matches!(outcome, SubmitOutcome::Rejected(ValidationError::NotGithub)));
        assert_eq!(
            form.snapshot().await.error.as_deref(),
            Some("Please enter a valid GitHub repository URL")
        );
        assert_eq!(form.backend().calls(), 0);
    }

    #[tokio::test]
    async fn loading_spans_exactly_the_request() {
        let form = controller();
        let reply = form.backend().queue();

        assert!(!form.snapshot().await.loading);

        let task = tokio::spawn({
            let form = form.clone();
            async move { form.submit(&format!("  {}  ", REPO)).await }
        });
        form.backend().entered.notified().await;

        let during = form.snapshot().await;
        assert!(during.loading);
        assert_eq!(during.phase(), Phase::Submitting);
        assert!(during.result.is_none() && during.error.is_none());

        reply.send(Ok(GenerationResult::new("ok", "/docs/1"))).unwrap();
        let outcome = task.await.unwrap();
        assert!(outcome.is_success());

        let after = form.snapshot().await;
        assert!(!after.loading);
        assert_eq!(after.phase(), Phase::Succeeded);
        assert_eq!(after.result, Some(GenerationResult::new("ok", "/docs/1")));
        assert_eq!(after.error, None);
        assert_eq!(form.backend().seen.lock().unwrap().as_slice(), [REPO.to_string()]);
    }

    #[tokio::test]
    async fn backend_detail_becomes_the_error() {
        let form = controller();
        form.backend()
            .queue()
            .send(Err(DocError::Api {
                status: 500,
                detail: Some("boom".to_string()),
            }))
            .unwrap();

        let outcome = form.submit(REPO).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(DocError::Api { status: 500, .. })));

        let state = form.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.result, None);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn missing_detail_uses_generic_error() {
        let form = controller();
        form.backend()
            .queue()
            .send(Err(DocError::Api {
                status: 500,
                detail: None,
            }))
            .unwrap();

        form.submit(REPO).await;
        let state = form.snapshot().await;
        assert_eq!(state.error.as_deref(), Some(GENERIC_ERROR));
        assert_eq!(state.result, None);
    }

    #[tokio::test]
    async fn reset_restores_initial_state() {
        let form = controller();
        form.backend()
            .queue()
            .send(Ok(GenerationResult::new("ok", "/docs/1")))
            .unwrap();
        form.submit(REPO).await;
        form.reset().await;
        assert_eq!(form.snapshot().await, FormState::default());

        form.backend()
            .queue()
            .send(Err(DocError::Api {
                status: 500,
                detail: Some("boom".to_string()),
            }))
            .unwrap();
        form.submit(REPO).await;
        form.reset().await;
        form.reset().await;
        assert_eq!(form.snapshot().await, FormState::default());
    }

    #[tokio::test]
    async fn late_response_after_reset_is_discarded() {
        let form = controller();
        let reply = form.backend().queue();

        let task = tokio::spawn({
            let form = form.clone();
            async move { form.submit(REPO).await }
        });
        form.backend().entered.notified().await;

        form.reset().await;
        let cleared = form.snapshot().await;
        assert!(cleared.url.is_empty());
        assert!(cleared.loading);

        reply.send(Ok(GenerationResult::new("late", "/docs/late"))).unwrap();
        assert!(matches!(task.await.unwrap(), SubmitOutcome::Superseded));

        let state = form.snapshot().await;
        assert_eq!(state, FormState::default());
    }

    #[tokio::test]
    async fn second_submit_while_loading_is_busy() {
        let form = controller();
        let reply = form.backend().queue();

        let task = tokio::spawn({
            let form = form.clone();
            async move { form.submit(REPO).await }
        });
        form.backend().entered.notified().await;

        assert!(matches!(
            form.submit("https://github.com/other/repo").await,
            SubmitOutcome::Busy
        ));
        assert!(!form.set_url("typing").await);
        assert_eq!(form.snapshot().await.url, REPO);
        assert_eq!(form.backend().calls(), 1);

        reply.send(Ok(GenerationResult::new("ok", "/docs/1"))).unwrap();
        assert!(task.await.unwrap().is_success());
        assert!(form.set_url("typing").await);
    }

    #[tokio::test]
    async fn validation_failure_keeps_previous_result() {
        let form = controller();
        form.backend()
            .queue()
            .send(Ok(GenerationResult::new("ok", "/docs/1")))
            .unwrap();
        form.submit(REPO).await;

        form.submit("").await;
        let state = form.snapshot().await;
        assert_eq!(state.result, Some(GenerationResult::new("ok", "/docs/1")));
        assert_eq!(state.error.as_deref(), Some("Please enter a repository URL"));
    }

    #[tokio::test]
    async fn new_submission_clears_previous_error() {
        let form = controller();
        form.submit("not a repo").await;
        assert!(form.snapshot().await.error.is_some());

        form.backend()
            .queue()
            .send(Ok(GenerationResult::new("ok", "/docs/2")))
            .unwrap();
        form.set_url(REPO).await;
        assert!(form.submit_current().await.is_success());

        let state = form.snapshot().await;
        assert_eq!(state.error, None);
        assert_eq!(state.result.map(|r| r.doc_url), Some("/docs/2".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn silent_backend_times_out() {
        let form = controller();

        let outcome = form.submit(REPO).await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(DocError::Timeout { limit }) if limit == Duration::from_secs(5)
        ));

        let state = form.snapshot().await;
        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Documentation generation timed out after 5 seconds")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sub_second_timeout_reports_milliseconds() {
        let form = SubmissionController::new(ScriptedBackend::default(), Duration::from_millis(500));

        form.submit(REPO).await;
        assert_eq!(
            form.snapshot().await.error.as_deref(),
            Some("Documentation generation timed out after 500 milliseconds")
        );
    }
}
