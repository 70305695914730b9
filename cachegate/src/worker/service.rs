//! Event dispatcher for one worker generation.
//!
//! `ServiceWorker::dispatch` maps each [`WorkerEvent`] to its handler and
//! returns the handler's future. An event counts as resolved once that
//! future completes.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::error::WorkerError;
use super::event::{EventOutcome, WorkerEvent};
use super::state::{is_valid_transition, WorkerState};
use super::sync::{replay_offline_actions, SYNC_TAG};
use crate::arbiter::{Arbiter, ArbiterError};
use crate::network::Fetcher;
use crate::notification::{
    NotificationId, NotificationOptions, Notifier, APP_ROOT, EXPLORE_ACTION, NOTIFICATION_TITLE,
};
use crate::resource::Request;

/// A worker generation: its arbiter, its notifier and its lifecycle state.
pub struct ServiceWorker<F, N> {
    arbiter: Arbiter<F>,
    notifier: N,
    state: RwLock<WorkerState>,
    skip_waiting: AtomicBool,
    clients_claimed: AtomicBool,
}

impl<F: Fetcher, N: Notifier> ServiceWorker<F, N> {
    pub fn new(arbiter: Arbiter<F>, notifier: N) -> Self {
        Self {
            arbiter,
            notifier,
            state: RwLock::new(WorkerState::Parsed),
            skip_waiting: AtomicBool::new(false),
            clients_claimed: AtomicBool::new(false),
        }
    }

    pub fn arbiter(&self) -> &Arbiter<F> {
        &self.arbiter
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn state(&self) -> WorkerState {
        *self.state.read()
    }

    /// Whether install asked to supersede a waiting worker immediately.
    pub fn skipped_waiting(&self) -> bool {
        self.skip_waiting.load(Ordering::Acquire)
    }

    /// Whether activation took control of already-open clients.
    pub fn clients_claimed(&self) -> bool {
        self.clients_claimed.load(Ordering::Acquire)
    }

    /// Run the handler for `event` to completion.
    pub async fn dispatch(&self, event: WorkerEvent) -> Result<EventOutcome, WorkerError> {
        debug!(kind = %event.kind(), state = %self.state(), "Dispatching event");
        match event {
            WorkerEvent::Install => self.on_install().await,
            WorkerEvent::Activate => self.on_activate().await,
            WorkerEvent::Fetch(request) => self.on_fetch(request).await,
            WorkerEvent::Sync { tag } => self.on_sync(&tag).await,
            WorkerEvent::Push { data } => {
                let text = data.map(|d| String::from_utf8_lossy(&d).into_owned());
                self.on_push(text.as_deref()).await
            }
            WorkerEvent::NotificationClick {
                notification,
                action,
            } => {
                self.on_notification_click(notification, action.as_deref())
                    .await
            }
        }
    }

    async fn on_install(&self) -> Result<EventOutcome, WorkerError> {
        info!(cache = %self.arbiter.config().cache_name(), "Install");
        self.transition(WorkerState::Installing)?;

        match self.arbiter.seed().await {
            Ok(report) => {
                self.transition(WorkerState::Installed)?;
                info!(entries = report.entries, "Skip waiting");
                self.skip_waiting.store(true, Ordering::Release);
                Ok(EventOutcome::Installed(report))
            }
            Err(e) => {
                warn!(error = %e, "Install failed");
                self.transition(WorkerState::Redundant)?;
                Err(WorkerError::Install(e))
            }
        }
    }

    async fn on_activate(&self) -> Result<EventOutcome, WorkerError> {
        info!(cache = %self.arbiter.config().cache_name(), "Activate");
        self.transition(WorkerState::Activating)?;

        let retired = self.arbiter.retire_old_generations();

        self.transition(WorkerState::Activated)?;
        info!("Claiming clients");
        self.clients_claimed.store(true, Ordering::Release);
        Ok(EventOutcome::Activated { retired })
    }

    async fn on_fetch(&self, request: Request) -> Result<EventOutcome, WorkerError> {
        if !self.state().can_intercept_fetch() {
            debug!(url = %request.url(), state = %self.state(), "Worker not active, not intercepting");
            return Ok(EventOutcome::NotIntercepted);
        }

        match self.arbiter.arbitrate(request).await {
            Ok(Some(arbitration)) => Ok(EventOutcome::Responded(arbitration)),
            Ok(None) => Ok(EventOutcome::NotIntercepted),
            Err(ArbiterError::GenerationRetired { cache }) => {
                info!(cache = %cache, "Superseded by a newer worker");
                self.mark_redundant();
                Ok(EventOutcome::NotIntercepted)
            }
            Err(e) => Err(WorkerError::Fetch(e)),
        }
    }

    async fn on_sync(&self, tag: &str) -> Result<EventOutcome, WorkerError> {
        info!(tag, "Background sync");
        if tag != SYNC_TAG {
            return Ok(EventOutcome::Ignored);
        }
        replay_offline_actions().await;
        Ok(EventOutcome::Synced)
    }

    async fn on_push(&self, payload: Option<&str>) -> Result<EventOutcome, WorkerError> {
        info!(has_payload = payload.is_some(), "Push received");
        let options = NotificationOptions::for_push(payload, Utc::now());
        let id = self
            .notifier
            .show_notification(NOTIFICATION_TITLE, options)
            .await?;
        Ok(EventOutcome::NotificationShown(id))
    }

    async fn on_notification_click(
        &self,
        notification: NotificationId,
        action: Option<&str>,
    ) -> Result<EventOutcome, WorkerError> {
        info!(id = notification.0, action = action.unwrap_or(""), "Notification click received");
        self.notifier.close_notification(notification).await?;

        if action != Some(EXPLORE_ACTION) {
            return Ok(EventOutcome::NotificationClicked {
                opened_window: false,
            });
        }

        let url = self.arbiter.config().origin().join(APP_ROOT)?;
        self.notifier.open_window(&url).await?;
        Ok(EventOutcome::NotificationClicked {
            opened_window: true,
        })
    }

    /// Retire this worker after its generation was deleted by a successor.
    ///
    /// Concurrent fetches may all observe the deletion; only the first one
    /// changes state.
    fn mark_redundant(&self) {
        let mut state = self.state.write();
        if *state != WorkerState::Redundant {
            debug!(from = %*state, "Worker state changed to redundant");
            *state = WorkerState::Redundant;
        }
    }

    fn transition(&self, to: WorkerState) -> Result<(), WorkerError> {
        let mut state = self.state.write();
        let from = *state;
        if !is_valid_transition(from, to) {
            return Err(WorkerError::InvalidTransition { from, to });
        }
        *state = to;
        debug!(%from, %to, "Worker state changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use reqwest::{Method, StatusCode};

    use crate::arbiter::{ArbiterConfig, ServedFrom};
    use crate::cache::CacheStorage;
    use crate::network::MockFetcher;
    use crate::notification::{NotifierCall, RecordingNotifier, DEFAULT_PUSH_BODY};

    const ORIGIN: &str = "http://localhost:5000";

    fn worker(cache_name: &str, storage: Arc<CacheStorage>) -> ServiceWorker<MockFetcher, RecordingNotifier> {
        let config = ArbiterConfig::new(cache_name, url::Url::parse(ORIGIN).unwrap())
            .with_seed_assets(["/", "/manifest.json"]);
        let fetcher = MockFetcher::new();
        fetcher.serve(&format!("{}/", ORIGIN), "home");
        fetcher.serve(&format!("{}/manifest.json", ORIGIN), "{}");
        ServiceWorker::new(Arbiter::new(config, storage, fetcher), RecordingNotifier::new())
    }

    fn get(path: &str) -> Request {
        Request::parse(Method::GET, &format!("{}{}", ORIGIN, path)).unwrap()
    }

    #[tokio::test]
    async fn test_install_seeds_and_skips_waiting() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));

        let outcome = worker.dispatch(WorkerEvent::Install).await.unwrap();

        assert!(matches!(outcome, EventOutcome::Installed(ref r) if r.entries == 2));
        assert_eq!(worker.state(), WorkerState::Installed);
        assert!(worker.skipped_waiting());
    }

    #[tokio::test]
    async fn test_failed_install_makes_worker_redundant() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));
        worker.arbiter().fetcher().fail(&format!("{}/manifest.json", ORIGIN));

        let result = worker.dispatch(WorkerEvent::Install).await;

        assert!(matches!(result, Err(WorkerError::Install(_))));
        assert_eq!(worker.state(), WorkerState::Redundant);
        assert!(!worker.skipped_waiting());
        assert!(matches!(
            worker.dispatch(WorkerEvent::Activate).await,
            Err(WorkerError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_install_keeps_previous_generation() {
        let storage = Arc::new(CacheStorage::in_memory());
        let previous = worker("app-v1", Arc::clone(&storage));
        previous.dispatch(WorkerEvent::Install).await.unwrap();
        previous.dispatch(WorkerEvent::Activate).await.unwrap();

        let next = worker("app-v2", Arc::clone(&storage));
        next.arbiter().fetcher().set_offline(true);
        assert!(next.dispatch(WorkerEvent::Install).await.is_err());

        assert!(storage.has("app-v1"));
        assert!(!storage.has("app-v2"));
        let served = previous.dispatch(WorkerEvent::Fetch(get("/"))).await.unwrap();
        assert!(matches!(served, EventOutcome::Responded(ref a) if a.source == ServedFrom::Cache));
    }

    #[tokio::test]
    async fn test_superseded_worker_becomes_redundant() {
        let storage = Arc::new(CacheStorage::in_memory());
        let v1 = worker("app-v1", Arc::clone(&storage));
        v1.dispatch(WorkerEvent::Install).await.unwrap();
        v1.dispatch(WorkerEvent::Activate).await.unwrap();
        let v2 = worker("app-v2", Arc::clone(&storage));
        v2.dispatch(WorkerEvent::Install).await.unwrap();
        v2.dispatch(WorkerEvent::Activate).await.unwrap();
        let calls_before = v1.arbiter().fetcher().calls();

        let first = v1.dispatch(WorkerEvent::Fetch(get("/verse"))).await.unwrap();
        let second = v1.dispatch(WorkerEvent::Fetch(get("/"))).await.unwrap();
        v1.arbiter().flush_refills().await;

        assert_eq!(first, EventOutcome::NotIntercepted);
        assert_eq!(second, EventOutcome::NotIntercepted);
        assert_eq!(v1.state(), WorkerState::Redundant);
        assert_eq!(v1.arbiter().fetcher().calls(), calls_before);
        assert_eq!(storage.keys(), vec!["app-v2".to_string()]);
    }

    #[tokio::test]
    async fn test_activate_requires_install() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));

        let result = worker.dispatch(WorkerEvent::Activate).await;

        assert!(matches!(
            result,
            Err(WorkerError::InvalidTransition {
                from: WorkerState::Parsed,
                to: WorkerState::Activating
            })
        ));
    }

    #[tokio::test]
    async fn test_activate_retires_and_claims() {
        let storage = Arc::new(CacheStorage::in_memory());
        storage.open("app-v0");
        let worker = worker("app-v1", Arc::clone(&storage));

        worker.dispatch(WorkerEvent::Install).await.unwrap();
        let outcome = worker.dispatch(WorkerEvent::Activate).await.unwrap();

        assert_eq!(
            outcome,
            EventOutcome::Activated {
                retired: vec!["app-v0".to_string()]
            }
        );
        assert_eq!(storage.keys(), vec!["app-v1".to_string()]);
        assert!(worker.clients_claimed());
        assert_eq!(worker.state(), WorkerState::Activated);
    }

    #[tokio::test]
    async fn test_fetch_before_activation_not_intercepted() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));
        worker.dispatch(WorkerEvent::Install).await.unwrap();

        let outcome = worker.dispatch(WorkerEvent::Fetch(get("/"))).await.unwrap();

        assert_eq!(outcome, EventOutcome::NotIntercepted);
    }

    #[tokio::test]
    async fn test_fetch_after_activation_served_from_seed() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));
        worker.dispatch(WorkerEvent::Install).await.unwrap();
        worker.dispatch(WorkerEvent::Activate).await.unwrap();
        let calls_after_seed = worker.arbiter().fetcher().calls();

        let outcome = worker.dispatch(WorkerEvent::Fetch(get("/"))).await.unwrap();

        match outcome {
            EventOutcome::Responded(arbitration) => {
                assert_eq!(arbitration.source, ServedFrom::Cache);
                assert_eq!(arbitration.response.status(), StatusCode::OK);
                assert_eq!(arbitration.response.text(), "home");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(worker.arbiter().fetcher().calls(), calls_after_seed);
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_error() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));
        worker.dispatch(WorkerEvent::Install).await.unwrap();
        worker.dispatch(WorkerEvent::Activate).await.unwrap();
        worker.arbiter().fetcher().set_offline(true);

        let result = worker.dispatch(WorkerEvent::Fetch(get("/uncached"))).await;

        assert!(matches!(result, Err(WorkerError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_cross_origin_fetch_not_intercepted() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));
        worker.dispatch(WorkerEvent::Install).await.unwrap();
        worker.dispatch(WorkerEvent::Activate).await.unwrap();
        let request = Request::parse(Method::GET, "http://localhost:8501/stream").unwrap();

        let outcome = worker.dispatch(WorkerEvent::Fetch(request)).await.unwrap();

        assert_eq!(outcome, EventOutcome::NotIntercepted);
    }

    #[tokio::test]
    async fn test_sync_known_tag() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));
        let outcome = worker.dispatch(WorkerEvent::sync(SYNC_TAG)).await.unwrap();
        assert_eq!(outcome, EventOutcome::Synced);
    }

    #[tokio::test]
    async fn test_sync_unknown_tag_ignored() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));
        let outcome = worker.dispatch(WorkerEvent::sync("other")).await.unwrap();
        assert_eq!(outcome, EventOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_push_without_payload_shows_default() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));

        let outcome = worker
            .dispatch(WorkerEvent::Push { data: None })
            .await
            .unwrap();

        assert_eq!(outcome, EventOutcome::NotificationShown(NotificationId(1)));
        match &worker.notifier().calls()[0] {
            NotifierCall::Show { title, options } => {
                assert_eq!(title, "Wisdom Weaver");
                assert_eq!(options.body, DEFAULT_PUSH_BODY);
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_push_with_payload() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));

        worker
            .dispatch(WorkerEvent::push_text("Today: 2.47"))
            .await
            .unwrap();

        match &worker.notifier().calls()[0] {
            NotifierCall::Show { options, .. } => assert_eq!(options.body, "Today: 2.47"),
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_explore_click_closes_and_opens_root() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));

        let outcome = worker
            .dispatch(WorkerEvent::NotificationClick {
                notification: NotificationId(7),
                action: Some("explore".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(outcome, EventOutcome::NotificationClicked { opened_window: true });
        assert_eq!(
            worker.notifier().calls(),
            vec![
                NotifierCall::Close(NotificationId(7)),
                NotifierCall::OpenWindow("http://localhost:5000/".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_close_click_only_dismisses() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));

        let outcome = worker
            .dispatch(WorkerEvent::NotificationClick {
                notification: NotificationId(3),
                action: Some("close".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(outcome, EventOutcome::NotificationClicked { opened_window: false });
        assert_eq!(worker.notifier().calls(), vec![NotifierCall::Close(NotificationId(3))]);
    }

    #[tokio::test]
    async fn test_body_click_only_dismisses() {
        let worker = worker("app-v1", Arc::new(CacheStorage::in_memory()));

        worker
            .dispatch(WorkerEvent::NotificationClick {
                notification: NotificationId(4),
                action: None,
            })
            .await
            .unwrap();

        assert_eq!(worker.notifier().calls(), vec![NotifierCall::Close(NotificationId(4))]);
    }
}
