//! ``src/controller/navigation.rs``
//! ============================================================================
//! # `NavigationController`: drives one directory view
//!
//! Every navigation is a round trip: dispatch a listing request, then handle
//! its [`ListingOutcome`] once the event loop receives it. Dispatch returns
//! immediately; the request runs on a spawned task whose only effect is to
//! send the outcome back over the channel. All state changes happen in
//! [`NavigationController::handle_outcome`], on the caller's task.
//!
//! Overlapping navigations are resolved by request id: only the outcome of
//! the latest dispatch is applied, older ones are dropped as stale.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::controller::backend::ListingBackend;
use crate::error::{AppError, ListingError};
use crate::fs::path_resolver::{is_root, parent_of};
use crate::model::display_list::build_display_list;
use crate::model::entry::DirectoryEntry;
use crate::model::listing::Listing;
use crate::model::nav_state::{Freshness, NavPhase, NavigationState, RequestId};
use crate::view::traits::RenderSink;

/// Completion of one listing request, delivered back to the controller.
#[derive(Debug, Clone)]
pub struct ListingOutcome {
    pub request: RequestId,
    /// Requested path; `None` when the server default was asked for.
    pub target: Option<String>,
    pub result: Result<Listing, ListingError>,
}

/// What `handle_outcome` did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeDisposition {
    /// Listing rendered; `path` is now the current directory.
    Rendered { path: String },
    /// Error rendered; the current directory is unchanged.
    Failed(ListingError),
    /// Superseded by a later navigation and ignored.
    Discarded,
}

pub struct NavigationController<R: RenderSink> {
    backend: Arc<dyn ListingBackend>,
    render: R,
    state: NavigationState,
    outcome_tx: UnboundedSender<ListingOutcome>,
    request_timeout: Option<Duration>,
}

impl<R: RenderSink> NavigationController<R> {
    pub fn new(
        backend: Arc<dyn ListingBackend>,
        render: R,
        outcome_tx: UnboundedSender<ListingOutcome>,
    ) -> Self {
        Self {
            backend,
            render,
            state: NavigationState::new(),
            outcome_tx,
            request_timeout: None,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_path(&self) -> Option<&str> {
        self.state.current_path()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }

    /// Seeds the current path with `default_path` and requests its listing.
    /// `None` asks the server for its own default directory.
    pub fn initialize(&mut self, default_path: Option<&str>) -> Result<RequestId, AppError> {
        let default_path = default_path.filter(|p| !p.is_empty());
        info!(default_path = ?default_path, "Initializing navigation");

        self.state.initialize(default_path);
        self.navigate_to(default_path)
    }

    /// Requests the listing of `path`.
    ///
    /// An empty path is rejected without dispatching anything.
    pub fn navigate_to(&mut self, path: Option<&str>) -> Result<RequestId, AppError> {
        if path.is_some_and(str::is_empty) {
            return Err(AppError::invalid_input("path", "navigation target must not be empty"));
        }

        let was_idle = self.state.phase() == NavPhase::Idle;
        let request = self.state.begin_request();
        if was_idle {
            self.render.show_loading();
        }

        let target = path.map(str::to_string);
        info!(
            marker = "NAV_DISPATCH",
            request_id = request.get(),
            requested_path = ?target,
            "Dispatching listing request"
        );

        self.spawn_fetch(request, target);
        Ok(request)
    }

    /// Navigates to the entry's path if it is a permitted directory.
    /// Returns `Ok(None)` for inert entries.
    pub fn activate(&mut self, entry: &DirectoryEntry) -> Result<Option<RequestId>, AppError> {
        match entry.navigation_target() {
            Some(path) => {
                let path = path.to_string();
                self.navigate_to(Some(&path)).map(Some)
            }
            None => {
                debug!(name = %entry.name, "Ignoring activation of inert entry");
                Ok(None)
            }
        }
    }

    /// Requests the current directory again.
    pub fn reload(&mut self) -> Result<RequestId, AppError> {
        let path = self.state.current_path().map(str::to_string);
        self.navigate_to(path.as_deref())
    }

    /// Navigates to the parent of the current directory. Does nothing at the
    /// root or before anything has loaded.
    pub fn go_up(&mut self) -> Result<Option<RequestId>, AppError> {
        let Some(current) = self.state.current_path() else {
            return Ok(None);
        };
        if is_root(current) {
            return Ok(None);
        }

        let parent = parent_of(current);
        self.navigate_to(Some(&parent)).map(Some)
    }

    /// Applies a completed request.
    ///
    /// The loading indicator is hidden before either render callback runs.
    pub fn handle_outcome(&mut self, outcome: ListingOutcome) -> OutcomeDisposition {
        let ListingOutcome {
            request,
            target,
            result,
        } = outcome;

        if self.state.freshness(request) == Freshness::Stale {
            info!(
                marker = "NAV_STALE",
                request_id = request.get(),
                latest_request_id = self.state.latest_request().get(),
                requested_path = ?target,
                "Discarding superseded listing outcome"
            );
            return OutcomeDisposition::Discarded;
        }

        match result {
            Ok(listing) => {
                let display = build_display_list(&listing.entries, &listing.path);
                self.state.settle(request, Some(&listing.path));

                info!(
                    marker = "NAV_APPLIED",
                    request_id = request.get(),
                    path = %listing.path,
                    entries = listing.entries.len(),
                    elapsed_us = listing.elapsed.map(|d| d.as_micros() as u64),
                    "Listing applied"
                );

                self.render.hide_loading();
                self.render.record_scan_time(listing.elapsed);
                self.render.render_success(&display, &listing.path);

                OutcomeDisposition::Rendered { path: listing.path }
            }
            Err(error) => {
                self.state.settle(request, None);

                warn!(
                    marker = "NAV_FAILED",
                    request_id = request.get(),
                    requested_path = ?target,
                    error = %error,
                    "Listing request failed"
                );

                self.render.hide_loading();
                self.render.render_error(&error.user_message());

                OutcomeDisposition::Failed(error)
            }
        }
    }

    fn spawn_fetch(&self, request: RequestId, target: Option<String>) {
        let backend = Arc::clone(&self.backend);
        let outcome_tx = self.outcome_tx.clone();
        let timeout = self.request_timeout;

        tokio::spawn(async move {
            // The fetch runs on its own task so a panicking backend still
            // yields an outcome.
            let fetch_target = target.clone();
            let mut fetch =
                tokio::spawn(async move { backend.fetch(fetch_target.as_deref()).await });

            let result = match timeout {
                Some(limit) => match tokio::time::timeout(limit, &mut fetch).await {
                    Ok(joined) => flatten_join(request, joined),
                    Err(_) => {
                        fetch.abort();
                        Err(ListingError::transport(format!(
                            "request timed out after {limit:?}"
                        )))
                    }
                },
                None => flatten_join(request, fetch.await),
            };

            let outcome = ListingOutcome {
                request,
                target,
                result,
            };
            if outcome_tx.send(outcome).is_err() {
                debug!(request_id = request.get(), "Outcome receiver dropped");
            }
        });
    }
}

fn flatten_join(
    request: RequestId,
    joined: Result<Result<Listing, ListingError>, JoinError>,
) -> Result<Listing, ListingError> {
    joined.unwrap_or_else(|join_error| {
        warn!(
            request_id = request.get(),
            error = %join_error,
            "Listing task did not complete"
        );
        Err(ListingError::transport(format!(
            "listing task failed: {join_error}"
        )))
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory backend and recording render sink for controller tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Serves canned results keyed by requested path (`None` → server default).
    #[derive(Debug, Default)]
    pub struct ScriptedBackend {
        responses: Mutex<HashMap<Option<String>, Result<Listing, ListingError>>>,
        delays: Mutex<HashMap<Option<String>, Duration>>,
        requests: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedBackend {
        pub fn respond(&self, root: Option<&str>, result: Result<Listing, ListingError>) {
            self.responses
                .lock()
                .unwrap()
                .insert(root.map(str::to_string), result);
        }

        pub fn delay(&self, root: Option<&str>, delay: Duration) {
            self.delays
                .lock()
                .unwrap()
                .insert(root.map(str::to_string), delay);
        }

        pub fn requests(&self) -> Vec<Option<String>> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ListingBackend for ScriptedBackend {
        async fn fetch(&self, root: Option<&str>) -> Result<Listing, ListingError> {
            let key = root.map(str::to_string);
            self.requests.lock().unwrap().push(key.clone());

            let delay = self.delays.lock().unwrap().get(&key).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            self.responses
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .unwrap_or_else(|| {
                    Err(ListingError::Application {
                        status: 404,
                        message: format!("no such directory: {key:?}"),
                    })
                })
        }
    }

    /// Backend whose every fetch panics.
    #[derive(Debug, Default)]
    pub struct PanickingBackend;

    #[async_trait]
    impl ListingBackend for PanickingBackend {
        async fn fetch(&self, _root: Option<&str>) -> Result<Listing, ListingError> {
            panic!("listing backend exploded");
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RenderEvent {
        ShowLoading,
        HideLoading,
        Success {
            names: Vec<String>,
            path: String,
            loading_visible: bool,
        },
        Error {
            message: String,
            loading_visible: bool,
        },
    }

    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub events: Vec<RenderEvent>,
        pub loading_visible: bool,
        pub last_entries: Vec<DirectoryEntry>,
    }

    impl RecordingSink {
        pub fn count(&self, wanted: &RenderEvent) -> usize {
            self.events.iter().filter(|e| *e == wanted).count()
        }
    }

    impl RenderSink for RecordingSink {
        fn show_loading(&mut self) {
            self.loading_visible = true;
            self.events.push(RenderEvent::ShowLoading);
        }

        fn hide_loading(&mut self) {
            self.loading_visible = false;
            self.events.push(RenderEvent::HideLoading);
        }

        fn render_success(&mut self, entries: &[DirectoryEntry], path: &str) {
            self.last_entries = entries.to_vec();
            self.events.push(RenderEvent::Success {
                names: entries.iter().map(|e| e.name.to_string()).collect(),
                path: path.to_string(),
                loading_visible: self.loading_visible,
            });
        }

        fn render_error(&mut self, message: &str) {
            self.events.push(RenderEvent::Error {
                message: message.to_string(),
                loading_visible: self.loading_visible,
            });
        }
    }

    pub fn listing(path: &str, entries: Vec<DirectoryEntry>) -> Listing {
        Listing {
            path: path.to_string(),
            entries,
            elapsed: None,
        }
    }
}
