//! Search lifecycle management.
//!
//! Runs each search as a tokio task that forwards its events over a channel,
//! tagged with the id of the search that produced them. Starting a new search
//! aborts the previous task, and messages carrying a stale id are dropped, so
//! a superseded stream can never touch the current session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::client::SearchClient;
use crate::error::SearchError;
use crate::models::SearchRequest;
use crate::ndjson::StreamEvent;
use crate::render::{project, project_final, RenderedResults};
use crate::session::SearchSessionState;
use crate::traits::HttpClient;

/// Identifies one search invocation
pub type SearchId = Uuid;

/// Update sent from a search task to its controller
#[derive(Debug, Clone, PartialEq)]
pub enum SearchMessage {
    /// A parsed stream event
    Event {
        search_id: SearchId,
        event: StreamEvent,
    },
    /// The response body ended normally
    Finished { search_id: SearchId },
    /// The search failed; nothing of it should be shown
    Failed {
        search_id: SearchId,
        error: SearchError,
    },
}

impl SearchMessage {
    pub fn search_id(&self) -> SearchId {
        match self {
            SearchMessage::Event { search_id, .. }
            | SearchMessage::Finished { search_id }
            | SearchMessage::Failed { search_id, .. } => *search_id,
        }
    }
}

/// Where the current search stands
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Idle,
    Running,
    /// Stream ended; the session holds whatever result set arrived
    Finished,
    Failed(SearchError),
    Cancelled,
}

struct ActiveSearch {
    id: SearchId,
    handle: JoinHandle<()>,
}

/// Owns the current session and the task feeding it.
pub struct SearchController<H> {
    client: Arc<SearchClient<H>>,
    message_tx: mpsc::UnboundedSender<SearchMessage>,
    active: Option<ActiveSearch>,
    session: SearchSessionState,
    status: SearchStatus,
}

impl<H: HttpClient + 'static> SearchController<H> {
    /// Create a controller and the receiver its tasks report to.
    ///
    /// Every received message should be passed back to [`handle_message`].
    ///
    /// [`handle_message`]: SearchController::handle_message
    pub fn new(client: Arc<SearchClient<H>>) -> (Self, mpsc::UnboundedReceiver<SearchMessage>) {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let controller = Self {
            client,
            message_tx,
            active: None,
            session: SearchSessionState::new(),
            status: SearchStatus::Idle,
        };
        (controller, message_rx)
    }

    /// Start a search, superseding any search still running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, request: SearchRequest) -> SearchId {
        if let Some(previous) = self.active.take() {
            tracing::info!("Superseding search {}", previous.id);
            previous.handle.abort();
        }

        let search_id = Uuid::new_v4();
        self.session = SearchSessionState::new();
        self.status = SearchStatus::Running;

        let client = Arc::clone(&self.client);
        let message_tx = self.message_tx.clone();
        let handle = tokio::spawn(async move {
            run_search_task(client, request, search_id, message_tx).await;
        });

        self.active = Some(ActiveSearch {
            id: search_id,
            handle,
        });
        search_id
    }

    /// Abort the running search. Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        active.handle.abort();
        tracing::info!("Cancelled search {}", active.id);
        self.status = SearchStatus::Cancelled;
        true
    }

    /// Apply a message from a search task.
    ///
    /// Returns false when the message belongs to a superseded or cancelled
    /// search and was ignored.
    pub fn handle_message(&mut self, message: SearchMessage) -> bool {
        let current = self.active.as_ref().map(|a| a.id);
        if current != Some(message.search_id()) {
            tracing::debug!("Ignoring message from stale search {}", message.search_id());
            return false;
        }

        match message {
            SearchMessage::Event { event, .. } => {
                self.session.apply_event(event);
            }
            SearchMessage::Finished { .. } => {
                self.active = None;
                self.status = SearchStatus::Finished;
            }
            SearchMessage::Failed { error, .. } => {
                self.active = None;
                self.session = SearchSessionState::new();
                self.status = SearchStatus::Failed(error);
            }
        }
        true
    }

    /// Id of the search whose messages are currently accepted
    pub fn current_id(&self) -> Option<SearchId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn session(&self) -> &SearchSessionState {
        &self.session
    }

    /// Result area for the current session.
    ///
    /// Pending while the search streams; once it has finished a missing
    /// result set shows as no results.
    pub fn rendered(&self, now: DateTime<Utc>) -> RenderedResults {
        let snapshot = self.session.snapshot();
        match self.status {
            SearchStatus::Finished => project_final(&snapshot, now),
            _ => project(&snapshot, now),
        }
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
}

impl<H> Drop for SearchController<H> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.handle.abort();
        }
    }
}

async fn run_search_task<H: HttpClient>(
    client: Arc<SearchClient<H>>,
    request: SearchRequest,
    search_id: SearchId,
    message_tx: mpsc::UnboundedSender<SearchMessage>,
) {
    let mut events = match client.stream_events(&request).await {
        Ok(events) => events,
        Err(error) => {
            let _ = message_tx.send(SearchMessage::Failed { search_id, error });
            return;
        }
    };

    while let Some(item) = events.next().await {
        let message = match item {
            Ok(event) => SearchMessage::Event { search_id, event },
            Err(error) => {
                let _ = message_tx.send(SearchMessage::Failed { search_id, error });
                return;
            }
        };
        if message_tx.send(message).is_err() {
            // Controller is gone
            return;
        }
    }

    let _ = message_tx.send(SearchMessage::Finished { search_id });
}
