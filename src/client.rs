//! Bid search API client.
//!
//! Builds the search request, opens the streaming response and drives the
//! chunk pull loop through the NDJSON parser into a session.

use std::collections::VecDeque;
use std::pin::Pin;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{BidscopeResult, SearchError};
use crate::models::SearchRequest;
use crate::ndjson::{StreamEvent, StreamEventParser};
use crate::session::{SearchSessionState, SessionSnapshot};
use crate::traits::{ByteStream, Headers, HttpClient, StreamEventParserTrait};

/// Media type the service streams
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Typed events of one search, in arrival order
pub type EventStream = Pin<Box<dyn Stream<Item = BidscopeResult<StreamEvent>> + Send>>;

/// Client for the streaming bid search endpoint.
pub struct SearchClient<H = ReqwestHttpClient> {
    config: ClientConfig,
    http: H,
}

impl SearchClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest.
    pub fn from_config(config: ClientConfig) -> BidscopeResult<Self> {
        let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout)?;
        Ok(Self { config, http })
    }
}

impl<H: HttpClient> SearchClient<H> {
    /// Create a client over any transport.
    pub fn with_http(config: ClientConfig, http: H) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full request URL including query parameters.
    pub fn build_url(&self, request: &SearchRequest) -> BidscopeResult<String> {
        let base = self.config.search_url();
        let url = reqwest::Url::parse_with_params(&base, request.query_pairs()).map_err(|e| {
            SearchError::InvalidUrl {
                url: base.clone(),
                message: e.to_string(),
            }
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SearchError::InvalidUrl {
                url: base,
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url.into())
    }

    /// Issue the request and return the raw response body.
    pub async fn open_stream(&self, request: &SearchRequest) -> BidscopeResult<ByteStream> {
        let url = self.build_url(request)?;
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), NDJSON_CONTENT_TYPE.to_string());

        tracing::info!(
            "Starting search (sources: {}, text: {} chars)",
            request.sources_param(),
            request.free_text().chars().count()
        );

        self.http.get_stream(&url, &headers).await.map_err(|e| {
            tracing::error!("Search request failed: {}", e);
            SearchError::Transport(e)
        })
    }

    /// Stream the typed events of a search.
    ///
    /// A transport failure is yielded once as an `Err` and ends the stream.
    pub async fn stream_events(&self, request: &SearchRequest) -> BidscopeResult<EventStream> {
        let body = self.open_stream(request).await?;
        Ok(events_from_body(body, StreamEventParser::new()))
    }

    /// Run a search to completion with the default parser.
    ///
    /// `on_event` sees every event before it is applied, so callers can show
    /// progress while the stream is still open.
    pub async fn run<F>(
        &self,
        request: &SearchRequest,
        on_event: F,
    ) -> BidscopeResult<SessionSnapshot>
    where
        F: FnMut(&StreamEvent),
    {
        self.run_with_parser(request, StreamEventParser::new(), on_event)
            .await
    }

    /// Run a search to completion with a caller-supplied parser.
    ///
    /// On a transport failure no partial state is returned.
    pub async fn run_with_parser<P, F>(
        &self,
        request: &SearchRequest,
        mut parser: P,
        mut on_event: F,
    ) -> BidscopeResult<SessionSnapshot>
    where
        P: StreamEventParserTrait,
        F: FnMut(&StreamEvent),
    {
        let mut body = self.open_stream(request).await?;
        let mut session = SearchSessionState::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| {
                tracing::error!("Search stream interrupted: {}", e);
                SearchError::Transport(e)
            })?;
            tracing::debug!("Received {} byte chunk", chunk.len());

            for event in parser.feed(&chunk) {
                on_event(&event);
                session.apply_event(event);
            }
        }

        for event in parser.finish() {
            on_event(&event);
            session.apply_event(event);
        }

        tracing::info!(
            "Search finished: {} log messages, {} results, complete: {}",
            session.logs().len(),
            session.results().len(),
            session.is_complete()
        );
        Ok(session.into_snapshot())
    }
}

struct EventStreamState<P> {
    body: ByteStream,
    parser: P,
    pending: VecDeque<StreamEvent>,
    finished: bool,
}

/// Adapt a chunked body into a stream of events.
pub fn events_from_body<P>(body: ByteStream, parser: P) -> EventStream
where
    P: StreamEventParserTrait + 'static,
{
    let state = EventStreamState {
        body,
        parser,
        pending: VecDeque::new(),
        finished: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.pending.pop_front() {
                return Some((Ok(event), state));
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let events = state.parser.feed(&chunk);
                    state.pending.extend(events);
                }
                Some(Err(e)) => {
                    tracing::error!("Search stream interrupted: {}", e);
                    state.finished = true;
                    state.pending.clear();
                    return Some((Err(SearchError::Transport(e)), state));
                }
                None => {
                    state.finished = true;
                    let events = state.parser.finish();
                    state.pending.extend(events);
                }
            }
        }
    }))
}
