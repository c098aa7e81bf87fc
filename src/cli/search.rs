//! Terminal front end for a single search.

use std::io::Write;

use chrono::Local;
use color_eyre::Result;

use crate::client::SearchClient;
use crate::models::SearchRequest;
use crate::ndjson::StreamEvent;
use crate::render::{project_with_clock, render_log_line, render_table, RenderedResults};
use crate::traits::{Clock, HttpClient};

/// Run `request`, printing progress as it streams and the table at the end.
///
/// Progress lines go to `out` as soon as each log event is parsed. A
/// transport failure returns the `SearchError` inside the report so callers
/// can recover it with `downcast_ref`.
pub async fn run_search<H, W>(
    client: &SearchClient<H>,
    request: &SearchRequest,
    clock: &dyn Clock,
    out: &mut W,
) -> Result<RenderedResults>
where
    H: HttpClient,
    W: Write,
{
    tracing::info!("Using search service at {}", client.config().base_url);
    let sources: Vec<&str> = request.sources().map(|s| s.display_name()).collect();
    writeln!(
        out,
        "[{}] Searching {} for \"{}\"",
        clock.now().with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
        sources.join(", "),
        request.free_text()
    )?;
    out.flush()?;

    let mut write_error = None;
    let snapshot = client
        .run(request, |event| {
            if write_error.is_some() {
                return;
            }
            if let StreamEvent::Log { message } = event {
                let written = writeln!(out, "{}", render_log_line(message)).and_then(|_| out.flush());
                if let Err(e) = written {
                    write_error = Some(e);
                }
            }
        })
        .await?;
    if let Some(e) = write_error {
        return Err(e.into());
    }

    if !snapshot.is_complete {
        tracing::warn!("Stream ended without a result event");
    }

    // The body has ended, so an absent result set means no results
    let rendered = project_with_clock(&snapshot, clock, true);
    writeln!(out)?;
    write!(out, "{}", render_table(&rendered))?;
    if let RenderedResults::Rows(rows) = &rendered {
        writeln!(
            out,
            "{} results ({} closed)",
            rows.len(),
            rendered.expired_count()
        )?;
    }
    out.flush()?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::ClientConfig;
    use crate::error::SearchError;
    use crate::models::Source;
    use crate::render::{EXPIRED_MARKER, NO_RESULTS_MESSAGE};
    use crate::traits::{FixedClock, HttpError};
    use chrono::{TimeZone, Utc};

    fn client(response: MockResponse) -> SearchClient<MockHttpClient> {
        let http = MockHttpClient::new();
        http.set_default_response(response);
        SearchClient::with_http(ClientConfig::default(), http)
    }

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_prints_logs_then_table() {
        let body = concat!(
            "{\"type\":\"log\",\"message\":\"started\"}\n",
            "{\"type\":\"log\",\"message\":\"fetching gov source\"}\n",
            "{\"type\":\"result\",\"data\":[{\"id\":\"1\",\"title\":\"Road repair\",",
            "\"organization\":\"City\",\"deadline\":\"2020-01-01\",\"category\":\"Construction\",",
            "\"source\":\"Gov Portal\",\"url\":\"http://x\"}]}\n",
        );
        let client = client(MockResponse::chunked(body, 11));
        let request = SearchRequest::new("road", [Source::Gov]).unwrap();
        let mut out = Vec::new();

        let rendered = run_search(&client, &request, &clock(), &mut out)
            .await
            .unwrap();
        assert_eq!(rendered.expired_count(), 1);

        let text = String::from_utf8(out).unwrap();
        let started = text.find("・started").unwrap();
        let fetching = text.find("・fetching gov source").unwrap();
        let title = text.find("Road repair").unwrap();
        assert!(started < fetching && fetching < title);
        assert!(text.contains(EXPIRED_MARKER));
        assert!(text.contains("1 results (1 closed)"));
        assert!(text.contains("Searching Gov Portal for \"road\""));
    }

    #[tokio::test]
    async fn test_empty_results_print_indicator() {
        let client = client(MockResponse::chunked(
            "{\"type\":\"result\",\"data\":[]}\n",
            4,
        ));
        let request = SearchRequest::all_sources("nothing").unwrap();
        let mut out = Vec::new();

        let rendered = run_search(&client, &request, &clock(), &mut out)
            .await
            .unwrap();
        assert_eq!(rendered, RenderedResults::NoResults);
        assert!(String::from_utf8(out).unwrap().contains(NO_RESULTS_MESSAGE));
    }

    #[tokio::test]
    async fn test_stream_without_result_prints_indicator() {
        let client = client(MockResponse::chunked(
            "{\"type\":\"log\",\"message\":\"still working\"}\n",
            6,
        ));
        let request = SearchRequest::all_sources("x").unwrap();
        let mut out = Vec::new();

        let rendered = run_search(&client, &request, &clock(), &mut out)
            .await
            .unwrap();
        assert_eq!(rendered, RenderedResults::NoResults);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("・still working"));
        assert!(text.contains(NO_RESULTS_MESSAGE));
    }

    #[tokio::test]
    async fn test_failure_surfaces_search_error() {
        let client = client(MockResponse::Error(HttpError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        }));
        let request = SearchRequest::all_sources("x").unwrap();
        let mut out = Vec::new();

        let report = run_search(&client, &request, &clock(), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(
            report.downcast_ref::<SearchError>(),
            Some(SearchError::Transport(HttpError::ServerError { status: 503, .. }))
        ));
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Title"));
    }
}
