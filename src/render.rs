//! Presentation of a search session.
//!
//! Projects a [`SessionSnapshot`] into rows with their expiry state and
//! formats them as a plain terminal table. Projection is idempotent and can
//! run after every update; results are only materialized once a result set
//! has arrived or the stream has ended.

use chrono::{DateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::expiry::classify;
use crate::ndjson::ResultRecord;
use crate::session::SessionSnapshot;
use crate::traits::Clock;

/// Text shown in place of an empty result table
pub const NO_RESULTS_MESSAGE: &str = "No results found";

/// Appended to the deadline of a bid that is no longer accepting entries
pub const EXPIRED_MARKER: &str = "[closed]";

const HEADERS: [&str; 6] = ["Title", "Organization", "Deadline", "Category", "Source", "URL"];
const MAX_CELL_WIDTH: usize = 48;
const COLUMN_GAP: &str = "  ";

/// A result record with its render-time expiry flag
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub record: ResultRecord,
    pub is_expired: bool,
}

/// What the result area should show
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedResults {
    /// Still streaming; no result set yet
    Pending,
    /// The search finished with an empty result set
    NoResults,
    Rows(Vec<ResultRow>),
}

impl RenderedResults {
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            RenderedResults::Pending | RenderedResults::NoResults => &[],
            RenderedResults::Rows(rows) => rows,
        }
    }

    pub fn expired_count(&self) -> usize {
        self.rows().iter().filter(|r| r.is_expired).count()
    }
}

/// Classify every result in the snapshot against `now`.
///
/// Returns [`RenderedResults::Pending`] until the result event has arrived.
pub fn project(snapshot: &SessionSnapshot, now: DateTime<Utc>) -> RenderedResults {
    if !snapshot.is_complete {
        return RenderedResults::Pending;
    }
    project_final(snapshot, now)
}

/// Projection once the response body has ended.
///
/// A stream that closed without a result event shows the no-results
/// indicator like an empty result set.
pub fn project_final(snapshot: &SessionSnapshot, now: DateTime<Utc>) -> RenderedResults {
    if snapshot.results.is_empty() {
        return RenderedResults::NoResults;
    }

    RenderedResults::Rows(
        snapshot
            .results
            .iter()
            .map(|record| ResultRow {
                is_expired: classify(record, now),
                record: record.clone(),
            })
            .collect(),
    )
}

/// [`project`] or, once the stream has ended, [`project_final`] at the
/// injected clock's current time
pub fn project_with_clock(
    snapshot: &SessionSnapshot,
    clock: &dyn Clock,
    stream_ended: bool,
) -> RenderedResults {
    if stream_ended {
        project_final(snapshot, clock.now())
    } else {
        project(snapshot, clock.now())
    }
}

/// Bullet line for a streamed progress message
pub fn render_log_line(message: &str) -> String {
    format!("・{}", message)
}

/// Format the results as an aligned text table
pub fn render_table(results: &RenderedResults) -> String {
    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let body: Vec<Vec<String>> = results.rows().iter().map(row_cells).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width().min(MAX_CELL_WIDTH));
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(&header, &widths));
    out.push('\n');
    let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');

    match results {
        RenderedResults::Pending => {}
        RenderedResults::NoResults => {
            out.push_str(NO_RESULTS_MESSAGE);
            out.push('\n');
        }
        RenderedResults::Rows(_) => {
            for cells in &body {
                out.push_str(&format_line(cells, &widths));
                out.push('\n');
            }
        }
    }
    out
}

fn row_cells(row: &ResultRow) -> Vec<String> {
    let record = &row.record;
    let mut deadline = record.deadline().unwrap_or("-").to_string();
    if row.is_expired {
        deadline.push(' ');
        deadline.push_str(EXPIRED_MARKER);
    }
    vec![
        record.title.clone(),
        record.organization.clone(),
        deadline,
        record.category.clone(),
        record.source.clone(),
        record.url.clone(),
    ]
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            // URLs stay intact so they remain clickable
            line.push_str(cell);
        } else {
            let cell = truncate_to_width(cell, *width);
            let pad = width.saturating_sub(cell.width());
            line.push_str(&cell);
            line.push_str(&" ".repeat(pad));
            line.push_str(COLUMN_GAP);
        }
    }
    line.trim_end().to_string()
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
