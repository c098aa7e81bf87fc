//! NDJSON stream parsing logic
//!
//! Contains the stateful StreamEventParser that reassembles lines from
//! arbitrary byte chunks and emits typed events, as well as the per-line
//! dispatch function.

use crate::ndjson::decoder::Utf8Decoder;
use crate::ndjson::events::{NdjsonParseError, StreamEvent};
use crate::ndjson::payloads::{LogPayload, ResultPayload};

/// Parse one complete NDJSON line into a typed StreamEvent
pub fn parse_line(line: &str) -> Result<StreamEvent, NdjsonParseError> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| NdjsonParseError::InvalidJson {
            source: e.to_string(),
        })?;

    let event_type = value
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(NdjsonParseError::MissingType)?
        .to_string();

    match event_type.as_str() {
        "log" => parse_log_event(&event_type, value),
        "result" => parse_result_event(&event_type, value),
        _ => Err(NdjsonParseError::UnknownEventType(event_type)),
    }
}

fn parse_log_event(
    event_type: &str,
    value: serde_json::Value,
) -> Result<StreamEvent, NdjsonParseError> {
    let payload: LogPayload =
        serde_json::from_value(value).map_err(|e| NdjsonParseError::InvalidPayload {
            event_type: event_type.to_string(),
            source: e.to_string(),
        })?;
    Ok(StreamEvent::Log {
        message: payload.message,
    })
}

fn parse_result_event(
    event_type: &str,
    value: serde_json::Value,
) -> Result<StreamEvent, NdjsonParseError> {
    let payload: ResultPayload =
        serde_json::from_value(value).map_err(|e| NdjsonParseError::InvalidPayload {
            event_type: event_type.to_string(),
            source: e.to_string(),
        })?;
    Ok(StreamEvent::Result {
        records: payload.data,
    })
}

/// Stateful NDJSON parser that accumulates chunks and emits complete events
///
/// Lines that fail to parse are logged and dropped; they never end the stream.
#[derive(Debug, Default)]
pub struct StreamEventParser {
    decoder: Utf8Decoder,
    /// Unterminated tail of the stream; holds no '\n' between calls
    buffer: String,
}

impl StreamEventParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw chunk, returning every event completed by it in order
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let text = self.decoder.decode(chunk);
        let Some(last_newline) = text.rfind('\n') else {
            self.buffer.push_str(&text);
            return Vec::new();
        };

        let split_at = self.buffer.len() + last_newline + 1;
        self.buffer.push_str(&text);
        let tail = self.buffer.split_off(split_at);
        let complete = std::mem::replace(&mut self.buffer, tail);

        complete.split('\n').filter_map(dispatch_line).collect()
    }

    /// Flush the residual buffer once the underlying stream has ended
    ///
    /// Returns zero or one events. The parser is empty afterwards and can be
    /// reused for another stream.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        let flushed = self.decoder.finish();
        self.buffer.push_str(&flushed);
        let residual = std::mem::take(&mut self.buffer);
        dispatch_line(&residual).into_iter().collect()
    }

    /// Discard any buffered partial line
    pub fn reset(&mut self) {
        self.decoder = Utf8Decoder::new();
        self.buffer.clear();
    }

    /// Bytes of text waiting for their terminating newline
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

fn dispatch_line(line: &str) -> Option<StreamEvent> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return None;
    }

    match parse_line(line) {
        Ok(event) => {
            tracing::debug!("Parsed {} event", event.event_type_name());
            Some(event)
        }
        Err(e) => {
            tracing::warn!("Dropping malformed stream line: {} (line: {:.120})", e, line);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ndjson::events::ResultRecord;

    const SCENARIO: &str = concat!(
        r#"{"type":"log","message":"started"}"#,
        "\n",
        r#"{"type":"log","message":"fetching gov source"}"#,
        "\n",
        r#"{"type":"result","data":[{"title":"T1","organization":"O1","deadline":"2020-01-01T00:00:00+09:00","category":"C","source":"gov","url":"http://x"}]}"#,
        "\n",
    );

    fn log(message: &str) -> StreamEvent {
        StreamEvent::Log {
            message: message.to_string(),
        }
    }

    fn feed_all(chunks: &[&[u8]]) -> Vec<StreamEvent> {
        let mut parser = StreamEventParser::new();
        let mut events = Vec::new();
        for chunk in chunks {
            events.extend(parser.feed(chunk));
        }
        events.extend(parser.finish());
        events
    }

    // Tests for parse_line

    #[test]
    fn test_parse_log_line() {
        assert_eq!(
            parse_line(r#"{"type":"log","message":"hello"}"#).unwrap(),
            log("hello")
        );
    }

    #[test]
    fn test_parse_result_line() {
        let event = parse_line(
            r#"{"type":"result","data":[{"id":"a1","title":"T","organization":"O","deadline":null,"category":"C","source":"Tokyo Metro","url":"http://t"}]}"#,
        )
        .unwrap();
        match event {
            StreamEvent::Result { records } => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].id.as_deref(), Some("a1"));
                assert_eq!(records[0].source, "Tokyo Metro");
                assert!(records[0].deadline.is_none());
            }
            other => panic!("expected result, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_line("{not json"),
            Err(NdjsonParseError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_parse_missing_type() {
        assert_eq!(
            parse_line(r#"{"message":"x"}"#),
            Err(NdjsonParseError::MissingType)
        );
        assert_eq!(parse_line("[1,2]"), Err(NdjsonParseError::MissingType));
        assert_eq!(
            parse_line(r#"{"type":7}"#),
            Err(NdjsonParseError::MissingType)
        );
    }

    #[test]
    fn test_parse_unknown_type() {
        assert_eq!(
            parse_line(r#"{"type":"ping"}"#),
            Err(NdjsonParseError::UnknownEventType("ping".to_string()))
        );
    }

    #[test]
    fn test_parse_invalid_payload() {
        assert!(matches!(
            parse_line(r#"{"type":"log"}"#),
            Err(NdjsonParseError::InvalidPayload { ref event_type, .. }) if event_type == "log"
        ));
        assert!(matches!(
            parse_line(r#"{"type":"result","data":"nope"}"#),
            Err(NdjsonParseError::InvalidPayload { .. })
        ));
    }

    // Tests for StreamEventParser

    #[test]
    fn test_feed_single_chunk() {
        let events = feed_all(&[SCENARIO.as_bytes()]);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], log("started"));
        assert_eq!(events[1], log("fetching gov source"));
        assert!(events[2].is_terminal());
    }

    #[test]
    fn test_partial_line_is_buffered() {
        let mut parser = StreamEventParser::new();
        assert!(parser.feed(br#"{"type":"log","mess"#).is_empty());
        assert!(parser.buffered_len() > 0);
        let events = parser.feed(b"age\":\"done\"}\n");
        assert_eq!(events, vec![log("done")]);
        assert_eq!(parser.buffered_len(), 0);
    }

    #[test]
    fn test_every_split_point_yields_same_events() {
        let whole = feed_all(&[SCENARIO.as_bytes()]);
        let bytes = SCENARIO.as_bytes();
        for i in 0..=bytes.len() {
            let (a, b) = bytes.split_at(i);
            assert_eq!(feed_all(&[a, b]), whole, "split at {}", i);
        }
    }

    #[test]
    fn test_split_inside_multibyte_character() {
        let content = "{\"type\":\"log\",\"message\":\"入札案件を検索しています\"}\n";
        let whole = feed_all(&[content.as_bytes()]);
        assert_eq!(whole, vec![log("入札案件を検索しています")]);

        let bytes = content.as_bytes();
        let chunks: Vec<&[u8]> = bytes.chunks(1).collect();
        assert_eq!(feed_all(&chunks), whole);

        let chunks: Vec<&[u8]> = bytes.chunks(2).collect();
        assert_eq!(feed_all(&chunks), whole);
    }

    #[test]
    fn test_malformed_line_between_logs() {
        let content = "{\"type\":\"log\",\"message\":\"a\"}\n{garbage\n{\"type\":\"log\",\"message\":\"b\"}\n";
        let events = feed_all(&[content.as_bytes()]);
        assert_eq!(events, vec![log("a"), log("b")]);
    }

    #[test]
    fn test_unknown_type_is_dropped() {
        let content = "{\"type\":\"heartbeat\"}\n{\"type\":\"log\",\"message\":\"a\"}\n";
        assert_eq!(feed_all(&[content.as_bytes()]), vec![log("a")]);
    }

    #[test]
    fn test_blank_and_crlf_lines() {
        let content = "\n  \r\n{\"type\":\"log\",\"message\":\"a\"}\r\n\n";
        assert_eq!(feed_all(&[content.as_bytes()]), vec![log("a")]);
    }

    #[test]
    fn test_finish_parses_unterminated_line() {
        let mut parser = StreamEventParser::new();
        assert!(parser.feed(br#"{"type":"log","message":"last"}"#).is_empty());
        assert_eq!(parser.finish(), vec![log("last")]);
        assert_eq!(parser.buffered_len(), 0);
    }

    #[test]
    fn test_finish_discards_whitespace_residual() {
        let mut parser = StreamEventParser::new();
        parser.feed(b"{\"type\":\"log\",\"message\":\"a\"}\n   ");
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn test_finish_on_empty_parser() {
        let mut parser = StreamEventParser::new();
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn test_finish_drops_malformed_residual() {
        let mut parser = StreamEventParser::new();
        parser.feed(br#"{"type":"log","mess"#);
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn test_reset_discards_partial_line() {
        let mut parser = StreamEventParser::new();
        parser.feed(br#"{"type":"log","message":"lost"#);
        parser.reset();
        assert_eq!(parser.buffered_len(), 0);
        assert_eq!(
            parser.feed(b"{\"type\":\"log\",\"message\":\"kept\"}\n"),
            vec![log("kept")]
        );
    }

    #[test]
    fn test_multiple_lines_in_one_chunk_keep_order() {
        let content: String = (0..50)
            .map(|i| format!("{{\"type\":\"log\",\"message\":\"m{}\"}}\n", i))
            .collect();
        let events = feed_all(&[content.as_bytes()]);
        assert_eq!(events.len(), 50);
        assert_eq!(events[0], log("m0"));
        assert_eq!(events[49], log("m49"));
    }

    #[test]
    fn test_result_records_preserve_order() {
        let content = r#"{"type":"result","data":[{"title":"A"},{"title":"B"},{"title":"C"}]}"#;
        let events = feed_all(&[content.as_bytes()]);
        let titles: Vec<String> = match &events[0] {
            StreamEvent::Result { records } => records.iter().map(|r| r.title.clone()).collect(),
            other => panic!("expected result, got {:?}", other),
        };
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(
            events[0],
            StreamEvent::Result {
                records: vec![
                    ResultRecord {
                        title: "A".to_string(),
                        ..Default::default()
                    },
                    ResultRecord {
                        title: "B".to_string(),
                        ..Default::default()
                    },
                    ResultRecord {
                        title: "C".to_string(),
                        ..Default::default()
                    },
                ]
            }
        );
    }
}
