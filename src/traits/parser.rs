//! Stream parser trait abstraction.
//!
//! Lets the search client drive any chunk-to-event decoder, enabling
//! dependency injection and mocking in tests.

use crate::ndjson::StreamEvent;

/// Trait for incremental stream parsing.
///
/// The parser is stateful: it buffers partial records between `feed` calls
/// and emits events only for complete records.
///
/// # Example
///
/// ```ignore
/// use bidscope::traits::StreamEventParserTrait;
///
/// fn drain<P: StreamEventParserTrait>(parser: &mut P, chunks: &[&[u8]]) -> usize {
///     let mut count = 0;
///     for chunk in chunks {
///         count += parser.feed(chunk).len();
///     }
///     count + parser.finish().len()
/// }
/// ```
pub trait StreamEventParserTrait: Send {
    /// Feed raw bytes, returning events completed by them in order.
    fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent>;

    /// Flush buffered input at end of stream.
    fn finish(&mut self) -> Vec<StreamEvent>;

    /// Discard buffered input.
    fn reset(&mut self);
}

/// Wrapper to implement the trait for the NDJSON parser.
impl StreamEventParserTrait for crate::ndjson::StreamEventParser {
    fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        crate::ndjson::StreamEventParser::feed(self, chunk)
    }

    fn finish(&mut self) -> Vec<StreamEvent> {
        crate::ndjson::StreamEventParser::finish(self)
    }

    fn reset(&mut self) {
        crate::ndjson::StreamEventParser::reset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ndjson::StreamEventParser;

    #[test]
    fn test_parser_trait_implementation() {
        let mut parser = StreamEventParser::new();

        let events = StreamEventParserTrait::feed(&mut parser, br#"{"type":"log","message":"a"}"#);
        assert!(events.is_empty());

        let events = StreamEventParserTrait::finish(&mut parser);
        assert_eq!(
            events,
            vec![StreamEvent::Log {
                message: "a".to_string()
            }]
        );

        StreamEventParserTrait::feed(&mut parser, br#"{"type":"log""#);
        StreamEventParserTrait::reset(&mut parser);
        assert!(StreamEventParserTrait::finish(&mut parser).is_empty());
    }
}
