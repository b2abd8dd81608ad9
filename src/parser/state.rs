//! The parser's top-level state machine states.
//!
//! Corresponds to `PARSER_STARTED`/`PARSER_HEADER`/`PARSER_LZMA_HEADER`/
//! `PARSER_BODY`/`PARSER_FINISHED` in `parser.h`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Accumulating the 8-byte uncompressed preamble.
    Started,
    /// Accumulating/parsing the (possibly compressed) header: rect, frame rate, frame count.
    Header,
    /// LZMA only: accumulating the 9-byte length+properties block before the decoder can start.
    LzmaHeader,
    /// Reading tags from the decoded stream.
    Body,
    /// The `END` tag has been observed; no further tags will be parsed.
    Finished,
}
