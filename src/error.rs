//! Error codes and the error descriptor shared by every component.
//!
//! Grounded on the teacher's `Lz4FError` (`frame/types.rs`): a plain C-style
//! enum with an `error_name()` mapping plus `Display`/`Error` impls, rather
//! than a derive-macro error crate. `ErrorCode` plays the role of the
//! source's `SWFError` (positive statuses and negative error codes share one
//! enum); `ParseError` narrows that down to the negative, terminal half,
//! which is what propagates through `Result`.

use core::fmt;

/// Positive, non-failure statuses returned by [`crate::Parser::feed`].
///
/// Corresponds to `SWF_OK` / `SWF_NEED_MORE_DATA` / `SWF_FINISHED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No error: a tag or header piece was parsed, the decoder made
    /// progress, or bytes were simply buffered while still below a fixed
    /// threshold (the 8-byte preamble, the LZMA header). Corresponds to
    /// `SWF_OK`, which `swf_parser_append` returns in both cases.
    Progress,
    /// Only bytes were buffered; no tag could be completed yet.
    NeedMoreData,
    /// The end-of-stream tag was observed. No further tags will be parsed.
    Finished,
}

/// Closed taxonomy of terminal parse failures.
///
/// Corresponds to the negative half of `SWFError`. Each variant carries a
/// static, human-readable description, matching `SWFErrorDesc::text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Malformed bytes were detected by the framer or a decompressor.
    Invalid(&'static str),
    /// A feature was compiled out (`deflate`/`lzma` cargo feature disabled).
    Recompile(&'static str),
    /// A code path that is not (yet) implemented was reached.
    Unimplemented(&'static str),
    /// An internal invariant was violated; this indicates a parser bug.
    Internal(&'static str),
    /// An allocation could not be satisfied.
    NoMem(&'static str),
    /// A decoder reported a status this crate doesn't recognize.
    Unknown(&'static str),
}

impl ParseError {
    /// The static description carried by this error, matching `SWFErrorDesc::text`.
    pub fn message(&self) -> &'static str {
        match self {
            ParseError::Invalid(s)
            | ParseError::Recompile(s)
            | ParseError::Unimplemented(s)
            | ParseError::Internal(s)
            | ParseError::NoMem(s)
            | ParseError::Unknown(s) => s,
        }
    }

    /// The stable error-kind name, independent of the attached message.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParseError::Invalid(_) => "INVALID",
            ParseError::Recompile(_) => "RECOMPILE",
            ParseError::Unimplemented(_) => "UNIMPLEMENTED",
            ParseError::Internal(_) => "INTERNAL_ERROR",
            ParseError::NoMem(_) => "NOMEM",
            ParseError::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind_name(), self.message())
    }
}

impl std::error::Error for ParseError {}

/// The last error seen by a component, copied up to the owning [`crate::Parser`].
///
/// Corresponds to `SWFErrorDesc`. Inner components (the elastic buffer, the
/// decompression adapters) populate their own descriptor; [`copy_error`]
/// implements the source's `copy_error` primitive that propagates it to a
/// parent's single error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorDescriptor {
    error: Option<ParseError>,
}

impl ErrorDescriptor {
    /// An empty descriptor, as held by a freshly constructed parser.
    pub const fn empty() -> Self {
        ErrorDescriptor { error: None }
    }

    /// Records `err` as the most recent failure.
    pub fn set(&mut self, err: ParseError) {
        self.error = Some(err);
    }

    /// The last recorded error, if any.
    pub fn get(&self) -> Option<ParseError> {
        self.error
    }
}

/// Copies `err` into `desc` when it represents a failure, then returns it unchanged.
///
/// Mirrors the source's `copy_error(parent, child, err)`, which only copies
/// the descriptor when `err < 0`.
pub fn copy_error<T>(desc: &mut ErrorDescriptor, result: Result<T, ParseError>) -> Result<T, ParseError> {
    if let Err(e) = &result {
        desc.set(*e);
    }
    result
}
