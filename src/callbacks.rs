//! The user-registrable callback surface.
//!
//! Grounded on `SWFParserCallbacks`' four function pointers
//! (`tag_cb`/`header_cb`/`header2_cb`/`end_cb`) plus its `ctx` field, folded
//! into a single trait per DESIGN NOTES' "Callback error channel": a trait
//! object captures its own context as ordinary struct fields instead of a
//! `void*`, and each method's `Result` return is this crate's error enum
//! directly rather than a parallel status code.

use crate::container::Container;
use crate::error::ParseError;
use crate::tag::Tag;

/// What a tag callback wants done with the tag it was just handed.
///
/// Replaces the source's "call `swf_add_tag` yourself or don't" convention:
/// `Keep` is the implicit behavior when no callback is registered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDisposition {
    /// Append the tag to [`Container::tags`].
    Keep,
    /// Discard the tag; the caller has already done whatever it needed with it.
    Drop,
}

/// Registered to observe parsing events. All methods have a default that
/// preserves the no-callbacks-registered behavior (retain every tag).
///
/// Corresponds to `SWFParserCallbacks`. Ordering guarantees (never called
/// out of stream order, `on_end` called at most once and last) are upheld
/// by [`crate::Parser`], not by implementations of this trait.
pub trait ParserCallbacks {
    /// Fired once the 8-byte uncompressed preamble has been parsed.
    /// Corresponds to `header_cb`.
    fn on_header(&mut self, container: &Container) -> Result<(), ParseError> {
        let _ = container;
        Ok(())
    }

    /// Fired once the compressed header (rect, frame rate, frame count) has
    /// been parsed. Corresponds to `header2_cb`.
    fn on_compressed_header(&mut self, container: &Container) -> Result<(), ParseError> {
        let _ = container;
        Ok(())
    }

    /// Fired for every tag except `END`. Corresponds to `tag_cb`.
    fn on_tag(&mut self, tag: &Tag) -> Result<TagDisposition, ParseError> {
        let _ = tag;
        Ok(TagDisposition::Keep)
    }

    /// Fired exactly once, for the `END` tag. Corresponds to `end_cb`.
    fn on_end(&mut self, container: &Container) -> Result<(), ParseError> {
        let _ = container;
        Ok(())
    }
}
