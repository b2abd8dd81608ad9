//! Streaming, incremental parser for the legacy SWF vector-animation
//! container format.
//!
//! Bytes arrive in arbitrarily-sized chunks via [`Parser::feed`]; the parser
//! decodes the fixed preamble, transparently decompresses the body when
//! compression is indicated (DEFLATE or LZMA), and emits a sequence of typed
//! [`Tag`] records via a user-registered [`ParserCallbacks`] and/or the
//! parsed [`Container`]'s tag list.

pub mod buffer;
pub mod callbacks;
pub mod container;
pub mod decompress;
pub mod error;
pub mod numeric;
pub mod tag;

mod parser;

#[cfg(feature = "c-abi")]
pub mod abi;

pub use buffer::Buffer;
pub use callbacks::{ParserCallbacks, TagDisposition};
pub use container::{Compression, Container, Rect};
pub use error::{ParseError, Status};
pub use parser::{Parser, ParserState};
pub use tag::{Tag, TagType};
