//! The top-level streaming parser: ties the elastic buffer, the active
//! decoder, the tag framer, and the callback surface together.
//!
//! Grounded on `swf_parser_append`'s three-stage fall-through (STARTED byte
//! budget, LZMA_HEADER byte budget, per-compression decode loop) and
//! `parse_buf`'s drain-until-stalled loop, the way the teacher's
//! `lz4f_decompress` drives its own `'sm: loop { match dctx.stage { ... } }`
//! state machine one step at a time per call.

mod framer;
mod state;

use crate::buffer::Buffer;
use crate::callbacks::{ParserCallbacks, TagDisposition};
use crate::container::{Compression, Container};
use crate::decompress::{Decoder, StepStatus};
use crate::error::{copy_error, ErrorDescriptor, ParseError, Status};
use framer::TagEvent;
pub use state::ParserState;

/// `LZMA_PROPS_SIZE` (5) + the 4-byte compressed-length field that precedes
/// it in the wire format. Corresponds to the source's `LZMA_HEADER_SIZE`.
const LZMA_HEADER_SIZE: usize = 9;

/// A streaming parser for one container stream.
///
/// Corresponds to `SWFParser`. Owns its [`Container`], its elastic
/// [`Buffer`], and whichever [`Decoder`] the stream's compression byte
/// selected. Not `Send`/`Sync`-restricted beyond what its owned fields
/// already imply — it holds no shared or thread-affine state, so moving a
/// `Parser` to another thread between `feed` calls is sound (independent
/// parsers never share state, matching §5's concurrency model).
pub struct Parser {
    buf: Buffer,
    container: Container,
    decoder: Option<Decoder>,
    state: ParserState,
    callbacks: Option<Box<dyn ParserCallbacks>>,
    error: ErrorDescriptor,
}

impl Parser {
    /// Corresponds to `swf_parser_init`.
    pub fn new() -> Parser {
        Parser {
            buf: Buffer::new(),
            container: Container::new(),
            decoder: None,
            state: ParserState::Started,
            callbacks: None,
            error: ErrorDescriptor::empty(),
        }
    }

    /// Replaces the registered callback set. Corresponds to
    /// `swf_parser_set_callbacks`; idempotent, as there.
    pub fn set_callbacks(&mut self, callbacks: Box<dyn ParserCallbacks>) {
        self.callbacks = Some(callbacks);
    }

    /// Borrows the parsed container. Corresponds to `swf_parser_get_swf`.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The last error recorded by this parser, if any. Corresponds to
    /// `swf_parser_get_error`.
    pub fn last_error(&self) -> Option<ParseError> {
        self.error.get()
    }

    /// The parser's current state, mostly useful for diagnostics/tests.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Feeds the next chunk of input bytes. Corresponds to `swf_parser_append`.
    ///
    /// Chunk boundaries are invisible to the result: feeding `S` in one call
    /// or in many arbitrarily small calls produces the same sequence of
    /// callback invocations (see spec's chunking-invariance property).
    pub fn feed(&mut self, input: &[u8]) -> Result<Status, ParseError> {
        let result = self.feed_inner(input);
        copy_error(&mut self.error, result)
    }

    fn feed_inner(&mut self, mut input: &[u8]) -> Result<Status, ParseError> {
        if self.state == ParserState::Started {
            let need = 8usize.saturating_sub(self.buf.len());
            let take = need.min(input.len());
            if take > 0 {
                self.buf.append(&input[..take])?;
                input = &input[take..];
            }
            if self.buf.len() < 8 {
                // Matches `swf_parser_append`'s `if (parser->buf.size < 8) return
                // SWF_OK;` — bytes were buffered, not rejected, so this is OK, not
                // NEED_MORE_DATA.
                return Ok(Status::Progress);
            }
            self.parse_preamble()?;
            self.buf = Buffer::new();
        }

        if self.state == ParserState::LzmaHeader {
            let need = LZMA_HEADER_SIZE.saturating_sub(self.buf.len());
            let take = need.min(input.len());
            if take > 0 {
                self.buf.append(&input[..take])?;
                input = &input[take..];
            }
            if self.buf.len() < LZMA_HEADER_SIZE {
                // Same `SWF_OK`-on-incomplete-buffer contract as the STARTED stage above.
                return Ok(Status::Progress);
            }
            self.finish_lzma_header()?;
            self.buf = Buffer::new();
        }

        self.run_decode_loop(input)
    }

    /// Reads the 8-byte uncompressed preamble (compression byte, "WS" magic,
    /// version, declared size), fires the header callback, and either builds
    /// the decoder directly (identity/DEFLATE) or transitions to
    /// `LzmaHeader` to await the properties block. Corresponds to
    /// `parse_swf_header` + `setup_decompression`.
    fn parse_preamble(&mut self) -> Result<(), ParseError> {
        let compression_byte = self.buf.get8();
        let compression = Compression::from_byte(compression_byte).ok_or(ParseError::Invalid(
            "parse_swf_header: unrecognized compression byte, expected 'F', 'C', or 'Z'",
        ))?;
        let w = self.buf.get8();
        let s = self.buf.get8();
        if w != b'W' || s != b'S' {
            return Err(ParseError::Invalid(
                "parse_swf_header: check_header reported an invalid header",
            ));
        }
        let version = self.buf.get8();
        let declared_size = self.buf.get32();

        self.container.compression = Some(compression);
        self.container.version = version;
        self.container.declared_size = declared_size;
        log::debug!(
            "parsed preamble: compression={:?} version={} declared_size={}",
            compression,
            version,
            declared_size
        );

        if let Some(cb) = self.callbacks.as_mut() {
            cb.on_header(&self.container)?;
        }

        match compression {
            Compression::Identity => {
                self.decoder = Some(Decoder::identity());
                self.state = ParserState::Header;
            }
            Compression::Deflate => {
                self.decoder = Some(Decoder::deflate()?);
                self.state = ParserState::Header;
            }
            Compression::Lzma => {
                self.state = ParserState::LzmaHeader;
            }
        }
        Ok(())
    }

    /// Consumes the 4-byte compressed-length field and the 5-byte LZMA1
    /// properties blob, builds the LZMA decoder, and returns to `Header`.
    /// Corresponds to `LzmaDec_Allocate`/`LzmaDec_Init` in the
    /// `PARSER_LZMA_HEADER` fall-through of `swf_parser_append`.
    fn finish_lzma_header(&mut self) -> Result<(), ParseError> {
        let _compressed_length = self.buf.get32();
        let mut properties = [0u8; 5];
        properties.copy_from_slice(&self.buf.take(5));
        self.decoder = Some(Decoder::lzma(&properties)?);
        self.state = ParserState::Header;
        log::debug!("built LZMA decoder from properties {:02x?}", properties);
        Ok(())
    }

    /// Drives the active decoder over `input`, draining as many header
    /// pieces/tags as become available after each decode step, growing the
    /// elastic buffer under the same two-phase strategy as
    /// `swf_parser_append`'s per-compression loops.
    fn run_decode_loop(&mut self, mut input: &[u8]) -> Result<Status, ParseError> {
        let mut overall = Status::NeedMoreData;
        loop {
            if self.buf.free_tail() == 0 && self.buf.shift() == 0 {
                self.buf.grow_by(input.len().max(1) * 4)?;
            }

            let mut decoder = self
                .decoder
                .take()
                .expect("run_decode_loop: decoder must be set before decoding body bytes");
            let step = decoder.step(input, &mut self.buf);
            self.decoder = Some(decoder);
            let step = step?;
            input = &input[step.consumed..];

            let needs_more_space = match step.status {
                StepStatus::Finished => return self.drain_framer(),
                StepStatus::NeedMoreOutput => true,
                StepStatus::Progress | StepStatus::NeedMoreInput => false,
            };

            match self.drain_framer()? {
                Status::Progress => overall = Status::Progress,
                Status::NeedMoreData => {
                    if needs_more_space {
                        self.buf.grow(2)?;
                    }
                }
                Status::Finished => return Ok(Status::Finished),
            }

            if input.is_empty() {
                return Ok(overall);
            }
        }
    }

    /// Parses as many compressed-header pieces / tags as the buffer
    /// currently holds, invoking callbacks and updating the container.
    /// Corresponds to `parse_buf`.
    fn drain_framer(&mut self) -> Result<Status, ParseError> {
        let mut made_progress = false;
        loop {
            match self.state {
                ParserState::Header => match framer::parse_compressed_header(&mut self.buf, &mut self.container)? {
                    Status::Progress => {
                        made_progress = true;
                        self.state = ParserState::Body;
                        if let Some(cb) = self.callbacks.as_mut() {
                            cb.on_compressed_header(&self.container)?;
                        }
                    }
                    Status::NeedMoreData => {
                        return Ok(if made_progress {
                            Status::Progress
                        } else {
                            Status::NeedMoreData
                        })
                    }
                    Status::Finished => unreachable!("parse_compressed_header never reports Finished"),
                },
                ParserState::Body => match framer::parse_tag(&mut self.buf, &mut self.container)? {
                    None => {
                        return Ok(if made_progress {
                            Status::Progress
                        } else {
                            Status::NeedMoreData
                        })
                    }
                    Some(TagEvent::End) => {
                        log::debug!("END tag reached, {} tags collected", self.container.tags.len());
                        self.state = ParserState::Finished;
                        if let Some(cb) = self.callbacks.as_mut() {
                            cb.on_end(&self.container)?;
                        }
                        return Ok(Status::Finished);
                    }
                    Some(TagEvent::Parsed(tag)) => {
                        made_progress = true;
                        log::trace!("parsed tag {:?} ({} byte payload)", tag.tag_type, tag.payload.len());
                        let disposition = match self.callbacks.as_mut() {
                            Some(cb) => cb.on_tag(&tag)?,
                            None => TagDisposition::Keep,
                        };
                        if disposition == TagDisposition::Keep {
                            self.container.add_tag(tag);
                        }
                    }
                },
                ParserState::Finished => return Ok(Status::Finished),
                ParserState::Started | ParserState::LzmaHeader => {
                    return Err(ParseError::Internal("drain_framer: invalid state: header accumulation incomplete"))
                }
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}
