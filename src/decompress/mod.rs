//! Decompression adapters and the `Decoder` sum type that selects among them.
//!
//! Grounded on `setup_decompression`/`parse_buf`'s per-compression decode
//! loops (`parser.c`): each adapter consumes as much of an input slice as it
//! can, writes output directly into the elastic buffer's free tail, and
//! reports whether it made progress, is starved for input, is starved for
//! output space, or has reached the end of its stream. The three branches of
//! the source's `switch (parser->swf.compression)` become three variants of
//! one enum — the teacher's `Lz4FCCtx`/`DecompressStage` state machine shows
//! the same shape (one struct holding whichever decoder is active), reshaped
//! here as an externally-tagged enum rather than a C union plus discriminant.

mod identity;

#[cfg(feature = "deflate")]
mod deflate;
#[cfg(feature = "lzma")]
mod lzma;

use crate::buffer::Buffer;
use crate::error::ParseError;

pub use identity::IdentityDecoder;

#[cfg(feature = "deflate")]
pub use deflate::DeflateDecoder;
#[cfg(feature = "lzma")]
pub use lzma::LzmaDecoder;

/// Outcome of a single [`Decoder::step`] call.
///
/// Corresponds to the source's post-call dispatch on `z_ret`/`lz_ret` plus
/// its `increase_space` flag: `NeedMoreOutput` is that flag's Rust-side
/// equivalent, telling the caller to grow the buffer and call again rather
/// than mutating shared state behind the adapter's back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Output was produced and/or input was consumed; call again.
    Progress,
    /// All of `input` was consumed; more must be fed before the next call.
    NeedMoreInput,
    /// The output slice filled up before the decoder was done with `input`;
    /// grow the destination and call again with the same input remainder.
    NeedMoreOutput,
    /// The stream's logical end was reached; no further input is expected.
    Finished,
}

/// One step's result: how much of `input` was consumed, how many bytes were
/// written to the output slice, and what the caller should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub consumed: usize,
    pub produced: usize,
    pub status: StepStatus,
}

/// The active decompression backend for a container body.
///
/// Corresponds to the union of `parser->zstrm` and `parser->lzma` selected
/// by `parser->swf.compression`.
pub enum Decoder {
    Identity(IdentityDecoder),
    #[cfg(feature = "deflate")]
    Deflate(DeflateDecoder),
    #[cfg(feature = "lzma")]
    Lzma(LzmaDecoder),
}

impl Decoder {
    /// Builds the identity (verbatim, 'F') decoder. Never fails.
    pub fn identity() -> Decoder {
        Decoder::Identity(IdentityDecoder::new())
    }

    /// Builds the DEFLATE ('C') decoder. Corresponds to `inflateInit`.
    #[cfg(feature = "deflate")]
    pub fn deflate() -> Result<Decoder, ParseError> {
        Ok(Decoder::Deflate(DeflateDecoder::new()))
    }

    #[cfg(not(feature = "deflate"))]
    pub fn deflate() -> Result<Decoder, ParseError> {
        Err(ParseError::Recompile(
            "setup_decompression: ZLIB compression requires the 'deflate' feature",
        ))
    }

    /// Builds the LZMA ('Z') decoder from its 5-byte raw properties blob.
    /// Corresponds to `LzmaDec_Allocate` + `LzmaDec_Init`.
    #[cfg(feature = "lzma")]
    pub fn lzma(properties: &[u8; 5]) -> Result<Decoder, ParseError> {
        Ok(Decoder::Lzma(LzmaDecoder::new(properties)?))
    }

    #[cfg(not(feature = "lzma"))]
    pub fn lzma(_properties: &[u8; 5]) -> Result<Decoder, ParseError> {
        Err(ParseError::Recompile(
            "setup_decompression: LZMA compression requires the 'lzma' feature",
        ))
    }

    /// Consumes from `input`, writing decompressed bytes into `buf`'s free
    /// tail via [`Buffer::free_tail_mut`]/[`Buffer::note_appended`].
    pub fn step(&mut self, input: &[u8], buf: &mut Buffer) -> Result<StepResult, ParseError> {
        match self {
            Decoder::Identity(d) => d.step(input, buf),
            #[cfg(feature = "deflate")]
            Decoder::Deflate(d) => d.step(input, buf),
            #[cfg(feature = "lzma")]
            Decoder::Lzma(d) => d.step(input, buf),
        }
    }
}

impl std::fmt::Debug for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Decoder::Identity(_) => "Identity",
            #[cfg(feature = "deflate")]
            Decoder::Deflate(_) => "Deflate",
            #[cfg(feature = "lzma")]
            Decoder::Lzma(_) => "Lzma",
        };
        f.debug_tuple("Decoder").field(&name).finish()
    }
}
