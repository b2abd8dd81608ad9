//! The 'C' (zlib/DEFLATE) body decoder.
//!
//! Grounded on `setup_decompression`'s `SWF_COMPRESSION_ZLIB` branch
//! (`inflateInit`) and `parse_buf`'s zlib loop, which calls `inflate` with
//! `avail_in`/`avail_out` pointing directly at the parser's buffers and
//! grows the output buffer on `Z_BUF_ERROR`. `flate2::Decompress` is driven
//! the same way here — by hand, writing straight into
//! [`Buffer::free_tail_mut`] — rather than through `flate2::read::ZlibDecoder`,
//! so this adapter keeps the same input/output slice control the source has.

use super::{StepResult, StepStatus};
use crate::buffer::Buffer;
use crate::error::ParseError;
use flate2::{Decompress, FlushDecompress, Status};

pub struct DeflateDecoder {
    inner: Decompress,
}

impl Default for DeflateDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeflateDecoder {
    /// `zlib_header = true`: SWF bodies carry a standard 2-byte zlib header,
    /// matching `inflateInit`'s default (not `inflateInit2` with a negative
    /// window bits, which would mean raw deflate).
    pub fn new() -> Self {
        DeflateDecoder {
            inner: Decompress::new(true),
        }
    }

    pub fn step(&mut self, input: &[u8], buf: &mut Buffer) -> Result<StepResult, ParseError> {
        if input.is_empty() {
            return Ok(StepResult {
                consumed: 0,
                produced: 0,
                status: StepStatus::NeedMoreInput,
            });
        }
        let out = buf.free_tail_mut();
        if out.is_empty() {
            return Ok(StepResult {
                consumed: 0,
                produced: 0,
                status: StepStatus::NeedMoreOutput,
            });
        }

        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let result = self.inner.decompress(input, out, FlushDecompress::None);
        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;
        buf.note_appended(produced);

        match result {
            Ok(Status::Ok) => Ok(StepResult {
                consumed,
                produced,
                status: if produced == 0 && consumed == 0 {
                    StepStatus::NeedMoreOutput
                } else {
                    StepStatus::Progress
                },
            }),
            Ok(Status::BufError) => Ok(StepResult {
                consumed,
                produced,
                status: StepStatus::NeedMoreOutput,
            }),
            Ok(Status::StreamEnd) => Ok(StepResult {
                consumed,
                produced,
                status: StepStatus::Finished,
            }),
            Err(_) => Err(ParseError::Invalid(
                "inflate: data error decompressing zlib stream",
            )),
        }
    }
}
