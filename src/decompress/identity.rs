//! The 'F' (uncompressed) body decoder: a pass-through.
//!
//! Grounded on `setup_decompression`'s `SWF_COMPRESSION_NONE` branch, which
//! does nothing at setup time; `parse_buf`'s uncompressed path is simply
//! `buf_append` of the raw input, which is exactly what [`IdentityDecoder`]
//! does here.

use super::{StepResult, StepStatus};
use crate::buffer::Buffer;
use crate::error::ParseError;

#[derive(Debug, Default)]
pub struct IdentityDecoder;

impl IdentityDecoder {
    pub fn new() -> Self {
        IdentityDecoder
    }

    pub fn step(&mut self, input: &[u8], buf: &mut Buffer) -> Result<StepResult, ParseError> {
        if input.is_empty() {
            return Ok(StepResult {
                consumed: 0,
                produced: 0,
                status: StepStatus::NeedMoreInput,
            });
        }
        let space = buf.free_tail_mut().len();
        if space == 0 {
            return Ok(StepResult {
                consumed: 0,
                produced: 0,
                status: StepStatus::NeedMoreOutput,
            });
        }
        let n = space.min(input.len());
        buf.free_tail_mut()[..n].copy_from_slice(&input[..n]);
        buf.note_appended(n);
        Ok(StepResult {
            consumed: n,
            produced: n,
            status: StepStatus::Progress,
        })
    }
}
