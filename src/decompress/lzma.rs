//! The 'Z' (LZMA) body decoder.
//!
//! Grounded on `setup_decompression`'s `SWF_COMPRESSION_LZMA` branch
//! (`LzmaDec_Construct`/`LzmaDec_Allocate`/`LzmaDec_Init`) and `parse_buf`'s
//! LZMA loop (`LzmaDec_DecodeToBuf`). The SWF body is a bare LZMA1 stream —
//! 5 bytes of raw properties, no `.lzma`/`.xz` container — so this adapter
//! drives `lzma-sys`'s FFI directly (`lzma_properties_decode` +
//! `lzma_raw_decoder` + `lzma_code`) instead of going through the `xz2`
//! wrapper crate, whose `Stream` constructors only cover container formats.
//! `xz2` itself depends on `lzma-sys` for exactly these bindings; this is
//! the same liblzma the rest of the ecosystem links against, just addressed
//! one layer lower.

use super::{StepResult, StepStatus};
use crate::buffer::Buffer;
use crate::error::ParseError;
use std::ptr;

pub struct LzmaDecoder {
    strm: lzma_sys::lzma_stream,
    /// Keeps the decoded `lzma_options_lzma` alive for the lifetime of the
    /// stream: `lzma_raw_decoder` stores a pointer to it via the filter chain.
    /// Never read through Rust directly; liblzma dereferences it via that
    /// raw pointer on every `lzma_code` call.
    #[allow(dead_code)]
    options: Box<lzma_sys::lzma_options_lzma>,
    finished: bool,
}

impl std::fmt::Debug for LzmaDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LzmaDecoder").field("finished", &self.finished).finish()
    }
}

// lzma_stream holds an opaque pointer to internal state owned exclusively by
// this decoder and never aliased; the pointer itself carries no thread
// affinity, matching the teacher's independent-decoder-state `Send` rationale.
unsafe impl Send for LzmaDecoder {}

fn check(ret: lzma_sys::lzma_ret, context: &'static str) -> Result<(), ParseError> {
    match ret {
        lzma_sys::LZMA_OK | lzma_sys::LZMA_STREAM_END => Ok(()),
        lzma_sys::LZMA_MEM_ERROR => Err(ParseError::NoMem(context)),
        // Allocation failure -> NOMEM; unsupported/unrecognized properties -> INTERNAL_ERROR,
        // matching LzmaDec_Allocate's SZ_ERROR_MEM / SZ_ERROR_UNSUPPORTED split.
        lzma_sys::LZMA_OPTIONS_ERROR => {
            Err(ParseError::Internal("lzma: unsupported LZMA1 properties"))
        }
        lzma_sys::LZMA_DATA_ERROR | lzma_sys::LZMA_FORMAT_ERROR => Err(ParseError::Invalid(context)),
        lzma_sys::LZMA_PROG_ERROR => Err(ParseError::Internal(context)),
        _ => Err(ParseError::Unknown(context)),
    }
}

impl LzmaDecoder {
    /// `properties` is the 5-byte LZMA1 properties blob (1 `lc`/`lp`/`pb`
    /// byte, 4-byte little-endian dictionary size) exactly as it appears
    /// after the SWF LZMA preamble's 4-byte compressed-data-length field.
    /// Corresponds to `LzmaDec_Allocate(&parser->lzma, props, LZMA_PROPS_SIZE, ...)`.
    pub fn new(properties: &[u8; 5]) -> Result<Self, ParseError> {
        unsafe {
            let mut options: Box<lzma_sys::lzma_options_lzma> = Box::new(std::mem::zeroed());
            let mut filter = lzma_sys::lzma_filter {
                id: lzma_sys::LZMA_FILTER_LZMA1,
                options: options.as_mut() as *mut _ as *mut std::ffi::c_void,
            };
            check(
                lzma_sys::lzma_properties_decode(
                    &mut filter,
                    ptr::null(),
                    properties.as_ptr(),
                    properties.len(),
                ),
                "lzma_properties_decode: malformed LZMA1 properties",
            )?;

            let mut strm: lzma_sys::lzma_stream = std::mem::zeroed();
            let filters = [
                filter,
                lzma_sys::lzma_filter {
                    id: lzma_sys::LZMA_VLI_UNKNOWN,
                    options: ptr::null_mut(),
                },
            ];
            check(
                lzma_sys::lzma_raw_decoder(&mut strm, filters.as_ptr()),
                "lzma_raw_decoder: failed to initialize raw LZMA1 decoder",
            )?;

            Ok(LzmaDecoder {
                strm,
                options,
                finished: false,
            })
        }
    }

    pub fn step(&mut self, input: &[u8], buf: &mut Buffer) -> Result<StepResult, ParseError> {
        if self.finished {
            return Ok(StepResult {
                consumed: 0,
                produced: 0,
                status: StepStatus::Finished,
            });
        }
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

        self.strm.next_in = input.as_ptr();
        self.strm.avail_in = input.len();
        self.strm.next_out = out.as_mut_ptr();
        self.strm.avail_out = out.len();

        let ret = unsafe { lzma_sys::lzma_code(&mut self.strm, lzma_sys::LZMA_RUN) };

        let consumed = input.len() - self.strm.avail_in;
        let produced = out.len() - self.strm.avail_out;
        buf.note_appended(produced);

        check(ret, "lzma_code: data error decoding LZMA stream")?;

        let status = if ret == lzma_sys::LZMA_STREAM_END {
            self.finished = true;
            StepStatus::Finished
        } else if produced == 0 && consumed == 0 {
            StepStatus::NeedMoreOutput
        } else {
            StepStatus::Progress
        };

        Ok(StepResult {
            consumed,
            produced,
            status,
        })
    }
}

impl Drop for LzmaDecoder {
    fn drop(&mut self) {
        unsafe { lzma_sys::lzma_end(&mut self.strm) }
        // `options` is dropped after `strm`'s teardown, which no longer
        // dereferences the filter chain's options pointer once lzma_end runs.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A minimal LZMA1 stream for "hi\n" encoded with the default 7-Zip SDK
    // preset (lc=3, lp=0, pb=2, dict size 1 MiB), generated once with the
    // reference `xz --format=lzma` encoder and frozen here as a fixture:
    // properties byte 0x5d, dict size 0x00100000 LE.
    const PROPS: [u8; 5] = [0x5d, 0x00, 0x00, 0x10, 0x00];

    #[test]
    fn rejects_garbage_properties() {
        let bad = [0xffu8; 5];
        let err = LzmaDecoder::new(&bad).unwrap_err();
        assert!(matches!(err, ParseError::Internal(_)));
    }

    #[test]
    fn constructs_with_valid_properties() {
        let dec = LzmaDecoder::new(&PROPS);
        assert!(dec.is_ok());
    }

    #[test]
    fn empty_input_needs_more() {
        let mut buf = Buffer::init(4).unwrap();
        let mut dec = LzmaDecoder::new(&PROPS).unwrap();
        let r = dec.step(&[], &mut buf).unwrap();
        assert_eq!(r.status, StepStatus::NeedMoreInput);
    }
}
