//! C-ABI shims — the `swf_parser_*` surface from `swf.h`, for embedding
//! exactly the way the original `libswf` was consumed.
//!
//! Enabled with:
//!   cargo build --release --features c-abi
//!
//! Ownership model: `swf_parser_init` hands the caller an opaque, owned
//! pointer; `swf_parser_free` takes it back. There is no C-callback
//! registration here (`swf_parser_set_callbacks` in the source took four
//! function pointers plus a `void*`) — the safe `ParserCallbacks` trait this
//! crate uses instead has no `extern "C"` equivalent worth shimming; this
//! surface covers feeding data and reading back the parsed container.

use std::os::raw::{c_int, c_void};
use std::ptr;
use std::slice;

use crate::container::Container;
use crate::error::{ParseError, Status};
use crate::Parser;

/// Status/error codes mirroring `SWFError` in `swf.h`.
pub const SWF_OK: c_int = 0;
pub const SWF_NEED_MORE_DATA: c_int = 1;
pub const SWF_FINISHED: c_int = 2;
pub const SWF_INVALID: c_int = -127;
pub const SWF_UNIMPLEMENTED: c_int = -126;
pub const SWF_UNKNOWN: c_int = -125;
pub const SWF_INTERNAL_ERROR: c_int = -124;
pub const SWF_NOMEM: c_int = -123;
pub const SWF_RECOMPILE: c_int = -122;

fn error_code(err: ParseError) -> c_int {
    match err {
        ParseError::Invalid(_) => SWF_INVALID,
        ParseError::Unimplemented(_) => SWF_UNIMPLEMENTED,
        ParseError::Unknown(_) => SWF_UNKNOWN,
        ParseError::Internal(_) => SWF_INTERNAL_ERROR,
        ParseError::NoMem(_) => SWF_NOMEM,
        ParseError::Recompile(_) => SWF_RECOMPILE,
    }
}

fn status_code(status: Status) -> c_int {
    match status {
        Status::Progress => SWF_OK,
        Status::NeedMoreData => SWF_NEED_MORE_DATA,
        Status::Finished => SWF_FINISHED,
    }
}

/// Corresponds to `swf_parser_init`. Returns null only if allocation itself
/// fails (which in Rust means the process is already out of memory).
#[no_mangle]
pub extern "C" fn swf_parser_init() -> *mut Parser {
    Box::into_raw(Box::new(Parser::new()))
}

/// Corresponds to `swf_parser_append`. `buf` may be null only when `len` is 0.
#[no_mangle]
pub unsafe extern "C" fn swf_parser_append(parser: *mut Parser, buf: *const c_void, len: usize) -> c_int {
    if parser.is_null() {
        return SWF_INTERNAL_ERROR;
    }
    let parser = &mut *parser;
    let data = if len == 0 {
        &[][..]
    } else if buf.is_null() {
        return SWF_INTERNAL_ERROR;
    } else {
        slice::from_raw_parts(buf as *const u8, len)
    };
    match parser.feed(data) {
        Ok(status) => status_code(status),
        Err(err) => error_code(err),
    }
}

/// Corresponds to `swf_parser_get_swf`. The returned pointer is valid until
/// the next `swf_parser_append` call or `swf_parser_free`.
#[no_mangle]
pub unsafe extern "C" fn swf_parser_get_swf(parser: *mut Parser) -> *const Container {
    if parser.is_null() {
        return ptr::null();
    }
    (&*parser).container() as *const Container
}

/// Corresponds to `swf_parser_get_error`. Returns one of the `SWF_*`
/// constants above; there is no static-string out-parameter here since the
/// message lives behind the Rust `ParseError` the C caller cannot hold.
#[no_mangle]
pub unsafe extern "C" fn swf_parser_get_error(parser: *mut Parser) -> c_int {
    if parser.is_null() {
        return SWF_INTERNAL_ERROR;
    }
    match (&*parser).last_error() {
        Some(err) => error_code(err),
        None => SWF_OK,
    }
}

/// Corresponds to `swf_parser_free`.
#[no_mangle]
pub unsafe extern "C" fn swf_parser_free(parser: *mut Parser) {
    if !parser.is_null() {
        drop(Box::from_raw(parser));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_append_free_round_trip() {
        unsafe {
            let p = swf_parser_init();
            assert!(!p.is_null());
            let data = b"FWS\x06\x08\x00\x00\x00\x00\x00\x00\x00";
            let ret = swf_parser_append(p, data.as_ptr() as *const c_void, data.len());
            assert!(ret == SWF_OK || ret == SWF_NEED_MORE_DATA);
            swf_parser_free(p);
        }
    }
}
