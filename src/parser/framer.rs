//! Tag framing: the compressed-header rectangle/rate/count, and the per-tag
//! dispatch loop over the decoded stream.
//!
//! Grounded on `parse_compressed_header`/`parse_swf_rect`/`parse_tag`/
//! `parse_payload`/`parse_JPEG_tables`/`parse_id_payload` in `parser.c`.
//! The length-then-availability ordering follows spec.md's BODY algorithm
//! (read the short length, read the extended length if flagged, *then*
//! check availability against the final length) rather than the source's
//! literal sequence, which checks availability against the not-yet-extended
//! 0x3F placeholder before reading the extended field — a redundant early
//! check the distilled spec doesn't carry over; see DESIGN.md.

use crate::buffer::Buffer;
use crate::container::{Container, Rect};
use crate::error::{ParseError, Status};
use crate::tag::{Tag, TagType};

/// Parses the bit-packed rect plus `frame_rate`/`frame_count` into
/// `container`, rolling the buffer back to its pre-call position on
/// incomplete input. Corresponds to `parse_compressed_header`.
pub fn parse_compressed_header(buf: &mut Buffer, container: &mut Container) -> Result<Status, ParseError> {
    buf.clear_rollback();
    if buf.is_empty() {
        buf.rollback();
        return Ok(Status::NeedMoreData);
    }
    let width = buf.get_bits(5) as u32;
    let needed_bits = width * 4 + 5;
    let needed_bytes = needed_bits.div_ceil(8) as usize;
    if buf.len() < needed_bytes {
        buf.rollback();
        return Ok(Status::NeedMoreData);
    }
    let x_min = buf.get_sbits(width) as i32;
    let x_max = buf.get_sbits(width) as i32;
    let y_min = buf.get_sbits(width) as i32;
    let y_max = buf.get_sbits(width) as i32;
    buf.finish_bit_access();

    if buf.len() < 4 {
        buf.rollback();
        return Ok(Status::NeedMoreData);
    }
    let frame_rate = buf.get16();
    let frame_count = buf.get16();

    container.frame_size = Rect {
        x_min,
        x_max,
        y_min,
        y_max,
    };
    container.frame_rate = frame_rate;
    container.frame_count = frame_count;
    Ok(Status::Progress)
}

/// One tag-framing step's outcome, once enough bytes were available to act.
pub enum TagEvent {
    /// A non-`END` tag was fully parsed.
    Parsed(Tag),
    /// The `END` tag was observed; `length` bytes (should be 0) were consumed.
    End,
}

/// Reads one tag header plus payload, or reports that more bytes are needed.
/// Corresponds to `parse_tag` (sans the callback dispatch, which belongs to
/// [`crate::Parser`]).
///
/// Returns `Ok(None)` for `SWF_NEED_MORE_DATA` (the buffer has already been
/// rolled back to its pre-call position).
pub fn parse_tag(buf: &mut Buffer, container: &mut Container) -> Result<Option<TagEvent>, ParseError> {
    buf.clear_rollback();
    if buf.len() < 2 {
        return Ok(None);
    }
    let code_and_length = buf.get16();
    let code = code_and_length >> 6;
    let mut length = (code_and_length & 0x3F) as u32;

    if length == 0x3F {
        if buf.len() < 4 {
            buf.rollback();
            return Ok(None);
        }
        length = buf.get32();
    }
    if (buf.len() as u64) < length as u64 {
        buf.rollback();
        return Ok(None);
    }

    let tag_type = TagType::from_code(code);

    if tag_type == TagType::End {
        buf.advance(length as i64);
        return Ok(Some(TagEvent::End));
    }

    if tag_type == TagType::JpegTables {
        let payload = buf.take(length as usize);
        container.jpeg_tables = Some(payload.clone());
        return Ok(Some(TagEvent::Parsed(Tag::new(tag_type, payload, 0))));
    }

    if tag_type.is_id_prefixed() {
        if length < 2 {
            return Err(ParseError::Invalid(
                "parse_id_payload: tag shorter than its own 16-bit id field",
            ));
        }
        let id = buf.get16();
        let payload = buf.take((length - 2) as usize);
        return Ok(Some(TagEvent::Parsed(Tag::new(tag_type, payload, id))));
    }

    let payload = buf.take(length as usize);
    Ok(Some(TagEvent::Parsed(Tag::new(tag_type, payload, 0))))
}
