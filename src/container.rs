//! The parsed container: global header fields plus the ordered tag list.
//!
//! Grounded on `swf.h`'s `SWF`/`SWFRect` structs. The tag list grows the way
//! `swf_add_tag` does (geometric, seeded at 16) even though `Vec::push`
//! already amortizes doubling on its own — seeding the capacity up front
//! keeps that contract visible rather than relying on `Vec::new()`'s
//! capacity-0 start, mirroring the teacher's explicit block-size/`tmp_out`
//! capacity bookkeeping in `frame/decompress.rs` rather than leaving growth
//! implicit.

use crate::tag::Tag;

/// One of the three compression schemes a container's body may use.
///
/// Corresponds to `SWFCompression`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// 'F' — body follows the preamble verbatim.
    Identity,
    /// 'C' — body is a zlib/DEFLATE stream.
    Deflate,
    /// 'Z' — body is 5 bytes of LZMA properties + 4-byte length + raw LZMA stream.
    Lzma,
}

impl Compression {
    /// Maps the first preamble byte to a [`Compression`], or `None` for anything else.
    pub fn from_byte(b: u8) -> Option<Compression> {
        match b {
            b'F' => Some(Compression::Identity),
            b'C' => Some(Compression::Deflate),
            b'Z' => Some(Compression::Lzma),
            _ => None,
        }
    }
}

/// The frame rectangle, in twips. `x_min`/`y_min` are carried for parity with
/// the wire format but are documented (and, per spec.md, ignored) on the
/// write side; this crate has no write side, so they're just plain fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

/// Initial tag-list capacity, matching `swf_add_tag`'s `max_tags == 0 -> 16` seed.
const INITIAL_TAG_CAPACITY: usize = 16;

/// The parsed global fields of a container, plus its ordered tags.
///
/// Corresponds to `SWF`. Owned exclusively by the [`crate::Parser`] that
/// produced it.
#[derive(Debug, Default)]
pub struct Container {
    pub version: u8,
    /// Declared decompressed size in bytes, as read from the preamble.
    pub declared_size: u32,
    pub compression: Option<Compression>,
    pub frame_size: Rect,
    /// 8.8 fixed-point frame delay, stored as the raw `u16` it was read as
    /// (spec.md's open question: downstream consumers interpret the bits).
    pub frame_rate: u16,
    pub frame_count: u16,
    /// Captured payload of the most recent `JpegTables` tag, if any.
    ///
    /// A second `JpegTables` tag overwrites this slot (the tag itself still
    /// appears in `tags`) — a characterized behavior from the source, kept
    /// intentionally; see DESIGN.md.
    pub jpeg_tables: Option<Vec<u8>>,
    pub tags: Vec<Tag>,
}

impl Container {
    pub fn new() -> Container {
        Container::default()
    }

    /// Appends `tag` to the tag list, used by callbacks that choose to
    /// retain a tag rather than consume it themselves. Corresponds to `swf_add_tag`.
    pub fn add_tag(&mut self, tag: Tag) {
        if self.tags.capacity() == 0 {
            self.tags.reserve_exact(INITIAL_TAG_CAPACITY);
        }
        self.tags.push(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_byte_mapping() {
        assert_eq!(Compression::from_byte(b'F'), Some(Compression::Identity));
        assert_eq!(Compression::from_byte(b'C'), Some(Compression::Deflate));
        assert_eq!(Compression::from_byte(b'Z'), Some(Compression::Lzma));
        assert_eq!(Compression::from_byte(b'X'), None);
    }

    #[test]
    fn add_tag_seeds_capacity() {
        let mut c = Container::new();
        assert_eq!(c.tags.capacity(), 0);
        c.add_tag(Tag::new(crate::tag::TagType::ShowFrame, Vec::new(), 0));
        assert!(c.tags.capacity() >= INITIAL_TAG_CAPACITY);
    }
}
