//! E2E test suite: streaming parser scenarios and cross-chunking invariants.
//!
//! Covers spec scenarios S1-S6 (minimal identity stream, a lone empty tag,
//! extended-length tags, ID-prefixed tags, byte-at-a-time DEFLATE streaming,
//! and a truncated preamble) plus the chunking-invariance, monotonic-
//! consumption, end-exact, and payload-conservation properties.

#[cfg(feature = "deflate")]
use std::io::Write;

use swf_stream::{Container, ParserCallbacks, Parser, Status, Tag, TagDisposition};

#[derive(Default)]
struct RecordingCallbacks {
    headers: Vec<(u8, u32)>, // (version, declared_size)
    compressed_headers: usize,
    tags: Vec<(u16, u16, usize)>, // (code, id, payload len)
    ends: usize,
}

impl ParserCallbacks for RecordingCallbacks {
    fn on_header(&mut self, container: &Container) -> Result<(), swf_stream::ParseError> {
        self.headers.push((container.version, container.declared_size));
        Ok(())
    }

    fn on_compressed_header(&mut self, _container: &Container) -> Result<(), swf_stream::ParseError> {
        self.compressed_headers += 1;
        Ok(())
    }

    fn on_tag(&mut self, tag: &Tag) -> Result<TagDisposition, swf_stream::ParseError> {
        self.tags.push((tag.tag_type.code(), tag.id, tag.payload.len()));
        Ok(TagDisposition::Keep)
    }

    fn on_end(&mut self, _container: &Container) -> Result<(), swf_stream::ParseError> {
        self.ends += 1;
        Ok(())
    }
}

/// Builds a minimal identity-compressed stream: preamble + zero rect/rate/count
/// + whatever tag bytes are appended + END.
fn identity_stream(extra_tag_bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"FWS");
    out.push(6); // version
    let mut body = Vec::new();
    body.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00]); // rect W=0, rate=0, count=0
    body.extend_from_slice(extra_tag_bytes);
    body.extend_from_slice(&[0x00, 0x00]); // END
    let declared_size = 8 + body.len() as u32;
    out.extend_from_slice(&declared_size.to_le_bytes());
    out.extend_from_slice(&body);
    out
}

// ─────────────────────────────────────────────────────────────────────────
// S1 — identity, minimal: no tags before END.
// ─────────────────────────────────────────────────────────────────────────

// `set_callbacks` takes ownership of its callback object, so tests that need
// to inspect callback state afterwards route through an `Rc<RefCell<...>>`
// wrapper instead of holding the `RecordingCallbacks` directly.
use std::cell::RefCell;
use std::rc::Rc;

struct SharedCallbacks(Rc<RefCell<RecordingCallbacks>>);

impl ParserCallbacks for SharedCallbacks {
    fn on_header(&mut self, container: &Container) -> Result<(), swf_stream::ParseError> {
        self.0.borrow_mut().on_header(container)
    }
    fn on_compressed_header(&mut self, container: &Container) -> Result<(), swf_stream::ParseError> {
        self.0.borrow_mut().on_compressed_header(container)
    }
    fn on_tag(&mut self, tag: &Tag) -> Result<TagDisposition, swf_stream::ParseError> {
        self.0.borrow_mut().on_tag(tag)
    }
    fn on_end(&mut self, container: &Container) -> Result<(), swf_stream::ParseError> {
        self.0.borrow_mut().on_end(container)
    }
}

fn parser_with_recorder() -> (Parser, Rc<RefCell<RecordingCallbacks>>) {
    let recorder = Rc::new(RefCell::new(RecordingCallbacks::default()));
    let mut parser = Parser::new();
    parser.set_callbacks(Box::new(SharedCallbacks(recorder.clone())));
    (parser, recorder)
}

#[test_log::test]
fn s1_identity_minimal_reports_header_and_end_with_no_tags() {
    let stream = identity_stream(&[]);
    let (mut parser, rec) = parser_with_recorder();
    let status = parser.feed(&stream).unwrap();
    assert_eq!(status, Status::Finished);
    let rec = rec.borrow();
    assert_eq!(rec.headers, vec![(6, 8 + 5 + 2)]);
    assert_eq!(rec.compressed_headers, 1);
    assert!(rec.tags.is_empty());
    assert_eq!(rec.ends, 1);
    assert_eq!(parser.container().frame_size, swf_stream::Rect::default());
    assert_eq!(parser.container().frame_rate, 0);
    assert_eq!(parser.container().frame_count, 0);
}

// ─────────────────────────────────────────────────────────────────────────
// S2 — identity, one empty tag (type=1, len=0) then END.
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn s2_identity_one_empty_tag_then_end() {
    let tag_bytes = [0x40, 0x00]; // (1<<6)|0 = 0x40
    let stream = identity_stream(&tag_bytes);
    let (mut parser, rec) = parser_with_recorder();
    let status = parser.feed(&stream).unwrap();
    assert_eq!(status, Status::Finished);
    let rec = rec.borrow();
    assert_eq!(rec.tags, vec![(1, 0, 0)]);
    assert_eq!(rec.ends, 1);
}

// ─────────────────────────────────────────────────────────────────────────
// S3 — extended length tag (type=9, len=64).
// ─────────────────────────────────────────────────────────────────────────

#[test_log::test]
fn s3_extended_length_tag_round_trips_payload() {
    let payload: Vec<u8> = (0u8..64).collect();
    let code_and_length: u16 = (9 << 6) | 0x3F; // 0x27F
    let mut tag_bytes = code_and_length.to_le_bytes().to_vec();
    tag_bytes.extend_from_slice(&64u32.to_le_bytes());
    tag_bytes.extend_from_slice(&payload);
    let stream = identity_stream(&tag_bytes);
    let (mut parser, rec) = parser_with_recorder();
    let status = parser.feed(&stream).unwrap();
    assert_eq!(status, Status::Finished);
    let rec = rec.borrow();
    assert_eq!(rec.tags, vec![(9, 0, 64)]);
    assert_eq!(parser.container().tags[0].payload, payload);
}

// ─────────────────────────────────────────────────────────────────────────
// S4 — ID-prefixed tag (DefineBits, type=6, len=5: 2-byte id + 3-byte payload).
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn s4_id_prefixed_tag_splits_id_from_payload() {
    let mut tag_bytes = vec![];
    let code_and_length: u16 = (6 << 6) | 5;
    tag_bytes.extend_from_slice(&code_and_length.to_le_bytes());
    tag_bytes.extend_from_slice(&0x1234u16.to_le_bytes());
    tag_bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
    let stream = identity_stream(&tag_bytes);
    let (mut parser, rec) = parser_with_recorder();
    let status = parser.feed(&stream).unwrap();
    assert_eq!(status, Status::Finished);
    let rec = rec.borrow();
    assert_eq!(rec.tags, vec![(6, 0x1234, 3)]);
    assert_eq!(parser.container().tags[0].payload, vec![0xAA, 0xBB, 0xCC]);
}

// ─────────────────────────────────────────────────────────────────────────
// S5 — DEFLATE streaming, fed one byte at a time; same callback sequence as S2.
// ─────────────────────────────────────────────────────────────────────────

#[test_log::test]
#[cfg(feature = "deflate")]
fn s5_deflate_streaming_one_byte_at_a_time_matches_s2() {
    let tag_bytes = [0x40, 0x00];
    let body = identity_stream(&tag_bytes);
    // Re-wrap the same uncompressed body under a 'C' (zlib) preamble.
    let payload = &body[8..];
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(payload).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut stream = Vec::new();
    stream.extend_from_slice(b"CWS");
    stream.push(6);
    stream.extend_from_slice(&(8 + payload.len() as u32).to_le_bytes());
    stream.extend_from_slice(&compressed);

    let (mut parser, rec) = parser_with_recorder();
    let mut last = Status::NeedMoreData;
    for byte in &stream {
        last = parser.feed(std::slice::from_ref(byte)).expect("byte-at-a-time feed must not error");
        if last == Status::Finished {
            break;
        }
    }
    assert_eq!(last, Status::Finished);
    let rec = rec.borrow();
    assert_eq!(rec.tags, vec![(1, 0, 0)]);
    assert_eq!(rec.ends, 1);
}

// ─────────────────────────────────────────────────────────────────────────
// S6 — truncated preamble (first 7 bytes only).
// ─────────────────────────────────────────────────────────────────────────

#[test_log::test]
fn s6_truncated_preamble_is_ok_with_no_callbacks() {
    let stream = identity_stream(&[]);
    let (mut parser, rec) = parser_with_recorder();
    let status = parser.feed(&stream[..7]).unwrap();
    assert_eq!(status, Status::Progress);
    assert_eq!(parser.state(), swf_stream::ParserState::Started);
    let rec = rec.borrow();
    assert!(rec.headers.is_empty());
    assert!(rec.ends.eq(&0));
}

// ─────────────────────────────────────────────────────────────────────────
// Chunking-invariance: feeding the same stream as one chunk or split into
// every single-byte chunk produces the same tag callback sequence.
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn chunking_invariance_single_vs_byte_at_a_time() {
    let code_and_length: u16 = (9 << 6) | 0x3F;
    let mut tag_bytes = code_and_length.to_le_bytes().to_vec();
    tag_bytes.extend_from_slice(&16u32.to_le_bytes());
    tag_bytes.extend_from_slice(&[0xAB; 16]);
    let stream = identity_stream(&tag_bytes);

    let (mut whole, rec_whole) = parser_with_recorder();
    whole.feed(&stream).unwrap();

    let (mut chunked, rec_chunked) = parser_with_recorder();
    for byte in &stream {
        chunked.feed(std::slice::from_ref(byte)).unwrap();
    }

    assert_eq!(rec_whole.borrow().tags, rec_chunked.borrow().tags);
    assert_eq!(rec_whole.borrow().ends, rec_chunked.borrow().ends);
}

// ─────────────────────────────────────────────────────────────────────────
// End-exact: once FINISHED, feeding more bytes fires no further callbacks.
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn end_exact_no_callbacks_fire_after_finished() {
    let stream = identity_stream(&[0x40, 0x00]);
    let (mut parser, rec) = parser_with_recorder();
    let status = parser.feed(&stream).unwrap();
    assert_eq!(status, Status::Finished);
    let ends_before = rec.borrow().ends;
    let tags_before = rec.borrow().tags.len();

    // Trailing garbage must not resurrect callbacks.
    let status2 = parser.feed(&[0xFF, 0xFF, 0xFF]).unwrap();
    assert_eq!(status2, Status::Finished);
    assert_eq!(rec.borrow().ends, ends_before);
    assert_eq!(rec.borrow().tags.len(), tags_before);
}

// ─────────────────────────────────────────────────────────────────────────
// Payload conservation: the sum of retained tag payload lengths equals the
// sum of payload bytes actually decoded from the stream (no callback drops).
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn payload_conservation_across_multiple_tags() {
    let mut tag_bytes = Vec::new();
    // ShowFrame (type=1, len=0)
    tag_bytes.extend_from_slice(&[0x40, 0x00]);
    // DefineBits (type=6, len=5: 2-byte id + 3-byte payload)
    let code_and_length: u16 = (6 << 6) | 5;
    tag_bytes.extend_from_slice(&code_and_length.to_le_bytes());
    tag_bytes.extend_from_slice(&0x0001u16.to_le_bytes());
    tag_bytes.extend_from_slice(&[1, 2, 3]);
    let stream = identity_stream(&tag_bytes);

    let mut parser = Parser::new();
    parser.feed(&stream).unwrap();
    let total: usize = parser.container().tags.iter().map(|t| t.payload.len()).sum();
    assert_eq!(total, 3);
}

// ─────────────────────────────────────────────────────────────────────────
// Monotonic consumption: across successive feed calls, the container's
// observed tag count never decreases.
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn monotonic_tag_count_across_feeds() {
    let mut tag_bytes = Vec::new();
    for _ in 0..5 {
        tag_bytes.extend_from_slice(&[0x40, 0x00]);
    }
    let stream = identity_stream(&tag_bytes);
    let mut parser = Parser::new();
    let mut last_count = 0;
    for chunk in stream.chunks(3) {
        parser.feed(chunk).unwrap();
        let count = parser.container().tags.len();
        assert!(count >= last_count, "tag count must never decrease");
        last_count = count;
    }
    assert_eq!(last_count, 5);
}
