//! Direct exercise of [`lbisect_core::ByteReader`]: buffering, seeking,
//! limiting, and the read-range adapter.

use std::io::Write;

use lbisect_core::{read_range, ByteReader};

fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents).unwrap();
    f.flush().unwrap();
    f
}

// === Basic byte access ===

#[test]
fn get_byte_walks_the_file_in_order() {
    let f = write_temp(b"hello");
    let mut r = ByteReader::open_with_capacity(f.path(), None, 4).unwrap();
    let mut collected = Vec::new();
    while let Some(b) = r.get_byte().unwrap() {
        collected.push(b);
    }
    assert_eq!(collected, b"hello");
}

#[test]
fn unget_replays_the_last_byte() {
    let f = write_temp(b"abc");
    let mut r = ByteReader::open_with_capacity(f.path(), None, 4).unwrap();
    assert_eq!(r.get_byte().unwrap(), Some(b'a'));
    r.unget();
    assert_eq!(r.get_byte().unwrap(), Some(b'a'));
    assert_eq!(r.get_byte().unwrap(), Some(b'b'));
}

// === Single-read-per-granule ===

#[test]
fn visiting_one_granule_reads_once() {
    let f = write_temp(&vec![b'x'; 16]);
    let mut r = ByteReader::open_with_capacity(f.path(), None, 8).unwrap();
    for _ in 0..8 {
        r.get_byte().unwrap();
    }
    assert_eq!(r.read_count(), 1);
}

#[test]
fn crossing_a_granule_boundary_reads_twice() {
    let f = write_temp(&vec![b'x'; 16]);
    let mut r = ByteReader::open_with_capacity(f.path(), None, 8).unwrap();
    for _ in 0..9 {
        r.get_byte().unwrap();
    }
    assert_eq!(r.read_count(), 2);
}

#[test]
fn revisiting_a_granule_does_not_reread() {
    let f = write_temp(&vec![b'x'; 16]);
    let mut r = ByteReader::open_with_capacity(f.path(), None, 8).unwrap();
    r.get_byte().unwrap();
    r.seek_abs(0);
    r.get_byte().unwrap();
    r.seek_abs(4);
    r.get_byte().unwrap();
    assert_eq!(r.read_count(), 1);
}

// === Seeking ===

#[test]
fn seek_abs_beyond_size_is_not_an_error() {
    let f = write_temp(b"abc");
    let mut r = ByteReader::open_with_capacity(f.path(), None, 4).unwrap();
    r.seek_abs(1000);
    assert_eq!(r.get_byte().unwrap(), None);
}

#[test]
fn seek_rel_fast_path_matches_seek_abs() {
    let f = write_temp(b"abcdefgh");
    let mut r1 = ByteReader::open_with_capacity(f.path(), None, 8).unwrap();
    let mut r2 = ByteReader::open_with_capacity(f.path(), None, 8).unwrap();
    r1.seek_abs(0);
    r1.get_byte().unwrap();
    r1.seek_rel(2);
    r2.seek_abs(3);
    assert_eq!(r1.get_byte().unwrap(), r2.get_byte().unwrap());
}

// === limit() ===

#[test]
fn limit_shrinks_size_and_hides_tail_bytes() {
    let f = write_temp(b"0123456789");
    let mut r = ByteReader::open_with_capacity(f.path(), None, 8).unwrap();
    r.limit(5);
    assert_eq!(r.size(), 5);
    r.seek_abs(0);
    let mut collected = Vec::new();
    while let Some(b) = r.get_byte().unwrap() {
        collected.push(b);
    }
    assert_eq!(collected, b"01234");
}

#[test]
fn limit_below_cursor_invalidates_cleanly() {
    let f = write_temp(b"0123456789");
    let mut r = ByteReader::open_with_capacity(f.path(), None, 8).unwrap();
    r.seek_abs(9);
    r.limit(3);
    r.seek_abs(0);
    assert_eq!(r.get_byte().unwrap(), Some(b'0'));
}

// === peek / read_range ===

#[test]
fn peek_does_not_advance_the_cursor() {
    let f = write_temp(b"abcdef");
    let mut r = ByteReader::open_with_capacity(f.path(), None, 8).unwrap();
    r.seek_abs(0);
    let slice = r.peek(3).unwrap().to_vec();
    assert_eq!(slice, b"abc");
    assert_eq!(r.get_byte().unwrap(), Some(b'a'));
}

#[test]
fn read_range_streams_exact_bytes() {
    let f = write_temp(b"0123456789");
    let mut r = ByteReader::open_with_capacity(f.path(), None, 4).unwrap();
    let mut out = Vec::new();
    read_range(&mut r, 2, 7, &mut out).unwrap();
    assert_eq!(out, b"23456");
}

#[test]
fn read_range_empty_when_start_not_before_end() {
    let f = write_temp(b"0123456789");
    let mut r = ByteReader::open_with_capacity(f.path(), None, 4).unwrap();
    let mut out = Vec::new();
    read_range(&mut r, 5, 5, &mut out).unwrap();
    assert!(out.is_empty());
}
