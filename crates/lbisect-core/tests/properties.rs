//! Property-based checks for the invariants a correct bisection engine
//! must hold for *all* inputs, not just the fixed scenarios in
//! `scenarios.rs`.

use std::io::Write;

use lbisect_core::{bisect, line_start_at, ByteReader, CompareMode};

fn temp_file_with(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents).unwrap();
    f.flush().unwrap();
    f
}

fn is_line_start(contents: &[u8], off: i64) -> bool {
    off == 0 || off as usize == contents.len() || contents[off as usize - 1] == b'\n'
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_line_alignment {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn line_start_at_is_always_aligned(
            contents in proptest::collection::vec(prop_oneof![Just(b'\n'), Just(b'a'), Just(b'b')], 0..200),
            probe in 0i64..250,
        ) {
            let f = temp_file_with(&contents);
            let mut reader = ByteReader::open(f.path(), Some(contents.len() as i64)).unwrap();
            let s = line_start_at(&mut reader, probe).unwrap();
            prop_assert!(is_line_start(&contents, s));
        }

        #[test]
        fn line_start_at_is_idempotent(
            contents in proptest::collection::vec(prop_oneof![Just(b'\n'), Just(b'a'), Just(b'b')], 0..200),
            probe in 0i64..250,
        ) {
            let f = temp_file_with(&contents);
            let mut reader = ByteReader::open(f.path(), Some(contents.len() as i64)).unwrap();
            let once = line_start_at(&mut reader, probe).unwrap();
            let twice = line_start_at(&mut reader, once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_interval_monotonicity {
    use super::*;
    use proptest::prelude::*;

    fn build_sorted_file(mut words: Vec<Vec<u8>>) -> (tempfile::NamedTempFile, i64) {
        words.sort();
        let mut contents = Vec::new();
        for w in &words {
            contents.extend_from_slice(w);
            contents.push(b'\n');
        }
        let size = contents.len() as i64;
        (temp_file_with(&contents), size)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn bisect_le_is_monotonic_in_the_key(
            words in proptest::collection::vec(proptest::collection::vec(b'a'..b'd', 0..4), 1..20),
            a_idx in 0usize..16,
            b_idx in 0usize..16,
        ) {
            let (f, size) = build_sorted_file(words);
            let mut reader = ByteReader::open(f.path(), Some(size)).unwrap();

            let keys: Vec<&[u8]> = [&b"a"[..], b"aa", b"aaa", b"b", b"bb", b"c", b"cc", b"ccc", b"d", b""]
                .to_vec();
            let k1 = keys[a_idx % keys.len()];
            let k2 = keys[b_idx % keys.len()];
            let (lo, hi) = if k1 <= k2 { (k1, k2) } else { (k2, k1) };

            let s1 = bisect(&mut reader, 0, size, lo, CompareMode::Le).unwrap();
            let s2 = bisect(&mut reader, 0, size, hi, CompareMode::Le).unwrap();
            prop_assert!(s1 <= s2);
        }
    }
}
