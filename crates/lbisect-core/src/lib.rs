//! # lbisect-core
//!
//! Binary search ("bisection") over a line-sorted text file: locates the
//! half-open byte range of lines that fall inside a key interval, without
//! ever loading the file or an index into memory. The file must be
//! sorted lexicographically on byte values, with LF (`0x0A`) as the line
//! terminator.
//!
//! The crate is organized leaf-first:
//!
//! - [`ByteReader`]: random-access buffered reader over a file of known
//!   size.
//! - [`locator::line_start_at`]: resolves any byte offset to the start
//!   of its line.
//! - [`CompareMode`] and [`compare::predicate`]: the three-way
//!   comparison predicate bisection searches over.
//! - [`BisectCache`]: the two-slot memoization that makes repeated
//!   probes during one binary search cheap.
//! - [`bisect`], [`bisect_interval`], [`detect`]: the bisection engine
//!   itself.
//! - [`trim_incomplete`]: excludes an unterminated trailing line.
//! - [`read_range`]: streams a resolved byte range to a sink.
//!
//! ## Quick start
//!
//! ```no_run
//! use lbisect_core::{bisect_interval, CompareMode, ByteReader};
//!
//! # fn main() -> lbisect_core::Result<()> {
//! let mut reader = ByteReader::open("sorted.txt", None)?;
//! let (start, end) = bisect_interval(&mut reader, 0, reader.size(), b"banana", b"banana", CompareMode::Le)?;
//! # Ok(())
//! # }
//! ```

mod bisect;
mod cache;
mod compare;
mod error;
mod locator;
mod output;
mod reader;
mod trim;

pub use bisect::{bisect, bisect_interval, detect};
pub use cache::BisectCache;
pub use compare::{predicate, CompareMode};
pub use error::{Error, Result};
pub use locator::line_start_at;
pub use output::read_range;
pub use reader::{ByteReader, DEFAULT_BUFFER_SIZE};
pub use trim::trim_incomplete;
