//! # Swingdoor
//!
//! A Rust implementation of the swinging-door (rotating-door) lossy
//! compression algorithm used by process historians and time-series stores
//! to thin dense scalar streams while bounding the reconstruction error.
//!
//! ## Algorithm overview
//!
//! The compressor keeps an **anchor** (the last point committed to the
//! output) and a **candidate** (the most recent sample, still pending). A
//! pair of pivot slopes — the "door" — tracks the tightest interval of
//! slopes from the anchor consistent with every sample seen since it, each
//! within `±tolerance` of a straight line:
//!
//! - While the interval is non-empty the door is open: the incoming sample
//!   simply replaces the candidate and nothing is emitted.
//! - When a sample empties the interval the door has closed: the *previous*
//!   candidate is the last point provably inside the corridor. It is emitted,
//!   becomes the new anchor, and a new door swings from it.
//!
//! Samples with no measured value ([`Value::Absent`]) mark gaps: a gap ends
//! the current corridor and is retained in the output, so reconstruction
//! never interpolates across missing data.
//!
//! ## Example
//!
//! ```rust
//! use swingdoor::{Compressor, Sample};
//!
//! let mut compressor = Compressor::new(0.5).unwrap();
//! compressor.feed(Sample::new(0.0, 10.0));
//! compressor.feed(Sample::new(1.0, 10.2));
//! compressor.feed(Sample::new(2.0, 10.4));
//! compressor.feed(Sample::new(3.0, 12.5));
//! // Mandatory: the final pending point is only emitted on flush.
//! compressor.flush();
//!
//! let series = compressor.points();
//! assert_eq!(series.len(), 3);
//! assert_eq!(series[0], Sample::new(0.0, 10.0));
//! assert_eq!(series[2], Sample::new(3.0, 12.5));
//! ```
//!
//! ## Reconstruction
//!
//! The compressed series reads back as a piecewise-linear function via
//! [`value_at`]:
//!
//! ```rust
//! # use swingdoor::{value_at, Sample};
//! let series = [Sample::new(0.0, 0.0), Sample::new(10.0, 10.0)];
//! assert_eq!(value_at(&series, 5.0), Some(5.0));
//! ```

pub mod compressor;
pub mod reconstruct;
pub mod slope;

// Re-export primary types at the crate root.
pub use compressor::{Compressor, InvalidTolerance, Sample, Value};
pub use reconstruct::value_at;
pub use slope::SlopeBounds;
