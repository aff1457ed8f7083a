//! # LRC Processor: A Multi-Track LRC Lyrics Parser and Merger
//!
//! This crate turns raw, loosely-structured LRC text (original lyrics,
//! translation, romanization) into a single time-ordered sequence of
//! synchronized lines, ready to be consumed by a rendering stage.
//!
//! The three layers, from bottom to top:
//! - [`parse_lrc`]: parses one LRC text blob into a flat, time-sorted list of
//!   [`LrcLine`] entries, expanding multi-timestamp prefixes and applying an
//!   empty-line policy.
//! - [`merge_tracks`]: synchronizes any number of secondary tracks to a main
//!   track within a tolerance window, producing [`LrcGroupLine`] entries.
//! - [`process_lyrics`]: the fixed three-track pipeline (main, translation,
//!   romanization) used by lyric renderers.
//!
//! ## Example
//!
//! ```rust
//! use lrc_processor::{TrackKind, process_lyrics};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let original = "[00:01.00]Hello\n[00:02.50]World";
//!     let translation = "[00:01.20]你好";
//!
//!     let merged = process_lyrics(original, Some(translation), None)?;
//!
//!     assert_eq!(merged.len(), 2);
//!     assert_eq!(merged[0].time_ms, 1000);
//!     assert_eq!(merged[0].tracks[&TrackKind::Main], "Hello");
//!     assert_eq!(merged[0].tracks[&TrackKind::Translation], "你好");
//!     assert_eq!(merged[1].tracks[&TrackKind::Main], "World");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod merger;
pub mod parser;
pub mod pipeline;
pub mod types;

pub use error::*;
pub use merger::*;
pub use parser::*;
pub use pipeline::*;
pub use types::*;
