//! # Classification and Grouping Engine
//!
//! Turns a raw stream of play events into playlist candidates.
//!
//! ```text
//! PlaySource + GenreLookup
//!          ↓
//! HistoryCollector (paged, cursor = last play + 1ms)
//!          ↓
//! Vec<TrackPlayEvent>
//!     ├── group_by_month        → Vec<MonthGroup>
//!     └── group_by_genre_dedup  → GenreGrouping { genres, duplicates, ungenred }
//! ```
//!
//! - [`canonical`] - folds free-text genre labels into canonical buckets
//! - [`collector`] - paginates the play history and enriches plays with genres
//! - [`grouping`] - month and genre groupers
//! - [`sink`] - playlist creation boundary
//! - [`EngineError`] - terminal failure kinds
//!
//! Both grouping views must be computed over the same collected event set so
//! their totals agree.

pub mod canonical;
pub mod collector;
mod error;
pub mod grouping;
pub mod sink;

pub use canonical::{canonical_set, canonicalize, normalize_label};
pub use error::EngineError;
pub use collector::{ARTIST_BATCH_LIMIT, GenreLookup, HistoryCollector, PlaySource, collect};
pub use grouping::{group_by_genre, group_by_genre_dedup, group_by_month};
pub use sink::{PLAYLIST_ADD_LIMIT, PlaylistSink};
