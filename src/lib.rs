#![forbid(unsafe_code)]
//! # Fanfic archive visualizations
//!
//! Two independent pipelines over an archive project produced by an
//! external archiving tool:
//!
//! - **Word cloud**: filter the archive to English stories, clean their
//!   downloaded HTML into plain text, count single-word and adjacent
//!   word-pair frequencies, and render a word cloud image
//!   (`make_wordcloud` binary).
//! - **Pairing graph**: extract and normalize the character pairings of
//!   every story, accumulate per-pairing statistics and pairing
//!   co-occurrence, and render the result as a chord diagram in an HTML
//!   document (`pairing_analyzer` binary).
//!
//! The project layout, HTML cleanup, and both renderers are external
//! collaborators; everything in between (filters, tokenizer, counters,
//! pairing normalization, matrix building) lives here so the binaries and
//! the test suite share one implementation.

pub mod chord;
pub mod cloud;
pub mod freq;
pub mod pairings;
pub mod project;
pub mod text;

pub use chord::{ChordMatrix, build_matrix, write_chord_html};
pub use cloud::render_cloud;
pub use freq::{CountConfig, DEFAULT_IGNORE, Frequencies, count_words};
pub use pairings::{
    MasterKey, PairingData, PairingKey, PairingStats, StatKey, collect_pairing_data,
    extract_pairings, include_in_pairings,
};
pub use project::{Project, StoryMetadata};
pub use text::{clean_story_html, combined_text, include_in_cloud};
