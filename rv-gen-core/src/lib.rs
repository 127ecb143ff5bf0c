//! Synthetic product review generation with a word-level Markov chain.
//!
//! This crate provides:
//! - Text normalization of a review corpus
//! - Training of a transition table over token n-grams (order 1 to 5)
//! - Weighted sampling of successor states
//! - Review generation with a sentence-boundary stopping rule and text cleanup
//!
//! The table is trained once and read-only afterwards, so one generator can
//! serve concurrent callers, each bringing its own random source.

/// Chain training, sampling and review generation.
pub mod model;

/// Corpus normalization and output cleanup.
pub mod text;

/// TOML settings.
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// Training data loading.
pub mod io;

mod time;

pub use config::Settings;
pub use error::{GenError, Result};
pub use model::distribution::Sampling;
pub use model::generator::ReviewGenerator;
pub use model::review::Review;
pub use model::transition_table::TransitionTable;
