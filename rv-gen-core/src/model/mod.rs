//! Markov chain over token n-grams and the review generator built on it.
//!
//! - Training (`ChainTrainer`, `train`)
//! - The sealed, read-only `TransitionTable` and its per-state `Distribution`s
//! - Generation parameters (`GenerationInput`)
//! - The high-level `ReviewGenerator` and the `Review` record

/// Review generation: chain walk, stopping rule, cleanup.
pub mod generator;

/// Parameters of a generation: word count range, sampling, step cap.
pub mod generation_input;

/// Corpus counting, sequential and parallel.
pub mod trainer;

/// Immutable state → successors table and the sampling entry point.
pub mod transition_table;

/// Frozen successor counts of one state and the weighted selection.
pub mod distribution;

/// Mutable successor counts of one state while training.
/// Not exposed publicly.
mod state;

/// Review record shared by the corpus and the generated output.
pub mod review;
