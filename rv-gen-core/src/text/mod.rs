//! Text handling on both ends of the chain: normalization of the corpus before
//! training and cleanup of the sampled tokens after generation.

/// Lower-casing and diacritic stripping of raw review text.
pub mod normalize;

/// Assembly of generated tokens into presentable review text.
pub mod cleanup;
