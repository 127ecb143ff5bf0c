use std::ops::RangeInclusive;

use rand::Rng;

use crate::error::{GenError, Result};
use super::distribution::Sampling;

pub const DEFAULT_WORD_COUNT_MIN: usize = 12;
pub const DEFAULT_WORD_COUNT_MAX: usize = 36;

/// Parameters of one review generation.
///
/// # Responsibilities
/// - Hold the inclusive range the target word count is drawn from
/// - Select the sampling strategy
/// - Optionally cap the number of sampling steps
///
/// # Invariants
/// - `1 <= word_count_min <= word_count_max`
/// - `max_steps`, when set, is at least `word_count_max`
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	word_count_min: usize,
	word_count_max: usize,

	/// Strategy used to pick each successor.
	pub sampling: Sampling,

	/// Maximum number of steps before giving up on reaching a sentence end.
	/// `None` walks until a sentence ends, however long that takes.
	max_steps: Option<usize>,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			word_count_min: DEFAULT_WORD_COUNT_MIN,
			word_count_max: DEFAULT_WORD_COUNT_MAX,
			sampling: Sampling::default(),
			max_steps: None,
		}
	}
}

impl GenerationInput {
	/// Creates an input drawing word counts from `min..=max`.
	///
	/// # Errors
	/// Returns `InvalidWordRange` if `min == 0` or `min > max`.
	pub fn new(min: usize, max: usize) -> Result<Self> {
		let mut input = Self::default();
		input.set_word_count_range(min, max)?;
		Ok(input)
	}

	/// Changes the word count range.
	///
	/// # Errors
	/// - `InvalidWordRange` if `min == 0` or `min > max`
	/// - `InvalidStepLimit` if `max` exceeds the current step cap
	pub fn set_word_count_range(&mut self, min: usize, max: usize) -> Result<()> {
		if min == 0 || min > max {
			return Err(GenError::InvalidWordRange { min, max });
		}
		Self::check_step_limit(self.max_steps, max)?;
		self.word_count_min = min;
		self.word_count_max = max;
		Ok(())
	}

	pub fn max_steps(&self) -> Option<usize> {
		self.max_steps
	}

	/// Caps the number of sampling steps of one generation, or lifts the cap with `None`.
	///
	/// # Errors
	/// Returns `InvalidStepLimit` if the cap is below `word_count_max`: no
	/// walk could reach its target before running out of steps.
	pub fn set_max_steps(&mut self, max_steps: Option<usize>) -> Result<()> {
		Self::check_step_limit(max_steps, self.word_count_max)?;
		self.max_steps = max_steps;
		Ok(())
	}

	fn check_step_limit(max_steps: Option<usize>, word_count_max: usize) -> Result<()> {
		match max_steps {
			Some(max_steps) if max_steps < word_count_max => {
				Err(GenError::InvalidStepLimit { max_steps, word_count_max })
			}
			_ => Ok(()),
		}
	}

	pub fn word_count_range(&self) -> RangeInclusive<usize> {
		self.word_count_min..=self.word_count_max
	}

	/// Draws a target word count uniformly from the range (both ends included).
	pub fn draw_word_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
		rng.random_range(self.word_count_range())
	}
}
