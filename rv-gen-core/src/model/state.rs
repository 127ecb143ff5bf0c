use std::collections::HashMap;

use crate::error::{GenError, Result};
use super::distribution::Distribution;

/// A predecessor state of the chain while it is being trained.
///
/// `key` is the predecessor n-gram (tokens joined by single spaces, or the
/// empty string for the start of a review). `transitions` counts how many
/// times each successor n-gram followed it.
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition occurrence count is strictly positive
#[derive(Clone, Debug)]
pub(crate) struct State {
	key: String,
	/// Example: { "cable works" => 42, "cable broke" => 3 }
	transitions: HashMap<String, u32>,
}

impl State {
	/// Creates a new empty state for the given predecessor.
	pub(crate) fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: HashMap::new(),
		}
	}

	/// Records one more observation of `next` following this state.
	pub(crate) fn add_transition(&mut self, next: &str) {
		match self.transitions.get_mut(next) {
			Some(occurrence) => *occurrence += 1,
			None => {
				self.transitions.insert(next.to_owned(), 1);
			}
		}
	}

	/// Merges the counts of another state with the same key.
	///
	/// # Errors
	/// Returns an error if the state keys do not match.
	pub(crate) fn merge(&mut self, other: &Self) -> Result<()> {
		if self.key != other.key {
			return Err(GenError::Merge(format!(
				"state key mismatch: '{}' vs '{}'",
				self.key, other.key
			)));
		}

		for (next, occurrence) in &other.transitions {
			*self.transitions.entry(next.clone()).or_insert(0) += *occurrence;
		}

		Ok(())
	}

	/// Freezes the counts into an immutable, sorted distribution.
	pub(crate) fn seal(self) -> Distribution {
		Distribution::new(self.transitions)
	}
}
