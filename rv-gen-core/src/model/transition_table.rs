use std::collections::HashMap;

use rand::Rng;

use crate::error::{GenError, Result};
use super::distribution::{Distribution, Sampling};

/// The state every review starts from.
pub const START_STATE: &str = "";

/// Trained, immutable mapping from a state to its weighted successors.
///
/// Built once by the trainer, then only read: it can be shared by any number
/// of concurrent generations without locking.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionTable {
	order: usize,
	states: HashMap<String, Distribution>,
}

impl TransitionTable {
	pub(crate) fn new(order: usize, states: HashMap<String, Distribution>) -> Self {
		Self { order, states }
	}

	/// Number of tokens per state.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of states with at least one successor.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Successors of `state`, if it was ever followed by anything.
	pub fn distribution(&self, state: &str) -> Option<&Distribution> {
		self.states.get(state)
	}

	/// Successors of the start state.
	///
	/// # Errors
	/// Returns `NotTrained` if the corpus produced no transition at all.
	pub fn start_distribution(&self) -> Result<&Distribution> {
		self.states.get(START_STATE).ok_or(GenError::NotTrained)
	}

	/// All states and their successors, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Distribution)> {
		self.states.iter().map(|(key, dist)| (key.as_str(), dist))
	}

	/// Samples the state following `state`.
	///
	/// Unknown states fall back to the start distribution, as if a new phrase
	/// began; the returned flag tells whether that happened.
	///
	/// # Errors
	/// - `NotTrained` if the start state is missing
	/// - `EmptyDistribution` if the selected state has no successors
	pub fn next<R: Rng + ?Sized>(
		&self,
		state: &str,
		sampling: Sampling,
		rng: &mut R,
	) -> Result<(&str, bool)> {
		let (dist, used_fallback) = match self.states.get(state) {
			Some(dist) => (dist, false),
			None => (self.start_distribution()?, true),
		};

		let successor = dist
			.sample(sampling, rng)
			.ok_or_else(|| GenError::EmptyDistribution(state.to_owned()))?;
		Ok((successor, used_fallback))
	}
}
