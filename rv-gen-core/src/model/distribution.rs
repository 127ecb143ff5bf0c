use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a successor is picked from a distribution.
///
/// Both strategies select each successor with probability `count / total`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sampling {
	/// Draw a candidate uniformly, accept it with probability `count / total`,
	/// retry until one is accepted.
	#[default]
	Rejection,
	/// Binary search of a uniform draw in the prefix sums of the counts.
	Cumulative,
}

/// The frozen successor counts of one state.
///
/// Successors are sorted by key so that a seeded generator always walks the
/// same path, whatever order training observed them in.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
	successors: Vec<(String, u32)>,
	/// `cumulative[i]` is the sum of the counts of `successors[..=i]`.
	cumulative: Vec<u64>,
	total: u64,
}

impl Distribution {
	pub(crate) fn new(transitions: HashMap<String, u32>) -> Self {
		let mut successors: Vec<(String, u32)> = transitions.into_iter().collect();
		successors.sort_unstable_by(|a, b| a.0.cmp(&b.0));

		let mut total = 0u64;
		let cumulative = successors
			.iter()
			.map(|(_, count)| {
				total += u64::from(*count);
				total
			})
			.collect();

		Self { successors, cumulative, total }
	}

	/// Sum of all successor counts.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Number of distinct successors.
	pub fn len(&self) -> usize {
		self.successors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	/// Observed count of `successor`, if it was ever seen.
	pub fn count(&self, successor: &str) -> Option<u32> {
		self.successors
			.binary_search_by(|(key, _)| key.as_str().cmp(successor))
			.ok()
			.map(|index| self.successors[index].1)
	}

	/// Successors and their counts, in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
		self.successors.iter().map(|(key, count)| (key.as_str(), *count))
	}

	/// Picks one successor, weighted by its count.
	///
	/// Returns `None` only if the distribution is empty.
	pub fn sample<R: Rng + ?Sized>(&self, sampling: Sampling, rng: &mut R) -> Option<&str> {
		if self.total == 0 {
			return None;
		}
		let index = match sampling {
			Sampling::Rejection => self.rejection_index(rng),
			Sampling::Cumulative => self.cumulative_index(rng),
		};
		Some(self.successors[index].0.as_str())
	}

	fn rejection_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
		loop {
			let candidate = rng.random_range(0..self.successors.len());
			let count = u64::from(self.successors[candidate].1);
			if rng.random_range(0..self.total) < count {
				return candidate;
			}
		}
	}

	fn cumulative_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
		let r = rng.random_range(0..self.total);
		self.cumulative.partition_point(|&c| c <= r)
	}
}
