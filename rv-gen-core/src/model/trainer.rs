use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crate::error::{GenError, Result};
use crate::text::normalize::normalize;
use super::state::State;
use super::transition_table::{START_STATE, TransitionTable};

/// Smallest and largest supported chain orders.
pub const MIN_ORDER: usize = 1;
pub const MAX_ORDER: usize = 5;

/// Checks that `order` is within `MIN_ORDER..=MAX_ORDER`.
pub fn validate_order(order: usize) -> Result<()> {
	if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
		return Err(GenError::InvalidOrder(order));
	}
	Ok(())
}

/// Accumulates transition counts over token n-grams.
///
/// Every text is normalized, split on whitespace and walked with a window of
/// `order` tokens and stride 1. The first window of a text follows the start
/// state; each later window follows the window right before it, so two
/// consecutive states share `order - 1` tokens.
///
/// # Invariants
/// - `order` is within `MIN_ORDER..=MAX_ORDER`
/// - Each key of `states` is a state that was followed by at least one window
#[derive(Clone, Debug)]
pub struct ChainTrainer {
	order: usize,
	states: HashMap<String, State>,
}

impl ChainTrainer {
	/// Creates an empty trainer.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `order` is outside `1..=5`.
	pub fn new(order: usize) -> Result<Self> {
		validate_order(order)?;
		Ok(Self { order, states: HashMap::new() })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Adds one raw corpus text to the counts.
	///
	/// Returns the number of transitions recorded; `0` when the text is
	/// empty after normalization or holds fewer than `order` tokens.
	pub fn add_text(&mut self, text: &str) -> usize {
		let normalized = normalize(text);
		let tokens: Vec<&str> = normalized.split_whitespace().collect();
		if tokens.len() < self.order {
			return 0;
		}

		let mut previous = START_STATE.to_owned();
		let mut recorded = 0;
		for window in tokens.windows(self.order) {
			let current = window.join(" ");
			match self.states.get_mut(&previous) {
				Some(state) => state.add_transition(&current),
				None => {
					let mut state = State::new(&previous);
					state.add_transition(&current);
					self.states.insert(previous, state);
				}
			}
			previous = current;
			recorded += 1;
		}
		recorded
	}

	/// Merges the counts of another trainer of the same order.
	///
	/// # Errors
	/// Returns `Merge` if the orders differ.
	pub fn merge(&mut self, other: Self) -> Result<()> {
		if self.order != other.order {
			return Err(GenError::Merge(format!(
				"order mismatch: {} vs {}",
				self.order, other.order
			)));
		}

		for (key, state) in other.states {
			if let Some(existing) = self.states.get_mut(&key) {
				existing.merge(&state)?;
			} else {
				self.states.insert(key, state);
			}
		}

		Ok(())
	}

	/// Freezes the counts into the immutable table used for sampling.
	pub fn seal(self) -> TransitionTable {
		let states = self
			.states
			.into_iter()
			.map(|(key, state)| (key, state.seal()))
			.collect();
		TransitionTable::new(self.order, states)
	}
}

/// Trains a table on one thread, text after text.
///
/// # Errors
/// Returns `InvalidOrder` if `order` is outside `1..=5`.
pub fn train_sequential<S: AsRef<str>>(corpus: &[S], order: usize) -> Result<TransitionTable> {
	let mut trainer = ChainTrainer::new(order)?;
	let mut skipped = 0usize;
	for text in corpus {
		if trainer.add_text(text.as_ref()) == 0 {
			skipped += 1;
		}
	}
	let table = trainer.seal();
	log::info!(
		"trained order-{order} chain on {} texts ({skipped} without a full window): {} states",
		corpus.len(),
		table.len()
	);
	Ok(table)
}

/// Trains a table by splitting the corpus into chunks and counting them on
/// worker threads, then merging the partial counts.
///
/// Each text starts over from the start state, so the result is identical to
/// `train_sequential` on the same corpus.
///
/// # Errors
/// Returns `InvalidOrder` if `order` is outside `1..=5`.
pub fn train<S: AsRef<str> + Sync>(corpus: &[S], order: usize) -> Result<TransitionTable> {
	validate_order(order)?;

	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	if corpus.len() < chunks {
		return train_sequential(corpus, order);
	}
	let chunk_size = corpus.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for chunk in corpus.chunks(chunk_size) {
			let tx = tx.clone();
			scope.spawn(move || {
				let mut partial = ChainTrainer { order, states: HashMap::new() };
				let mut skipped = 0usize;
				for text in chunk {
					if partial.add_text(text.as_ref()) == 0 {
						skipped += 1;
					}
				}
				let _ = tx.send((partial, skipped));
			});
		}
	});
	drop(tx);

	let mut trainer = ChainTrainer::new(order)?;
	let mut skipped = 0usize;
	for (partial, partial_skipped) in rx.iter() {
		trainer.merge(partial)?;
		skipped += partial_skipped;
	}

	let table = trainer.seal();
	log::info!(
		"trained order-{order} chain on {} texts in {} chunks ({skipped} without a full window): {} states",
		corpus.len(),
		corpus.len().div_ceil(chunk_size),
		table.len()
	);
	Ok(table)
}
