use rand::Rng;

use crate::config::Settings;
use crate::error::{GenError, Result};
use crate::io;
use crate::text::cleanup::clean_text;
use super::generation_input::GenerationInput;
use super::review::Review;
use super::trainer::train;
use super::transition_table::{START_STATE, TransitionTable};

/// Generates synthetic reviews by walking a trained transition table.
///
/// # Responsibilities
/// - Train the table once from the configured corpus
/// - Walk the chain until the target length is reached and a sentence ends
/// - Clean the sampled tokens and wrap them into a `Review`
///
/// The generator never mutates itself after construction; share it freely
/// and give every caller its own random source.
#[derive(Debug)]
pub struct ReviewGenerator {
	table: TransitionTable,
	input: GenerationInput,
}

impl ReviewGenerator {
	/// Wraps an already trained table.
	pub fn new(table: TransitionTable, input: GenerationInput) -> Self {
		Self { table, input }
	}

	/// Loads the corpus named by `settings`, trains the chain and checks it is usable.
	///
	/// # Errors
	/// - `InvalidOrder` / `InvalidWordRange` for bad settings
	/// - `SourceNotFound` if the training file is missing or unreadable
	/// - `Parse` if it is not a JSON array of reviews
	/// - `NotTrained` if no review holds enough text to train on
	pub fn from_settings(settings: &Settings) -> Result<Self> {
		settings.validate()?;

		let reviews = io::read_reviews(&settings.training_data_file)?;
		let texts: Vec<&str> = reviews.iter().map(Review::text).collect();
		let table = train(&texts, settings.markov_order)?;
		table.start_distribution()?;

		Ok(Self::new(table, settings.generation_input()?))
	}

	pub fn table(&self) -> &TransitionTable {
		&self.table
	}

	pub fn input(&self) -> &GenerationInput {
		&self.input
	}

	/// Generates one review with a target length drawn from the configured range.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Review> {
		let target = self.input.draw_word_count(rng);
		self.generate_review(target, rng)
	}

	/// Generates one review of at least `word_count` words.
	pub fn generate_review<R: Rng + ?Sized>(&self, word_count: usize, rng: &mut R) -> Result<Review> {
		let tokens = self.generate_tokens(word_count, rng)?;
		let text = clean_text(&tokens);
		Ok(Review::generated(text, rng))
	}

	/// Walks the chain and returns the raw tokens, before any cleanup.
	///
	/// Each step emits only the newest token of the sampled state. The walk
	/// stops once at least `word_count` tokens were emitted and the last one
	/// ends with a period, so it overshoots to finish the sentence.
	///
	/// # Errors
	/// - `NotTrained` if the table has no start state
	/// - `StepLimitExceeded` if `max_steps` is set and no sentence ended in time
	pub fn generate_tokens<R: Rng + ?Sized>(&self, word_count: usize, rng: &mut R) -> Result<Vec<String>> {
		let mut state = START_STATE;
		let mut tokens: Vec<String> = Vec::with_capacity(word_count);
		let mut fallbacks = 0usize;

		loop {
			if let Some(max_steps) = self.input.max_steps()
				&& tokens.len() >= max_steps
			{
				log::warn!("gave up after {max_steps} steps without a sentence end (target {word_count})");
				return Err(GenError::StepLimitExceeded(max_steps));
			}

			let (next, used_fallback) = self.table.next(state, self.input.sampling, rng)?;
			if used_fallback {
				fallbacks += 1;
			}

			let token = last_token(next);
			tokens.push(token.to_owned());
			state = next;

			if tokens.len() >= word_count && token.ends_with('.') {
				break;
			}
		}

		log::debug!(
			"generated {} tokens for target {word_count} ({fallbacks} restarts)",
			tokens.len()
		);
		Ok(tokens)
	}
}

/// Newest token of a state: states overlap by all but their last token.
fn last_token(state: &str) -> &str {
	state.rsplit_once(' ').map_or(state, |(_, last)| last)
}
