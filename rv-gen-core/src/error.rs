use std::fmt;
use std::path::PathBuf;

/// Errors raised while configuring, training or sampling the review chain.
///
/// Configuration failures (`InvalidOrder`, `InvalidWordRange`, `InvalidStepLimit`,
/// `SourceNotFound`, `Parse`) abort construction; nothing half-trained is ever returned.
/// The remaining variants fail a single generation request only.
#[derive(Debug)]
pub enum GenError {
	/// Chain order outside `1..=5`.
	InvalidOrder(usize),
	/// Word count range with `min > max` or `min == 0`.
	InvalidWordRange { min: usize, max: usize },
	/// Step cap below the largest word count target.
	InvalidStepLimit { max_steps: usize, word_count_max: usize },
	/// Training resource missing, unnamed or unreadable.
	SourceNotFound(PathBuf),
	/// Training data or configuration could not be parsed.
	Parse(String),
	/// The start state is missing: the corpus yielded no usable content.
	NotTrained,
	/// A selected state had no successors.
	EmptyDistribution(String),
	/// Generation hit the configured step cap before reaching a sentence end.
	StepLimitExceeded(usize),
	/// Partial tables of different shapes cannot be combined.
	Merge(String),
}

impl GenError {
	/// Whether the caller may simply try the same request again.
	pub fn is_retryable(&self) -> bool {
		matches!(self, GenError::StepLimitExceeded(_))
	}

	/// Whether the error happened while building the generator.
	pub fn is_configuration(&self) -> bool {
		matches!(
			self,
			GenError::InvalidOrder(_)
				| GenError::InvalidWordRange { .. }
				| GenError::InvalidStepLimit { .. }
				| GenError::SourceNotFound(_)
				| GenError::Parse(_)
		)
	}
}

impl fmt::Display for GenError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GenError::InvalidOrder(order) => {
				write!(f, "markov order must be between 1 and 5, got {order}")
			}
			GenError::InvalidWordRange { min, max } => {
				write!(f, "invalid word count range: min={min}, max={max}")
			}
			GenError::InvalidStepLimit { max_steps, word_count_max } => write!(
				f,
				"max_steps ({max_steps}) must be at least word_count_max ({word_count_max})"
			),
			GenError::SourceNotFound(path) => {
				write!(f, "training data [{}] was not found", path.display())
			}
			GenError::Parse(msg) => write!(f, "parse error: {msg}"),
			GenError::NotTrained => write!(f, "model not trained: no start state"),
			GenError::EmptyDistribution(state) => {
				write!(f, "state '{state}' has no successors")
			}
			GenError::StepLimitExceeded(steps) => {
				write!(f, "no sentence end reached after {steps} steps")
			}
			GenError::Merge(msg) => write!(f, "merge error: {msg}"),
		}
	}
}

impl std::error::Error for GenError {}

impl From<serde_json::Error> for GenError {
	fn from(e: serde_json::Error) -> Self {
		GenError::Parse(e.to_string())
	}
}

impl From<toml::de::Error> for GenError {
	fn from(e: toml::de::Error) -> Self {
		GenError::Parse(e.to_string())
	}
}

pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_step_limit_is_retryable() {
		assert!(GenError::StepLimitExceeded(10).is_retryable());
		assert!(!GenError::NotTrained.is_retryable());
		assert!(!GenError::InvalidOrder(0).is_retryable());
	}

	#[test]
	fn configuration_errors_are_classified() {
		assert!(GenError::InvalidOrder(6).is_configuration());
		assert!(GenError::SourceNotFound(PathBuf::from("x.json")).is_configuration());
		assert!(GenError::Parse("bad".to_owned()).is_configuration());
		assert!(GenError::InvalidStepLimit { max_steps: 1, word_count_max: 2 }.is_configuration());
		assert!(!GenError::NotTrained.is_configuration());
	}

	#[test]
	fn display_mentions_the_order() {
		let msg = GenError::InvalidOrder(7).to_string();
		assert!(msg.contains('7'));
	}
}
