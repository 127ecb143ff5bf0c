//! Application settings, read from the `[app_settings]` table of a TOML file.
//!
//! ```toml
//! [app_settings]
//! training_data_file = "data/reviews.json"
//! markov_order = 2
//! word_count_min = 12
//! word_count_max = 36
//! max_steps = 100000
//! sampling = "rejection"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::read_file;
use crate::model::distribution::Sampling;
use crate::model::generation_input::{DEFAULT_WORD_COUNT_MAX, DEFAULT_WORD_COUNT_MIN, GenerationInput};
use crate::model::trainer::validate_order;

pub const DEFAULT_MARKOV_ORDER: usize = 2;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
	/// JSON array of review records used for training.
	pub training_data_file: PathBuf,
	/// Tokens per chain state, `1..=5`.
	pub markov_order: usize,
	pub word_count_min: usize,
	pub word_count_max: usize,
	/// Step cap per generation, unbounded when absent.
	pub max_steps: Option<usize>,
	pub sampling: Sampling,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			training_data_file: PathBuf::new(),
			markov_order: DEFAULT_MARKOV_ORDER,
			word_count_min: DEFAULT_WORD_COUNT_MIN,
			word_count_max: DEFAULT_WORD_COUNT_MAX,
			max_steps: None,
			sampling: Sampling::default(),
		}
	}
}

#[derive(Deserialize, Default)]
struct ConfigFile {
	#[serde(default)]
	app_settings: Settings,
}

impl Settings {
	/// Parses settings from a TOML document. A missing `[app_settings]` table
	/// yields the defaults.
	pub fn from_toml_str(contents: &str) -> Result<Self> {
		let file: ConfigFile = toml::from_str(contents)?;
		Ok(file.app_settings)
	}

	/// Reads and parses a TOML configuration file.
	pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let contents = read_file(&path)?;
		let settings = Self::from_toml_str(&contents)?;
		log::debug!("loaded settings from {}: {settings:?}", path.as_ref().display());
		Ok(settings)
	}

	/// Checks the chain order, the word count range and the step cap.
	pub fn validate(&self) -> Result<()> {
		validate_order(self.markov_order)?;
		self.generation_input().map(|_| ())
	}

	/// Generation parameters described by these settings.
	pub fn generation_input(&self) -> Result<GenerationInput> {
		let mut input = GenerationInput::new(self.word_count_min, self.word_count_max)?;
		input.sampling = self.sampling;
		input.set_max_steps(self.max_steps)?;
		Ok(input)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::GenError;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn empty_document_gives_defaults() {
		let settings = Settings::from_toml_str("").unwrap();
		assert_eq!(settings, Settings::default());
		assert_eq!(settings.markov_order, 2);
		assert_eq!(settings.word_count_min, 12);
		assert_eq!(settings.word_count_max, 36);
	}

	#[test]
	fn reads_app_settings_table() {
		let settings = Settings::from_toml_str(
			r#"
			[app_settings]
			training_data_file = "data/reviews.json"
			markov_order = 3
			word_count_min = 5
			word_count_max = 9
			max_steps = 1000
			sampling = "cumulative"
			"#,
		)
		.unwrap();
		assert_eq!(settings.training_data_file, PathBuf::from("data/reviews.json"));
		assert_eq!(settings.markov_order, 3);
		assert_eq!(settings.max_steps, Some(1000));
		let input = settings.generation_input().unwrap();
		assert_eq!(input.word_count_range(), 5..=9);
		assert_eq!(input.sampling, Sampling::Cumulative);
	}

	#[test]
	fn invalid_toml_is_parse_error() {
		assert!(matches!(Settings::from_toml_str("[app_settings"), Err(GenError::Parse(_))));
		assert!(matches!(
			Settings::from_toml_str("[app_settings]\nmarkov_order = \"two\""),
			Err(GenError::Parse(_))
		));
	}

	#[test]
	fn validate_checks_order_and_range() {
		let mut settings = Settings { markov_order: 0, ..Settings::default() };
		assert!(matches!(settings.validate(), Err(GenError::InvalidOrder(0))));
		settings.markov_order = 5;
		assert!(settings.validate().is_ok());
		settings.word_count_min = 40;
		assert!(matches!(settings.validate(), Err(GenError::InvalidWordRange { .. })));
	}

	#[test]
	fn validate_rejects_step_cap_below_word_count() {
		let mut settings = Settings { max_steps: Some(10), ..Settings::default() };
		assert!(matches!(
			settings.validate(),
			Err(GenError::InvalidStepLimit { max_steps: 10, word_count_max: 36 })
		));
		settings.max_steps = Some(0);
		assert!(settings.validate().unwrap_err().is_configuration());
		settings.max_steps = Some(36);
		assert!(settings.validate().is_ok());
		settings.max_steps = None;
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn reads_from_file() {
		let mut file = NamedTempFile::new().unwrap();
		write!(file, "[app_settings]\nmarkov_order = 4\n").unwrap();
		let settings = Settings::from_toml_file(file.path()).unwrap();
		assert_eq!(settings.markov_order, 4);
	}
}
