use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalizes raw review text for training.
///
/// Lower-cases, strips diacritical marks (canonical decomposition, then drop
/// combining marks) and keeps punctuation, digits and whitespace untouched.
/// Splitting into tokens is left to the caller.
pub fn normalize(text: &str) -> String {
	text.nfd()
		.filter(|c| !is_combining_mark(*c))
		.flat_map(char::to_lowercase)
		.collect()
}
