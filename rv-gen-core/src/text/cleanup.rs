use std::sync::LazyLock;

use regex::Regex;

static HTML_ENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&#\w+;").unwrap());
static GLUED_PERIOD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(\S)").unwrap());

/// Tokenization artifacts and their fixes. Order matters: `i'm` is produced
/// before it gets capitalized.
const CONTRACTIONS: [(&str, &str); 5] = [
	("dnt ", "dn't "),
	("yre ", "y're "),
	(" im ", " i'm "),
	(" i'm ", " I'm "),
	(" i ", " I "),
];

// Removing quotes can expose a new ` .` or entity; a handful of passes always settles.
const MAX_PASSES: usize = 8;

/// Joins generated tokens with single spaces and cleans the result.
pub fn clean_text<S: AsRef<str>>(tokens: &[S]) -> String {
	let joined = tokens.iter().map(|t| t.as_ref()).collect::<Vec<&str>>().join(" ");
	cleanup(&joined)
}

/// Applies the cleanup pass until the text stops changing.
///
/// The result is a fixed point: `cleanup(&cleanup(s)) == cleanup(s)`.
pub fn cleanup(text: &str) -> String {
	let mut current = text.trim().to_owned();
	for _ in 0..MAX_PASSES {
		let next = cleanup_pass(&current);
		if next == current {
			break;
		}
		current = next;
	}
	current.trim().to_owned()
}

/// One pass of the cleanup rules, in order:
/// - collapse `" ."` to `"."`
/// - separate sentences glued by a period
/// - strip numeric character references (`&#39;`, `&#x27;`)
/// - drop double quotes
/// - fix contraction artifacts
/// - capitalize sentence starts
fn cleanup_pass(text: &str) -> String {
	let text = text.replace(" .", ".");
	let text = GLUED_PERIOD.replace_all(&text, ". $1");
	let text = HTML_ENTITY.replace_all(&text, "");
	let mut text = text.replace('"', "");

	for (from, to) in CONTRACTIONS {
		text = replace_overlapping(&text, from, to);
	}

	capitalize_sentences(&text)
}

// `str::replace` skips overlapping matches (" i i " only fixes the first);
// repeat until none is left.
fn replace_overlapping(text: &str, from: &str, to: &str) -> String {
	let mut text = text.replace(from, to);
	while text.contains(from) {
		text = text.replace(from, to);
	}
	text
}

/// Upper-cases the first letter of the text and the first letter after every `.`, `!` or `?`.
pub fn capitalize_sentences(text: &str) -> String {
	let mut result = String::with_capacity(text.len());
	let mut sentence_start = true;

	for c in text.chars() {
		if sentence_start && c.is_alphabetic() {
			result.extend(c.to_uppercase());
			sentence_start = false;
		} else {
			result.push(c);
		}
		if matches!(c, '.' | '!' | '?') {
			sentence_start = true;
		}
	}

	result
}
