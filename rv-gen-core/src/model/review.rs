use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::time;

/// Synthetic author stamped on every generated review.
pub const MARKOV_REVIEWER_ID: &str = "337737";
pub const MARKOV_REVIEWER_NAME: &str = "Markov";

/// Ratings for generated reviews are drawn uniformly from this range.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=4;

/// A product review, as found in the training corpus and as produced by the generator.
///
/// Field names follow the public review data set the corpus comes from.
/// Only `review_text` matters to training; the rest is carried through.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Review {
	#[serde(rename = "reviewerID", skip_serializing_if = "Option::is_none")]
	pub reviewer_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub asin: Option<String>,
	#[serde(rename = "reviewerName", skip_serializing_if = "Option::is_none")]
	pub reviewer_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub helpful: Option<Vec<i32>>,
	#[serde(rename = "reviewText", skip_serializing_if = "Option::is_none")]
	pub review_text: Option<String>,
	pub overall: f32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,
	#[serde(rename = "unixReviewTime")]
	pub unix_review_time: i64,
	#[serde(rename = "reviewTime", skip_serializing_if = "Option::is_none")]
	pub review_time: Option<String>,
}

impl Review {
	/// Wraps generated text with the fixed placeholder metadata.
	///
	/// The rating is uniform over `RATING_RANGE`, timestamps are the current UTC time.
	pub fn generated<R: Rng + ?Sized>(text: String, rng: &mut R) -> Self {
		let now = time::now_unix_secs();
		Self {
			reviewer_id: Some(MARKOV_REVIEWER_ID.to_owned()),
			asin: Some(String::new()),
			reviewer_name: Some(MARKOV_REVIEWER_NAME.to_owned()),
			helpful: None,
			review_text: Some(text),
			overall: f32::from(rng.random_range(RATING_RANGE)),
			summary: Some(String::new()),
			unix_review_time: i64::try_from(now).unwrap_or(i64::MAX),
			review_time: Some(time::unix_to_iso8601(now)),
		}
	}

	/// Text of the review, empty when absent.
	pub fn text(&self) -> &str {
		self.review_text.as_deref().unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn generated_review_has_placeholder_metadata() {
		let mut rng = StdRng::seed_from_u64(7);
		let review = Review::generated("Works fine.".to_owned(), &mut rng);
		assert_eq!(review.reviewer_id.as_deref(), Some(MARKOV_REVIEWER_ID));
		assert_eq!(review.reviewer_name.as_deref(), Some(MARKOV_REVIEWER_NAME));
		assert_eq!(review.asin.as_deref(), Some(""));
		assert_eq!(review.summary.as_deref(), Some(""));
		assert_eq!(review.text(), "Works fine.");
		assert!(review.unix_review_time > 0);
		assert!(review.review_time.as_deref().unwrap().ends_with('Z'));
	}

	#[test]
	fn ratings_stay_in_range() {
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..200 {
			let review = Review::generated(String::new(), &mut rng);
			assert!((1.0..=4.0).contains(&review.overall));
			assert_eq!(review.overall.fract(), 0.0);
		}
	}

	#[test]
	fn serializes_with_dataset_field_names() {
		let mut rng = StdRng::seed_from_u64(3);
		let review = Review::generated("Nice.".to_owned(), &mut rng);
		let json = serde_json::to_value(&review).unwrap();
		assert_eq!(json["reviewerID"], "337737");
		assert_eq!(json["reviewerName"], "Markov");
		assert_eq!(json["reviewText"], "Nice.");
		assert!(json.get("helpful").is_none());
		assert!(json.get("unixReviewTime").is_some());
	}

	#[test]
	fn missing_text_reads_as_empty() {
		let review: Review = serde_json::from_str(r#"{"asin": "B01"}"#).unwrap();
		assert_eq!(review.text(), "");
	}
}
