//! End-to-end tests: JSON corpus on disk → settings → training → generation.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rv_gen_core::{GenError, ReviewGenerator, Sampling, Settings};
use tempfile::NamedTempFile;

const CORPUS: &str = r#"[
	{"reviewerID": "A1", "asin": "B001", "reviewText": "This cable works great. I would buy it again.", "overall": 5.0},
	{"reviewerID": "A2", "asin": "B001", "reviewText": "Cheap plug &#39;broke&#39; after a week. Not happy.", "overall": 1.0},
	{"reviewerID": "A3", "asin": "B002", "reviewText": "Works as described. Fast shipping and good price.", "overall": 4.0},
	{"reviewerID": "A4", "asin": "B002", "reviewText": "Très bon produit. I didnt expect it to work so well.", "overall": 5.0},
	{"reviewerID": "A5", "asin": "B003", "summary": "no text"}
]"#;

fn corpus_file(contents: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(contents.as_bytes()).unwrap();
	file
}

fn settings(path: PathBuf, order: usize) -> Settings {
	Settings {
		training_data_file: path,
		markov_order: order,
		word_count_min: 4,
		word_count_max: 10,
		max_steps: Some(10_000),
		..Settings::default()
	}
}

#[test]
fn trains_and_generates_for_every_order() {
	let file = corpus_file(CORPUS);
	for order in 1..=5 {
		let generator = ReviewGenerator::from_settings(&settings(file.path().to_path_buf(), order)).unwrap();
		assert_eq!(generator.table().order(), order);
		let mut rng = StdRng::seed_from_u64(order as u64);
		for _ in 0..20 {
			let review = generator.generate(&mut rng).unwrap();
			let text = review.text();
			assert!(text.ends_with('.'), "{text}");
			assert!(!text.contains('"'));
			assert!(!text.contains("&#"));
			assert!(text.chars().next().unwrap().is_uppercase());
			assert!(text.split_whitespace().count() >= 4);
		}
	}
}

#[test]
fn raw_tokens_meet_the_target() {
	let file = corpus_file(CORPUS);
	let generator = ReviewGenerator::from_settings(&settings(file.path().to_path_buf(), 2)).unwrap();
	let mut rng = StdRng::seed_from_u64(99);
	for target in 1..=25 {
		let tokens = generator.generate_tokens(target, &mut rng).unwrap();
		assert!(tokens.len() >= target);
		assert!(tokens.last().unwrap().ends_with('.'));
		assert!(tokens.iter().all(|t| t.chars().all(|c| !c.is_uppercase())));
	}
}

#[test]
fn training_strips_diacritics() {
	let file = corpus_file(CORPUS);
	let generator = ReviewGenerator::from_settings(&settings(file.path().to_path_buf(), 1)).unwrap();
	let start = generator.table().start_distribution().unwrap();
	assert_eq!(start.count("tres"), Some(1));
	assert_eq!(start.count("très"), None);
	assert_eq!(start.total(), 4);
}

#[test]
fn concurrent_requests_share_one_generator() {
	let file = corpus_file(CORPUS);
	let mut config = settings(file.path().to_path_buf(), 2);
	config.sampling = Sampling::Cumulative;
	let generator = Arc::new(ReviewGenerator::from_settings(&config).unwrap());

	let handles: Vec<_> = (0..8)
		.map(|seed| {
			let generator = Arc::clone(&generator);
			thread::spawn(move || {
				let mut rng = StdRng::seed_from_u64(seed);
				(0..10)
					.map(|_| generator.generate(&mut rng).map(|r| r.text().to_owned()))
					.collect::<Result<Vec<_>, GenError>>()
			})
		})
		.collect();

	for handle in handles {
		let texts = handle.join().unwrap().unwrap();
		assert_eq!(texts.len(), 10);
	}
}

#[test]
fn missing_corpus_is_source_not_found() {
	let err = ReviewGenerator::from_settings(&settings(PathBuf::from("./nope/reviews.json"), 2)).unwrap_err();
	assert!(matches!(err, GenError::SourceNotFound(_)));
	assert!(err.is_configuration());

	let err = ReviewGenerator::from_settings(&Settings::default()).unwrap_err();
	assert!(matches!(err, GenError::SourceNotFound(_)));
}

#[test]
fn malformed_corpus_is_parse_error() {
	let file = corpus_file("[{\"reviewText\": ");
	let err = ReviewGenerator::from_settings(&settings(file.path().to_path_buf(), 2)).unwrap_err();
	assert!(matches!(err, GenError::Parse(_)));
}

#[test]
fn invalid_order_fails_before_reading() {
	let err = ReviewGenerator::from_settings(&settings(PathBuf::from("./nope.json"), 6)).unwrap_err();
	assert!(matches!(err, GenError::InvalidOrder(6)));
}

#[test]
fn corpus_without_text_is_not_trained() {
	for contents in ["[]", r#"[{"reviewText": ""}, {"reviewText": "   "}, {"asin": "B1"}]"#] {
		let file = corpus_file(contents);
		let err = ReviewGenerator::from_settings(&settings(file.path().to_path_buf(), 1)).unwrap_err();
		assert!(matches!(err, GenError::NotTrained), "{contents}");
		assert!(!err.is_configuration());
	}
}

#[test]
fn settings_file_drives_training() {
	let corpus = corpus_file(CORPUS);
	let mut config = NamedTempFile::new().unwrap();
	write!(
		config,
		"[app_settings]\ntraining_data_file = {:?}\nmarkov_order = 3\nword_count_min = 2\nword_count_max = 2\n",
		corpus.path().to_str().unwrap()
	)
	.unwrap();

	let settings = Settings::from_toml_file(config.path()).unwrap();
	let generator = ReviewGenerator::from_settings(&settings).unwrap();
	assert_eq!(generator.table().order(), 3);
	assert_eq!(generator.input().word_count_range(), 2..=2);
}
