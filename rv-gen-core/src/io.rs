use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{GenError, Result};
use crate::model::review::Review;

/// Reads a whole text resource into memory.
///
/// Any failure to open or read the file (missing, empty name, permissions,
/// invalid UTF-8) is reported as `SourceNotFound`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	if path.as_os_str().is_empty() || !path.is_file() {
		return Err(GenError::SourceNotFound(path.to_path_buf()));
	}

	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|e| {
			log::warn!("failed to read {}: {e}", path.display());
			GenError::SourceNotFound(path.to_path_buf())
		})?;
	Ok(contents)
}

/// Loads the training corpus: a JSON array of review records.
///
/// Records may omit any field; unknown fields are ignored.
pub fn read_reviews<P: AsRef<Path>>(filename: P) -> Result<Vec<Review>> {
	let contents = read_file(&filename)?;
	let reviews: Vec<Review> = serde_json::from_str(&contents)?;
	log::debug!("read {} review records from {}", reviews.len(), filename.as_ref().display());
	Ok(reviews)
}
