//! UTC timestamps for generated reviews, without a date/time dependency.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current UTC time as Unix seconds.
pub fn now_unix_secs() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.unwrap_or_default()
		.as_secs()
}

/// Formats Unix seconds as an ISO-8601 UTC string (`YYYY-MM-DDTHH:MM:SSZ`).
pub fn unix_to_iso8601(secs: u64) -> String {
	let days = (secs / 86_400) as i64;
	let time_of_day = secs % 86_400;
	let (y, m, d) = civil_from_days(days);
	format!(
		"{y:04}-{m:02}-{d:02}T{:02}:{:02}:{:02}Z",
		time_of_day / 3600,
		(time_of_day % 3600) / 60,
		time_of_day % 60
	)
}

// Days since the epoch to a proleptic Gregorian (year, month, day).
fn civil_from_days(days: i64) -> (i64, u64, u64) {
	let z = days + 719_468;
	let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
	let doe = (z - era * 146_097) as u64;
	let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
	let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
	let mp = (5 * doy + 2) / 153;
	let d = doy - (153 * mp + 2) / 5 + 1;
	let m = if mp < 10 { mp + 3 } else { mp - 9 };
	let y = yoe as i64 + era * 400 + i64::from(m <= 2);
	(y, m, d)
}
