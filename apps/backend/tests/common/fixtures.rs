//! Test fixtures and factory functions for creating test data.

use chrono::{Duration, NaiveDate};
use serde_json::json;

/// Vocabulary used by most API tests.
pub const SAMPLE_VOCABULARY: &str = "\
// term | phonetic | translation | category | level
cat | kat | gato | Animals | A1
dog | dog | cachorro | Animals | A1
to cope with | tu kohp widh | lidar com | Verbs | B2
break the ice | breik dhi ais | quebrar o gelo | Idioms | B1
Order a coffee | - | Pedir um cafe | Mission
too short | line
";

/// Day `n` relative to a fixed start date.
pub fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(n)
}

/// Create a submit review request body.
pub fn review_request(term: &str, succeeded: bool) -> serde_json::Value {
    json!({ "term": term, "succeeded": succeeded })
}

/// Terms from a response's `items` array.
pub fn terms(body: &serde_json::Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["term"].as_str().unwrap().to_string())
        .collect()
}
