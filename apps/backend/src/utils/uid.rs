//! User id generation.
//!
//! Ids are `FP` + the first four digits of the epoch-seconds timestamp +
//! four random decimal digits, e.g. `FP17351234`.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

const PREFIX: &str = "FP";

/// Generate a user id.
pub fn generate_user_id() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let timestamp = seconds.to_string();
    let timestamp_part: String = timestamp.chars().take(4).collect();
    // Pad with leading zeros should the timestamp ever be shorter
    let timestamp_part = format!("{timestamp_part:0>4}");

    let random_part: u32 = rand::rng().random_range(0..10_000);

    format!("{PREFIX}{timestamp_part}{random_part:04}")
}
