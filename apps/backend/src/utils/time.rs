//! Timestamp helpers. The domain stores all times as Unix milliseconds.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in milliseconds.
pub fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_millis_is_monotonic_enough() {
        let a = current_millis();
        let b = current_millis();
        assert!(b >= a);
        // Sanity: later than 2023-01-01 in milliseconds.
        assert!(a > 1_672_531_200_000);
    }
}
