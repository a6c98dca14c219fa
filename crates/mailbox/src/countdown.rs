//! Expiry countdown formatting.

use chrono::Duration;

/// Label shown once a mailbox has passed its expiry.
pub const EXPIRED_LABEL: &str = "Expired";

/// Format time left as `MM:SS`, or [`EXPIRED_LABEL`] once negative.
///
/// Minutes wrap at the hour, so lifespans above 60 minutes show the
/// minutes within the current hour.
pub fn format_time_left(remaining: Duration) -> String {
    let millis = remaining.num_milliseconds();
    if millis < 0 {
        return EXPIRED_LABEL.to_string();
    }

    let minutes = (millis % (1000 * 60 * 60)) / (1000 * 60);
    let seconds = (millis % (1000 * 60)) / 1000;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifespan() {
        assert_eq!(format_time_left(Duration::minutes(20)), "20:00");
    }

    #[test]
    fn test_partial_seconds_round_down() {
        assert_eq!(format_time_left(Duration::milliseconds(65_999)), "01:05");
        assert_eq!(format_time_left(Duration::milliseconds(999)), "00:00");
    }

    #[test]
    fn test_zero_is_not_expired() {
        assert_eq!(format_time_left(Duration::zero()), "00:00");
    }

    #[test]
    fn test_negative_is_expired() {
        assert_eq!(format_time_left(Duration::milliseconds(-1)), "Expired");
    }

    #[test]
    fn test_minutes_wrap_at_the_hour() {
        assert_eq!(format_time_left(Duration::minutes(61) + Duration::seconds(2)), "01:02");
    }
}
