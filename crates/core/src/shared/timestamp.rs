/// Format a non-negative offset in seconds as `HH:MM:SS.mmm`.
///
/// Hours are not capped; past 99 hours the field simply grows wider.
/// Rounding happens at millisecond precision before the split, so
/// `59.9996` renders as `00:01:00.000` rather than `00:00:60.000`.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0, "00:00:00.000")]
    #[case::hour_minute_second(3661.25, "01:01:01.250")]
    #[case::sub_second(0.5, "00:00:00.500")]
    #[case::just_under_minute(59.999, "00:00:59.999")]
    #[case::rounds_up_into_next_minute(59.9996, "00:01:00.000")]
    #[case::past_a_day(90_000.0, "25:00:00.000")]
    #[case::three_digit_hours(360_000.125, "100:00:00.125")]
    fn test_format_timestamp(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(format_timestamp(seconds), expected);
    }

    #[test]
    fn test_fraction_always_three_digits() {
        let formatted = format_timestamp(12.3);
        let (_, fraction) = formatted.rsplit_once('.').unwrap();
        assert_eq!(fraction, "300");
    }
}
