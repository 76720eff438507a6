//! Display formatting for countdowns

/// Format a remaining time in milliseconds as `m:ss`, clamping negatives to zero
pub fn format_remaining(ms: i64) -> String {
    let ms = ms.max(0);
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(300_000), "5:00");
        assert_eq!(format_remaining(61_999), "1:01");
        assert_eq!(format_remaining(9_000), "0:09");
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(-1500), "0:00");
        assert_eq!(format_remaining(45 * 60_000), "45:00");
    }
}
