//! Human-readable formatting for byte counts, uptimes, and device IDs.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with binary (1024) units.
///
/// Two decimals below 10 units, one at or above: `0 B`, `1.50 KB`,
/// `512.0 B`, `10.0 KB`, `1.00 GB`.
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_owned();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value < 10.0 {
        format!("{value:.2} {}", UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Format an uptime in seconds as `Xd Yh Zm`.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    format!("{days}d {hours}h {minutes}m")
}

/// First segment of a device ID, for compact display.
pub fn short_id(device_id: &str) -> &str {
    let end = device_id.len().min(7);
    &device_id[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn plain_bytes_follow_the_decimal_rule() {
        assert_eq!(format_bytes(512), "512.0 B");
        assert_eq!(format_bytes(1023), "1023.0 B");
        assert_eq!(format_bytes(5), "5.00 B");
    }

    #[test]
    fn two_decimals_below_ten_units() {
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1_073_741_824), "1.00 GB");
    }

    #[test]
    fn one_decimal_at_or_above_ten_units() {
        assert_eq!(format_bytes(10_240), "10.0 KB");
        assert_eq!(format_bytes(500 * 1024 * 1024), "500.0 MB");
    }

    #[test]
    fn uptime_breaks_into_days_hours_minutes() {
        assert_eq!(format_uptime(0), "0d 0h 0m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
        assert_eq!(format_uptime(3_660), "0d 1h 1m");
    }

    #[test]
    fn short_id_truncates_long_ids() {
        assert_eq!(short_id("ABCDEFG-HIJKLMN-OPQRSTU"), "ABCDEFG");
        assert_eq!(short_id("AB"), "AB");
    }
}
