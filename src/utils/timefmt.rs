/// `seconds_to_hhmmss` - render a second count as a zero-padded "HH:MM:SS" string
///
/// hours grow past two digits rather than wrap
#[must_use]
pub fn seconds_to_hhmmss(secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// `hhmmss_to_seconds` - parse a "HH:MM:SS" string into total seconds
///
/// anything that is not three colon-separated integers counts as 0,
/// oversized totals saturate and negative components are passed
/// through for the caller to clamp
#[must_use]
pub fn hhmmss_to_seconds(hhmmss: &str) -> i64 {
    let parts: Vec<i64> = hhmmss
        .split(':')
        .filter_map(|p| p.trim().parse::<i64>().ok())
        .collect();
    if parts.len() == 3 && hhmmss.matches(':').count() == 2 {
        parts[0]
            .saturating_mul(3600)
            .saturating_add(parts[1].saturating_mul(60))
            .saturating_add(parts[2])
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_secs() {
        assert_eq!(seconds_to_hhmmss(0), "00:00:00");
        assert_eq!(seconds_to_hhmmss(59), "00:00:59");
        assert_eq!(seconds_to_hhmmss(61), "00:01:01");
        assert_eq!(seconds_to_hhmmss(3723), "01:02:03");
        assert_eq!(seconds_to_hhmmss(100_000), "27:46:40");
    }

    #[test]
    fn parse_hhmmss() {
        assert_eq!(hhmmss_to_seconds("00:00:00"), 0);
        assert_eq!(hhmmss_to_seconds("01:02:03"), 3723);
        assert_eq!(hhmmss_to_seconds("1:2:3"), 3723);
        assert_eq!(hhmmss_to_seconds(" 0: 1: 5"), 65);
    }

    #[test]
    fn parse_malformed() {
        assert_eq!(hhmmss_to_seconds(""), 0);
        assert_eq!(hhmmss_to_seconds("12:34"), 0);
        assert_eq!(hhmmss_to_seconds("aa:bb:cc"), 0);
        assert_eq!(hhmmss_to_seconds("00:aa:10"), 0);
        assert_eq!(hhmmss_to_seconds("1:2:3:4"), 0);
    }

    #[test]
    fn parse_negative() {
        // the transport seek clamps, the parser does not
        assert_eq!(hhmmss_to_seconds("-1:00:00"), -3600);
        assert_eq!(hhmmss_to_seconds("00:00:-5"), -5);
    }

    #[test]
    fn parse_extreme() {
        // totals saturate, hours too big for i64 itself are malformed
        assert_eq!(hhmmss_to_seconds("99999999999999999:00:00"), i64::MAX);
        assert_eq!(hhmmss_to_seconds("-99999999999999999:00:00"), i64::MIN);
        assert_eq!(hhmmss_to_seconds("99999999999999999999:00:00"), 0);
    }
}
