use crate::flex_time::MatchTime;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

/// A match counts as live from four hours before to four hours after its
/// listed start.
pub const LIVE_WINDOW_HOURS: i64 = 4;

static MATCHUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:[^:]+:\s*)?(.+?)\s+(?:vs\.?|v|x|@)\s+(.+?)(?:\s+-\s+.*)?\s*$")
        .expect("matchup regex")
});

/// Full URL of a badge or poster, `None` for an empty path.
pub fn image_url(image_base: &str, path: Option<&str>) -> Option<String> {
    let path = path?.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/images/{}",
        image_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

pub fn parse_timezone(name: &str) -> Tz {
    name.parse().unwrap_or(chrono_tz::UTC)
}

/// Localized start time, e.g. `Today 07:30 PM` or `Saturday 14 Sep 02:00 PM`.
/// Wall-clock labels the API sends verbatim ("8:00 PM ET") pass through.
pub fn format_date(time: &MatchTime, tz: &Tz, now: DateTime<Utc>) -> String {
    let Some(dt) = time.to_datetime() else {
        return match time {
            MatchTime::Text(label) => label.clone(),
            _ => "TBA".to_string(),
        };
    };

    let local = dt.with_timezone(tz);
    let today = now.with_timezone(tz).date_naive();
    let days = (local.date_naive() - today).num_days();

    let day = match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => local.format("%A %d %b").to_string(),
    };

    format!("{} {}", day, local.format("%I:%M %p"))
}

pub fn is_match_live(time: &MatchTime, now: DateTime<Utc>) -> bool {
    let Some(start) = time.to_datetime() else {
        return false;
    };
    let window = Duration::hours(LIVE_WINDOW_HOURS);
    now >= start - window && now <= start + window
}

/// Short "in 2h 5m" / "started 30m ago" label.
pub fn relative_label(time: &MatchTime, now: DateTime<Utc>) -> Option<String> {
    let start = time.to_datetime()?;
    let delta = start - now;
    let mins = delta.num_minutes().abs();
    let span = if mins >= 24 * 60 {
        format!("{}d {}h", mins / (24 * 60), (mins % (24 * 60)) / 60)
    } else if mins >= 60 {
        format!("{}h {}m", mins / 60, mins % 60)
    } else {
        format!("{}m", mins)
    };
    Some(if delta.num_minutes() >= 0 {
        format!("in {}", span)
    } else {
        format!("started {} ago", span)
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub home: String,
    pub away: String,
}

/// Split a title like `"NBA: Lakers vs Warriors - Regular Season"` into its
/// two sides. Used for cards of matches without a `teams` block.
pub fn parse_matchup(title: &str) -> Option<Matchup> {
    let caps = MATCHUP_RE.captures(title)?;
    let home = caps.get(1)?.as_str().trim().to_string();
    let away = caps.get(2)?.as_str().trim().to_string();
    if home.is_empty() || away.is_empty() {
        return None;
    }
    Some(Matchup { home, away })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_image_url() {
        assert_eq!(image_url("https://x/api", None), None);
        assert_eq!(image_url("https://x/api", Some("  ")), None);
        assert_eq!(
            image_url("https://x/api/", Some("badge/ferrari.webp")).as_deref(),
            Some("https://x/api/images/badge/ferrari.webp")
        );
        assert_eq!(
            image_url("https://x/api", Some("https://cdn/y.png")).as_deref(),
            Some("https://cdn/y.png")
        );
    }

    #[test]
    fn test_live_window_edges() {
        let start = t(2024, 9, 1, 12, 0);
        let time = MatchTime::from_datetime(start);
        assert!(is_match_live(&time, start));
        assert!(is_match_live(&time, t(2024, 9, 1, 8, 0)));
        assert!(is_match_live(&time, t(2024, 9, 1, 16, 0)));
        assert!(!is_match_live(&time, t(2024, 9, 1, 7, 59)));
        assert!(!is_match_live(&time, t(2024, 9, 1, 16, 1)));
        assert!(!is_match_live(&MatchTime::Unknown, start));
    }

    #[test]
    fn test_format_date_relative_days() {
        let now = t(2024, 9, 1, 10, 0);
        let tz = parse_timezone("UTC");
        assert_eq!(
            format_date(&MatchTime::from_datetime(t(2024, 9, 1, 19, 30)), &tz, now),
            "Today 07:30 PM"
        );
        assert_eq!(
            format_date(&MatchTime::from_datetime(t(2024, 9, 2, 14, 0)), &tz, now),
            "Tomorrow 02:00 PM"
        );
        assert_eq!(
            format_date(&MatchTime::from_datetime(t(2024, 9, 7, 14, 0)), &tz, now),
            "Saturday 07 Sep 02:00 PM"
        );
    }

    #[test]
    fn test_format_date_respects_timezone() {
        let now = t(2024, 9, 1, 10, 0);
        let kolkata = parse_timezone("Asia/Kolkata");
        assert_eq!(
            format_date(&MatchTime::from_datetime(t(2024, 9, 1, 14, 0)), &kolkata, now),
            "Today 07:30 PM"
        );
    }

    #[test]
    fn test_format_date_passthrough_and_unknown() {
        let tz = parse_timezone("UTC");
        let now = Utc::now();
        assert_eq!(format_date(&MatchTime::Text("8:00 PM ET".into()), &tz, now), "8:00 PM ET");
        assert_eq!(format_date(&MatchTime::Unknown, &tz, now), "TBA");
    }

    #[test]
    fn test_bad_timezone_falls_back_to_utc() {
        assert_eq!(parse_timezone("Mars/Olympus"), chrono_tz::UTC);
    }

    #[test]
    fn test_relative_label() {
        let now = t(2024, 9, 1, 10, 0);
        assert_eq!(
            relative_label(&MatchTime::from_datetime(t(2024, 9, 1, 12, 5)), now).as_deref(),
            Some("in 2h 5m")
        );
        assert_eq!(
            relative_label(&MatchTime::from_datetime(t(2024, 9, 1, 9, 30)), now).as_deref(),
            Some("started 30m ago")
        );
    }

    #[test]
    fn test_parse_matchup() {
        let m = parse_matchup("Lakers vs Warriors - NBA Regular Season").unwrap();
        assert_eq!(m.home, "Lakers");
        assert_eq!(m.away, "Warriors");

        let m = parse_matchup("NBA: Celtics @ Heat").unwrap();
        assert_eq!(m.home, "Celtics");
        assert_eq!(m.away, "Heat");

        let m = parse_matchup("Mumbai Indians vs Chennai Super Kings - IPL Final").unwrap();
        assert_eq!(m.away, "Chennai Super Kings");

        assert!(parse_matchup("Formula 1 Italian Grand Prix - Race Day").is_none());
    }
}
