//! Keyword-based sport classification of matches.
//!
//! Category checks compare the whole (lower-cased) category; title checks
//! are case-insensitive substring checks.

use crate::api::Match;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const F1_CATEGORIES: &[&str] = &[
    "f1",
    "formula1",
    "formula-1",
    "formula one",
    "fia f1",
    "fia formula 1",
    "f1 world championship",
];

// "gp " and " prix" keep their spaces to cut down on false hits.
const F1_TITLE_TERMS: &[&str] = &[
    "formula",
    "f1",
    "formula one",
    "fia f1",
    "fia formula 1",
    "grand prix",
    "gp ",
    " prix",
];

const CRICKET_CATEGORIES: &[&str] = &[
    "cricket",
    "ipl",
    "test",
    "odi",
    "t20",
    "t20i",
    "asia cup",
    "world cup",
    "champions trophy",
    "wt20",
    "bbl",
    "cpl",
    "psl",
    "county",
];

const CRICKET_TITLE_TERMS: &[&str] = &[
    "cricket",
    "ipl",
    "test match",
    "one day",
    "t20",
    "twenty20",
    "asia cup",
    "world cup cricket",
    "champions trophy",
    "big bash",
    "caribbean premier",
    "pakistan super league",
    "county championship",
    "ranji trophy",
    "vijay hazare",
    "syed mushtaq",
];

const CRICKET_NATIONS: &[&str] = &[
    "india",
    "pakistan",
    "australia",
    "england",
    "south africa",
    "new zealand",
    "sri lanka",
    "bangladesh",
    "afghanistan",
    "west indies",
    "zimbabwe",
    "ireland",
    "netherlands",
];

const CRICKET_LOOSE_TERMS: &[&str] = &["cricket", "ipl", "test", "odi", "t20"];

const BASKETBALL_TERMS: &[&str] = &["basketball", "nba", "wnba", "ncaa"];

const ASIA_CUP_CATEGORIES: &[&str] = &["asia cup", "asiacup"];
const ASIA_CUP_TITLE_TERMS: &[&str] = &["asia cup", "asian cup cricket"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn category_in(m: &Match, categories: &[&str]) -> bool {
    let category = m.category_lower();
    !category.is_empty() && categories.contains(&category.as_str())
}

fn field_contains(field: Option<&str>, needle: &str) -> bool {
    field
        .map(|f| f.to_lowercase().contains(needle))
        .unwrap_or(false)
}

pub fn is_f1_match(m: &Match) -> bool {
    category_in(m, F1_CATEGORIES) || contains_any(&m.title.to_lowercase(), F1_TITLE_TERMS)
}

pub fn is_cricket_match(m: &Match) -> bool {
    if category_in(m, CRICKET_CATEGORIES) {
        return true;
    }
    let title = m.title.to_lowercase();
    if contains_any(&title, CRICKET_TITLE_TERMS) {
        return true;
    }
    // "X vs Y" between two cricket nations
    title.contains("vs") && contains_any(&title, CRICKET_NATIONS)
}

/// The broader filter used by the combined cricket listing. Catches anything
/// mentioning "test" or "odi" in the title.
pub fn is_cricket_match_loose(m: &Match) -> bool {
    category_in(m, &CRICKET_LOOSE_TERMS[..])
        || contains_any(&m.title.to_lowercase(), CRICKET_LOOSE_TERMS)
}

pub fn is_basketball_match(m: &Match) -> bool {
    category_in(m, BASKETBALL_TERMS) || contains_any(&m.title.to_lowercase(), BASKETBALL_TERMS)
}

pub fn is_asia_cup_match(m: &Match) -> bool {
    category_in(m, ASIA_CUP_CATEGORIES)
        || contains_any(&m.title.to_lowercase(), ASIA_CUP_TITLE_TERMS)
        || field_contains(m.series.as_deref(), "asia cup")
        || field_contains(m.tournament.as_deref(), "asia cup")
}

/// Series, tournament or title mentions `tournament` (case-insensitive).
pub fn matches_tournament(m: &Match, tournament: &str) -> bool {
    let needle = tournament.to_lowercase();
    field_contains(m.series.as_deref(), &needle)
        || field_contains(m.tournament.as_deref(), &needle)
        || m.title.to_lowercase().contains(&needle)
}

/// Series or tournament mentions `tournament`; the title is not consulted.
pub fn matches_series(m: &Match, tournament: &str) -> bool {
    let needle = tournament.to_lowercase();
    field_contains(m.series.as_deref(), &needle) || field_contains(m.tournament.as_deref(), &needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SportKind {
    F1,
    Cricket,
    Basketball,
}

impl SportKind {
    pub fn all() -> &'static [SportKind] {
        &[SportKind::F1, SportKind::Cricket, SportKind::Basketball]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SportKind::F1 => "Formula 1",
            SportKind::Cricket => "Cricket",
            SportKind::Basketball => "Basketball",
        }
    }

    pub fn matches(&self, m: &Match) -> bool {
        match self {
            SportKind::F1 => is_f1_match(m),
            SportKind::Cricket => is_cricket_match(m),
            SportKind::Basketball => is_basketball_match(m),
        }
    }

    /// First kind whose filter accepts the match.
    pub fn classify(m: &Match) -> Option<SportKind> {
        Self::all().iter().copied().find(|kind| kind.matches(m))
    }
}

impl fmt::Display for SportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f1" | "formula1" | "formula-1" | "formula one" => Ok(SportKind::F1),
            "cricket" => Ok(SportKind::Cricket),
            "basketball" | "nba" => Ok(SportKind::Basketball),
            other => Err(format!("unknown sport: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(title: &str, category: Option<&str>) -> Match {
        Match {
            title: title.to_string(),
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_f1_by_category_and_title() {
        assert!(is_f1_match(&m("Some Session", Some("F1"))));
        assert!(is_f1_match(&m("Some Session", Some("fia formula 1"))));
        assert!(is_f1_match(&m("Singapore Grand Prix - Qualifying", None)));
        assert!(is_f1_match(&m("Monaco GP Race", Some("motor-sports"))));
        assert!(is_f1_match(&m("Gran Premio d'Italia Prix", None)));
        assert!(!is_f1_match(&m("Lakers vs Warriors", Some("basketball"))));
    }

    #[test]
    fn test_f1_gp_needs_trailing_space() {
        assert!(!is_f1_match(&m("MotoGP", Some("motorsport"))));
    }

    #[test]
    fn test_cricket_nation_rule() {
        assert!(is_cricket_match(&m("India vs Pakistan", None)));
        // Nation without "vs" is not enough
        assert!(!is_cricket_match(&m("England Rugby Highlights", Some("rugby"))));
        // "vs" without a cricket nation is not enough
        assert!(!is_cricket_match(&m("Lakers vs Celtics", Some("basketball"))));
    }

    #[test]
    fn test_cricket_terms() {
        assert!(is_cricket_match(&m("Big Bash League: Sixers v Stars", None)));
        assert!(is_cricket_match(&m("Anything", Some("PSL"))));
        assert!(!is_cricket_match(&m("Test Drive Show", None)));
    }

    #[test]
    fn test_loose_cricket_is_broader() {
        let show = m("Test Drive Show", None);
        assert!(is_cricket_match_loose(&show));
        assert!(!is_cricket_match(&show));
        assert!(!is_cricket_match_loose(&m("India vs Pakistan", Some("football"))));
    }

    #[test]
    fn test_basketball() {
        assert!(is_basketball_match(&m("NBA: Lakers vs Warriors", None)));
        assert!(is_basketball_match(&m("x", Some("wnba"))));
        assert!(!is_basketball_match(&m("Arsenal vs Chelsea", Some("football"))));
    }

    #[test]
    fn test_asia_cup() {
        let mut by_series = m("Bangladesh vs Sri Lanka", None);
        by_series.series = Some("Asia Cup 2024".to_string());
        assert!(is_asia_cup_match(&by_series));

        let mut by_tournament = m("Afghanistan vs Nepal", None);
        by_tournament.tournament = Some("ASIA CUP".to_string());
        assert!(is_asia_cup_match(&by_tournament));

        assert!(is_asia_cup_match(&m("x", Some("asiacup"))));
        assert!(!is_asia_cup_match(&m("India vs Australia - 1st Test", None)));
    }

    #[test]
    fn test_tournament_matching() {
        let mut ipl = m("Mumbai Indians vs Chennai Super Kings", None);
        ipl.series = Some("Indian Premier League 2024".to_string());
        assert!(matches_tournament(&ipl, "premier league"));
        assert!(matches_series(&ipl, "premier league"));
        assert!(matches_tournament(&ipl, "chennai"));
        assert!(!matches_series(&ipl, "chennai"));
    }

    #[test]
    fn test_sport_kind_parse_and_classify() {
        assert_eq!("F1".parse::<SportKind>(), Ok(SportKind::F1));
        assert_eq!("nba".parse::<SportKind>(), Ok(SportKind::Basketball));
        assert!("curling".parse::<SportKind>().is_err());
        assert_eq!(
            SportKind::classify(&m("India vs England", None)),
            Some(SportKind::Cricket)
        );
        assert_eq!(SportKind::classify(&m("Tennis Final", Some("tennis"))), None);
    }
}
