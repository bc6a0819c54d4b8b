//! Plain-text match cards for the terminal.

use crate::api::{Match, Sport, Stream};
use crate::classify::SportKind;
use crate::directory::HomeOverview;
use crate::format::{self, parse_matchup};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::fmt::Write;

pub struct CardStyle<'a> {
    pub tz: Tz,
    pub now: DateTime<Utc>,
    pub image_base: &'a str,
}

fn teams_line(m: &Match) -> Option<String> {
    if let Some(teams) = &m.teams {
        if let (Some(first), Some(second)) = (teams.first(), teams.second()) {
            return Some(format!("{} vs {}", first.name(), second.name()));
        }
    }
    parse_matchup(&m.title).map(|mu| format!("{} vs {}", mu.home, mu.away))
}

fn json_str<'v>(value: &'v Option<serde_json::Value>, key: &str) -> Option<&'v str> {
    value.as_ref()?.get(key)?.as_str()
}

pub fn match_card(m: &Match, style: &CardStyle<'_>) -> String {
    let mut out = String::new();

    let live = format::is_match_live(&m.date, style.now);
    let badge = if live { "[LIVE] " } else { "" };
    let star = if m.popular { " *" } else { "" };
    let _ = writeln!(out, "{}{}{}", badge, m.title, star);

    let mut meta = Vec::new();
    if let Some(kind) = SportKind::classify(m) {
        meta.push(kind.display_name().to_string());
    } else if let Some(category) = &m.category {
        meta.push(category.clone());
    }
    if let Some(league) = m.league.as_ref().or(m.series.as_ref()) {
        meta.push(league.clone());
    }
    if let Some(match_format) = &m.format {
        meta.push(match_format.clone());
    }
    let mut when = format::format_date(&m.date, &style.tz, style.now);
    if let Some(rel) = format::relative_label(&m.date, style.now) {
        when = format!("{} ({})", when, rel);
    }
    meta.push(when);
    let _ = writeln!(out, "  {}", meta.join(" | "));

    if let Some(teams) = teams_line(m) {
        let _ = writeln!(out, "  {}", teams);
    }
    if let Some(teams) = &m.teams {
        for team in [teams.first(), teams.second()].into_iter().flatten() {
            if let Some(badge) = format::image_url(style.image_base, team.badge()) {
                let _ = writeln!(out, "  Badge ({}): {}", team.name(), badge);
            }
        }
    }
    if let Some(score) = &m.score {
        let home = score.home.as_deref().unwrap_or("-");
        let away = score.away.as_deref().unwrap_or("-");
        let _ = writeln!(out, "  Score: {}  /  {}", home, away);
    }

    let venue = m
        .venue
        .as_deref()
        .or_else(|| json_str(&m.circuit, "name"));
    if let Some(venue) = venue {
        let _ = writeln!(out, "  Venue: {}", venue);
    }
    if let Some(session) = json_str(&m.session, "type") {
        let _ = writeln!(out, "  Session: {}", session);
    }
    if let Some(condition) = json_str(&m.weather, "condition") {
        let temp = json_str(&m.weather, "temperature").unwrap_or("");
        let _ = writeln!(out, "  Weather: {} {}", condition, temp);
    }
    if let Some(poster) = format::image_url(style.image_base, m.poster.as_deref()) {
        let _ = writeln!(out, "  Poster: {}", poster);
    }

    if m.sources.is_empty() {
        let _ = writeln!(out, "  No sources");
    }
    for s in &m.sources {
        let extras: Vec<&str> = [s.quality.as_deref(), s.language.as_deref(), s.region.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if extras.is_empty() {
            let _ = writeln!(out, "  -> {}/{}", s.source, s.id);
        } else {
            let _ = writeln!(out, "  -> {}/{} ({})", s.source, s.id, extras.join(", "));
        }
    }

    out
}

pub fn match_list(heading: &str, matches: &[Match], style: &CardStyle<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ({}) ==", heading, matches.len());
    if matches.is_empty() {
        let _ = writeln!(out, "  Nothing to show right now.");
    }
    for m in matches {
        out.push_str(&match_card(m, style));
        out.push('\n');
    }
    out
}

pub fn home(overview: &HomeOverview, style: &CardStyle<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Sports Streaming Hub: {} live, {} upcoming races\n",
        overview.live_count(),
        overview.upcoming_f1.len()
    );
    out.push_str(&match_list("Live Formula 1", &overview.live_f1, style));
    out.push_str(&match_list("Live Cricket", &overview.live_cricket, style));
    out.push_str(&match_list("Live Asia Cup", &overview.live_asia_cup, style));
    out.push_str(&match_list("Upcoming Formula 1", &overview.upcoming_f1, style));
    out
}

pub fn stream_list(streams: &[Stream]) -> String {
    let mut out = String::new();
    if streams.is_empty() {
        let _ = writeln!(out, "No streams available for this match");
        return out;
    }
    for (i, s) in streams.iter().enumerate() {
        let hd = if s.hd { "HD" } else { "SD" };
        let kind = if s.is_hls() { "hls" } else { "embed" };
        let _ = writeln!(
            out,
            "[{}] Stream {} {} {} ({}) {}",
            i + 1,
            s.stream_no,
            hd,
            s.language,
            kind,
            s.embed_url
        );
    }
    out
}

pub fn sports_list(sports: &[Sport]) -> String {
    let mut out = String::new();
    for s in sports {
        let _ = writeln!(out, "{:<16} {}", s.id, s.name);
    }
    out
}
