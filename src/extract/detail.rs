use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::probe::{self, Probe};
use crate::record::{Attributes, PlayerRecord, StatKind};

// Detail pages vary a lot between card types, so core fields are probed
// document-wide and the first plausible match anywhere wins.
const NAME_PROBES: &[Probe] = &[
    Probe::text("h1"),
    Probe::text(".player-name"),
    Probe::text(".name"),
];

const RATING_PROBES: &[Probe] = &[Probe::text(".rating"), Probe::text(".ovr")];

const POSITION_PROBES: &[Probe] = &[Probe::text(".position")];

const CARD_PROBES: &[Probe] = &[
    Probe::attr(".player-card img", "src"),
    Probe::attr(".card img", "src"),
];

const CLUB_PROBES: &[Probe] = &[Probe::text(".club"), Probe::text(".team")];

const NATION_PROBES: &[Probe] = &[Probe::text(".nation"), Probe::text(".country")];

const HEIGHT_PROBES: &[Probe] = &[Probe::text(".height"), Probe::text(".player-height")];
const WEIGHT_PROBES: &[Probe] = &[Probe::text(".weight"), Probe::text(".player-weight")];
const FOOT_PROBES: &[Probe] = &[Probe::text(".foot"), Probe::text(".preferred-foot")];
const AGE_PROBES: &[Probe] = &[Probe::text(".age"), Probe::text(".player-age")];
const WORK_RATES_PROBES: &[Probe] = &[Probe::text(".work-rates"), Probe::text(".workrates")];
const WEAK_FOOT_PROBES: &[Probe] = &[Probe::text(".weak-foot"), Probe::text(".weakfoot")];
const SKILL_MOVES_PROBES: &[Probe] = &[Probe::text(".skill-moves"), Probe::text(".skills")];

/// Any element whose class mentions "stat" is a stat candidate.
fn stat_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse(r#"[class*="stat"]"#).expect("stat selector should parse"))
}

fn digit_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("digit run regex should compile"))
}

/// Extract a detailed record from a player page. Never fails: unrecognizable
/// HTML yields a record with empty core fields and no stats or attributes.
///
/// Tie-break is first-match-wins across the whole extractor, stats included:
/// once a stat is set, later matching elements do not overwrite it. This
/// matches the core-field policy instead of the last-match-wins behavior some
/// stat layouts would otherwise get.
pub fn extract_player(html: &str, id: &str) -> PlayerRecord {
    let document = Html::parse_document(html);

    let mut player = PlayerRecord {
        id: Some(id.to_string()),
        name: probe::first_match_doc(NAME_PROBES, &document).unwrap_or_default(),
        rating: probe::first_match_doc(RATING_PROBES, &document).unwrap_or_default(),
        position: probe::first_match_doc(POSITION_PROBES, &document).unwrap_or_default(),
        club: probe::first_match_doc(CLUB_PROBES, &document).unwrap_or_default(),
        nation: probe::first_match_doc(NATION_PROBES, &document).unwrap_or_default(),
        card_url: probe::first_match_doc(CARD_PROBES, &document),
        ..Default::default()
    };

    for element in document.select(stat_selector()) {
        let text = element.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        for kind in StatKind::ALL {
            if player.stats.get(kind).is_some() {
                continue;
            }
            if !kind.matches_text(text) {
                continue;
            }

            if let Some(run) = digit_run_regex().find(text)
                && let Ok(value) = run.as_str().parse()
            {
                player.stats.set(kind, value);
            }
        }
    }

    player.attributes = Attributes {
        height: probe::first_match_doc(HEIGHT_PROBES, &document),
        weight: probe::first_match_doc(WEIGHT_PROBES, &document),
        foot: probe::first_match_doc(FOOT_PROBES, &document),
        age: probe::first_match_doc(AGE_PROBES, &document),
        work_rates: probe::first_match_doc(WORK_RATES_PROBES, &document),
        weak_foot: probe::first_match_doc(WEAK_FOOT_PROBES, &document),
        skill_moves: probe::first_match_doc(SKILL_MOVES_PROBES, &document),
    };

    player
}
