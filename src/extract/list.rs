use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::probe::{self, Probe};
use crate::record::PlayerRecord;

// The site generates hashed class names, so probes match on stable class
// substrings instead of exact classes.
const NAME_PROBES: &[Probe] = &[
    Probe::text(r#"span[class*="name"]"#),
    Probe::text(r#"span[class*="player-name"]"#),
];

const RATING_PROBES: &[Probe] = &[
    Probe::text(r#"div[class*="rating"]"#),
    Probe::text(r#"span[class*="rating"]"#),
];

const POSITION_PROBES: &[Probe] = &[
    Probe::text(r#"div[class*="position"]"#),
    Probe::text(r#"span[class*="position"]"#),
];

const CLUB_PROBES: &[Probe] = &[
    Probe::text(r#"[class*="club"]"#),
    Probe::text(r#"[class*="team"]"#),
];

const NATION_PROBES: &[Probe] = &[
    Probe::text(r#"[class*="nation"]"#),
    Probe::text(r#"[class*="country"]"#),
];

const IMAGE_PROBES: &[Probe] = &[Probe::attr("img", "src")];

/// Anchors linking to a player detail page are the most reliable roots on
/// the list page; one record is built per anchor.
fn anchor_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| {
        Selector::parse(r#"a[href*="/player/"]"#).expect("anchor selector should parse")
    })
}

fn player_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/player/([\w-]+)").expect("player id regex should compile"))
}

/// Extract every player card found on a list page. Tolerates arbitrary HTML:
/// anchors with no recognizable fields produce records with empty strings,
/// and HTML with no player anchors produces an empty list.
pub fn extract_players(html: &str) -> Vec<PlayerRecord> {
    let document = Html::parse_document(html);
    let mut players = Vec::new();

    for anchor in document.select(anchor_selector()) {
        let id = anchor
            .value()
            .attr("href")
            .and_then(|href| player_id_from_href(href));

        players.push(PlayerRecord {
            id,
            name: probe::first_match(NAME_PROBES, anchor).unwrap_or_default(),
            rating: probe::first_match(RATING_PROBES, anchor).unwrap_or_default(),
            position: probe::first_match(POSITION_PROBES, anchor).unwrap_or_default(),
            club: probe::first_match(CLUB_PROBES, anchor).unwrap_or_default(),
            nation: probe::first_match(NATION_PROBES, anchor).unwrap_or_default(),
            card_url: probe::first_match(IMAGE_PROBES, anchor),
            ..Default::default()
        });
    }

    players
}

/// Derive the player identifier from the trailing path segment of a
/// detail-page link.
fn player_id_from_href(href: &str) -> Option<String> {
    player_id_regex()
        .captures(href)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_PAGE: &str = r#"
        <html><body>
          <a href="/24/player/24-100001">
            <img src="https://cdn.example/cards/100001.png">
            <div class="card-rating-x9f">97</div>
            <div class="card-position-x9f">ST</div>
            <span class="player-name-k2">Kylian Mbappe</span>
            <div class="club-badge">Real Madrid</div>
            <div class="nation-flag">France</div>
          </a>
          <a href="/24/player/24-100002">
            <span class="name-k2">Rodri</span>
            <span class="rating">91</span>
          </a>
          <a href="/about">not a player link</a>
        </body></html>
    "#;

    #[test]
    fn test_probe_tables_parse() {
        for probes in [
            NAME_PROBES,
            RATING_PROBES,
            POSITION_PROBES,
            CLUB_PROBES,
            NATION_PROBES,
            IMAGE_PROBES,
        ] {
            for probe in probes {
                assert!(
                    Selector::parse(probe.selector).is_ok(),
                    "selector '{}' should parse",
                    probe.selector
                );
            }
        }
    }

    #[test]
    fn test_extract_players_from_list_page() {
        let players = extract_players(LIST_PAGE);
        assert_eq!(players.len(), 2);

        let first = &players[0];
        assert_eq!(first.id.as_deref(), Some("24-100001"));
        assert_eq!(first.name, "Kylian Mbappe");
        assert_eq!(first.rating, "97");
        assert_eq!(first.position, "ST");
        assert_eq!(first.club, "Real Madrid");
        assert_eq!(first.nation, "France");
        assert_eq!(
            first.card_url.as_deref(),
            Some("https://cdn.example/cards/100001.png")
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let players = extract_players(LIST_PAGE);
        let second = &players[1];

        assert_eq!(second.id.as_deref(), Some("24-100002"));
        assert_eq!(second.name, "Rodri");
        assert_eq!(second.rating, "91");
        assert_eq!(second.position, "");
        assert_eq!(second.club, "");
        assert_eq!(second.nation, "");
        assert_eq!(second.card_url, None);
    }

    #[test]
    fn test_unrecognizable_html_yields_empty_list() {
        assert!(extract_players("<html><body><p>hi</p></body></html>").is_empty());
        assert!(extract_players("not html at all").is_empty());
        assert!(extract_players("").is_empty());
    }

    #[test]
    fn test_player_id_from_href() {
        assert_eq!(
            player_id_from_href("/24/player/abc-123_x").as_deref(),
            Some("abc-123_x")
        );
        assert_eq!(
            player_id_from_href("https://renderz.app/24/player/987").as_deref(),
            Some("987")
        );
        assert_eq!(player_id_from_href("/24/players"), None);
    }
}
