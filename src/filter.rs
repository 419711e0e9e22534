use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::record::PlayerRecord;

/// Optional search constraints, deserialized straight from the query string.
/// Every supplied constraint must hold (logical AND); absent constraints
/// impose nothing.
///
/// String constraints are case-insensitive substring tests, except position
/// which is an exact match. Rating bounds compare against the record's parsed
/// rating; a record whose rating does not parse fails any supplied bound.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub position: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub min_rating: Option<i64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub max_rating: Option<i64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub club: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub nation: Option<String>,
}

impl SearchFilter {
    pub fn matches(&self, player: &PlayerRecord) -> bool {
        if let Some(name) = &self.name
            && !contains_ignore_case(&player.name, name)
        {
            return false;
        }

        if let Some(position) = &self.position
            && player.position != *position
        {
            return false;
        }

        if self.min_rating.is_some() || self.max_rating.is_some() {
            let Some(rating) = player.rating_value() else {
                return false;
            };
            if let Some(min) = self.min_rating
                && rating < min
            {
                return false;
            }
            if let Some(max) = self.max_rating
                && rating > max
            {
                return false;
            }
        }

        if let Some(club) = &self.club
            && !contains_ignore_case(&player.club, club)
        {
            return false;
        }

        if let Some(nation) = &self.nation
            && !contains_ignore_case(&player.nation, nation)
        {
            return false;
        }

        true
    }

    /// Retain the matching sublist, preserving input order.
    pub fn apply(&self, players: Vec<PlayerRecord>) -> Vec<PlayerRecord> {
        players.into_iter().filter(|p| self.matches(p)).collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Query strings arrive with empty values for blank form fields
/// ("minRating="); treat those the same as absent parameters.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, rating: &str, position: &str, club: &str, nation: &str) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            rating: rating.to_string(),
            position: position.to_string(),
            club: club.to_string(),
            nation: nation.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<PlayerRecord> {
        vec![
            player("Kylian Mbappe", "97", "ST", "Real Madrid", "France"),
            player("Rodri", "91", "CDM", "Manchester City", "Spain"),
            player("Legend Card", "Unknown", "ST", "Icons FC", "Brazil"),
        ]
    }

    #[test]
    fn test_no_constraints_is_identity() {
        let filter = SearchFilter::default();
        let players = sample();
        assert_eq!(filter.apply(players.clone()), players);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = SearchFilter {
            position: Some("ST".to_string()),
            ..Default::default()
        };
        let once = filter.apply(sample());
        let twice = filter.apply(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_name_substring_case_insensitive() {
        let filter = SearchFilter {
            name: Some("mbap".to_string()),
            ..Default::default()
        };
        let result = filter.apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Kylian Mbappe");
    }

    #[test]
    fn test_position_is_exact_match() {
        let filter = SearchFilter {
            position: Some("S".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(sample()).is_empty());

        let filter = SearchFilter {
            position: Some("ST".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(sample()).len(), 2);
    }

    #[test]
    fn test_rating_bounds() {
        let filter = SearchFilter {
            min_rating: Some(90),
            max_rating: Some(99),
            ..Default::default()
        };
        let result = filter.apply(sample());
        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Kylian Mbappe", "Rodri"]);

        let filter = SearchFilter {
            min_rating: Some(96),
            ..Default::default()
        };
        let result = filter.apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Kylian Mbappe");
    }

    #[test]
    fn test_unparseable_rating_fails_any_bound() {
        let filter = SearchFilter {
            max_rating: Some(99),
            ..Default::default()
        };
        assert!(!filter.matches(&player("X", "Unknown", "", "", "")));

        // No bound supplied: the non-numeric rating is not disqualifying.
        let filter = SearchFilter::default();
        assert!(filter.matches(&player("X", "Unknown", "", "", "")));
    }

    #[test]
    fn test_club_and_nation_substring() {
        let filter = SearchFilter {
            club: Some("city".to_string()),
            nation: Some("spain".to_string()),
            ..Default::default()
        };
        let result = filter.apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Rodri");
    }

    #[test]
    fn test_constraints_and_together() {
        let filter = SearchFilter {
            position: Some("ST".to_string()),
            min_rating: Some(90),
            ..Default::default()
        };
        // "Legend Card" is ST but its rating fails the bound.
        let result = filter.apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Kylian Mbappe");
    }

    #[test]
    fn test_query_string_deserialization() {
        let filter: SearchFilter =
            serde_urlencoded::from_str("name=messi&minRating=90&maxRating=&position=").unwrap();
        assert_eq!(filter.name.as_deref(), Some("messi"));
        assert_eq!(filter.min_rating, Some(90));
        assert_eq!(filter.max_rating, None);
        assert_eq!(filter.position, None);
        assert_eq!(filter.club, None);
    }
}
