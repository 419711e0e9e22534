use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The six card stats the upstream site displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Pace,
    Shooting,
    Passing,
    Dribbling,
    Defending,
    Physical,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Pace,
        StatKind::Shooting,
        StatKind::Passing,
        StatKind::Dribbling,
        StatKind::Defending,
        StatKind::Physical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Pace => "pace",
            StatKind::Shooting => "shooting",
            StatKind::Passing => "passing",
            StatKind::Dribbling => "dribbling",
            StatKind::Defending => "defending",
            StatKind::Physical => "physical",
        }
    }

    /// Test whether a text fragment mentions this stat in any of the three
    /// surface forms the site uses: full word uppercase ("PACE"), three-letter
    /// abbreviation ("PAC"), or capitalized word ("Pace").
    pub fn matches_text(&self, text: &str) -> bool {
        let label = self.label();
        let upper = label.to_uppercase();
        let abbrev = &upper[..3];

        let mut capitalized = String::with_capacity(label.len());
        let mut chars = label.chars();
        if let Some(first) = chars.next() {
            capitalized.extend(first.to_uppercase());
            capitalized.push_str(chars.as_str());
        }

        text.contains(upper.as_str()) || text.contains(abbrev) || text.contains(capitalized.as_str())
    }
}

/// Per-stat integer values. Absent stats are omitted from JSON entirely,
/// never serialized as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shooting: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dribbling: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defending: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<u32>,
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> Option<u32> {
        match kind {
            StatKind::Pace => self.pace,
            StatKind::Shooting => self.shooting,
            StatKind::Passing => self.passing,
            StatKind::Dribbling => self.dribbling,
            StatKind::Defending => self.defending,
            StatKind::Physical => self.physical,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: u32) {
        let slot = match kind {
            StatKind::Pace => &mut self.pace,
            StatKind::Shooting => &mut self.shooting,
            StatKind::Passing => &mut self.passing,
            StatKind::Dribbling => &mut self.dribbling,
            StatKind::Defending => &mut self.defending,
            StatKind::Physical => &mut self.physical,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        *self == Stats::default()
    }
}

/// Secondary player attributes, present only when the detail page exposes
/// them. Explicitly typed optional fields rather than a loose key/value map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_rates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weak_foot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_moves: Option<String>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        *self == Attributes::default()
    }
}

/// One scraped player. Core fields default to empty strings when no probe
/// matched; the rating is kept as the original text even when non-numeric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub club: String,
    #[serde(default)]
    pub nation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_url: Option<String>,
    #[serde(default, skip_serializing_if = "Stats::is_empty")]
    pub stats: Stats,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl PlayerRecord {
    /// Numeric value of the rating, parsed from its leading digit run.
    /// "95" and "95 OVR" both give 95; "Unknown" gives None.
    pub fn rating_value(&self) -> Option<i64> {
        let trimmed = self.rating.trim();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());

        if end == 0 {
            return None;
        }
        trimmed[..end].parse().ok()
    }
}

/// One scraped redeem code. Expiry cannot be determined at scrape time, so
/// the status is always "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeRecord {
    pub code: String,
    pub source: String,
    pub timestamp: String,
    pub status: String,
}

impl CodeRecord {
    pub fn new(code: &str, source: &str) -> Self {
        Self {
            code: code.to_string(),
            source: source.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            status: "unknown".to_string(),
        }
    }
}
