use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An office worker in the simulation
///
/// `relationships` maps every *other* character's id to this character's
/// affinity toward them. Membership is symmetric across the registry, scores
/// are directional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub relationships: BTreeMap<String, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catchphrase: Option<String>,
    pub age: u32,
    #[serde(default)]
    pub birthday: String,
    pub height: u32,
    #[serde(default)]
    pub mbti: String,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub dislikes: Vec<String>,
    #[serde(default = "default_employed")]
    pub is_employed: bool,
}

fn default_employed() -> bool {
    true
}

impl Character {
    /// Affinity this character holds toward `other_id`, zero when unknown
    pub fn affinity_toward(&self, other_id: &str) -> i32 {
        self.relationships.get(other_id).copied().unwrap_or(0)
    }
}

/// Category of a log line
///
/// Serialized with the short tags the simulation provider emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    /// Everyday office routine
    #[serde(rename = "neutral")]
    Routine,
    #[serde(rename = "positive")]
    Positive,
    /// Bad news, conflicts and system errors
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "romantic")]
    Romantic,
    /// Firings, marriages, breakups and other major events
    #[serde(rename = "drama")]
    MajorEvent,
}

impl LogKind {
    pub const ALL: [LogKind; 5] = [
        LogKind::Routine,
        LogKind::Positive,
        LogKind::Negative,
        LogKind::Romantic,
        LogKind::MajorEvent,
    ];

    /// Wire tag for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Routine => "neutral",
            LogKind::Positive => "positive",
            LogKind::Negative => "negative",
            LogKind::Romantic => "romantic",
            LogKind::MajorEvent => "drama",
        }
    }
}

/// A single line in the append-only history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub day: u32,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
}

impl LogEntry {
    pub fn new(id: impl Into<String>, day: u32, text: impl Into<String>, kind: LogKind) -> Self {
        Self {
            id: id.into(),
            day,
            text: text.into(),
            kind,
        }
    }
}

/// A log line proposed by the simulation provider, before id and day are assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedLog {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
}

/// Signed change to one character's affinity toward another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipUpdate {
    pub source_id: String,
    pub target_id: String,
    pub amount: i32,
}

/// Replacement relationship status (e.g. "Dating Mina", "Married")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub character_id: String,
    pub new_status: String,
}

/// Promotion, firing or rehire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdate {
    pub character_id: String,
    pub new_role: String,
    pub is_employed: bool,
}

/// Everything the provider proposes for one day.
///
/// All four arrays are required on the wire; a reply missing any of them is
/// rejected rather than read as an empty day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub logs: Vec<ProposedLog>,
    pub relationship_updates: Vec<RelationshipUpdate>,
    pub status_updates: Vec<StatusUpdate>,
    pub role_updates: Vec<RoleUpdate>,
}

impl SimulationResult {
    /// Stand-in result used when the provider could not produce a real one.
    /// Still advances the day when reduced.
    pub fn degraded() -> Self {
        Self {
            logs: vec![ProposedLog {
                text: "An error occurred while processing the simulation data. (JSON Parsing Error)"
                    .to_string(),
                kind: LogKind::Routine,
            }],
            ..Self::default()
        }
    }

    pub fn has_updates(&self) -> bool {
        !(self.relationship_updates.is_empty()
            && self.status_updates.is_empty()
            && self.role_updates.is_empty())
    }
}

/// Reduced view of a character sent to the simulation provider
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterContext<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub traits: &'a [String],
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catchphrase: Option<&'a str>,
    pub is_employed: bool,
    pub relationships: &'a BTreeMap<String, i32>,
}

impl<'a> From<&'a Character> for CharacterContext<'a> {
    fn from(c: &'a Character) -> Self {
        Self {
            id: &c.id,
            name: &c.name,
            role: &c.role,
            traits: &c.traits,
            status: &c.status,
            catchphrase: c.catchphrase.as_deref(),
            is_employed: c.is_employed,
            relationships: &c.relationships,
        }
    }
}

/// The full simulation: day counter, registry and history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    pub day: u32,
    pub characters: Vec<Character>,
    pub logs: Vec<LogEntry>,
}

impl SimulationState {
    /// Day 1 with the built-in roster and an empty history
    pub fn initial() -> Self {
        Self {
            day: 1,
            characters: crate::roster::default_roster(),
            logs: Vec::new(),
        }
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn character_by_name(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }
}
