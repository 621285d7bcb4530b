//! Adding and editing characters.

use std::ops::RangeInclusive;

use crate::error::RegistryError;
use crate::ids::{character_id, IdGenerator};
use crate::roles::RolePolicy;
use crate::types::{Character, LogEntry, LogKind, SimulationState};

pub const ACCEPTED_AGES: RangeInclusive<u32> = 14..=100;
pub const ACCEPTED_HEIGHTS: RangeInclusive<u32> = 100..=250;

/// Status given to every new hire
pub const NEW_HIRE_STATUS: &str = "New hire";

/// Every editable field of a character; id and relationships are owned by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterProfile {
    pub name: String,
    pub role: String,
    pub traits: Vec<String>,
    pub status: String,
    pub image_url: Option<String>,
    pub catchphrase: Option<String>,
    pub age: u32,
    pub birthday: String,
    pub height: u32,
    pub mbti: String,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub is_employed: bool,
}

impl CharacterProfile {
    fn apply_to(self, character: &mut Character) {
        character.name = self.name;
        character.role = self.role;
        character.traits = self.traits;
        character.status = self.status;
        character.image_url = self.image_url;
        character.catchphrase = self.catchphrase;
        character.age = self.age;
        character.birthday = self.birthday;
        character.height = self.height;
        character.mbti = self.mbti;
        character.likes = self.likes;
        character.dislikes = self.dislikes;
        character.is_employed = self.is_employed;
    }
}

/// Raw form input: lists arrive as comma-separated text, role may be blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDraft {
    pub name: String,
    pub image_url: String,
    pub catchphrase: String,
    pub age: u32,
    pub birthday: String,
    pub height: u32,
    pub mbti: String,
    pub traits: String,
    pub likes: String,
    pub dislikes: String,
    pub role: String,
    pub is_employed: bool,
}

impl Default for CharacterDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            image_url: String::new(),
            catchphrase: String::new(),
            age: 27,
            birthday: "01-01".to_string(),
            height: 170,
            mbti: "ISTJ".to_string(),
            traits: String::new(),
            likes: String::new(),
            dislikes: String::new(),
            role: String::new(),
            is_employed: true,
        }
    }
}

impl CharacterDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pre-fills the form for editing an existing character
    pub fn from_character(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            image_url: character.image_url.clone().unwrap_or_default(),
            catchphrase: character.catchphrase.clone().unwrap_or_default(),
            age: character.age,
            birthday: character.birthday.clone(),
            height: character.height,
            mbti: character.mbti.clone(),
            traits: character.traits.join(", "),
            likes: character.likes.join(", "),
            dislikes: character.dislikes.join(", "),
            role: character.role.clone(),
            is_employed: character.is_employed,
        }
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::MissingName);
        }
        if !ACCEPTED_AGES.contains(&self.age) {
            return Err(RegistryError::AgeOutOfRange(self.age));
        }
        if !ACCEPTED_HEIGHTS.contains(&self.height) {
            return Err(RegistryError::HeightOutOfRange(self.height));
        }
        Ok(())
    }

    /// Validates the draft and turns it into a storable profile.
    ///
    /// `status` is the existing status when editing, `None` for a new hire.
    pub fn into_profile(
        self,
        status: Option<&str>,
        roles: &mut dyn RolePolicy,
    ) -> Result<CharacterProfile, RegistryError> {
        self.validate()?;

        let role = match self.role.trim() {
            "" => roles.assign_role(self.age),
            role => role.to_string(),
        };

        Ok(CharacterProfile {
            name: self.name.trim().to_string(),
            role,
            traits: split_list(&self.traits),
            status: status.unwrap_or(NEW_HIRE_STATUS).to_string(),
            image_url: non_empty(self.image_url),
            catchphrase: non_empty(self.catchphrase),
            age: self.age,
            birthday: self.birthday,
            height: self.height,
            mbti: self.mbti,
            likes: split_list(&self.likes),
            dislikes: split_list(&self.dislikes),
            is_employed: self.is_employed,
        })
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Splits comma-separated form text, trimming and dropping empty entries
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl SimulationState {
    /// Appends a new character with zero affinity in both directions toward
    /// everyone already registered. Returns the next state and the new id.
    pub fn with_character_added(
        &self,
        profile: CharacterProfile,
        ids: &mut dyn IdGenerator,
    ) -> (Self, String) {
        let new_id = character_id(ids);

        let mut characters: Vec<Character> = self
            .characters
            .iter()
            .cloned()
            .map(|mut c| {
                c.relationships.insert(new_id.clone(), 0);
                c
            })
            .collect();

        let mut newcomer = Character {
            id: new_id.clone(),
            name: String::new(),
            role: String::new(),
            traits: Vec::new(),
            status: String::new(),
            relationships: self.characters.iter().map(|c| (c.id.clone(), 0)).collect(),
            image_url: None,
            catchphrase: None,
            age: 0,
            birthday: String::new(),
            height: 0,
            mbti: String::new(),
            likes: Vec::new(),
            dislikes: Vec::new(),
            is_employed: true,
        };
        profile.apply_to(&mut newcomer);

        let text = format!(
            "📢 New employee '{}' has joined. ({} / age {})",
            newcomer.name, newcomer.role, newcomer.age
        );
        log::info!("{}", text);
        characters.push(newcomer);

        let mut logs = self.logs.clone();
        logs.push(LogEntry::new(ids.next_id(), self.day, text, LogKind::Routine));

        let next = Self {
            day: self.day,
            characters,
            logs,
        };
        (next, new_id)
    }

    /// Replaces every field except id and relationships.
    pub fn with_character_edited(
        &self,
        id: &str,
        profile: CharacterProfile,
        ids: &mut dyn IdGenerator,
    ) -> Result<Self, RegistryError> {
        let position = self
            .characters
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| RegistryError::UnknownCharacter(id.to_string()))?;

        let mut characters = self.characters.clone();
        profile.apply_to(&mut characters[position]);

        let text = format!(
            "📝 Personnel record for '{}' was updated.",
            characters[position].name
        );
        log::info!("{}", text);

        let mut logs = self.logs.clone();
        logs.push(LogEntry::new(ids.next_id(), self.day, text, LogKind::Routine));

        Ok(Self {
            day: self.day,
            characters,
            logs,
        })
    }
}
