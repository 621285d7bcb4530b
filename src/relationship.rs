use crate::types::Character;

/// Lowest affinity one character can hold toward another
pub const MIN_AFFINITY: i32 = -100;
/// Highest affinity one character can hold toward another
pub const MAX_AFFINITY: i32 = 100;

/// Adds `amount` to `current`, saturating at the affinity bounds.
pub fn saturating_apply(current: i32, amount: i32) -> i32 {
    let sum = i64::from(current) + i64::from(amount);
    sum.clamp(i64::from(MIN_AFFINITY), i64::from(MAX_AFFINITY)) as i32
}

pub fn clamp_affinity(score: i32) -> i32 {
    score.clamp(MIN_AFFINITY, MAX_AFFINITY)
}

/// How a directional affinity reads on the relationship graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    Married,
    Lover,
    Friend,
    Enemy,
}

impl RelationshipKind {
    pub fn classify(score: i32) -> Self {
        if score >= 90 {
            RelationshipKind::Married
        } else if score >= 50 {
            RelationshipKind::Lover
        } else if score > 0 {
            RelationshipKind::Friend
        } else {
            RelationshipKind::Enemy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelationshipKind::Married => "married",
            RelationshipKind::Lover => "lover",
            RelationshipKind::Friend => "friend",
            RelationshipKind::Enemy => "enemy",
        }
    }
}

impl Character {
    /// Id of the character this one likes most, if anyone is liked at all
    pub fn best_friend(&self) -> Option<(&str, i32)> {
        self.relationships
            .iter()
            .filter(|(_, score)| **score > 0)
            .fold(None, |best: Option<(&str, i32)>, (id, score)| match best {
                Some((_, top)) if top >= *score => best,
                _ => Some((id.as_str(), *score)),
            })
    }

    /// Id of the character this one dislikes most, if anyone is disliked
    pub fn rival(&self) -> Option<(&str, i32)> {
        self.relationships
            .iter()
            .filter(|(_, score)| **score < 0)
            .fold(None, |worst: Option<(&str, i32)>, (id, score)| match worst {
                Some((_, low)) if low <= *score => worst,
                _ => Some((id.as_str(), *score)),
            })
    }
}

/// Restores the membership invariant on a registry read from outside.
///
/// Every character gains a zero entry for each other character it lacks,
/// self-entries are dropped and stored scores are clamped into range.
pub fn normalize_relationships(characters: &mut [Character]) {
    let ids: Vec<String> = characters.iter().map(|c| c.id.clone()).collect();

    for character in characters.iter_mut() {
        let own_id = character.id.clone();
        character.relationships.remove(&own_id);

        for id in ids.iter().filter(|id| **id != own_id) {
            character.relationships.entry(id.clone()).or_insert(0);
        }

        for score in character.relationships.values_mut() {
            *score = clamp_affinity(*score);
        }
    }
}

/// True when every character holds exactly one entry per other character
pub fn has_symmetric_membership(characters: &[Character]) -> bool {
    characters.iter().all(|c| {
        c.relationships.len() == characters.len() - 1
            && characters
                .iter()
                .filter(|other| other.id != c.id)
                .all(|other| c.relationships.contains_key(&other.id))
    })
}
