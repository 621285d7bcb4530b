//! Built-in cast used when no save exists.

use crate::relationship::normalize_relationships;
use crate::types::Character;

struct Seed {
    id: &'static str,
    name: &'static str,
    role: &'static str,
    traits: &'static [&'static str],
    status: &'static str,
    catchphrase: &'static str,
    age: u32,
    birthday: &'static str,
    height: u32,
    mbti: &'static str,
    likes: &'static [&'static str],
    dislikes: &'static [&'static str],
}

const CAST: [Seed; 5] = [
    Seed {
        id: "c_1",
        name: "Kim Minjun",
        role: "General Manager",
        traits: &["Workaholic", "Authoritarian", "Secretly soft"],
        status: "Married",
        catchphrase: "In my day, we stayed until the work was done.",
        age: 48,
        birthday: "03-14",
        height: 174,
        mbti: "ESTJ",
        likes: &["Golf", "Company dinners"],
        dislikes: &["Excuses", "Leaving on time"],
    },
    Seed {
        id: "c_2",
        name: "Lee Seoyeon",
        role: "Manager",
        traits: &["Perfectionist", "Sharp-tongued"],
        status: "Single",
        catchphrase: "Send me the revised version by noon.",
        age: 35,
        birthday: "07-22",
        height: 165,
        mbti: "INTJ",
        likes: &["Spreadsheets", "Iced americano"],
        dislikes: &["Typos", "Small talk"],
    },
    Seed {
        id: "c_3",
        name: "Park Jihoon",
        role: "Assistant Manager",
        traits: &["Flirty", "Lazy", "Charming"],
        status: "Single",
        catchphrase: "Let's circle back on that after lunch.",
        age: 31,
        birthday: "11-02",
        height: 181,
        mbti: "ENFP",
        likes: &["Long lunches", "Gossip"],
        dislikes: &["Overtime", "Monday meetings"],
    },
    Seed {
        id: "c_4",
        name: "Choi Yuna",
        role: "Staff",
        traits: &["Diligent", "Shy"],
        status: "Single",
        catchphrase: "I'll take care of it!",
        age: 28,
        birthday: "05-09",
        height: 160,
        mbti: "ISFJ",
        likes: &["Baking", "Houseplants"],
        dislikes: &["Conflict", "Loud rooms"],
    },
    Seed {
        id: "c_5",
        name: "Jung Hoseok",
        role: "Intern",
        traits: &["Ambitious", "Clumsy"],
        status: "Single",
        catchphrase: "Is this going to be on the performance review?",
        age: 24,
        birthday: "09-30",
        height: 177,
        mbti: "ESTP",
        likes: &["Energy drinks", "Networking"],
        dislikes: &["Filing", "Being ignored"],
    },
];

/// Directional starting affinities; unlisted pairs start at zero
const STARTING_AFFINITY: [(&str, &str, i32); 10] = [
    ("c_1", "c_2", 40),
    ("c_2", "c_1", 25),
    ("c_1", "c_3", -30),
    ("c_3", "c_1", -15),
    ("c_2", "c_3", -20),
    ("c_3", "c_4", 35),
    ("c_4", "c_3", 55),
    ("c_4", "c_2", 20),
    ("c_5", "c_1", 30),
    ("c_1", "c_5", 5),
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The default office, with full relationship membership
pub fn default_roster() -> Vec<Character> {
    let mut characters: Vec<Character> = CAST
        .iter()
        .map(|seed| Character {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            role: seed.role.to_string(),
            traits: owned(seed.traits),
            status: seed.status.to_string(),
            relationships: Default::default(),
            image_url: None,
            catchphrase: Some(seed.catchphrase.to_string()),
            age: seed.age,
            birthday: seed.birthday.to_string(),
            height: seed.height,
            mbti: seed.mbti.to_string(),
            likes: owned(seed.likes),
            dislikes: owned(seed.dislikes),
            is_employed: true,
        })
        .collect();

    normalize_relationships(&mut characters);

    for (source, target, score) in STARTING_AFFINITY {
        if let Some(character) = characters.iter_mut().find(|c| c.id == source) {
            character.relationships.insert(target.to_string(), score);
        }
    }

    characters
}
