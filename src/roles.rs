use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Chooses a role for a new hire whose form left the role blank
pub trait RolePolicy: Send {
    fn assign_role(&mut self, age: u32) -> String;
}

/// One row of the hiring table: ages below `below_age` (or any age when
/// `None`) get `rare` when the roll exceeds `rare_above`, otherwise `common`.
#[derive(Debug, Clone, Copy)]
pub struct RoleBucket {
    pub below_age: Option<u32>,
    pub rare: &'static str,
    pub rare_above: f64,
    pub common: &'static str,
}

pub const ROLE_TABLE: [RoleBucket; 5] = [
    RoleBucket {
        below_age: Some(27),
        rare: "Part-timer",
        rare_above: 0.8,
        common: "Intern",
    },
    RoleBucket {
        below_age: Some(33),
        rare: "Assistant Manager",
        rare_above: 0.7,
        common: "Staff",
    },
    RoleBucket {
        below_age: Some(40),
        rare: "Team Lead",
        rare_above: 0.8,
        common: "Manager",
    },
    RoleBucket {
        below_age: Some(50),
        rare: "Director",
        rare_above: 0.8,
        common: "General Manager",
    },
    RoleBucket {
        below_age: None,
        rare: "President",
        rare_above: 0.9,
        common: "Executive",
    },
];

/// Role for `age` given a uniform roll in `[0, 1)`
pub fn role_for_roll(age: u32, roll: f64) -> &'static str {
    let bucket = ROLE_TABLE
        .iter()
        .find(|b| b.below_age.map_or(true, |limit| age < limit))
        .unwrap_or(&ROLE_TABLE[ROLE_TABLE.len() - 1]);

    if roll > bucket.rare_above {
        bucket.rare
    } else {
        bucket.common
    }
}

/// Age-bucketed weighted draw over [`ROLE_TABLE`]
pub struct AgeBucketRolePolicy<R: Rng + Send = SmallRng> {
    rng: R,
}

impl AgeBucketRolePolicy<SmallRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> AgeBucketRolePolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> RolePolicy for AgeBucketRolePolicy<R> {
    fn assign_role(&mut self, age: u32) -> String {
        let roll: f64 = self.rng.gen();
        role_for_roll(age, roll).to_string()
    }
}

/// Always hands out the same role
#[derive(Debug, Clone)]
pub struct FixedRolePolicy(pub String);

impl RolePolicy for FixedRolePolicy {
    fn assign_role(&mut self, _age: u32) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_split_on_age() {
        assert_eq!(role_for_roll(22, 0.1), "Intern");
        assert_eq!(role_for_roll(26, 0.81), "Part-timer");
        assert_eq!(role_for_roll(27, 0.5), "Staff");
        assert_eq!(role_for_roll(32, 0.75), "Assistant Manager");
        assert_eq!(role_for_roll(33, 0.0), "Manager");
        assert_eq!(role_for_roll(45, 0.99), "Director");
        assert_eq!(role_for_roll(50, 0.85), "Executive");
        assert_eq!(role_for_roll(64, 0.95), "President");
    }

    #[test]
    fn threshold_roll_stays_common() {
        assert_eq!(role_for_roll(20, 0.8), "Intern");
        assert_eq!(role_for_roll(30, 0.7), "Staff");
    }

    #[test]
    fn seeded_policy_is_repeatable() {
        let mut a = AgeBucketRolePolicy::seeded(7);
        let mut b = AgeBucketRolePolicy::seeded(7);
        let first: Vec<_> = (20..60).map(|age| a.assign_role(age)).collect();
        let second: Vec<_> = (20..60).map(|age| b.assign_role(age)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn drawn_roles_come_from_the_table() {
        let mut policy = AgeBucketRolePolicy::seeded(42);
        for age in [18, 29, 35, 44, 70] {
            let role = policy.assign_role(age);
            assert!(ROLE_TABLE
                .iter()
                .any(|b| b.rare == role || b.common == role));
        }
    }
}
