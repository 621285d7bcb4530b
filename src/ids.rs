use uuid::Uuid;

/// Source of fresh ids for log entries and new characters
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Random short ids, the default outside of tests
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(12);
        id
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... ids
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Character ids carry a `c_` prefix to tell them apart from log ids
pub fn character_id(ids: &mut dyn IdGenerator) -> String {
    format!("c_{}", ids.next_id())
}
