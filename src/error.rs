use thiserror::Error;

/// Why a save file or autosave could not be read or written
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save file could not be accessed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save data is not a JSON object")]
    NotAnObject,

    #[error("save data has no `characters` array")]
    MissingCharacters,

    #[error("save data has no `logs` array")]
    MissingLogs,

    #[error("save data has no day counter")]
    MissingDay,

    #[error("save format version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("no save directory is configured")]
    NoStore,
}

/// Rejected add/edit requests
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a character needs a name")]
    MissingName,

    #[error("no character with id `{0}`")]
    UnknownCharacter(String),

    #[error("age {0} is outside the accepted range")]
    AgeOutOfRange(u32),

    #[error("height {0}cm is outside the accepted range")]
    HeightOutOfRange(u32),
}
