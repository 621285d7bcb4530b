//! # Office Sim
//!
//! A day-by-day office life simulation. A fixed cast of coworkers evolves as a
//! language model narrates each day and proposes relationship, status and role
//! changes; the library folds those proposals into the cast and keeps the
//! whole run in a portable save file.
//!
//! ## Features
//!
//! - **Day Reducer**: Pure merge of a day's result into the registry, with saturating affinity scores
//! - **Character Registry**: Hiring and editing with symmetric relationship membership
//! - **Save Files**: Versioned JSON envelope for autosave, export and import
//! - **LLM Integration**: Built-in Ollama support for generating each day
//! - **Pluggable Policies**: Swappable role assignment and id generation for deterministic runs
//!
//! ## Example
//!
//! ```rust,no_run
//! use office_sim::{AdvanceOutcome, CharacterDraft, SimConfig, SimulationEngine};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = SimConfig::load("office_sim.json")?.with_env_overrides();
//! let engine = SimulationEngine::from_config(&config)?;
//!
//! engine.add_character(CharacterDraft::named("Han Sora"))?;
//!
//! if let AdvanceOutcome::Advanced { day, logs } = engine.advance_day().await {
//!     println!("now on day {day}, {} new entries", logs.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod llm;
pub mod parser;
pub mod persistence;
pub mod prompts;
pub mod reducer;
pub mod registry;
pub mod relationship;
pub mod roles;
pub mod roster;
pub mod traits;
pub mod types;

// Re-export main types for convenience
pub use config::SimConfig;
pub use engine::{AdvanceOutcome, SimulationEngine};
pub use error::{PersistenceError, RegistryError};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use persistence::{LoadMode, SaveData, SaveStore, SAVE_FORMAT_VERSION};
pub use reducer::{reduce_day, DayOutcome};
pub use registry::{CharacterDraft, CharacterProfile};
pub use relationship::{RelationshipKind, MAX_AFFINITY, MIN_AFFINITY};
pub use roles::{AgeBucketRolePolicy, FixedRolePolicy, RolePolicy};
pub use traits::{DaySimulator, LlmDaySimulator};
pub use types::{
    Character, CharacterContext, LogEntry, LogKind, ProposedLog, RelationshipUpdate, RoleUpdate,
    SimulationResult, SimulationState, StatusUpdate,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
