use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::SimConfig;
use crate::error::{PersistenceError, RegistryError};
use crate::ids::{IdGenerator, RandomIds};
use crate::llm::OllamaClient;
use crate::persistence::{self, SaveStore};
use crate::registry::CharacterDraft;
use crate::roles::{AgeBucketRolePolicy, RolePolicy};
use crate::traits::{DaySimulator, LlmDaySimulator};
use crate::types::{LogEntry, LogKind, SimulationState};

/// Result of a day-advance request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The day was simulated; `day` is the new counter
    Advanced { day: u32, logs: Vec<LogEntry> },
    /// Another advance was still in flight; nothing happened
    Busy,
    /// The provider failed; an error entry was logged and the day kept
    ProviderFailed { day: u32, reason: String },
}

/// Owns the simulation state and runs every transition on it
pub struct SimulationEngine {
    /// Current simulation state
    state: Arc<Mutex<SimulationState>>,

    /// Source of each day's events
    simulator: Arc<dyn DaySimulator>,

    /// Autosave and export target; `None` keeps everything in memory
    store: Option<SaveStore>,

    /// Set while a day-advance is awaiting the simulator
    busy: AtomicBool,

    ids: Mutex<Box<dyn IdGenerator>>,
    roles: Mutex<Box<dyn RolePolicy>>,
}

/// Clears the busy flag however the advance ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SimulationEngine {
    /// Engine over an explicit state, without persistence
    pub fn new(state: SimulationState, simulator: impl DaySimulator + 'static) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            simulator: Arc::new(simulator),
            store: None,
            busy: AtomicBool::new(false),
            ids: Mutex::new(Box::new(RandomIds)),
            roles: Mutex::new(Box::new(AgeBucketRolePolicy::from_entropy())),
        }
    }

    /// Engine that resumes from the autosave slot, or the default roster when
    /// there is no usable autosave
    pub fn with_store(store: SaveStore, simulator: impl DaySimulator + 'static) -> Self {
        let state = store.load_autosave().unwrap_or_else(|| {
            log::info!("Starting from the default roster");
            SimulationState::initial()
        });
        let mut engine = Self::new(state, simulator);
        engine.store = Some(store);
        engine
    }

    /// Engine wired to Ollama as described by `config`
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let llm = OllamaClient::new(&config.model)
            .with_base_url(&config.llm_base_url)
            .with_timeout(config.request_timeout())?;
        let simulator = LlmDaySimulator::new(llm, &config.data_dir)
            .with_fallback(config.fallback_on_provider_error);

        Ok(Self::with_store(config.save_store(), simulator))
    }

    pub fn with_id_generator(self, ids: impl IdGenerator + 'static) -> Self {
        *lock(&self.ids) = Box::new(ids);
        self
    }

    pub fn with_role_policy(self, roles: impl RolePolicy + 'static) -> Self {
        *lock(&self.roles) = Box::new(roles);
        self
    }

    /// Get a copy of the current state
    pub fn state(&self) -> SimulationState {
        lock(&self.state).clone()
    }

    pub fn day(&self) -> u32 {
        lock(&self.state).day
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Runs `update` against the state, then autosaves the result
    fn update_state<T>(
        &self,
        update: impl FnOnce(&SimulationState, &mut dyn IdGenerator) -> (SimulationState, T),
    ) -> T {
        let (snapshot, value) = {
            let mut state = lock(&self.state);
            let mut ids = lock(&self.ids);
            let (next, value) = update(&*state, &mut **ids);
            *state = next;
            (state.clone(), value)
        };
        self.persist(&snapshot);
        value
    }

    /// Like [`Self::update_state`], but a rejected update leaves both the state
    /// and the autosave untouched.
    fn try_update_state<T, E>(
        &self,
        update: impl FnOnce(&SimulationState, &mut dyn IdGenerator) -> Result<(SimulationState, T), E>,
    ) -> Result<T, E> {
        let (snapshot, value) = {
            let mut state = lock(&self.state);
            let mut ids = lock(&self.ids);
            let (next, value) = update(&*state, &mut **ids)?;
            *state = next;
            (state.clone(), value)
        };
        self.persist(&snapshot);
        Ok(value)
    }

    fn persist(&self, state: &SimulationState) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save_autosave(state) {
                log::error!("Autosave failed: {}", e);
            }
        }
    }

    /// Simulate the current day and fold the result into the state.
    ///
    /// Only one advance runs at a time; a request made while another is in
    /// flight is dropped and reported as [`AdvanceOutcome::Busy`].
    pub async fn advance_day(&self) -> AdvanceOutcome {
        if self.busy.swap(true, Ordering::AcqRel) {
            log::debug!("Day advance already in progress, ignoring request");
            return AdvanceOutcome::Busy;
        }
        let _guard = BusyGuard(&self.busy);

        let snapshot = self.state();
        log::info!("📅 Simulating day {}", snapshot.day);

        match self
            .simulator
            .simulate_day(snapshot.day, &snapshot.characters)
            .await
        {
            Ok(result) => self.update_state(|state, ids| {
                let next = state.advanced(&result, ids);
                let logs = next.logs[state.logs.len()..].to_vec();
                for entry in &logs {
                    log::info!("  📝 [{}] {}", entry.kind.as_str(), entry.text);
                }
                log::info!("🌙 Day {} complete", state.day);
                let outcome = AdvanceOutcome::Advanced { day: next.day, logs };
                (next, outcome)
            }),
            Err(e) => {
                log::error!("Error processing day {}: {:#}", snapshot.day, e);
                self.update_state(|state, ids| {
                    let mut next = state.clone();
                    next.logs.push(LogEntry::new(
                        ids.next_id(),
                        state.day,
                        "Communication with the AI server failed.",
                        LogKind::Negative,
                    ));
                    let outcome = AdvanceOutcome::ProviderFailed {
                        day: state.day,
                        reason: format!("{:#}", e),
                    };
                    (next, outcome)
                })
            }
        }
    }

    /// Hire a new character from a form draft. Returns the new id.
    pub fn add_character(&self, draft: CharacterDraft) -> Result<String, RegistryError> {
        let profile = draft.into_profile(None, &mut **lock(&self.roles))?;
        Ok(self.update_state(|state, ids| state.with_character_added(profile, ids)))
    }

    /// Replace a character's profile; relationships and id are kept
    pub fn edit_character(&self, id: &str, draft: CharacterDraft) -> Result<(), RegistryError> {
        let status = self
            .state()
            .character(id)
            .map(|c| c.status.clone())
            .ok_or_else(|| RegistryError::UnknownCharacter(id.to_string()))?;
        let profile = draft.into_profile(Some(status.as_str()), &mut **lock(&self.roles))?;

        self.try_update_state(|state, ids| {
            state
                .with_character_edited(id, profile, ids)
                .map(|next| (next, ()))
        })
    }

    /// Replace the whole state with the contents of a save file.
    ///
    /// The state is left untouched when the file is rejected.
    pub fn import_str(&self, text: &str) -> Result<(), PersistenceError> {
        let imported = persistence::import_state(text, &mut **lock(&self.ids))?;
        log::info!(
            "💾 Imported save: day {}, {} characters, {} log entries",
            imported.day,
            imported.characters.len(),
            imported.logs.len()
        );
        self.update_state(|_, _| (imported, ()));
        Ok(())
    }

    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.import_str(&text)
    }

    /// Serialized envelope of the current state
    pub fn export_string(&self) -> Result<String, PersistenceError> {
        persistence::encode(&self.state())
    }

    /// Write an export file into the configured export directory
    pub fn export(&self) -> Result<PathBuf, PersistenceError> {
        let store = self.store.as_ref().ok_or(PersistenceError::NoStore)?;
        store.export(&self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::roles::FixedRolePolicy;
    use crate::types::{ProposedLog, SimulationResult, StatusUpdate};
    use async_trait::async_trait;
    use anyhow::anyhow;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    struct Scripted(Result<SimulationResult, String>);

    #[async_trait]
    impl DaySimulator for Scripted {
        async fn simulate_day(&self, _day: u32, _c: &[crate::types::Character]) -> Result<SimulationResult> {
            self.0.clone().map_err(|e| anyhow!(e))
        }
    }

    /// Holds each call until released, counting invocations
    struct Gated {
        gate: Arc<Notify>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DaySimulator for Gated {
        async fn simulate_day(&self, _day: u32, _c: &[crate::types::Character]) -> Result<SimulationResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(SimulationResult::default())
        }
    }

    fn engine(sim: impl DaySimulator + 'static) -> SimulationEngine {
        SimulationEngine::new(SimulationState::initial(), sim)
            .with_id_generator(SequentialIds::new("t"))
            .with_role_policy(FixedRolePolicy("Intern".into()))
    }

    #[tokio::test]
    async fn successful_advance_increments_day() {
        let result = SimulationResult {
            logs: vec![ProposedLog {
                text: "Stand-up ran long.".into(),
                kind: LogKind::Routine,
            }],
            status_updates: vec![StatusUpdate {
                character_id: "c_4".into(),
                new_status: "Dating Park Jihoon".into(),
            }],
            ..Default::default()
        };
        let engine = engine(Scripted(Ok(result)));

        let outcome = engine.advance_day().await;
        let state = engine.state();

        match outcome {
            AdvanceOutcome::Advanced { day, logs } => {
                assert_eq!(day, 2);
                assert_eq!(logs.len(), 1);
                assert_eq!(logs[0].day, 1);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(state.day, 2);
        assert_eq!(state.character("c_4").unwrap().status, "Dating Park Jihoon");
        assert!(!engine.is_busy());
    }

    #[tokio::test]
    async fn degraded_result_still_advances() {
        let engine = engine(Scripted(Ok(SimulationResult::degraded())));
        engine.advance_day().await;
        assert_eq!(engine.day(), 2);
        assert_eq!(engine.state().logs.len(), 1);
    }

    #[tokio::test]
    async fn provider_failure_keeps_day_and_logs_once() {
        let engine = engine(Scripted(Err("boom".into())));
        let before = engine.state();

        let outcome = engine.advance_day().await;
        let after = engine.state();

        assert!(matches!(outcome, AdvanceOutcome::ProviderFailed { day: 1, .. }));
        assert_eq!(after.day, before.day);
        assert_eq!(after.characters, before.characters);
        assert_eq!(after.logs.len(), 1);
        assert_eq!(after.logs[0].kind, LogKind::Negative);
        assert_eq!(after.logs[0].day, 1);
        assert!(!engine.is_busy());
    }

    #[tokio::test]
    async fn concurrent_advance_is_dropped() {
        let gate = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = engine(Gated {
            gate: Arc::clone(&gate),
            calls: Arc::clone(&calls),
        });

        let first = engine.advance_day();
        let second = async {
            tokio::task::yield_now().await;
            let outcome = engine.advance_day().await;
            gate.notify_one();
            outcome
        };
        let (first, second) = futures::join!(first, second);

        assert!(matches!(first, AdvanceOutcome::Advanced { day: 2, .. }));
        assert_eq!(second, AdvanceOutcome::Busy);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.day(), 2);
    }

    #[test]
    fn add_and_edit_through_engine() {
        let engine = engine(Scripted(Ok(SimulationResult::default())));

        let id = engine.add_character(CharacterDraft::named("Han Sora")).unwrap();
        let hired = engine.state().character(&id).unwrap().clone();
        assert_eq!(hired.role, "Intern");
        assert_eq!(hired.status, "New hire");

        let mut draft = CharacterDraft::from_character(&hired);
        draft.role = "Designer".into();
        engine.edit_character(&id, draft).unwrap();

        let state = engine.state();
        let edited = state.character(&id).unwrap();
        assert_eq!(edited.role, "Designer");
        assert_eq!(edited.status, "New hire");
        assert_eq!(state.logs.len(), 2);
    }

    #[test]
    fn rejected_draft_leaves_state_alone() {
        let engine = engine(Scripted(Ok(SimulationResult::default())));
        let before = engine.state();

        assert_eq!(
            engine.add_character(CharacterDraft::named("")),
            Err(RegistryError::MissingName)
        );
        assert!(matches!(
            engine.edit_character("c_999", CharacterDraft::named("X")),
            Err(RegistryError::UnknownCharacter(_))
        ));
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn bad_import_leaves_state_alone() {
        let engine = engine(Scripted(Ok(SimulationResult::default())));
        let before = engine.state();

        assert!(engine.import_str(r#"{"day": 9, "logs": []}"#).is_err());
        assert!(engine.import_str("not json").is_err());
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn export_without_store_is_an_error() {
        let engine = engine(Scripted(Ok(SimulationResult::default())));
        assert!(matches!(engine.export(), Err(PersistenceError::NoStore)));
        assert!(engine.export_string().unwrap().contains("\"version\": 1"));
    }
}
