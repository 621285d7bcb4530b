use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use office_sim::{
    AdvanceOutcome, Character, CharacterDraft, DaySimulator, FixedRolePolicy, LogKind, ProposedLog,
    RelationshipUpdate, RoleUpdate, SequentialIds, SimulationEngine, SimulationResult,
    SimulationState, StatusUpdate, MAX_AFFINITY, MIN_AFFINITY,
};

/// Replays a queue of results, one per day; fails once the queue is empty
struct Script {
    days: Mutex<Vec<SimulationResult>>,
    seen_days: Mutex<Vec<u32>>,
}

impl Script {
    fn new(mut days: Vec<SimulationResult>) -> Self {
        days.reverse();
        Self {
            days: Mutex::new(days),
            seen_days: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DaySimulator for Script {
    async fn simulate_day(&self, day: u32, _characters: &[Character]) -> Result<SimulationResult> {
        self.seen_days.lock().unwrap().push(day);
        self.days
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }
}

fn worker(id: &str, others: &[&str]) -> Character {
    Character {
        id: id.to_string(),
        name: format!("Worker {}", id),
        role: "Staff".to_string(),
        traits: vec!["Diligent".to_string()],
        status: "Single".to_string(),
        relationships: others.iter().map(|o| (o.to_string(), 0)).collect::<BTreeMap<_, _>>(),
        image_url: None,
        catchphrase: None,
        age: 30,
        birthday: "01-01".to_string(),
        height: 170,
        mbti: "INTP".to_string(),
        likes: vec![],
        dislikes: vec![],
        is_employed: true,
    }
}

fn two_workers() -> SimulationState {
    SimulationState {
        day: 1,
        characters: vec![worker("a", &["b"]), worker("b", &["a"])],
        logs: vec![],
    }
}

fn delta(source: &str, target: &str, amount: i32) -> RelationshipUpdate {
    RelationshipUpdate {
        source_id: source.into(),
        target_id: target.into(),
        amount,
    }
}

fn engine(state: SimulationState, script: Script) -> SimulationEngine {
    SimulationEngine::new(state, script)
        .with_id_generator(SequentialIds::new("log"))
        .with_role_policy(FixedRolePolicy("Intern".into()))
}

#[tokio::test]
async fn saturating_deltas_scenario() {
    let day_one = SimulationResult {
        relationship_updates: vec![delta("a", "b", 15), delta("a", "b", 90)],
        ..Default::default()
    };
    let engine = engine(two_workers(), Script::new(vec![day_one]));

    engine.advance_day().await;
    let state = engine.state();

    assert_eq!(state.character("a").unwrap().affinity_toward("b"), 100);
    assert_eq!(state.character("b").unwrap().affinity_toward("a"), 0);
    assert_eq!(state.day, 2);
}

#[tokio::test]
async fn scores_stay_in_bounds_over_many_days() {
    let days: Vec<_> = (0..12)
        .map(|i| {
            let amount = if i % 3 == 0 { -70 } else { 45 };
            SimulationResult {
                relationship_updates: vec![
                    delta("a", "b", amount),
                    delta("b", "a", -amount),
                    delta("a", "b", amount / 2),
                ],
                ..Default::default()
            }
        })
        .collect();
    let engine = engine(two_workers(), Script::new(days));

    for expected_day in 2..=13 {
        let outcome = engine.advance_day().await;
        assert!(matches!(outcome, AdvanceOutcome::Advanced { day, .. } if day == expected_day));

        for character in engine.state().characters {
            for score in character.relationships.values() {
                assert!((MIN_AFFINITY..=MAX_AFFINITY).contains(score));
            }
        }
    }
}

#[tokio::test]
async fn overrides_follow_first_match() {
    let day = SimulationResult {
        logs: vec![ProposedLog {
            text: "Worker a: 'I quit!'\nWorker b: 'You're fired.'".into(),
            kind: LogKind::MajorEvent,
        }],
        status_updates: vec![
            StatusUpdate {
                character_id: "a".into(),
                new_status: "Heartbroken".into(),
            },
            StatusUpdate {
                character_id: "a".into(),
                new_status: "Engaged".into(),
            },
        ],
        role_updates: vec![
            RoleUpdate {
                character_id: "a".into(),
                new_role: "Unemployed".into(),
                is_employed: false,
            },
            RoleUpdate {
                character_id: "a".into(),
                new_role: "Manager".into(),
                is_employed: true,
            },
        ],
        ..Default::default()
    };
    let engine = engine(two_workers(), Script::new(vec![day]));

    engine.advance_day().await;
    let state = engine.state();
    let a = state.character("a").unwrap();

    assert_eq!(a.status, "Heartbroken");
    assert_eq!(a.role, "Unemployed");
    assert!(!a.is_employed);
    // fired characters stay in the registry with their history
    assert_eq!(state.characters.len(), 2);
    assert!(state.logs[0].text.contains('\n'));
}

#[tokio::test]
async fn failed_day_does_not_advance_and_next_day_retries_same_number() {
    let script = Script::new(vec![]);
    let engine = engine(two_workers(), script);

    let outcome = engine.advance_day().await;
    assert!(matches!(outcome, AdvanceOutcome::ProviderFailed { day: 1, .. }));

    let outcome = engine.advance_day().await;
    assert!(matches!(outcome, AdvanceOutcome::ProviderFailed { day: 1, .. }));

    let state = engine.state();
    assert_eq!(state.day, 1);
    assert_eq!(state.logs.len(), 2);
    assert!(state.logs.iter().all(|l| l.kind == LogKind::Negative && l.day == 1));
}

#[tokio::test]
async fn hire_then_simulate_reaches_newcomer() {
    let engine = engine(two_workers(), Script::new(vec![]));
    let id = engine.add_character(CharacterDraft::named("Newbie")).unwrap();

    let script_engine = SimulationEngine::new(
        engine.state(),
        Script::new(vec![SimulationResult {
            relationship_updates: vec![delta(&id, "a", 12), delta("b", &id, -7)],
            ..Default::default()
        }]),
    );
    script_engine.advance_day().await;
    let state = script_engine.state();

    assert_eq!(state.character(&id).unwrap().affinity_toward("a"), 12);
    assert_eq!(state.character("b").unwrap().affinity_toward(&id), -7);
    assert_eq!(state.character("a").unwrap().affinity_toward(&id), 0);
    assert!(state.characters.iter().all(|c| c.relationships.len() == 2));
}

#[tokio::test]
async fn history_is_append_only() {
    let days = vec![
        SimulationResult {
            logs: vec![ProposedLog {
                text: "Day one".into(),
                kind: LogKind::Routine,
            }],
            ..Default::default()
        },
        SimulationResult {
            logs: vec![
                ProposedLog {
                    text: "Day two, first".into(),
                    kind: LogKind::Romantic,
                },
                ProposedLog {
                    text: "Day one".into(),
                    kind: LogKind::Routine,
                },
            ],
            ..Default::default()
        },
    ];
    let engine = engine(two_workers(), Script::new(days));

    engine.advance_day().await;
    engine.advance_day().await;
    let logs = engine.state().logs;

    let summary: Vec<_> = logs.iter().map(|l| (l.day, l.text.as_str())).collect();
    assert_eq!(
        summary,
        [(1, "Day one"), (2, "Day two, first"), (2, "Day one")]
    );
    let ids: Vec<_> = logs.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["log-1", "log-2", "log-3"]);
}
