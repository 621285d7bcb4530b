use office_sim::{AdvanceOutcome, RelationshipKind, SimConfig, SimulationEngine, SimulationState};

fn print_relationships(state: &SimulationState) {
    for character in &state.characters {
        let employed = if character.is_employed { "" } else { " (left the company)" };
        println!("- {} [{}] {}{}", character.name, character.role, character.status, employed);

        let name_of = |id: &str| {
            state
                .character(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Unknown".to_string())
        };
        if let Some((id, score)) = character.best_friend() {
            println!(
                "    closest: {} ({}, {})",
                name_of(id),
                score,
                RelationshipKind::classify(score).label()
            );
        }
        if let Some((id, score)) = character.rival() {
            println!("    rival:   {} ({})", name_of(id), score);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let days: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);

    let config = SimConfig::load("office_sim.json")?.with_env_overrides();
    let engine = SimulationEngine::from_config(&config)?;

    println!("=== Office Sim: day {} ===\n", engine.day());

    for _ in 0..days {
        match engine.advance_day().await {
            AdvanceOutcome::Advanced { day, logs } => {
                for entry in logs {
                    println!("[day {} | {}] {}", entry.day, entry.kind.as_str(), entry.text);
                }
                println!("--- now day {} ---\n", day);
            }
            AdvanceOutcome::ProviderFailed { day, reason } => {
                println!("Day {} could not be simulated: {}", day, reason);
                break;
            }
            AdvanceOutcome::Busy => println!("Another day is still being simulated"),
        }
    }

    print_relationships(&engine.state());

    let path = engine.export()?;
    println!("\nExported to {}", path.display());

    Ok(())
}
