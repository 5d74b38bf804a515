//! Scenario driver: loads a scene, replays its steps through the public API
//! and prints the render record after each one.

use anyhow::Context;
use env_logger::Builder;
use log::{LevelFilter, info, warn};

use sensor_topology::common::{Step, load_scene};
use sensor_topology::{Mutation, NetworkModel, Proposal, TopologyExport, plan_reduction, propose};

const DEFAULT_SCENE: &str = "scenes/three_step.json";

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("sensor_topology"), LevelFilter::Debug)
        .parse_default_env()
        .init();

    let scene_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SCENE.to_string());
    info!("Loading scene {}", scene_path);

    let scene = load_scene(&scene_path).with_context(|| format!("Failed to load scene {}", scene_path))?;
    let mut model = scene.build_model().context("Scene does not describe a valid network")?;

    print_export(&model, "init")?;
    for (idx, step) in scene.steps.iter().enumerate() {
        run_step(&mut model, step).with_context(|| format!("Step {} ({:?}) failed", idx + 1, step))?;
        print_export(&model, &format!("step {}", idx + 1))?;
    }

    Ok(())
}

fn run_step(model: &mut NetworkModel, step: &Step) -> anyhow::Result<()> {
    let snapshot = model.snapshot();
    match step {
        Step::Relocate { id, position } => {
            let proposal = propose(
                &snapshot,
                Mutation::Relocate {
                    id: id.clone(),
                    position: *position,
                },
            )?;
            commit_if_feasible(model, &proposal)
        }
        Step::Remove { id } => {
            let proposal = propose(&snapshot, Mutation::Remove { id: id.clone() })?;
            commit_if_feasible(model, &proposal)
        }
        Step::Reduce => {
            let reduction = plan_reduction(&snapshot);
            info!("Reduction removes {:?}", reduction.removed);
            reduction.commit(model)?;
            Ok(())
        }
    }
}

fn commit_if_feasible(model: &mut NetworkModel, proposal: &Proposal) -> anyhow::Result<()> {
    if proposal.is_feasible() {
        proposal.commit(model)?;
    } else {
        let result = proposal.result();
        warn!(
            "Rejected {}: connected={}, unreachable={:?}, uncovered targets={:?}",
            proposal.mutation(),
            result.connected,
            result.unreachable,
            result.uncovered_targets.iter().map(|t| t.index).collect::<Vec<_>>()
        );
    }
    Ok(())
}

fn print_export(model: &NetworkModel, label: &str) -> anyhow::Result<()> {
    let export = TopologyExport::from_snapshot(&model.snapshot());
    info!("[{}] feasible={} sensors={}", label, export.feasibility.feasible, model.sensor_count());
    println!("{}", export.to_json().context("Failed to serialise export")?);
    Ok(())
}
