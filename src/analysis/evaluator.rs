//! Joint feasibility verdict for a snapshot.

use serde::Serialize;

use super::connectivity::CommGraph;
use super::coverage;
use crate::model::{NodeId, Snapshot, Target};

/// Derived feasibility of one snapshot. Recomputed on demand, never stored on the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeasibilityResult {
    /// Every sensor is reachable from the sink.
    pub connected: bool,
    /// Sensors with no path to the sink, ascending.
    pub unreachable: Vec<NodeId>,
    /// Targets outside every node's capture radius, in target order.
    pub uncovered_targets: Vec<Target>,
    /// `connected && uncovered_targets.is_empty()`
    pub feasible: bool,
}

/// Evaluate connectivity and coverage of `snapshot`. Pure and deterministic.
pub fn evaluate(snapshot: &Snapshot) -> FeasibilityResult {
    evaluate_with_graph(snapshot, &CommGraph::build(snapshot))
}

/// Same as [`evaluate`] with a graph already built for `snapshot`.
pub(crate) fn evaluate_with_graph(snapshot: &Snapshot, graph: &CommGraph) -> FeasibilityResult {
    let unreachable = graph.unreachable();
    let connected = unreachable.is_empty();
    let uncovered_targets = coverage::uncovered(snapshot);
    let feasible = connected && uncovered_targets.is_empty();
    FeasibilityResult {
        connected,
        unreachable,
        uncovered_targets,
        feasible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::NetworkConfig;
    use crate::geometry::Position;
    use crate::model::NetworkModel;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TARGETS: [(f64, f64); 4] = [(1.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 0.0)];

    fn scenario(sensors: &[(&str, (f64, f64))]) -> Snapshot {
        let mut model = NetworkModel::new("P", Position::new(0.0, 0.0), NetworkConfig::new(1.2, 2.0).unwrap()).unwrap();
        for &(id, pos) in sensors {
            model.add_sensor(id, pos.into()).unwrap();
        }
        for t in TARGETS {
            model.add_target(t.into()).unwrap();
        }
        model.snapshot()
    }

    #[test]
    fn dropped_s2_configuration_is_feasible() {
        let snapshot = scenario(&[("S1", (1.0, 0.0)), ("S3", (3.0, 0.0))]);
        let result = evaluate(&snapshot);
        assert!(result.connected);
        assert!(result.uncovered_targets.is_empty());
        assert!(result.feasible);
    }

    #[test]
    fn reports_unreachable_sensors_and_uncovered_targets() {
        let snapshot = scenario(&[("S1", (1.0, 1.0)), ("S3", (3.0, 0.0))]);
        let result = evaluate(&snapshot);
        assert!(!result.connected);
        assert_eq!(result.unreachable, vec![NodeId::from("S3")]);
        assert!(result.uncovered_targets.is_empty());
        assert!(!result.feasible);

        let snapshot = scenario(&[("S1", (1.0, 1.0))]);
        let result = evaluate(&snapshot);
        assert!(result.connected);
        assert_eq!(result.uncovered_targets.iter().map(|t| t.index).collect::<Vec<_>>(), vec![2, 3]);
        assert!(!result.feasible);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let snapshot = scenario(&[("S1", (1.0, 1.0)), ("S2", (2.0, 0.0)), ("S3", (3.0, 0.0))]);
        let first = evaluate(&snapshot);
        let second = evaluate(&snapshot);
        assert_eq!(first, second);
        assert!(first.feasible);
    }

    #[test]
    fn feasible_is_the_conjunction_over_random_layouts() {
        let mut rng = StdRng::seed_from_u64(0x5e75_0a11);
        for _ in 0..500 {
            let capture = rng.gen_range(0.2..2.5);
            let comm = rng.gen_range(0.2..3.5);
            let sink = Position::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
            let mut model = NetworkModel::new("sink", sink, NetworkConfig::new(capture, comm).unwrap()).unwrap();

            for i in 0..rng.gen_range(0..8) {
                let pos = Position::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0));
                model.add_sensor(format!("S{i}"), pos).unwrap();
            }
            for _ in 0..rng.gen_range(0..6) {
                model.add_target(Position::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0))).unwrap();
            }

            let snapshot = model.snapshot();
            let result = evaluate(&snapshot);
            let graph = CommGraph::build(&snapshot);
            assert_eq!(result.connected, graph.is_fully_connected());
            assert_eq!(result.uncovered_targets, coverage::uncovered(&snapshot));
            assert_eq!(result.feasible, graph.is_fully_connected() && coverage::uncovered(&snapshot).is_empty());
        }
    }
}
