//! Target coverage over the capture radius.
//!
//! Any node covers a target within capture radius, the sink included: the
//! capture radius is a property of every node, not only of sensors.

use serde::Serialize;

use crate::geometry::within_radius_with;
use crate::model::{NodeId, Snapshot, Target};

/// Coverage state of one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetCoverage {
    pub target: Target,
    pub covered: bool,
    /// First covering node, sink checked before sensors (ascending id).
    pub covered_by: Option<NodeId>,
}

/// Coverage of every target, in target order.
pub fn coverage(snapshot: &Snapshot) -> Vec<TargetCoverage> {
    let config = snapshot.config();
    snapshot
        .targets()
        .iter()
        .map(|target| {
            let covered_by = snapshot
                .nodes()
                .find(|node| within_radius_with(config.policy, &node.position, &target.position, config.capture_radius))
                .map(|node| node.id.clone());
            TargetCoverage {
                target: *target,
                covered: covered_by.is_some(),
                covered_by,
            }
        })
        .collect()
}

/// Targets no node covers, in target order. Empty means full coverage.
pub fn uncovered(snapshot: &Snapshot) -> Vec<Target> {
    let config = snapshot.config();
    snapshot
        .targets()
        .iter()
        .filter(|target| {
            !snapshot
                .nodes()
                .any(|node| within_radius_with(config.policy, &node.position, &target.position, config.capture_radius))
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::NetworkConfig;
    use crate::geometry::Position;
    use crate::model::NetworkModel;

    fn model_with_targets(targets: &[(f64, f64)]) -> NetworkModel {
        let mut model = NetworkModel::new("P", Position::new(0.0, 0.0), NetworkConfig::new(1.2, 2.0).unwrap()).unwrap();
        for &t in targets {
            model.add_target(t.into()).unwrap();
        }
        model
    }

    #[test]
    fn relocated_s1_covers_both_middle_targets() {
        let mut model = model_with_targets(&[(1.0, 1.0), (2.0, 0.0)]);
        model.add_sensor("S1", Position::new(1.0, 0.0)).unwrap();
        model.add_sensor("S3", Position::new(3.0, 0.0)).unwrap();

        let snapshot = model.snapshot();
        let report = coverage(&snapshot);
        assert!(report.iter().all(|c| c.covered));
        assert_eq!(report[0].covered_by, Some(NodeId::from("S1")));
        assert_eq!(report[1].covered_by, Some(NodeId::from("S1")));
        assert!(uncovered(&snapshot).is_empty());
    }

    #[test]
    fn sink_counts_as_a_coverage_source() {
        let model = model_with_targets(&[(1.0, 0.0), (1.0, 1.0)]);
        let snapshot = model.snapshot();
        let report = coverage(&snapshot);

        assert_eq!(report[0].covered_by, Some(NodeId::from("P")));
        assert!(!report[1].covered);
        assert_eq!(uncovered(&snapshot), vec![snapshot.targets()[1]]);
    }

    #[test]
    fn capture_boundary_follows_the_policy() {
        let mut model = model_with_targets(&[(1.2, 0.0)]);
        assert!(uncovered(&model.snapshot()).is_empty());

        model.set_policy(crate::geometry::RadiusPolicy::Strict);
        assert_eq!(uncovered(&model.snapshot()).len(), 1);
    }

    #[test]
    fn no_targets_means_full_coverage() {
        let model = model_with_targets(&[]);
        assert!(coverage(&model.snapshot()).is_empty());
        assert!(uncovered(&model.snapshot()).is_empty());
    }
}
