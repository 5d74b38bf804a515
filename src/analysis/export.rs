//! Read-only render record for an external visualisation layer.
//!
//! One [`TopologyExport`] bundles everything a renderer needs to draw a
//! snapshot: nodes with their role and hop depth, targets with their coverage
//! flag, the communication edges, and the feasibility verdict.

use serde::Serialize;

use super::connectivity::CommGraph;
use super::coverage::coverage;
use super::evaluator::{FeasibilityResult, evaluate_with_graph};
use crate::geometry::{Position, RadiusPolicy};
use crate::model::{NodeId, Role, Snapshot};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportNode {
    pub id: NodeId,
    pub position: Position,
    pub role: Role,
    /// Hops from the sink over the communication graph; `None` when unreachable.
    pub hops: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTarget {
    pub index: usize,
    pub position: Position,
    pub covered: bool,
    pub covered_by: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyExport {
    pub revision: u64,
    pub capture_radius: f64,
    pub comm_radius: f64,
    pub policy: RadiusPolicy,
    pub nodes: Vec<ExportNode>,
    pub targets: Vec<ExportTarget>,
    pub edges: Vec<(NodeId, NodeId)>,
    pub feasibility: FeasibilityResult,
}

impl TopologyExport {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let graph = CommGraph::build(snapshot);
        let hops = graph.hops_from_sink();
        let config = snapshot.config();

        let nodes = snapshot
            .nodes()
            .map(|node| ExportNode {
                id: node.id.clone(),
                position: node.position,
                role: node.role,
                hops: hops.get(&node.id).copied(),
            })
            .collect();

        let targets = coverage(snapshot)
            .into_iter()
            .map(|c| ExportTarget {
                index: c.target.index,
                position: c.target.position,
                covered: c.covered,
                covered_by: c.covered_by,
            })
            .collect();

        Self {
            revision: snapshot.revision(),
            capture_radius: config.capture_radius,
            comm_radius: config.comm_radius,
            policy: config.policy,
            nodes,
            targets,
            edges: graph.edges(),
            feasibility: evaluate_with_graph(snapshot, &graph),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
