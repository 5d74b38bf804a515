//! Communication graph derived from node positions.
//!
//! Vertices are the sink plus every sensor; an undirected edge joins two
//! nodes whenever they are within the communication radius of each other.
//! This is raw proximity, not a routing table. Reachability is a breadth-
//! first traversal from the sink; since edges are symmetric the visiting
//! order never changes the reachable set.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::geometry::within_radius_with;
use crate::model::{NodeId, Snapshot};

/// Index of the sink in [`CommGraph::ids`].
const SINK: usize = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct CommGraph {
    /// Sink first, then sensors in ascending id order.
    ids: Vec<NodeId>,
    /// Neighbour indices per vertex, ascending.
    adjacency: Vec<Vec<usize>>,
}

impl CommGraph {
    /// Build the proximity graph for `snapshot`. Quadratic in the node count.
    pub fn build(snapshot: &Snapshot) -> Self {
        let nodes: Vec<_> = snapshot.nodes().collect();
        let config = snapshot.config();
        let mut adjacency = vec![Vec::new(); nodes.len()];

        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if within_radius_with(config.policy, &nodes[i].position, &nodes[j].position, config.comm_radius) {
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                }
            }
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }

        let graph = Self {
            ids: nodes.iter().map(|n| n.id.clone()).collect(),
            adjacency,
        };
        log::trace!("Built communication graph: {} nodes, {} edges", graph.ids.len(), graph.edge_count());
        graph
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn sink(&self) -> &NodeId {
        &self.ids[SINK]
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Undirected edges as id pairs, each listed once with the lower vertex
    /// index first (sink before sensors, sensors ascending).
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (i, neighbours) in self.adjacency.iter().enumerate() {
            for &j in neighbours.iter().filter(|&&j| j > i) {
                edges.push((self.ids[i].clone(), self.ids[j].clone()));
            }
        }
        edges
    }

    pub fn has_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => self.adjacency[i].binary_search(&j).is_ok(),
            _ => false,
        }
    }

    /// Hop count from the sink for every reachable node (sink = 0).
    pub fn hops_from_sink(&self) -> BTreeMap<NodeId, u32> {
        let mut depth: Vec<Option<u32>> = vec![None; self.ids.len()];
        depth[SINK] = Some(0);
        let mut queue = VecDeque::from([SINK]);

        while let Some(v) = queue.pop_front() {
            let next = depth[v].map_or(0, |d| d + 1);
            for &w in &self.adjacency[v] {
                if depth[w].is_none() {
                    depth[w] = Some(next);
                    queue.push_back(w);
                }
            }
        }

        self.ids
            .iter()
            .zip(depth)
            .filter_map(|(id, d)| d.map(|d| (id.clone(), d)))
            .collect()
    }

    /// Ids reachable from the sink, the sink included.
    pub fn reachable_from_sink(&self) -> BTreeSet<NodeId> {
        self.hops_from_sink().into_keys().collect()
    }

    /// Sensors with no path to the sink, ascending.
    pub fn unreachable(&self) -> Vec<NodeId> {
        let reachable = self.reachable_from_sink();
        self.ids[SINK + 1..].iter().filter(|id| !reachable.contains(*id)).cloned().collect()
    }

    /// True iff every sensor is reachable from the sink.
    pub fn is_fully_connected(&self) -> bool {
        self.reachable_from_sink().len() == self.ids.len()
    }

    fn index_of(&self, id: &NodeId) -> Option<usize> {
        if *id == self.ids[SINK] {
            return Some(SINK);
        }
        self.ids[SINK + 1..].binary_search(id).ok().map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::NetworkConfig;
    use crate::geometry::{Position, RadiusPolicy};
    use crate::model::NetworkModel;

    fn scenario(s1: (f64, f64)) -> Snapshot {
        let mut model = NetworkModel::new("P", Position::new(0.0, 0.0), NetworkConfig::new(1.2, 2.0).unwrap()).unwrap();
        model.add_sensor("S1", s1.into()).unwrap();
        model.add_sensor("S2", Position::new(2.0, 0.0)).unwrap();
        model.add_sensor("S3", Position::new(3.0, 0.0)).unwrap();
        model.snapshot()
    }

    #[test]
    fn s2_bridges_s1_and_s3_before_relocation() {
        let graph = CommGraph::build(&scenario((1.0, 1.0)));
        assert!(!graph.has_edge(&"S1".into(), &"S3".into()));
        assert!(graph.has_edge(&"S1".into(), &"S2".into()));
        assert!(graph.has_edge(&"S2".into(), &"S3".into()));
        assert!(graph.is_fully_connected());

        let hops = graph.hops_from_sink();
        assert_eq!(hops[&NodeId::from("P")], 0);
        assert_eq!(hops[&NodeId::from("S1")], 1);
        assert_eq!(hops[&NodeId::from("S2")], 1);
        assert_eq!(hops[&NodeId::from("S3")], 2);
    }

    #[test]
    fn relocated_s1_reaches_s3_on_the_boundary() {
        let graph = CommGraph::build(&scenario((1.0, 0.0)));
        assert!(graph.has_edge(&"S1".into(), &"S3".into()));
        assert!(graph.is_fully_connected());
    }

    #[test]
    fn without_the_bridge_s3_is_unreachable() {
        let snapshot = scenario((1.0, 1.0)).without_sensor(&"S2".into()).unwrap();
        let graph = CommGraph::build(&snapshot);
        assert!(!graph.is_fully_connected());
        assert_eq!(graph.unreachable(), vec![NodeId::from("S3")]);
        let reachable: Vec<_> = graph.reachable_from_sink().into_iter().collect();
        assert_eq!(reachable, vec![NodeId::from("P"), NodeId::from("S1")]);
    }

    #[test]
    fn edges_are_listed_once_in_vertex_order() {
        let graph = CommGraph::build(&scenario((1.0, 0.0)));
        let edges: Vec<(String, String)> = graph.edges().into_iter().map(|(a, b)| (a.to_string(), b.to_string())).collect();
        let expected = [("P", "S1"), ("P", "S2"), ("S1", "S2"), ("S1", "S3"), ("S2", "S3")];
        assert_eq!(edges, expected.map(|(a, b)| (a.to_string(), b.to_string())));
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn strict_policy_drops_boundary_edges() {
        let mut model = NetworkModel::new("P", Position::new(0.0, 0.0), NetworkConfig::new(1.2, 2.0).unwrap()).unwrap();
        model.add_sensor("S1", Position::new(2.0, 0.0)).unwrap();
        assert!(CommGraph::build(&model.snapshot()).is_fully_connected());

        model.set_policy(RadiusPolicy::Strict);
        let graph = CommGraph::build(&model.snapshot());
        assert!(!graph.is_fully_connected());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn sink_alone_is_trivially_connected() {
        let model = NetworkModel::new("P", Position::new(0.0, 0.0), NetworkConfig::new(1.0, 1.0).unwrap()).unwrap();
        let graph = CommGraph::build(&model.snapshot());
        assert!(graph.is_fully_connected());
        assert!(graph.edges().is_empty());
        assert!(graph.unreachable().is_empty());
    }
}
