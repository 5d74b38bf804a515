//! Redundancy checks and the greedy reduction pass.
//!
//! The planner only ever evaluates hypothetical snapshots derived from the
//! caller's snapshot; it never mutates a [`NetworkModel`] on its own. Every
//! change goes through the same cycle:
//!
//! 1. *Proposed*: a candidate snapshot is derived ([`propose`]).
//! 2. *Validated*: the evaluator runs on the candidate ([`Proposal`]).
//! 3. *Committed* ([`Proposal::commit`]) or *Rejected* (the proposal is dropped).
//!
//! ## Reduction
//!
//! [`plan_reduction`] walks sensors once in ascending id order and drops each
//! one whose removal keeps the reduced-so-far network feasible. There is no
//! backtracking and no relocation search: a sensor that only becomes
//! redundant after some other node moves is picked up only if the caller
//! relocates first (see [`can_relocate`]) and plans again.

use serde::Serialize;

use super::cancel::CancelToken;
use super::evaluator::{FeasibilityResult, evaluate};
use crate::error::TopologyError;
use crate::geometry::Position;
use crate::model::{Mutation, NetworkModel, NodeId, Snapshot};

/// Why a removal is or is not safe. When both invariants would break,
/// connectivity is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalReason {
    Safe,
    BreaksConnectivity,
    LeavesTargetUncovered,
}

impl RemovalReason {
    fn classify(result: &FeasibilityResult) -> Self {
        if !result.connected {
            RemovalReason::BreaksConnectivity
        } else if !result.uncovered_targets.is_empty() {
            RemovalReason::LeavesTargetUncovered
        } else {
            RemovalReason::Safe
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovalCheck {
    pub safe: bool,
    pub reason: RemovalReason,
    /// Full verdict on the candidate without the sensor.
    pub resulting_feasibility: FeasibilityResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelocationCheck {
    pub safe: bool,
    pub resulting_feasibility: FeasibilityResult,
}

/// Would the network stay feasible without `id`?
pub fn can_remove(snapshot: &Snapshot, id: &NodeId) -> Result<RemovalCheck, TopologyError> {
    let candidate = snapshot.without_sensor(id)?;
    let result = evaluate(&candidate);
    let reason = RemovalReason::classify(&result);
    Ok(RemovalCheck {
        safe: reason == RemovalReason::Safe,
        reason,
        resulting_feasibility: result,
    })
}

/// Would the whole network be feasible with `id` moved to `position`?
pub fn can_relocate(snapshot: &Snapshot, id: &NodeId, position: Position) -> Result<RelocationCheck, TopologyError> {
    let candidate = snapshot.with_sensor_at(id, position)?;
    let result = evaluate(&candidate);
    Ok(RelocationCheck {
        safe: result.feasible,
        resulting_feasibility: result,
    })
}

/// Sensors that could each be removed on their own, ascending.
///
/// Unlike [`plan_reduction`] every check runs against the unmodified
/// snapshot, so removing all of them at once is not necessarily feasible.
pub fn redundant_sensors(snapshot: &Snapshot) -> Vec<NodeId> {
    snapshot
        .sensor_ids()
        .filter(|id| can_remove(snapshot, id).is_ok_and(|check| check.safe))
        .cloned()
        .collect()
}

/// A validated candidate mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    mutation: Mutation,
    base_revision: u64,
    candidate: Snapshot,
    result: FeasibilityResult,
}

impl Proposal {
    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    /// Model revision the proposal was validated against.
    pub fn base_revision(&self) -> u64 {
        self.base_revision
    }

    pub fn candidate(&self) -> &Snapshot {
        &self.candidate
    }

    pub fn result(&self) -> &FeasibilityResult {
        &self.result
    }

    pub fn is_feasible(&self) -> bool {
        self.result.feasible
    }

    /// Apply the mutation to `model`.
    ///
    /// Fails with `StaleProposal` if the model changed since the snapshot the
    /// proposal was validated against was taken. Committing an infeasible
    /// proposal is allowed; that decision belongs to the caller.
    pub fn commit(&self, model: &mut NetworkModel) -> Result<(), TopologyError> {
        check_revision(self.base_revision, model)?;
        model.apply(&self.mutation)?;
        log::info!("Committed {} (feasible: {})", self.mutation, self.result.feasible);
        Ok(())
    }
}

/// Derive and validate the candidate for `mutation`.
pub fn propose(snapshot: &Snapshot, mutation: Mutation) -> Result<Proposal, TopologyError> {
    let candidate = match &mutation {
        Mutation::Remove { id } => snapshot.without_sensor(id)?,
        Mutation::Relocate { id, position } => snapshot.with_sensor_at(id, *position)?,
    };
    let result = evaluate(&candidate);
    log::debug!("Proposal {}: feasible={}", mutation, result.feasible);
    Ok(Proposal {
        mutation,
        base_revision: snapshot.revision(),
        candidate,
        result,
    })
}

/// Outcome of a reduction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// Removed sensor ids, in the order they were dropped.
    pub removed: Vec<NodeId>,
    /// The working snapshot after those removals.
    pub final_snapshot: Snapshot,
}

impl Reduction {
    /// Remove every planned sensor from `model`, all or nothing.
    pub fn commit(&self, model: &mut NetworkModel) -> Result<(), TopologyError> {
        check_revision(self.final_snapshot.revision(), model)?;
        let mut working = model.clone();
        for id in &self.removed {
            working.remove_sensor(id)?;
        }
        *model = working;
        log::info!("Committed reduction removing {} sensor(s)", self.removed.len());
        Ok(())
    }
}

/// Single greedy pass in ascending id order.
pub fn plan_reduction(snapshot: &Snapshot) -> Reduction {
    reduce(snapshot, None).0
}

/// [`plan_reduction`] checking `cancel` once before each candidate.
///
/// On cancellation the error carries exactly the removals decided so far and
/// the matching working snapshot.
pub fn plan_reduction_with_cancel(snapshot: &Snapshot, cancel: &CancelToken) -> Result<Reduction, TopologyError> {
    match reduce(snapshot, Some(cancel)) {
        (reduction, true) => Ok(reduction),
        (partial, false) => Err(TopologyError::CancelledOperation { partial: Box::new(partial) }),
    }
}

/// Returns the reduction and whether the pass ran to completion.
fn reduce(snapshot: &Snapshot, cancel: Option<&CancelToken>) -> (Reduction, bool) {
    if !evaluate(snapshot).feasible {
        log::warn!("Planning reduction on an infeasible network (revision {})", snapshot.revision());
    }

    let order: Vec<NodeId> = snapshot.sensor_ids().cloned().collect();
    let mut working = snapshot.clone();
    let mut removed = Vec::new();

    for id in order {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            log::debug!("Reduction cancelled before {} after {} removal(s)", id, removed.len());
            return (
                Reduction {
                    removed,
                    final_snapshot: working,
                },
                false,
            );
        }

        let Ok(candidate) = working.without_sensor(&id) else {
            continue;
        };
        let result = evaluate(&candidate);
        let reason = RemovalReason::classify(&result);
        log::debug!("Reduction candidate {}: {:?}", id, reason);
        if reason == RemovalReason::Safe {
            working = candidate;
            removed.push(id);
        }
    }

    (
        Reduction {
            removed,
            final_snapshot: working,
        },
        true,
    )
}

fn check_revision(expected: u64, model: &NetworkModel) -> Result<(), TopologyError> {
    if model.revision() == expected {
        Ok(())
    } else {
        Err(TopologyError::StaleProposal {
            expected,
            actual: model.revision(),
        })
    }
}
