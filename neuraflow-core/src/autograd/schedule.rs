use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};
use std::collections::{HashMap, VecDeque};

/// A topologically valid linear ordering of part of a [`Graph`].
///
/// Every node appears after all of its inputs that are part of the schedule.
/// Inputs outside the schedule are always leaves; they are listed in
/// [`Schedule::external_leaves`] so the backward pass can reset them too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    order: Vec<NodeId>,
    positions: HashMap<NodeId, usize>,
    external_leaves: Vec<NodeId>,
}

impl Schedule {
    pub fn nodes(&self) -> &[NodeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Position of `id` in evaluation order.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Leaves read by scheduled nodes without being reachable from the
    /// schedule's own leaf set.
    pub fn external_leaves(&self) -> &[NodeId] {
        &self.external_leaves
    }

    /// Restricts the schedule to the nodes `outputs` depend on, keeping their
    /// relative order.
    ///
    /// Used to evaluate a prediction head without the loss nodes that also
    /// consume it.
    ///
    /// # Errors
    /// * `UnknownNode` if one of `outputs` is not part of this schedule.
    pub fn prune_to(&self, graph: &Graph, outputs: &[NodeId]) -> Result<Schedule, NeuraFlowError> {
        let mut keep = vec![false; graph.len()];
        let mut stack = Vec::new();
        for &output in outputs {
            if !self.contains(output) {
                return Err(NeuraFlowError::UnknownNode(output));
            }
            stack.push(output);
        }
        while let Some(id) = stack.pop() {
            if keep[id.index()] {
                continue;
            }
            keep[id.index()] = true;
            for &input in graph.inputs(id)? {
                if self.contains(input) && !keep[input.index()] {
                    stack.push(input);
                }
            }
        }

        let order: Vec<NodeId> = self.order.iter().copied().filter(|id| keep[id.index()]).collect();
        let mut external_leaves = Vec::new();
        for &id in &order {
            for &input in graph.inputs(id)? {
                if !keep[input.index()] && !external_leaves.contains(&input) {
                    external_leaves.push(input);
                }
            }
        }
        let positions = order.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
        Ok(Schedule {
            order,
            positions,
            external_leaves,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Discovers every node reachable from `leaves` through the consumer relation
/// and orders them so that each node follows its inputs.
///
/// Discovery is breadth-first in the order the leaves are given, then in
/// consumer-registration order; the topological order is a depth-first
/// post-order over inputs taken in discovery order, so repeated builds over
/// the same graph yield the same schedule.
///
/// # Errors
/// * `UnknownNode` if a leaf id does not belong to `graph`.
/// * `ArityMismatch` if a reachable operator node was declared but never wired.
/// * `UnscheduledInput` if a reachable node reads a non-leaf node that is
///   not reachable from `leaves` (its state would never be computed).
/// * `CycleDetected` if the reachable subgraph contains a cycle.
pub fn build_schedule(graph: &Graph, leaves: &[NodeId]) -> Result<Schedule, NeuraFlowError> {
    // --- 1. Discovery over consumers ---
    let mut discovered: Vec<NodeId> = Vec::new();
    let mut seen = vec![false; graph.len()];
    let mut queue = VecDeque::new();
    for &leaf in leaves {
        graph.node(leaf)?;
        if !seen[leaf.index()] {
            seen[leaf.index()] = true;
            queue.push_back(leaf);
        }
    }
    while let Some(id) = queue.pop_front() {
        discovered.push(id);
        for &consumer in graph.consumers(id)? {
            if !seen[consumer.index()] {
                seen[consumer.index()] = true;
                queue.push_back(consumer);
            }
        }
    }

    // --- 2. Structural checks on the discovered subgraph ---
    let mut external_leaves = Vec::new();
    for &id in &discovered {
        let node = graph.node(id)?;
        if !node.is_wired() {
            return Err(NeuraFlowError::ArityMismatch {
                node: id,
                op: node.op().name(),
                expected: node.op().arity(),
                actual: 0,
            });
        }
        for &input in node.inputs() {
            if seen[input.index()] {
                continue;
            }
            if !graph.op(input)?.is_leaf() {
                return Err(NeuraFlowError::UnscheduledInput { node: id, input });
            }
            if !external_leaves.contains(&input) {
                if graph.op(input)?.is_parameter() {
                    log::warn!(
                        "Variable {} feeds {} but is not reachable from the schedule's leaves; it will not be trained",
                        graph.describe(input),
                        graph.describe(id)
                    );
                }
                external_leaves.push(input);
            }
        }
    }

    // --- 3. Topological order (post-order DFS over inputs) ---
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut order = Vec::with_capacity(discovered.len());
    for &id in &discovered {
        if marks[id.index()] == Mark::Unvisited {
            visit(graph, id, &seen, &mut marks, &mut order)?;
        }
    }

    let positions = order.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
    log::debug!(
        "Built schedule of {} node(s) from {} leaf node(s): {:?}",
        order.len(),
        leaves.len(),
        order
    );
    Ok(Schedule {
        order,
        positions,
        external_leaves,
    })
}

fn visit(
    graph: &Graph,
    id: NodeId,
    in_scope: &[bool],
    marks: &mut [Mark],
    order: &mut Vec<NodeId>,
) -> Result<(), NeuraFlowError> {
    marks[id.index()] = Mark::InProgress;
    for &input in graph.inputs(id)? {
        if !in_scope[input.index()] {
            continue;
        }
        match marks[input.index()] {
            Mark::Unvisited => visit(graph, input, in_scope, marks, order)?,
            Mark::InProgress => return Err(NeuraFlowError::CycleDetected { node: input }),
            Mark::Done => {}
        }
    }
    marks[id.index()] = Mark::Done;
    order.push(id);
    Ok(())
}

#[cfg(test)]
#[path = "schedule_test.rs"]
mod tests;
