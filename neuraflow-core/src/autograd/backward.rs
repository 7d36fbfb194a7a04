use super::Schedule;
use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};
use crate::tensor::{full, zeros_like};

/// Propagates gradients from the loss node(s) back to every scheduled node.
///
/// 1. Every scheduled node (and every external leaf it reads) gets a zero
///    gradient shaped like its current state.
/// 2. Loss nodes with no scheduled consumer are seeded with a gradient of one.
/// 3. Nodes are visited in reverse topological order; each node's gradient
///    is complete by then (its consumers all come later in the schedule) and
///    its backward rule adds a contribution into each of its own inputs.
///
/// Gradients are consistent with whatever state the graph currently holds;
/// calling this without a preceding [`forward`](super::forward) is a caller
/// error that is not detected.
pub fn backward(graph: &mut Graph, schedule: &Schedule) -> Result<(), NeuraFlowError> {
    // --- 1. Reset ---
    for &id in schedule.nodes().iter().chain(schedule.external_leaves()) {
        let zero = zeros_like(graph.state(id)?);
        graph.set_gradient(id, zero)?;
    }

    // --- 2. Seed ---
    for &id in schedule.nodes() {
        if !graph.op(id)?.is_loss() {
            continue;
        }
        let is_terminal = graph
            .consumers(id)?
            .iter()
            .all(|&consumer| !schedule.contains(consumer));
        if is_terminal {
            let seed = full(graph.state(id)?.shape(), 1.0);
            graph.set_gradient(id, seed)?;
        }
    }

    // --- 3. Reverse traversal ---
    for &id in schedule.nodes().iter().rev() {
        let op = graph.op(id)?;
        if op.is_leaf() {
            continue;
        }
        let contributions = {
            let upstream = graph.gradient(id)?;
            let inputs = graph.input_states(id)?;
            op.backward(&inputs, upstream)?
        };
        let inputs: Vec<NodeId> = graph.inputs(id)?.to_vec();
        for (input, contribution) in inputs.into_iter().zip(contributions) {
            if let Some(grad) = contribution {
                graph.accumulate_gradient(input, &grad)?;
            }
        }
    }
    Ok(())
}
