use crate::graph::{Graph, NodeId};

/// Filters `nodes` down to the learnable parameters (Variable nodes),
/// preserving their relative order.
///
/// Ids that do not belong to `graph` are not parameters and are dropped.
pub fn parameters(graph: &Graph, nodes: &[NodeId]) -> Vec<NodeId> {
    nodes
        .iter()
        .copied()
        .filter(|&id| graph.op(id).map_or(false, |op| op.is_parameter()))
        .collect()
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
