use super::Schedule;
use crate::error::NeuraFlowError;
use crate::graph::Graph;

/// Evaluates every scheduled node in topological order.
///
/// Each operator node reads the current state of its inputs (already up to
/// date, since inputs precede it) and overwrites its own state. Placeholders
/// and Variables are skipped: their state is injected externally or persists
/// from the previous step. Results are read back with [`Graph::state`].
///
/// # Errors
/// * `MissingState` if an input was never given a value (e.g. an unfed placeholder).
/// * `ShapeMismatch` / `BroadcastError` from the operators' numeric rules.
pub fn forward(graph: &mut Graph, schedule: &Schedule) -> Result<(), NeuraFlowError> {
    for &id in schedule.nodes() {
        let op = graph.op(id)?;
        if op.is_leaf() {
            continue;
        }
        let output = {
            let inputs = graph.input_states(id)?;
            op.forward(&inputs)?
        };
        graph.set_state(id, output)?;
    }
    Ok(())
}
