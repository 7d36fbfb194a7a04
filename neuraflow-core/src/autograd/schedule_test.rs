use super::*;
use crate::nodes::Op;
use crate::tensor::zeros;

/// X -> Linear(W) -> Add(B) -> ReLU -> MSE(Y, .)
fn small_network(graph: &mut Graph) -> Vec<NodeId> {
    let x = graph.placeholder();
    let w = graph.variable(zeros(&[3, 2]));
    let b = graph.variable(zeros(&[1, 2]));
    let y = graph.placeholder();
    let h = graph.linear(x, w).unwrap();
    let z = graph.add(h, b).unwrap();
    let a = graph.relu(z).unwrap();
    graph.mse(y, a).unwrap();
    vec![x, w, b, y]
}

fn assert_topological(graph: &Graph, schedule: &Schedule) {
    for &id in schedule.nodes() {
        let pos = schedule.position(id).unwrap();
        for &input in graph.inputs(id).unwrap() {
            if let Some(input_pos) = schedule.position(input) {
                assert!(input_pos < pos, "{} scheduled before its input {}", id, input);
            }
        }
    }
}

#[test]
fn test_schedule_is_topological() {
    let mut graph = Graph::new();
    let leaves = small_network(&mut graph);
    let schedule = build_schedule(&graph, &leaves).unwrap();
    assert_eq!(schedule.len(), graph.len());
    assert_topological(&graph, &schedule);
    assert!(schedule.external_leaves().is_empty());
}

#[test]
fn test_schedule_is_deterministic() {
    let mut graph = Graph::new();
    let leaves = small_network(&mut graph);
    let first = build_schedule(&graph, &leaves).unwrap();
    let second = build_schedule(&graph, &leaves).unwrap();
    assert_eq!(first.nodes(), second.nodes());
}

#[test]
fn test_schedule_leaf_order_does_not_break_validity() {
    let mut graph = Graph::new();
    let mut leaves = small_network(&mut graph);
    leaves.reverse();
    let schedule = build_schedule(&graph, &leaves).unwrap();
    assert_topological(&graph, &schedule);
}

#[test]
fn test_diamond_schedules_shared_node_once() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let shared = graph.relu(x).unwrap();
    let left = graph.relu(shared).unwrap();
    let right = graph.relu(shared).unwrap();
    let join = graph.add(left, right).unwrap();
    let schedule = build_schedule(&graph, &[x]).unwrap();
    assert_eq!(schedule.len(), 5);
    assert_topological(&graph, &schedule);
    assert_eq!(schedule.position(join), Some(4));
}

#[test]
fn test_cycle_is_rejected() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let a = graph.declare(Op::Add);
    let b = graph.declare(Op::Relu);
    graph.wire(a, &[x, b]).unwrap();
    graph.wire(b, &[a]).unwrap();
    let err = build_schedule(&graph, &[x]).unwrap_err();
    assert!(matches!(err, NeuraFlowError::CycleDetected { .. }));
}

#[test]
fn test_self_loop_is_rejected() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let a = graph.declare(Op::Add);
    graph.wire(a, &[x, a]).unwrap();
    assert_eq!(
        build_schedule(&graph, &[x]).unwrap_err(),
        NeuraFlowError::CycleDetected { node: a }
    );
}

#[test]
fn test_unwired_node_is_rejected() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let pending = graph.declare(Op::Relu);
    let out = graph.add(x, pending).unwrap();
    // `pending` is reachable only through inputs, and it is not a leaf.
    assert_eq!(
        build_schedule(&graph, &[x]).unwrap_err(),
        NeuraFlowError::UnscheduledInput {
            node: out,
            input: pending
        }
    );
    // Scheduling from the unwired node itself reports the missing inputs.
    assert!(matches!(
        build_schedule(&graph, &[pending]),
        Err(NeuraFlowError::ArityMismatch { .. })
    ));
}

#[test]
fn test_unreached_leaf_inputs_are_external() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let w = graph.variable(zeros(&[2, 1]));
    let b = graph.variable(zeros(&[1, 1]));
    let h = graph.linear(x, w).unwrap();
    let out = graph.add(h, b).unwrap();
    let schedule = build_schedule(&graph, &[x, w]).unwrap();
    assert!(schedule.contains(out));
    assert!(!schedule.contains(b));
    assert_eq!(schedule.external_leaves(), &[b]);
}

#[test]
fn test_unreachable_nodes_are_excluded() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let other = graph.placeholder();
    let used = graph.relu(x).unwrap();
    let unused = graph.relu(other).unwrap();
    let schedule = build_schedule(&graph, &[x]).unwrap();
    assert!(schedule.contains(used));
    assert!(!schedule.contains(unused));
    assert!(!schedule.contains(other));
}

#[test]
fn test_unknown_leaf() {
    let graph = Graph::new();
    let mut other = Graph::new();
    let stray = other.placeholder();
    assert_eq!(
        build_schedule(&graph, &[stray]).unwrap_err(),
        NeuraFlowError::UnknownNode(stray)
    );
}

#[test]
fn test_prune_to_drops_loss_head() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let w = graph.variable(zeros(&[3, 1]));
    let y = graph.placeholder();
    let pred = graph.linear(x, w).unwrap();
    let loss = graph.mse(y, pred).unwrap();
    let full = build_schedule(&graph, &[x, w]).unwrap();
    assert!(full.contains(loss));
    assert_eq!(full.external_leaves(), &[y]);

    let head = full.prune_to(&graph, &[pred]).unwrap();
    assert_eq!(head.nodes().len(), 3);
    assert!(!head.contains(loss));
    assert!(head.external_leaves().is_empty());
    assert_topological(&graph, &head);
    assert_eq!(
        head.prune_to(&graph, &[loss]).unwrap_err(),
        NeuraFlowError::UnknownNode(loss)
    );
}
