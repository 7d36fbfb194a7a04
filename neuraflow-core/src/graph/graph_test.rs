use super::*;
use crate::tensor::zeros;

#[test]
fn test_wiring_records_consumers() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let w = graph.variable(zeros(&[2, 2]));
    let h = graph.linear(x, w).unwrap();
    let a = graph.relu(h).unwrap();
    let b = graph.relu(h).unwrap();

    assert_eq!(graph.inputs(h).unwrap(), &[x, w]);
    assert_eq!(graph.consumers(x).unwrap(), &[h]);
    assert_eq!(graph.consumers(w).unwrap(), &[h]);
    assert_eq!(graph.consumers(h).unwrap(), &[a, b]);
    assert!(graph.consumers(a).unwrap().is_empty());
}

#[test]
fn test_same_input_twice_registers_one_consumer() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let sum = graph.add(x, x).unwrap();
    assert_eq!(graph.inputs(sum).unwrap(), &[x, x]);
    assert_eq!(graph.consumers(x).unwrap(), &[sum]);
}

#[test]
fn test_add_node_arity_error_leaves_graph_untouched() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let err = graph.add_node(Op::Linear, &[x]).unwrap_err();
    assert_eq!(
        err,
        NeuraFlowError::ArityMismatch {
            node: NodeId(1),
            op: "Linear",
            expected: 2,
            actual: 1
        }
    );
    assert_eq!(graph.len(), 1);
    assert!(graph.consumers(x).unwrap().is_empty());
}

#[test]
fn test_add_node_unknown_input() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let err = graph.add_node(Op::Add, &[x, NodeId(7)]).unwrap_err();
    assert_eq!(err, NeuraFlowError::UnknownNode(NodeId(7)));
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_wire_is_one_shot() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let r = graph.declare(Op::Relu);
    assert!(!graph.node(r).unwrap().is_wired());
    graph.wire(r, &[x]).unwrap();
    assert!(graph.node(r).unwrap().is_wired());
    assert_eq!(graph.wire(r, &[x]).unwrap_err(), NeuraFlowError::AlreadyWired(r));
    // Leaves are born wired.
    assert_eq!(graph.wire(x, &[]).unwrap_err(), NeuraFlowError::AlreadyWired(x));
}

#[test]
fn test_wire_checks_arity() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let m = graph.declare(Op::Mse);
    assert!(matches!(
        graph.wire(m, &[x]),
        Err(NeuraFlowError::ArityMismatch { expected: 2, actual: 1, .. })
    ));
}

#[test]
fn test_set_value_only_for_placeholders() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let w = graph.variable(zeros(&[1, 1]));
    assert!(graph.state(x).is_err());
    graph.set_value(x, Tensor::scalar(2.0)).unwrap();
    assert_eq!(graph.state(x).unwrap().item().unwrap(), 2.0);
    assert_eq!(
        graph.set_value(w, Tensor::scalar(1.0)).unwrap_err(),
        NeuraFlowError::NotAPlaceholder(w)
    );
}

#[test]
fn test_variable_starts_with_zero_gradient() {
    let mut graph = Graph::new();
    let w = graph.variable(Tensor::new(vec![1.0, 2.0], vec![1, 2]).unwrap());
    let g = graph.gradient(w).unwrap();
    assert_eq!(g.shape(), &[1, 2]);
    assert!(g.data().iter().all(|&v| v == 0.0));

    let x = graph.placeholder();
    assert_eq!(
        graph.gradient(x).unwrap_err(),
        NeuraFlowError::MissingGradient { node: x }
    );
}

#[test]
fn test_accumulate_gradient_adds_and_checks_shape() {
    let mut graph = Graph::new();
    let w = graph.variable(zeros(&[2]));
    let g = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    graph.accumulate_gradient(w, &g).unwrap();
    graph.accumulate_gradient(w, &g).unwrap();
    assert_eq!(graph.gradient(w).unwrap().data(), &[2.0, 4.0]);
    assert!(matches!(
        graph.accumulate_gradient(w, &Tensor::scalar(1.0)),
        Err(NeuraFlowError::GradientAccumulationShapeMismatch { .. })
    ));
}

#[test]
fn test_names() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    graph.set_name(x, "X").unwrap();
    assert_eq!(graph.node(x).unwrap().name(), Some("X"));
    assert_eq!(format!("{}", x), "#0");
    assert_eq!(graph.describe(x), "#0 (X)");
    let w = graph.variable(Tensor::scalar(1.0));
    assert_eq!(graph.describe(w), "#1");
}
