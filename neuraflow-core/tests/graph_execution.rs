use approx::assert_relative_eq;
use neuraflow_core::autograd::{backward, build_schedule, check_gradients, forward};
use neuraflow_core::graph::Graph;
use neuraflow_core::nn::{parameters, Dense};
use neuraflow_core::nodes::Op;
use neuraflow_core::optim::{Optimizer, SgdMomentum};
use neuraflow_core::tensor::Tensor;
use neuraflow_core::NeuraFlowError;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod common;

fn t(rows: &[Vec<f64>]) -> Tensor {
    Tensor::from_rows(rows).unwrap()
}

#[test]
fn test_two_layer_network_passes_gradient_check() {
    common::init_logger();
    let mut rng = StdRng::seed_from_u64(7);
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let y = graph.placeholder();
    let hidden = Dense::new(&mut graph, x, 3, 5, &mut rng).unwrap();
    let act = graph.relu(hidden.output).unwrap();
    let out = Dense::new(&mut graph, act, 5, 1, &mut rng).unwrap();
    let loss = graph.mse(y, out.output).unwrap();

    let (features, targets) = common::synthetic_regression(6, 3);
    graph.set_value(x, features).unwrap();
    graph.set_value(y, targets).unwrap();

    let leaves = [x, hidden.weight, hidden.bias, out.weight, out.bias, y];
    let schedule = build_schedule(&graph, &leaves).unwrap();
    let params = parameters(&graph, schedule.nodes());
    assert_eq!(params.len(), 4);
    check_gradients(&mut graph, &schedule, loss, &params, 1e-6, 1e-5).unwrap();
}

#[test]
fn test_diamond_gradient_is_sum_of_paths() {
    // h = x·w feeds both relu(h) and the final add: s = relu(h) + h.
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let w = graph.variable(t(&[vec![2.0]]));
    let y = graph.placeholder();
    let h = graph.linear(x, w).unwrap();
    let r = graph.relu(h).unwrap();
    let s = graph.add(r, h).unwrap();
    let loss = graph.mse(y, s).unwrap();
    graph.set_value(x, t(&[vec![1.0]])).unwrap();
    graph.set_value(y, t(&[vec![0.0]])).unwrap();

    let schedule = build_schedule(&graph, &[x, w, y]).unwrap();
    forward(&mut graph, &schedule).unwrap();
    assert_relative_eq!(graph.state(loss).unwrap().item().unwrap(), 16.0);

    backward(&mut graph, &schedule).unwrap();
    // dL/ds = 2·4 = 8; both paths contribute 8 to dL/dh.
    assert_relative_eq!(graph.gradient(h).unwrap().data()[0], 16.0);
    assert_relative_eq!(graph.gradient(w).unwrap().data()[0], 16.0);

    // A second pass resets before accumulating.
    backward(&mut graph, &schedule).unwrap();
    assert_relative_eq!(graph.gradient(w).unwrap().data()[0], 16.0);
}

#[test]
fn test_forward_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let layer = Dense::new(&mut graph, x, 3, 4, &mut rng).unwrap();
    let out = graph.relu(layer.output).unwrap();
    let schedule = build_schedule(&graph, &[x, layer.weight, layer.bias]).unwrap();

    let (features, _) = common::synthetic_regression(8, 1);
    graph.set_value(x, features).unwrap();
    forward(&mut graph, &schedule).unwrap();
    let first = graph.state(out).unwrap().clone();
    forward(&mut graph, &schedule).unwrap();
    assert_eq!(graph.state(out).unwrap(), &first);
}

#[test]
fn test_schedule_rejects_forward_reference_cycle() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let r = graph.declare(Op::Relu);
    let a = graph.declare(Op::Add);
    graph.wire(a, &[x, r]).unwrap();
    graph.wire(r, &[a]).unwrap();
    assert!(matches!(
        build_schedule(&graph, &[x]),
        Err(NeuraFlowError::CycleDetected { .. })
    ));
}

#[test]
fn test_unfed_placeholder_is_reported() {
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let r = graph.relu(x).unwrap();
    let schedule = build_schedule(&graph, &[x]).unwrap();
    assert_eq!(
        forward(&mut graph, &schedule).unwrap_err(),
        NeuraFlowError::MissingState { node: x }
    );
    assert!(graph.state(r).is_err());
}

#[test]
fn test_momentum_step_after_backward() {
    // loss = (x·p - 0)² with x = 1, p = 1 gives dL/dp = 2.
    let mut graph = Graph::new();
    let x = graph.placeholder();
    let p = graph.variable(t(&[vec![1.0]]));
    let y = graph.placeholder();
    let pred = graph.linear(x, p).unwrap();
    graph.mse(y, pred).unwrap();
    graph.set_value(x, t(&[vec![1.0]])).unwrap();
    graph.set_value(y, t(&[vec![0.0]])).unwrap();

    let schedule = build_schedule(&graph, &[x, p, y]).unwrap();
    let mut optimizer = SgdMomentum::new(&graph, parameters(&graph, schedule.nodes()), 0.001).unwrap();
    forward(&mut graph, &schedule).unwrap();
    backward(&mut graph, &schedule).unwrap();
    assert_relative_eq!(graph.gradient(p).unwrap().data()[0], 2.0);

    optimizer.update_gradients(&graph).unwrap();
    optimizer.apply_gradients(&mut graph).unwrap();
    assert_relative_eq!(optimizer.velocity(p).unwrap().data()[0], 0.002, epsilon = 1e-12);
    assert_relative_eq!(graph.state(p).unwrap().data()[0], 0.998, epsilon = 1e-12);
}
