use super::{backward, forward, Schedule};
use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for node {node}, element index {element_index}: Analytical grad {analytical:?} != Numerical grad {numerical:?}. Difference: {difference:?}")]
    GradientMismatch {
        node: NodeId,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for node {node}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        node: NodeId,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for node {node}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        node: NodeId,
        element_index: usize,
        value: f64,
    },

    #[error("Graph error during gradient check: {0}")]
    Graph(#[from] NeuraFlowError),
}

/// Checks analytical gradients against central finite differences.
///
/// Runs one forward and backward pass over `schedule`, then for every
/// element `i` of every node in `params` evaluates
/// `(L(p + ε) − L(p − ε)) / 2ε` with `L` read from the scalar `loss` node.
/// Perturbed values are restored before returning, also on failure.
///
/// An element passes when the absolute difference is within `tolerance`
/// or the relative difference (scaled by `|analytical| + ε`) is.
pub fn check_gradients(
    graph: &mut Graph,
    schedule: &Schedule,
    loss: NodeId,
    params: &[NodeId],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    forward(graph, schedule)?;
    backward(graph, schedule)?;

    let analytical: Vec<Vec<f64>> = params
        .iter()
        .map(|&p| graph.gradient(p).map(|g| g.data().to_vec()))
        .collect::<Result<_, _>>()?;

    for (&param, analytical_grad) in params.iter().zip(&analytical) {
        let numel = graph.state(param)?.numel();
        for element_index in 0..numel {
            let original = graph.state(param)?.data()[element_index];

            let loss_plus = loss_at(graph, schedule, loss, param, element_index, original + epsilon);
            let loss_minus = loss_at(graph, schedule, loss, param, element_index, original - epsilon);
            graph.state_mut(param)?.data_mut()[element_index] = original;
            let (loss_plus, loss_minus) = (loss_plus?, loss_minus?);

            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            let analytical = analytical_grad[element_index];

            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    node: param,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    node: param,
                    element_index,
                    value: analytical,
                });
            }

            let difference = (analytical - numerical).abs();
            if difference > tolerance && difference / (analytical.abs() + epsilon) > tolerance {
                return Err(GradCheckError::GradientMismatch {
                    node: param,
                    element_index,
                    analytical,
                    numerical,
                    difference,
                });
            }
        }
    }

    // Leave the graph holding the unperturbed forward state.
    forward(graph, schedule)?;
    Ok(())
}

fn loss_at(
    graph: &mut Graph,
    schedule: &Schedule,
    loss: NodeId,
    param: NodeId,
    element_index: usize,
    value: f64,
) -> Result<f64, NeuraFlowError> {
    graph.state_mut(param)?.data_mut()[element_index] = value;
    forward(graph, schedule)?;
    graph.state(loss)?.item()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::build_schedule;
    use crate::tensor::Tensor;

    #[test]
    fn test_check_gradients_restores_parameters() {
        let mut graph = Graph::new();
        let x = graph.placeholder();
        let w = graph.variable(Tensor::new(vec![0.5, -1.5], vec![2, 1]).unwrap());
        let y = graph.placeholder();
        let pred = graph.linear(x, w).unwrap();
        let loss = graph.mse(y, pred).unwrap();
        graph
            .set_value(x, Tensor::new(vec![1.0, 2.0, -1.0, 0.5], vec![2, 2]).unwrap())
            .unwrap();
        graph
            .set_value(y, Tensor::new(vec![1.0, 0.0], vec![2, 1]).unwrap())
            .unwrap();
        let schedule = build_schedule(&graph, &[x, w, y]).unwrap();

        check_gradients(&mut graph, &schedule, loss, &[w], 1e-6, 1e-6).unwrap();
        assert_eq!(graph.state(w).unwrap().data(), &[0.5, -1.5]);
    }

    #[test]
    fn test_check_gradients_needs_scalar_loss() {
        let mut graph = Graph::new();
        let x = graph.placeholder();
        let w = graph.variable(Tensor::new(vec![1.0, 1.0], vec![1, 2]).unwrap());
        let out = graph.linear(x, w).unwrap();
        graph.set_value(x, Tensor::new(vec![1.0], vec![1, 1]).unwrap()).unwrap();
        let schedule = build_schedule(&graph, &[x, w]).unwrap();
        // `out` is [1, 2]; it cannot serve as a loss value.
        assert!(matches!(
            check_gradients(&mut graph, &schedule, out, &[w], 1e-6, 1e-6),
            Err(GradCheckError::Graph(NeuraFlowError::ShapeMismatch { .. }))
        ));
    }
}
