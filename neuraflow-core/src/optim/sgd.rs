use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};
use crate::optim::optimizer_trait::Optimizer;
use crate::tensor::{zeros_like, Tensor};

/// Momentum coefficient used by [`SgdMomentum::new`].
pub const DEFAULT_MOMENTUM: f64 = 0.9;

/// Stochastic gradient descent with classic (heavy-ball) momentum.
///
/// For each parameter `p` with gradient `g` and velocity `v`:
///
/// ```text
/// v <- momentum * v + lr * g
/// p <- p - v
/// ```
///
/// Velocities start at zero, one per parameter, shaped like the parameter's
/// state. They are owned by this instance and never shared.
#[derive(Debug, Clone)]
pub struct SgdMomentum {
    params: Vec<NodeId>,
    velocities: Vec<Tensor>,
    learning_rate: f64,
    momentum: f64,
    gradients_synced: bool,
}

impl SgdMomentum {
    /// Creates an optimizer over `params` with the default momentum of 0.9.
    pub fn new(graph: &Graph, params: Vec<NodeId>, learning_rate: f64) -> Result<Self, NeuraFlowError> {
        Self::with_momentum(graph, params, learning_rate, DEFAULT_MOMENTUM)
    }

    /// Creates an optimizer over `params`.
    ///
    /// # Errors
    /// * `InvalidHyperparameter` if `learning_rate` is not a positive finite
    ///   number or `momentum` is outside `[0, 1)`.
    /// * `NotAParameter` if one of `params` is not a Variable node.
    pub fn with_momentum(
        graph: &Graph,
        params: Vec<NodeId>,
        learning_rate: f64,
        momentum: f64,
    ) -> Result<Self, NeuraFlowError> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NeuraFlowError::InvalidHyperparameter {
                name: "learning_rate",
                value: learning_rate,
            });
        }
        if !(0.0..1.0).contains(&momentum) {
            return Err(NeuraFlowError::InvalidHyperparameter {
                name: "momentum",
                value: momentum,
            });
        }
        let velocities = params
            .iter()
            .map(|&p| {
                if !graph.op(p)?.is_parameter() {
                    return Err(NeuraFlowError::NotAParameter(p));
                }
                Ok(zeros_like(graph.state(p)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "SgdMomentum over {} parameter(s), lr = {}, momentum = {}",
            params.len(),
            learning_rate,
            momentum
        );
        Ok(SgdMomentum {
            params,
            velocities,
            learning_rate,
            momentum,
            gradients_synced: false,
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<(), NeuraFlowError> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NeuraFlowError::InvalidHyperparameter {
                name: "learning_rate",
                value: learning_rate,
            });
        }
        self.learning_rate = learning_rate;
        Ok(())
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// The velocity buffer of a tracked parameter.
    pub fn velocity(&self, param: NodeId) -> Option<&Tensor> {
        self.params
            .iter()
            .position(|&p| p == param)
            .map(|i| &self.velocities[i])
    }

    /// Gradient of each parameter, or `None` if it has no gradient buffer.
    fn collect_gradients(&self, graph: &Graph) -> Result<Vec<Option<Tensor>>, NeuraFlowError> {
        self.params
            .iter()
            .map(|&p| {
                let node = graph.node(p)?;
                match node.gradient() {
                    None => Ok(None),
                    Some(grad) => {
                        let state = graph.state(p)?;
                        if grad.shape() != state.shape() {
                            return Err(NeuraFlowError::ShapeMismatch {
                                expected: state.shape().to_vec(),
                                actual: grad.shape().to_vec(),
                                operation: format!("SgdMomentum gradient of {}", p),
                            });
                        }
                        Ok(Some(grad.clone()))
                    }
                }
            })
            .collect()
    }
}

impl Optimizer for SgdMomentum {
    fn update_gradients(&mut self, graph: &Graph) -> Result<(), NeuraFlowError> {
        for (&p, grad) in self.params.iter().zip(self.collect_gradients(graph)?) {
            if grad.is_none() {
                log::warn!(
                    "Parameter {} has no gradient; was the backward pass run?",
                    graph.describe(p)
                );
            }
        }
        self.gradients_synced = true;
        Ok(())
    }

    fn apply_gradients(&mut self, graph: &mut Graph) -> Result<(), NeuraFlowError> {
        if !self.gradients_synced {
            log::debug!("apply_gradients without update_gradients; reading gradients directly");
        }
        // Validate everything before touching any parameter so a step is all-or-nothing.
        let gradients = self.collect_gradients(graph)?;

        for ((&p, velocity), grad) in self.params.iter().zip(self.velocities.iter_mut()).zip(gradients) {
            let Some(mut step) = grad else {
                log::warn!("Skipping parameter {}: no gradient to apply", graph.describe(p));
                continue;
            };
            step.mul_scalar_(self.learning_rate);
            velocity.mul_scalar_(self.momentum);
            velocity.add_(&step)?;
            graph.state_mut(p)?.sub_(velocity)?;
        }
        self.gradients_synced = false;
        Ok(())
    }

    fn zero_grad(&mut self, graph: &mut Graph) -> Result<(), NeuraFlowError> {
        for &p in &self.params {
            let zero = zeros_like(graph.state(p)?);
            graph.set_gradient(p, zero)?;
        }
        Ok(())
    }

    fn parameters(&self) -> &[NodeId] {
        &self.params
    }
}
