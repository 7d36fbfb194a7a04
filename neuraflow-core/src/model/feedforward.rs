use crate::autograd::{backward, build_schedule, forward, Schedule};
use crate::config::TrainingConfig;
use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};
use crate::model::reporter::{Reporter, TrainingHistory};
use crate::nn::{parameters, Dense};
use crate::optim::{Optimizer, SgdMomentum};
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A `(features, targets)` pair of row-aligned 2-D tensors.
pub type Batch = (Tensor, Tensor);

/// One-hidden-layer regression network trained with MSE and SGD with momentum.
///
/// ```text
/// X -> Linear(W1) -> Add(B1) -> ReLU -> Linear(W2) -> Add(B2) = y
/// loss = MSE(Y, y)
/// ```
#[derive(Debug)]
pub struct FeedforwardModel {
    config: TrainingConfig,
    graph: Graph,
    input: NodeId,
    target: NodeId,
    hidden: Dense,
    output: Dense,
    loss: NodeId,
    inference: Schedule,
    training: Schedule,
    optimizer: SgdMomentum,
}

impl FeedforwardModel {
    pub fn new(
        config: TrainingConfig,
        in_features: usize,
        out_features: usize,
    ) -> Result<Self, NeuraFlowError> {
        config.validate()?;
        if in_features == 0 || out_features == 0 {
            return Err(NeuraFlowError::InvalidConfig(format!(
                "feature counts must be positive, got {} -> {}",
                in_features, out_features
            )));
        }
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut graph = Graph::new();

        let input = graph.placeholder();
        graph.set_name(input, "X")?;
        let target = graph.placeholder();
        graph.set_name(target, "Y")?;

        let hidden = Dense::new(&mut graph, input, in_features, config.hidden_units, &mut rng)?;
        let activation = graph.relu(hidden.output)?;
        let output = Dense::new(&mut graph, activation, config.hidden_units, out_features, &mut rng)?;
        let loss = graph.mse(target, output.output)?;
        for (id, name) in [
            (hidden.weight, "W1"),
            (hidden.bias, "B1"),
            (output.weight, "W2"),
            (output.bias, "B2"),
            (output.output, "y"),
            (loss, "loss"),
        ] {
            graph.set_name(id, name)?;
        }

        let leaves = [input, hidden.weight, hidden.bias, output.weight, output.bias];
        let inference = build_schedule(&graph, &leaves)?.prune_to(&graph, &[output.output])?;
        let mut training_leaves = leaves.to_vec();
        training_leaves.push(target);
        let training = build_schedule(&graph, &training_leaves)?;

        let params = parameters(&graph, training.nodes());
        let optimizer =
            SgdMomentum::with_momentum(&graph, params, config.learning_rate, config.momentum)?;
        log::info!(
            "Built feed-forward model {} -> {} -> {} ({} graph nodes, {} trainable)",
            in_features,
            config.hidden_units,
            out_features,
            graph.len(),
            optimizer.parameters().len()
        );

        Ok(FeedforwardModel {
            config,
            graph,
            input,
            target,
            hidden,
            output,
            loss,
            inference,
            training,
            optimizer,
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Trainable nodes in schedule order (`W1`, `B1`, `W2`, `B2`).
    pub fn parameters(&self) -> &[NodeId] {
        self.optimizer.parameters()
    }

    pub fn hidden_layer(&self) -> Dense {
        self.hidden
    }

    pub fn output_layer(&self) -> Dense {
        self.output
    }

    /// Runs forward, backward and one optimizer step on a batch.
    ///
    /// Returns the loss measured before the update.
    pub fn train_step(&mut self, x: &Tensor, y: &Tensor) -> Result<f64, NeuraFlowError> {
        self.feed(x, y)?;
        forward(&mut self.graph, &self.training)?;
        let loss = self.graph.state(self.loss)?.item()?;
        backward(&mut self.graph, &self.training)?;
        self.optimizer.update_gradients(&self.graph)?;
        self.optimizer.apply_gradients(&mut self.graph)?;
        Ok(loss)
    }

    /// Loss on a batch without touching the parameters.
    pub fn evaluate(&mut self, x: &Tensor, y: &Tensor) -> Result<f64, NeuraFlowError> {
        self.feed(x, y)?;
        forward(&mut self.graph, &self.training)?;
        self.graph.state(self.loss)?.item()
    }

    /// Trains for `config.num_epochs` epochs over `train`, measuring the
    /// mean validation loss after each epoch.
    pub fn train(
        &mut self,
        train: &[Batch],
        valid: &[Batch],
        reporter: &mut dyn Reporter,
    ) -> Result<TrainingHistory, NeuraFlowError> {
        if train.is_empty() {
            return Err(NeuraFlowError::DataError("no training batches".to_string()));
        }
        if valid.is_empty() {
            return Err(NeuraFlowError::DataError("no validation batches".to_string()));
        }
        log::info!(
            "Training for {} epoch(s) on {} batch(es), validating on {}",
            self.config.num_epochs,
            train.len(),
            valid.len()
        );

        let mut history = TrainingHistory::default();
        for epoch in 1..=self.config.num_epochs {
            let mut train_total = 0.0;
            for (x, y) in train {
                train_total += self.train_step(x, y)?;
            }
            let mut valid_total = 0.0;
            for (x, y) in valid {
                valid_total += self.evaluate(x, y)?;
            }
            let train_loss = train_total / train.len() as f64;
            let valid_loss = valid_total / valid.len() as f64;
            if !valid_loss.is_finite() {
                log::warn!("Validation loss is {} at epoch {}", valid_loss, epoch);
            }
            reporter.report_epoch(epoch, train_loss, valid_loss);
            history.push(train_loss, valid_loss);
        }
        reporter.report_history(&history);
        Ok(history)
    }

    /// Predictions for a batch of features. Does not modify any parameter.
    pub fn infer(&mut self, x: &Tensor) -> Result<Tensor, NeuraFlowError> {
        self.graph.set_value(self.input, x.clone())?;
        forward(&mut self.graph, &self.inference)?;
        Ok(self.graph.state(self.output.output)?.clone())
    }

    fn feed(&mut self, x: &Tensor, y: &Tensor) -> Result<(), NeuraFlowError> {
        if x.rows()? != y.rows()? {
            return Err(NeuraFlowError::ShapeMismatch {
                expected: vec![x.rows()?],
                actual: vec![y.rows()?],
                operation: "FeedforwardModel batch rows".to_string(),
            });
        }
        self.graph.set_value(self.input, x.clone())?;
        self.graph.set_value(self.target, y.clone())
    }
}

#[cfg(test)]
#[path = "feedforward_test.rs"]
mod tests;
