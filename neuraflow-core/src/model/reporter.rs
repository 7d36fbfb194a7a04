/// Per-epoch mean losses recorded by a training run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    pub train_losses: Vec<f64>,
    pub valid_losses: Vec<f64>,
}

impl TrainingHistory {
    pub fn epochs(&self) -> usize {
        self.train_losses.len()
    }

    pub fn push(&mut self, train_loss: f64, valid_loss: f64) {
        self.train_losses.push(train_loss);
        self.valid_losses.push(valid_loss);
    }

    /// Epoch (0-based) with the lowest validation loss.
    pub fn best_epoch(&self) -> Option<usize> {
        self.valid_losses
            .iter()
            .enumerate()
            .filter(|(_, loss)| loss.is_finite())
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(epoch, _)| epoch)
    }
}

/// Receives progress from [`FeedforwardModel::train`](super::FeedforwardModel::train).
pub trait Reporter {
    /// Called once per epoch; `epoch` is 1-based.
    fn report_epoch(&mut self, epoch: usize, train_loss: f64, valid_loss: f64);

    /// Called once after the last epoch.
    fn report_history(&mut self, _history: &TrainingHistory) {}
}

/// Writes progress through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report_epoch(&mut self, epoch: usize, train_loss: f64, valid_loss: f64) {
        log::info!("Epoch {:2} - Loss: {:4.2}", epoch, valid_loss);
        log::debug!("Epoch {:2} - Training loss: {:.6}", epoch, train_loss);
    }

    fn report_history(&mut self, history: &TrainingHistory) {
        if let (Some(first), Some(last)) = (history.valid_losses.first(), history.valid_losses.last()) {
            log::info!(
                "Trained {} epoch(s): validation loss {:.4} -> {:.4}",
                history.epochs(),
                first,
                last
            );
        }
    }
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report_epoch(&mut self, _epoch: usize, _train_loss: f64, _valid_loss: f64) {}
}
