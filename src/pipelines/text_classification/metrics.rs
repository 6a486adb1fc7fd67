use std::{fmt::Display, time::Duration};

use burn::tensor::{activation::sigmoid, backend::Backend, ElementConversion, Int, Tensor};
use serde::{Deserialize, Serialize};

/// Running mean of scalar values, such as per-batch losses
#[derive(Clone, Debug, Default)]
pub struct Mean {
    total: f64,
    count: usize,
}

impl Mean {
    /// Add a value
    pub fn update(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    /// The mean of every value since the last reset, or 0 if there were none
    pub fn result(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }

        self.total / self.count as f64
    }

    /// Forget every value
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fraction of predictions that land on the right side of a probability threshold
#[derive(Clone, Debug)]
pub struct BinaryAccuracy {
    threshold: f64,
    correct: usize,
    total: usize,
}

impl Default for BinaryAccuracy {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl BinaryAccuracy {
    /// Create an accuracy metric with the given probability threshold
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            correct: 0,
            total: 0,
        }
    }

    /// Score a batch of logits `[batch_size, 1]` against 0/1 targets of the same shape
    pub fn update<B: Backend>(&mut self, logits: Tensor<B, 2>, targets: Tensor<B, 2, Int>) {
        let total = targets.shape().num_elements();

        let predicted = sigmoid(logits).greater_equal_elem(self.threshold).int();
        let expected = targets.greater_equal_elem(1).int();

        let correct = predicted
            .equal(expected)
            .int()
            .sum()
            .into_scalar()
            .elem::<i64>();

        self.correct += correct as usize;
        self.total += total;
    }

    /// Accuracy since the last reset, or 0 if nothing was scored
    pub fn result(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        self.correct as f64 / self.total as f64
    }

    /// Forget every prediction
    pub fn reset(&mut self) {
        self.correct = 0;
        self.total = 0;
    }
}

/// Scores for a single training epoch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number, starting at 1
    pub epoch: usize,

    /// Mean binary cross-entropy over the training batches
    pub train_loss: f64,

    /// Accuracy over the training set
    pub train_accuracy: f64,

    /// Mean binary cross-entropy over the test batches
    pub test_loss: f64,

    /// Accuracy over the test set
    pub test_accuracy: f64,

    /// Wall time for the epoch
    pub duration: Duration,
}

impl Display for EpochMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Epoch {}, Loss: {:.2}, Accuracy: {:.2}, Test Loss: {:.2}, Test Accuracy: {:.2}, Time: {:.2} s",
            self.epoch,
            self.train_loss,
            self.train_accuracy,
            self.test_loss,
            self.test_accuracy,
            self.duration.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::NdArray,
        tensor::{Data, Shape},
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn column(values: Vec<f32>) -> Tensor<NdArray, 2> {
        let rows = values.len();
        Tensor::from_data(Data::new(values, Shape::new([rows, 1])), &Default::default())
    }

    fn labels(values: Vec<i64>) -> Tensor<NdArray, 2, Int> {
        let rows = values.len();
        Tensor::from_data(Data::new(values, Shape::new([rows, 1])), &Default::default())
    }

    #[test]
    fn test_mean_resets() {
        let mut mean = Mean::default();
        assert_eq!(mean.result(), 0.0);

        mean.update(1.0);
        mean.update(2.0);
        assert_eq!(mean.result(), 1.5);

        mean.reset();
        mean.update(4.0);
        assert_eq!(mean.result(), 4.0);
    }

    #[test]
    fn test_binary_accuracy_thresholds_sigmoid() {
        let mut accuracy = BinaryAccuracy::default();

        // sigmoid: 0.88, 0.12, 0.62, 0.27
        accuracy.update(
            column(vec![2.0, -2.0, 0.5, -1.0]),
            labels(vec![1, 0, 0, 1]),
        );
        assert_eq!(accuracy.result(), 0.5);

        accuracy.update(column(vec![3.0]), labels(vec![1]));
        assert_eq!(accuracy.result(), 0.6);

        accuracy.reset();
        assert_eq!(accuracy.result(), 0.0);
    }

    #[test]
    fn test_epoch_line() {
        let metrics = EpochMetrics {
            epoch: 3,
            train_loss: 0.6931,
            train_accuracy: 0.5,
            test_loss: 0.70,
            test_accuracy: 0.456,
            duration: Duration::from_millis(1250),
        };

        assert_eq!(
            metrics.to_string(),
            "Epoch 3, Loss: 0.69, Accuracy: 0.50, Test Loss: 0.70, Test Accuracy: 0.46, Time: 1.25 s"
        );
    }
}
