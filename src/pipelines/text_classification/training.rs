use std::time::Instant;

use burn::{
    data::{
        dataloader::DataLoaderBuilder,
        dataset::{Dataset, InMemDataset},
    },
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    tensor::{backend::AutodiffBackend, ElementConversion},
};
use log::{debug, info};

use crate::models::{loss::binary_cross_entropy_with_logits, Classifier};

use super::{
    metrics::{BinaryAccuracy, EpochMetrics, Mean},
    vocab::UNK_TOKEN_ID,
    Batcher, Encoded,
};

/// Training Config
pub type Config = super::config::Training;

/// Fit a model on the encoded training set, scoring it on the test set after every epoch.
///
/// Returns the trained model along with the metrics of each epoch.
pub fn train<B, M>(
    device: &B::Device,                   // Device on which to perform computation
    model: M,                             // Freshly initialized model
    dataset_train: InMemDataset<Encoded>, // Training dataset
    dataset_test: InMemDataset<Encoded>,  // Testing dataset
    config: &Config,                      // Experiment configuration
) -> anyhow::Result<(M, Vec<EpochMetrics>)>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + Classifier<B> + 'static,
    M::InnerModule: Classifier<B::InnerBackend>,
{
    config.validate()?;

    let min_seq_length = model.min_seq_length();

    debug!(
        "Training on {} sentences, testing on {}, min sequence length {}",
        dataset_train.len(),
        dataset_test.len(),
        min_seq_length
    );

    // Initialize batchers for training and testing data
    let batcher_train = Batcher::<B>::new(UNK_TOKEN_ID, min_seq_length, device.clone());
    let batcher_test =
        Batcher::<B::InnerBackend>::new(UNK_TOKEN_ID, min_seq_length, device.clone());

    let workers = std::thread::available_parallelism()?;

    // Initialize data loaders for training and testing data
    let dataloader_train = DataLoaderBuilder::new(batcher_train)
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .num_workers(workers.into())
        .build(dataset_train);

    let dataloader_test = DataLoaderBuilder::new(batcher_test)
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .num_workers(workers.into())
        .build(dataset_test);

    // Initialize optimizer
    let mut optimizer = AdamConfig::new().with_epsilon(config.adam_epsilon).init();

    let mut train_loss = Mean::default();
    let mut train_accuracy = BinaryAccuracy::default();
    let mut test_loss = Mean::default();
    let mut test_accuracy = BinaryAccuracy::default();

    let mut model = model;
    let mut history = Vec::with_capacity(config.num_epochs);

    for epoch in 1..=config.num_epochs {
        train_loss.reset();
        train_accuracy.reset();
        test_loss.reset();
        test_accuracy.reset();

        let start = Instant::now();

        for batch in dataloader_train.iter() {
            let logits = model.forward(batch.tokens);
            let loss = binary_cross_entropy_with_logits(logits.clone(), batch.targets.clone());

            train_loss.update(loss.clone().into_scalar().elem::<f64>());
            train_accuracy.update(logits, batch.targets);

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optimizer.step(config.learning_rate, model, grads);
        }

        // Dropout is disabled on the inner backend
        let model_valid = model.valid();

        for batch in dataloader_test.iter() {
            let logits = model_valid.forward(batch.tokens);
            let loss = binary_cross_entropy_with_logits(logits.clone(), batch.targets.clone());

            test_loss.update(loss.into_scalar().elem::<f64>());
            test_accuracy.update(logits, batch.targets);
        }

        let metrics = EpochMetrics {
            epoch,
            train_loss: train_loss.result(),
            train_accuracy: train_accuracy.result(),
            test_loss: test_loss.result(),
            test_accuracy: test_accuracy.result(),
            duration: start.elapsed(),
        };

        info!("{}", metrics);

        history.push(metrics);
    }

    Ok((model, history))
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::{Autodiff, NdArray},
        tensor::backend::Backend,
    };
    use pretty_assertions::assert_eq;

    use crate::{cli::Model, models::CnnConfig};

    use super::*;

    type TestBackend = Autodiff<NdArray>;

    fn toy(items: Vec<(Vec<usize>, u8)>) -> InMemDataset<Encoded> {
        InMemDataset::new(
            items
                .into_iter()
                .map(|(tokens, label)| Encoded::new(tokens, label))
                .collect(),
        )
    }

    #[test]
    fn test_runs_every_epoch() {
        let device = Default::default();
        let config = Config::for_model(Model::Cnn, "toy")
            .with_num_epochs(2)
            .with_batch_size(2)
            .with_embedding_size(4)
            .with_hidden_size(3)
            .with_window(3)
            .with_learning_rate(1e-2);

        TestBackend::seed(config.seed);

        let model = CnnConfig::new(4)
            .with_embedding_size(4)
            .with_hidden_size(3)
            .with_window(3)
            .init::<TestBackend>(&device);

        let dataset_train = toy(vec![(vec![1, 1, 2], 1), (vec![3], 0), (vec![2, 2], 1)]);
        let dataset_test = toy(vec![(vec![1, 0, 0, 3], 1), (vec![3, 3], 0)]);

        let (_, history) =
            train::<TestBackend, _>(&device, model, dataset_train, dataset_test, &config).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.iter().map(|m| m.epoch).collect::<Vec<_>>(),
            vec![1, 2]
        );

        for metrics in history {
            assert!(metrics.train_loss.is_finite() && metrics.train_loss > 0.0);
            assert!(metrics.test_loss.is_finite() && metrics.test_loss > 0.0);
            assert!((0.0..=1.0).contains(&metrics.train_accuracy));
            assert!((0.0..=1.0).contains(&metrics.test_accuracy));
        }
    }
}
