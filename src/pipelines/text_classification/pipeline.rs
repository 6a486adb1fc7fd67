use burn::{
    config::Config as _,
    data::dataset::InMemDataset,
    module::{AutodiffModule, Module},
    record::{CompactRecorder, Recorder},
    tensor::backend::{AutodiffBackend, Backend},
};
use log::info;

use crate::{cli::Model, datasets::Split, models::Classifier};

use super::{
    metrics::EpochMetrics,
    tokenizer::{Tokenize, WordTokenizer},
    training::{train, Config},
    vocab::{tok2seq, Vocabulary},
    Encoded,
};

/// Tokenize both sides of a split, build the vocabulary from the training side only, and encode
/// both sides with it
pub fn load_dataset<T: Tokenize>(
    split: &Split,
    tokenizer: &T,
) -> anyhow::Result<(InMemDataset<Encoded>, InMemDataset<Encoded>, Vocabulary)> {
    if split.x_train.len() != split.y_train.len() || split.x_test.len() != split.y_test.len() {
        return Err(anyhow!(
            "Every text needs a label: {} training texts for {} labels, {} test texts for {} labels",
            split.x_train.len(),
            split.y_train.len(),
            split.x_test.len(),
            split.y_test.len()
        ));
    }

    let x_train_tok = tokenizer.tokenize_all(&split.x_train)?;
    let x_test_tok = tokenizer.tokenize_all(&split.x_test)?;

    let (x_train_seq, x_test_seq, vocab) = tok2seq(&x_train_tok, &x_test_tok);

    let train = encoded(x_train_seq, &split.y_train);
    let test = encoded(x_test_seq, &split.y_test);

    Ok((train, test, vocab))
}

fn encoded(sequences: Vec<Vec<usize>>, labels: &[u8]) -> InMemDataset<Encoded> {
    InMemDataset::new(
        sequences
            .into_iter()
            .zip(labels.iter().copied())
            .map(|(tokens, label)| Encoded::new(tokens, label))
            .collect(),
    )
}

/// Train the configured model on a split and store the config, vocabulary and weights in the
/// artifact directory
pub fn run<B: AutodiffBackend>(
    device: B::Device,
    split: &Split,
    config: &Config,
) -> anyhow::Result<Vec<EpochMetrics>> {
    config.validate()?;

    let model = config.model()?;
    let tokenizer = WordTokenizer::new(config.lowercase);

    let (dataset_train, dataset_test, vocab) = load_dataset(split, &tokenizer)?;

    info!(
        "Loaded {} training and {} test sentences, vocabulary size {}",
        split.x_train.len(),
        split.x_test.len(),
        vocab.len()
    );

    let artifact_dir = config.artifact_dir();
    std::fs::create_dir_all(&artifact_dir)
        .map_err(|e| anyhow!("Unable to create artifact directory {}: {}", artifact_dir, e))?;

    B::seed(config.seed);

    info!("Training {} for {} epochs", model, config.num_epochs);

    let history = match model {
        Model::BiLstmLastState => fit(
            &device,
            config.bilstm_last_state(vocab.len()).init::<B>(&device),
            dataset_train,
            dataset_test,
            config,
            &artifact_dir,
        )?,
        Model::BiLstmPool => fit(
            &device,
            config.bilstm_pool(vocab.len()).init::<B>(&device),
            dataset_train,
            dataset_test,
            config,
            &artifact_dir,
        )?,
        Model::Cnn => fit(
            &device,
            config.cnn(vocab.len()).init::<B>(&device),
            dataset_train,
            dataset_test,
            config,
            &artifact_dir,
        )?,
    };

    // Save the configuration and the vocabulary next to the trained model
    config
        .save(format!("{artifact_dir}/config.json"))
        .map_err(|e| anyhow!("Unable to save config: {}", e))?;

    vocab.save(&format!("{artifact_dir}/vocab.json"))?;

    info!("Saved artifacts to {}", artifact_dir);

    Ok(history)
}

fn fit<B, M>(
    device: &B::Device,
    model: M,
    dataset_train: InMemDataset<Encoded>,
    dataset_test: InMemDataset<Encoded>,
    config: &Config,
    artifact_dir: &str,
) -> anyhow::Result<Vec<EpochMetrics>>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + Classifier<B> + 'static,
    M::InnerModule: Classifier<B::InnerBackend>,
{
    let (model_trained, history) =
        train::<B, M>(device, model, dataset_train, dataset_test, config)?;

    CompactRecorder::new()
        .record(
            model_trained.into_record(),
            format!("{artifact_dir}/model").into(),
        )
        .map_err(|e| anyhow!("Unable to save trained model weights: {}", e))?;

    Ok(history)
}

/// Load trained weights from an artifact directory into a freshly initialized model
pub fn load_weights<B: Backend, M: Module<B>>(
    model: M,
    artifact_dir: &str,
    device: &B::Device,
) -> anyhow::Result<M> {
    let record = CompactRecorder::new()
        .load(format!("{artifact_dir}/model").into(), device)
        .map_err(|e| anyhow!("Unable to load trained model weights: {}", e))?;

    Ok(model.load_record(record))
}
