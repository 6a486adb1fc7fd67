use burn::{
    config::Config as _,
    data::dataloader::batcher::Batcher as BatcherTrait,
    tensor::{activation::sigmoid, backend::Backend},
};
use log::info;

use crate::{cli::Model, models::Classifier};

use super::{
    batcher::Infer,
    pipeline::load_weights,
    tokenizer::{Tokenize, WordTokenizer},
    training::Config,
    vocab::{Vocabulary, UNK_TOKEN_ID},
    Batcher,
};

/// Score raw texts with a model trained by [`super::pipeline::run`].
///
/// Returns the probability of the positive class for each sample, along with the experiment
/// configuration the model was trained with.
pub fn infer<B: Backend>(
    device: B::Device,   // Device on which to perform computation (e.g., CPU or CUDA device)
    artifact_dir: &str,  // Directory containing the config, vocabulary and model files
    samples: &[String],  // Text samples for inference
) -> anyhow::Result<(Vec<f32>, Config)> {
    // Load experiment configuration
    let config = Config::load(format!("{artifact_dir}/config.json").as_str())
        .map_err(|e| anyhow!("Unable to load config file: {}", e))?;

    let vocab = Vocabulary::load(&format!("{artifact_dir}/vocab.json"))?;

    let tokenizer = WordTokenizer::new(config.lowercase);
    let sequences = vocab.encode_all(&tokenizer.tokenize_all(samples)?);

    info!("Loading {} weights...", config.model_name);

    let probabilities = match config.model()? {
        Model::BiLstmLastState => {
            let model = config.bilstm_last_state(vocab.len()).init::<B>(&device);
            predict(
                &load_weights(model, artifact_dir, &device)?,
                sequences,
                config.batch_size,
                &device,
            )
        }
        Model::BiLstmPool => {
            let model = config.bilstm_pool(vocab.len()).init::<B>(&device);
            predict(
                &load_weights(model, artifact_dir, &device)?,
                sequences,
                config.batch_size,
                &device,
            )
        }
        Model::Cnn => {
            let model = config.cnn(vocab.len()).init::<B>(&device);
            predict(
                &load_weights(model, artifact_dir, &device)?,
                sequences,
                config.batch_size,
                &device,
            )
        }
    };

    Ok((probabilities, config))
}

/// Positive class probabilities for a list of encoded sentences, scored `batch_size` at a time
pub fn predict<B: Backend, M: Classifier<B>>(
    model: &M,
    sequences: Vec<Vec<usize>>,
    batch_size: usize,
    device: &B::Device,
) -> Vec<f32> {
    let batcher = Batcher::<B>::new(UNK_TOKEN_ID, model.min_seq_length(), device.clone());

    let mut probabilities = Vec::with_capacity(sequences.len());

    for chunk in sequences.chunks(batch_size.max(1)) {
        let batch: Infer<B> = batcher.batch(chunk.to_vec());

        probabilities.extend(
            sigmoid(model.forward(batch.tokens))
                .reshape([chunk.len()])
                .into_data()
                .convert::<f32>()
                .value,
        );
    }

    probabilities
}
