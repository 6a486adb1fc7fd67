/// Vocabulary building and sentence encoding
pub mod vocab;

/// Word tokenization
pub mod tokenizer;

/// Text Classification Items
pub mod item;

/// Batcher
pub mod batcher;

/// Running metrics
pub mod metrics;

/// Experiment configuration
pub mod config;

/// Training
pub mod training;

/// Dataset preparation and the end-to-end training run
pub mod pipeline;

/// Inference
pub mod inference;

pub use batcher::Batcher;
pub use config::Training;
pub use inference::infer;
pub use item::{Encoded, Item};
pub use metrics::EpochMetrics;
pub use pipeline::{load_dataset, run};
pub use tokenizer::{Tokenize, WordTokenizer};
pub use training::train;
pub use vocab::{tok2seq, Vocabulary, UNK_TOKEN, UNK_TOKEN_ID};
