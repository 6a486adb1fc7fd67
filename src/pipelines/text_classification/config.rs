use burn::LearningRate;

use crate::{
    cli::Model,
    models::{BiLstmLastStateConfig, BiLstmPoolConfig, CnnConfig},
};

/// Define configuration struct for the experiment
#[derive(burn::config::Config)]
pub struct Training {
    /// Batch size
    #[config(default = 64)]
    pub batch_size: usize,

    /// Number of epochs
    #[config(default = 10)]
    pub num_epochs: usize,

    /// Adam epsilon
    #[config(default = 1e-7)]
    pub adam_epsilon: f32,

    /// Learning rate
    #[config(default = 1e-4)]
    pub learning_rate: LearningRate,

    /// Size of each token embedding
    #[config(default = 64)]
    pub embedding_size: usize,

    /// Size of the recurrent state, or the number of convolution filters
    #[config(default = 64)]
    pub hidden_size: usize,

    /// Dropout rate for the recurrent models
    #[config(default = 0.0)]
    pub dropout: f64,

    /// Convolution window for the CNN model
    #[config(default = 5)]
    pub window: usize,

    /// Lowercase text before tokenizing
    #[config(default = true)]
    pub lowercase: bool,

    /// Seed for shuffling and weight initialization
    #[config(default = 42)]
    pub seed: u64,

    /// The location of the top-level data directory
    #[config(default = "\"data\".to_string()")]
    pub data_dir: String,

    /// Model name (e.g., "bilstm-last-state")
    pub model_name: String,

    /// The Dataset to use (e.g., "imdb")
    pub dataset_name: String,
}

impl Training {
    /// A config using the default number of epochs for the given model
    pub fn for_model(model: Model, dataset_name: &str) -> Self {
        Self::new(model.to_string(), dataset_name.to_string())
            .with_num_epochs(model.default_num_epochs())
    }

    /// The selected model
    pub fn model(&self) -> anyhow::Result<Model> {
        Ok(Model::try_from(self.model_name.as_str())?)
    }

    /// Where the trained config, vocabulary and weights are stored
    pub fn artifact_dir(&self) -> String {
        format!(
            "{}/text-classification/{}/{}",
            self.data_dir, self.model_name, self.dataset_name
        )
    }

    /// Reject settings that training cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.batch_size == 0 {
            return Err(anyhow!("Batch size must be at least 1"));
        }

        if self.embedding_size == 0 || self.hidden_size == 0 {
            return Err(anyhow!("Embedding and hidden sizes must be at least 1"));
        }

        if !(0.0..1.0).contains(&self.dropout) {
            return Err(anyhow!("Dropout must be in [0, 1), got {}", self.dropout));
        }

        if self.window == 0 {
            return Err(anyhow!("Convolution window must be at least 1"));
        }

        if self.learning_rate <= 0.0 {
            return Err(anyhow!(
                "Learning rate must be positive, got {}",
                self.learning_rate
            ));
        }

        self.model()?;

        Ok(())
    }

    /// Hyper-parameters for [`crate::models::BiLstmLastState`]
    pub fn bilstm_last_state(&self, vocab_size: usize) -> BiLstmLastStateConfig {
        BiLstmLastStateConfig::new(vocab_size)
            .with_embedding_size(self.embedding_size)
            .with_hidden_size(self.hidden_size)
            .with_dropout(self.dropout)
    }

    /// Hyper-parameters for [`crate::models::BiLstmPool`]
    pub fn bilstm_pool(&self, vocab_size: usize) -> BiLstmPoolConfig {
        BiLstmPoolConfig::new(vocab_size)
            .with_embedding_size(self.embedding_size)
            .with_hidden_size(self.hidden_size)
            .with_dropout(self.dropout)
    }

    /// Hyper-parameters for [`crate::models::Cnn`]
    pub fn cnn(&self, vocab_size: usize) -> CnnConfig {
        CnnConfig::new(vocab_size)
            .with_embedding_size(self.embedding_size)
            .with_hidden_size(self.hidden_size)
            .with_window(self.window)
    }
}
