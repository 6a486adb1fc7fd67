use burn::{
    config::Config,
    module::Module,
    nn::{Dropout, DropoutConfig, Embedding, EmbeddingConfig, Linear, LinearConfig},
    tensor::{activation::relu, backend::Backend, Int, Tensor},
};

use super::{BiLstm, BiLstmConfig, Classifier};

/// The Model Configuration
#[derive(Config, Debug)]
pub struct BiLstmLastStateConfig {
    /// Size of the vocabulary, including the unknown token
    pub vocab_size: usize,

    /// Size of each token embedding
    #[config(default = 64)]
    pub embedding_size: usize,

    /// Size of the hidden state of each LSTM direction, and of the dense layer
    #[config(default = 64)]
    pub hidden_size: usize,

    /// Dropout applied to the LSTM output
    #[config(default = 0.0)]
    pub dropout: f64,
}

impl BiLstmLastStateConfig {
    /// Initialize the model
    pub fn init<B: Backend>(&self, device: &B::Device) -> BiLstmLastState<B> {
        BiLstmLastState {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device),
            lstm: BiLstmConfig::new(self.embedding_size, self.hidden_size).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
            fc: LinearConfig::new(2 * self.hidden_size, self.hidden_size).init(device),
            output: LinearConfig::new(self.hidden_size, 1).init(device),
        }
    }
}

/// Classifies a sentence from the final hidden state of a bidirectional LSTM
#[derive(Module, Debug)]
pub struct BiLstmLastState<B: Backend> {
    embedding: Embedding<B>,
    lstm: BiLstm<B>,
    dropout: Dropout,
    fc: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> Classifier<B> for BiLstmLastState<B> {
    fn forward(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(tokens);
        let x = self.lstm.forward(x).last;
        let x = self.dropout.forward(x);
        let x = relu(self.fc.forward(x));

        self.output.forward(x)
    }
}
