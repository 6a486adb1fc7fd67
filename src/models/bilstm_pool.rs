use burn::{
    config::Config,
    module::Module,
    nn::{Dropout, DropoutConfig, Embedding, EmbeddingConfig, Linear, LinearConfig},
    tensor::{activation::relu, backend::Backend, Int, Tensor},
};

use super::{BiLstm, BiLstmConfig, Classifier};

/// The Model Configuration
#[derive(Config, Debug)]
pub struct BiLstmPoolConfig {
    /// Size of the vocabulary, including the unknown token
    pub vocab_size: usize,

    /// Size of each token embedding
    #[config(default = 64)]
    pub embedding_size: usize,

    /// Size of the hidden state of each LSTM direction, and of the dense layer
    #[config(default = 64)]
    pub hidden_size: usize,

    /// Dropout applied to the pooled LSTM output
    #[config(default = 0.0)]
    pub dropout: f64,
}

impl BiLstmPoolConfig {
    /// Initialize the model
    pub fn init<B: Backend>(&self, device: &B::Device) -> BiLstmPool<B> {
        BiLstmPool {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device),
            lstm: BiLstmConfig::new(self.embedding_size, self.hidden_size).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
            fc: LinearConfig::new(2 * self.hidden_size, self.hidden_size).init(device),
            output: LinearConfig::new(self.hidden_size, 1).init(device),
        }
    }
}

/// Classifies a sentence from the sum over time of every bidirectional LSTM state
#[derive(Module, Debug)]
pub struct BiLstmPool<B: Backend> {
    embedding: Embedding<B>,
    lstm: BiLstm<B>,
    dropout: Dropout,
    fc: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> Classifier<B> for BiLstmPool<B> {
    fn forward(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(tokens);
        let x = self.lstm.forward(x).sequence;

        let [batch_size, _, d_output] = x.dims();
        let x = x.sum_dim(1).reshape([batch_size, d_output]);

        let x = self.dropout.forward(x);
        let x = relu(self.fc.forward(x));

        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_one_logit_per_sentence() {
        let device = Default::default();
        let model = BiLstmPoolConfig::new(10)
            .with_embedding_size(8)
            .with_hidden_size(4)
            .with_dropout(0.5)
            .init::<NdArray>(&device);

        let logits = model.forward(Tensor::zeros([2, 9], &device));

        assert_eq!(logits.dims(), [2, 1]);
    }
}
