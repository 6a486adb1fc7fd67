use burn::{
    config::Config,
    module::Module,
    nn::{
        conv::{Conv1d, Conv1dConfig},
        Embedding, EmbeddingConfig, Linear, LinearConfig,
    },
    tensor::{activation::relu, backend::Backend, Int, Tensor},
};

use super::Classifier;

/// The Model Configuration
#[derive(Config, Debug)]
pub struct CnnConfig {
    /// Size of the vocabulary, including the unknown token
    pub vocab_size: usize,

    /// Size of each token embedding
    #[config(default = 64)]
    pub embedding_size: usize,

    /// Number of convolution filters
    #[config(default = 64)]
    pub hidden_size: usize,

    /// Width of the convolution window, in tokens
    #[config(default = 5)]
    pub window: usize,
}

impl CnnConfig {
    /// Initialize the model
    pub fn init<B: Backend>(&self, device: &B::Device) -> Cnn<B> {
        Cnn {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device),
            conv: Conv1dConfig::new(self.embedding_size, self.hidden_size, self.window)
                .init(device),
            output: LinearConfig::new(self.hidden_size, 1).init(device),
            window: self.window,
        }
    }
}

/// Convolution over token embeddings followed by global average pooling
#[derive(Module, Debug)]
pub struct Cnn<B: Backend> {
    embedding: Embedding<B>,
    conv: Conv1d<B>,
    output: Linear<B>,
    window: usize,
}

impl<B: Backend> Classifier<B> for Cnn<B> {
    fn forward(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        // Conv1d expects [batch_size, channels, length]
        let x = self.embedding.forward(tokens).swap_dims(1, 2);
        let x = relu(self.conv.forward(x));

        let [batch_size, channels, _] = x.dims();
        let x = x.mean_dim(2).reshape([batch_size, channels]);

        self.output.forward(x)
    }

    fn min_seq_length(&self) -> usize {
        self.window
    }
}
