use burn::{
    data::dataloader,
    tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor},
};
use derive_new::new;

use crate::utils::tensors::pad_to;

use super::item::Encoded;

/// An inference batch for text classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Encoded sentences as 2D tensor: [batch_size, seq_length]
    pub tokens: Tensor<B, 2, Int>,
}

/// A training batch for text classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Encoded sentences as 2D tensor: [batch_size, seq_length]
    pub tokens: Tensor<B, 2, Int>,

    /// Labels as 0 or 1: [batch_size, 1]
    pub targets: Tensor<B, 2, Int>,
}

/// Pads encoded sentences to the longest sentence in each batch
#[derive(Clone)]
pub struct Batcher<B: Backend> {
    /// ID used to fill the padding positions
    pub pad_token_id: usize,

    /// Batches are never shorter than this, even when every sentence is
    pub min_seq_length: usize,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Creates a new batcher
    pub fn new(pad_token_id: usize, min_seq_length: usize, device: B::Device) -> Self {
        Self {
            pad_token_id,
            min_seq_length: min_seq_length.max(1),
            device,
        }
    }

    fn pad(&self, sequences: Vec<Vec<usize>>) -> Tensor<B, 2, Int> {
        let seq_length = sequences
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.min_seq_length);

        pad_to::<B>(self.pad_token_id, sequences, seq_length, &self.device)
    }
}

/// Implement Batcher trait for Batcher struct for inference
impl<B: Backend> dataloader::batcher::Batcher<Vec<usize>, Infer<B>> for Batcher<B> {
    fn batch(&self, items: Vec<Vec<usize>>) -> Infer<B> {
        Infer {
            tokens: self.pad(items),
        }
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend> dataloader::batcher::Batcher<Encoded, Train<B>> for Batcher<B> {
    fn batch(&self, items: Vec<Encoded>) -> Train<B> {
        let batch_size = items.len();

        let mut labels = Vec::with_capacity(batch_size);
        let mut sequences = Vec::with_capacity(batch_size);

        for item in items {
            labels.push((item.label as i64).elem::<B::IntElem>());
            sequences.push(item.tokens);
        }

        let targets = Tensor::from_data(
            Data::new(labels, Shape::new([batch_size, 1])),
            &self.device,
        );

        Train {
            tokens: self.pad(sequences),
            targets,
        }
    }
}
