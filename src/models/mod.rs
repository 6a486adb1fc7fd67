use burn::{
    module::Module,
    tensor::{backend::Backend, Int, Tensor},
};

/// Bidirectional LSTM building block
pub mod bilstm;

/// Bidirectional LSTM classifier over the final state of each direction
pub mod bilstm_last_state;

/// Bidirectional LSTM classifier over the sum of every time step
pub mod bilstm_pool;

/// Convolutional classifier
pub mod cnn;

/// Loss functions
pub mod loss;

pub use bilstm::{BiLstm, BiLstmConfig};
pub use bilstm_last_state::{BiLstmLastState, BiLstmLastStateConfig};
pub use bilstm_pool::{BiLstmPool, BiLstmPoolConfig};
pub use cnn::{Cnn, CnnConfig};

/// A binary classifier over encoded, padded sentences
pub trait Classifier<B: Backend>: Module<B> {
    /// Map `[batch_size, seq_length]` token ids to one logit per sentence: `[batch_size, 1]`
    fn forward(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2>;

    /// The shortest sequence length the model can consume
    fn min_seq_length(&self) -> usize {
        1
    }
}
