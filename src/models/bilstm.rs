use burn::{
    config::Config,
    module::Module,
    nn::lstm::{Lstm, LstmConfig},
    tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor},
};

/// Configuration for a bidirectional LSTM
#[derive(Config, Debug)]
pub struct BiLstmConfig {
    /// Size of each input step
    pub d_input: usize,

    /// Size of the hidden state of each direction
    pub d_hidden: usize,
}

impl BiLstmConfig {
    /// Initialize both directions
    pub fn init<B: Backend>(&self, device: &B::Device) -> BiLstm<B> {
        BiLstm {
            forward_lstm: LstmConfig::new(self.d_input, self.d_hidden, true).init(device),
            backward_lstm: LstmConfig::new(self.d_input, self.d_hidden, true).init(device),
        }
    }
}

/// Runs one LSTM over the sequence and a second one over the sequence reversed in time
#[derive(Module, Debug)]
pub struct BiLstm<B: Backend> {
    forward_lstm: Lstm<B>,
    backward_lstm: Lstm<B>,
}

/// Output of a bidirectional LSTM
#[derive(Debug, Clone)]
pub struct BiLstmOutput<B: Backend> {
    /// Hidden states of both directions for every step, aligned in time:
    /// [batch_size, seq_length, 2 * d_hidden]
    pub sequence: Tensor<B, 3>,

    /// Final hidden state of each direction, forward first: [batch_size, 2 * d_hidden]
    pub last: Tensor<B, 2>,
}

impl<B: Backend> BiLstm<B> {
    /// Input: [batch_size, seq_length, d_input], with seq_length of at least 1
    pub fn forward(&self, input: Tensor<B, 3>) -> BiLstmOutput<B> {
        let [batch_size, seq_length, _] = input.dims();

        let reversed = reverse_time(input.clone());

        let (_, forward) = self.forward_lstm.forward(input, None);
        let (_, backward) = self.backward_lstm.forward(reversed, None);

        let [_, _, d_hidden] = forward.dims();

        let last = Tensor::cat(
            vec![
                last_step(forward.clone(), batch_size, seq_length, d_hidden),
                last_step(backward.clone(), batch_size, seq_length, d_hidden),
            ],
            1,
        );

        let sequence = Tensor::cat(vec![forward, reverse_time(backward)], 2);

        BiLstmOutput { sequence, last }
    }
}

fn last_step<B: Backend>(
    states: Tensor<B, 3>,
    batch_size: usize,
    seq_length: usize,
    d_hidden: usize,
) -> Tensor<B, 2> {
    states
        .slice([0..batch_size, seq_length - 1..seq_length, 0..d_hidden])
        .reshape([batch_size, d_hidden])
}

/// Reverse the second (time) dimension of a `[batch_size, seq_length, features]` tensor
pub fn reverse_time<B: Backend>(input: Tensor<B, 3>) -> Tensor<B, 3> {
    let seq_length = input.dims()[1];

    let indices: Vec<B::IntElem> = (0..seq_length)
        .rev()
        .map(|i| (i as i64).elem())
        .collect();

    let indices = Tensor::<B, 1, Int>::from_data(
        Data::new(indices, Shape::new([seq_length])),
        &input.device(),
    );

    input.select(1, indices)
}
