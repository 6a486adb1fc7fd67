use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

/// Pad (or truncate) token sequences to a specific length, producing a `[batch_size, seq_length]`
/// tensor
pub fn pad_to<B: Backend>(
    pad_token: usize,
    tokens_list: Vec<Vec<usize>>,
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = tokens_list.len();
    let pad: B::IntElem = (pad_token as i64).elem();

    let mut values = Vec::with_capacity(batch_size * seq_length);

    for tokens in tokens_list {
        let length = tokens.len().min(seq_length);

        values.extend(
            tokens
                .into_iter()
                .take(seq_length)
                .map(|token| (token as i64).elem::<B::IntElem>()),
        );
        values.extend(std::iter::repeat(pad).take(seq_length - length));
    }

    Tensor::from_data(
        Data::new(values, Shape::new([batch_size, seq_length])),
        device,
    )
}
