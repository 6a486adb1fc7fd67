use burn::{
    nn::loss::BinaryCrossEntropyLossConfig,
    tensor::{backend::Backend, Int, Tensor},
};

/// Binary cross-entropy from logits `[batch_size, 1]` and 0/1 targets of the same shape, averaged
/// over the batch
pub fn binary_cross_entropy_with_logits<B: Backend>(
    logits: Tensor<B, 2>,
    targets: Tensor<B, 2, Int>,
) -> Tensor<B, 1> {
    let [batch_size, _] = logits.dims();

    BinaryCrossEntropyLossConfig::new()
        .with_logits(true)
        .init(&logits.device())
        .forward(logits.reshape([batch_size]), targets.reshape([batch_size]))
}
