/// File utilities
pub mod files;

/// Tensor Utilities
pub mod tensors;

/// Compute backend selection
pub mod backend;
