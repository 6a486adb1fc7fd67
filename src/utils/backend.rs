//! The backend used by the command line tools. LibTorch when built with the `tch` feature,
//! otherwise the pure-Rust NdArray backend.

#[cfg(feature = "tch")]
mod selected {
    use burn::backend::{libtorch::LibTorchDevice, LibTorch};

    /// The compute backend
    pub type Backend = LibTorch;

    /// The device to run on
    pub fn device() -> LibTorchDevice {
        LibTorchDevice::Cuda(0)
    }
}

#[cfg(not(feature = "tch"))]
mod selected {
    use burn::backend::{ndarray::NdArrayDevice, NdArray};

    /// The compute backend
    pub type Backend = NdArray;

    /// The device to run on
    pub fn device() -> NdArrayDevice {
        NdArrayDevice::Cpu
    }
}

pub use selected::{device, Backend};

/// The backend with autodiff enabled, for training
pub type TrainingBackend = burn::backend::Autodiff<Backend>;
