use std::fmt::Debug;

use derive_new::new;
use serde::{Deserialize, Serialize};

/// A trait for items that can be used for binary text classification
pub trait Item: Send + Sync + Clone + Debug {
    /// Returns the input text for the item
    fn input(&self) -> &str;

    /// Returns the class label for the item, 0 or 1
    fn label(&self) -> u8;
}

/// A sentence that has been encoded against a vocabulary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Encoded {
    /// Vocabulary indexes, one per token
    pub tokens: Vec<usize>,

    /// The class label, 0 or 1
    pub label: u8,
}
