use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;

/// bilstm-last-state
pub static BILSTM_LAST_STATE: &str = "bilstm-last-state";

/// bilstm-pool
pub static BILSTM_POOL: &str = "bilstm-pool";

/// cnn
pub static CNN: &str = "cnn";

/// The model to use when none is given
pub static DEFAULT_MODEL: Model = Model::BiLstmLastState;

lazy_static! {
    /// Every accepted selector, including the long class-style names
    pub static ref MODELS_BY_NAME: HashMap<&'static str, Model> = [
        (BILSTM_LAST_STATE, Model::BiLstmLastState),
        ("BiLSTMLastStateClassification", Model::BiLstmLastState),
        (BILSTM_POOL, Model::BiLstmPool),
        ("BiLSTMPoolClassification", Model::BiLstmPool),
        (CNN, Model::Cnn),
        ("CNNClassification", Model::Cnn),
    ]
    .iter()
    .copied()
    .collect();
}

/// Available Models
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Model {
    /// Bidirectional LSTM, classifying from the last state of each direction
    BiLstmLastState,

    /// Bidirectional LSTM, classifying from the sum of every time step
    BiLstmPool,

    /// 1D convolution with global average pooling
    Cnn,
}

impl Model {
    /// All available models
    pub const ALL: [Model; 3] = [Model::BiLstmLastState, Model::BiLstmPool, Model::Cnn];

    /// The unique string token that identifies this model
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::BiLstmLastState => BILSTM_LAST_STATE,
            Model::BiLstmPool => BILSTM_POOL,
            Model::Cnn => CNN,
        }
    }

    /// How many epochs to train for unless told otherwise
    pub fn default_num_epochs(&self) -> usize {
        match self {
            Model::BiLstmLastState | Model::BiLstmPool => 10,
            Model::Cnn => 20,
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Model {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MODELS_BY_NAME
            .get(value)
            .or_else(|| MODELS_BY_NAME.get(value.to_lowercase().as_str()))
            .copied()
            .ok_or_else(|| ModelError::Unknown(value.to_string()))
    }
}

/// Model Error
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// No model found for the given string
    #[error("no model found for {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parses_short_and_class_names() {
        assert_eq!(Model::try_from("cnn").unwrap(), Model::Cnn);
        assert_eq!(Model::try_from("BiLSTM-Pool").unwrap(), Model::BiLstmPool);
        assert_eq!(
            Model::try_from("BiLSTMLastStateClassification").unwrap(),
            Model::BiLstmLastState
        );
    }

    #[test]
    fn test_round_trips_display() {
        for model in Model::ALL {
            assert_eq!(Model::try_from(model.to_string().as_str()).unwrap(), model);
        }
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let err = Model::try_from("transformer").unwrap_err();

        assert_eq!(err.to_string(), "no model found for transformer");
    }

    #[test]
    fn test_cnn_trains_longer() {
        assert_eq!(Model::Cnn.default_num_epochs(), 20);
        assert_eq!(DEFAULT_MODEL.default_num_epochs(), 10);
    }
}
