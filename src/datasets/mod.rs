use burn::data::dataset::Dataset;
use derive_new::new;

use crate::pipelines::text_classification::Item;

/// Labelled text datasets stored as CSV
pub mod labelled;

/// Raw texts and labels for both sides of an experiment
#[derive(Clone, Debug, Default, PartialEq, Eq, new)]
pub struct Split {
    /// Training texts
    pub x_train: Vec<String>,

    /// Testing texts
    pub x_test: Vec<String>,

    /// Training labels, 0 or 1
    pub y_train: Vec<u8>,

    /// Testing labels, 0 or 1
    pub y_test: Vec<u8>,
}

impl Split {
    /// Collect the texts and labels of a training and a testing dataset
    pub fn from_datasets<I, D>(train: &D, test: &D) -> Self
    where
        I: Item,
        D: Dataset<I>,
    {
        let (x_train, y_train) = unzip(train);
        let (x_test, y_test) = unzip(test);

        Self {
            x_train,
            x_test,
            y_train,
            y_test,
        }
    }
}

fn unzip<I: Item, D: Dataset<I>>(dataset: &D) -> (Vec<String>, Vec<u8>) {
    dataset
        .iter()
        .map(|item| (item.input().to_string(), item.label()))
        .unzip()
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The CSV file is missing or malformed
    #[error("unable to load dataset file {path}: {reason}")]
    Unreadable {
        /// Path to the CSV file
        path: String,

        /// What went wrong
        reason: String,
    },

    /// A row is labelled with something other than 0 or 1
    #[error("labels in {path} must be 0 or 1, found {label} for {text:?}")]
    InvalidLabel {
        /// Path to the CSV file
        path: String,

        /// The offending label
        label: u8,

        /// The text it was attached to
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_keeps_texts_with_their_labels() {
        let train = labelled::Dataset::from_items(vec![
            labelled::Item::new("loved it".to_string(), 1),
            labelled::Item::new("hated it".to_string(), 0),
        ]);
        let test = labelled::Dataset::from_items(vec![labelled::Item::new("meh".to_string(), 0)]);

        let split = Split::from_datasets(&train, &test);

        assert_eq!(
            split,
            Split::new(
                vec!["loved it".to_string(), "hated it".to_string()],
                vec!["meh".to_string()],
                vec![1, 0],
                vec![0],
            )
        );
    }
}
