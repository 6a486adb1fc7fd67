use burn::data::dataset::{self, Dataset as _, InMemDataset};
use derive_new::new;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pipelines::text_classification;

use super::DatasetError;

/// A labelled text, as stored in a `text,label` CSV row
#[derive(Clone, Debug, Serialize, Deserialize, new)]
pub struct Item {
    /// The text for classification
    pub text: String,

    /// The class, 0 or 1
    pub label: u8,
}

impl text_classification::Item for Item {
    fn input(&self) -> &str {
        &self.text
    }

    fn label(&self) -> u8 {
        self.label
    }
}

/// A binary text classification dataset
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for labelled datasets
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

impl Dataset {
    /// Wrap a list of items
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            dataset: InMemDataset::new(items),
        }
    }

    /// Loads `{data_dir}/datasets/{name}/{mode}.csv`, where mode is either "train" or "test"
    pub async fn load(data_dir: &str, name: &str, mode: &str) -> Result<Self, DatasetError> {
        let path = format!("{}/datasets/{}/{}.csv", data_dir, name, mode);
        let reader = csv::ReaderBuilder::new();

        let dataset: InMemDataset<Item> =
            InMemDataset::from_csv(&path, &reader).map_err(|e| DatasetError::Unreadable {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if let Some(item) = dataset.iter().find(|item| item.label > 1) {
            return Err(DatasetError::InvalidLabel {
                path,
                label: item.label,
                text: item.text,
            });
        }

        Ok(Self { dataset })
    }

    /// Returns random samples from the dataset
    pub fn get_samples(&self, count: usize) -> Vec<Item> {
        if self.len() == 0 {
            return Vec::new();
        }

        let mut rng = rand::thread_rng();

        (0..count)
            .filter_map(|_| self.get(rng.gen_range(0..self.len())))
            .collect()
    }
}
