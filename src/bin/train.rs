//! Command line tool to train a text classifier

use anyhow::anyhow;
use burn_textclf::{
    cli::{models::DEFAULT_MODEL, Model},
    datasets::{labelled, Split},
    pipelines::text_classification::{self, Training},
    utils::backend::{device, TrainingBackend},
};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Usage: train DATASET [OPTIONS]

Arguments:
  DATASET              The dataset to use, a directory under DATA_DIR/datasets holding
                       train.csv and test.csv with 'text,label' columns

Options:
  -h, --help           Print help
  -m, --model          The model to use: 'bilstm-last-state' (default), 'bilstm-pool' or 'cnn'
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -n, --num-epochs     Number of epochs to train for (defaults to 10, or 20 for 'cnn')
  -b, --batch-size     Batch size
  -l, --learning-rate  Learning rate
  -e, --embedding-size Size of each token embedding
  -u, --hidden-size    Size of the recurrent state, or number of convolution filters
  -w, --window         Convolution window, for 'cnn'
  --dropout            Dropout rate, for the recurrent models
  --seed               Random seed
  --keep-case          Do not lowercase text before tokenizing
";

#[derive(Debug)]
struct Args {
    dataset: String,
    model: Option<String>,
    data_dir: Option<String>,
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    learning_rate: Option<f64>,
    embedding_size: Option<usize>,
    hidden_size: Option<usize>,
    window: Option<usize>,
    dropout: Option<f64>,
    seed: Option<u64>,
    keep_case: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            model: pargs.opt_value_from_str(["-m", "--model"])?,
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            learning_rate: pargs.opt_value_from_str(["-l", "--learning-rate"])?,
            embedding_size: pargs.opt_value_from_str(["-e", "--embedding-size"])?,
            hidden_size: pargs.opt_value_from_str(["-u", "--hidden-size"])?,
            window: pargs.opt_value_from_str(["-w", "--window"])?,
            dropout: pargs.opt_value_from_str("--dropout")?,
            seed: pargs.opt_value_from_str("--seed")?,
            keep_case: pargs.contains("--keep-case"),
            dataset: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }

    fn into_config(self, model: Model) -> Training {
        let mut config = Training::for_model(model, &self.dataset);

        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }

        if let Some(num_epochs) = self.num_epochs {
            config.num_epochs = num_epochs;
        }

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }

        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }

        if let Some(embedding_size) = self.embedding_size {
            config.embedding_size = embedding_size;
        }

        if let Some(hidden_size) = self.hidden_size {
            config.hidden_size = hidden_size;
        }

        if let Some(window) = self.window {
            config.window = window;
        }

        if let Some(dropout) = self.dropout {
            config.dropout = dropout;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.lowercase = !self.keep_case;

        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let model = match &args.model {
        Some(model) => Model::try_from(model.as_str())?,
        None => DEFAULT_MODEL,
    };

    let config = args.into_config(model);
    config.validate()?;

    let train = labelled::Dataset::load(&config.data_dir, &config.dataset_name, "train").await?;
    let test = labelled::Dataset::load(&config.data_dir, &config.dataset_name, "test").await?;

    let split = Split::from_datasets(&train, &test);

    let history = text_classification::run::<TrainingBackend>(device(), &split, &config)?;

    for metrics in &history {
        println!("{}", metrics);
    }

    info!("Artifacts saved to {}", config.artifact_dir());

    Ok(())
}
