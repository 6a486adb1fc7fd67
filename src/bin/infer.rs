//! Command line tool for inference

use anyhow::{anyhow, Result};
use burn_textclf::{
    cli::{models::DEFAULT_MODEL, Model},
    datasets::labelled,
    pipelines::text_classification::{infer, Training},
    utils::{
        backend::{device, Backend},
        files::read_texts,
    },
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: infer DATASET [OPTIONS] [TEXT...]

Arguments:
  DATASET              The dataset the model was trained on
  TEXT                 Texts to classify. Without any, random test samples are scored

Options:
  -h, --help           Print help
  -m, --model          The trained model to use (defaults to 'bilstm-last-state')
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -f, --file           Read texts to classify from a file, one per line
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The dataset the model was trained on
    dataset: String,

    /// The model to use
    model: Option<String>,

    /// The top-level data directory
    data_dir: Option<String>,

    /// A file of texts to classify
    file: Option<String>,

    /// Texts to classify
    texts: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut pargs = Arguments::from_env();

    let help = pargs.contains(["-h", "--help"]);
    let model = pargs.opt_value_from_str(["-m", "--model"])?;
    let data_dir = pargs.opt_value_from_str(["-d", "--data-dir"])?;
    let file = pargs.opt_value_from_str(["-f", "--file"])?;

    if help {
        return Ok(Args {
            help,
            dataset: String::new(),
            model,
            data_dir,
            file,
            texts: Vec::new(),
        });
    }

    let dataset = pargs.free_from_str().map_err(|e| match e {
        pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
        _ => anyhow!("{}", e),
    })?;

    let texts = pargs
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("Invalid text argument: {:?}", arg))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Args {
        help,
        dataset,
        model,
        data_dir,
        file,
        texts,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let model = match &args.model {
        Some(model) => Model::try_from(model.as_str())?,
        None => DEFAULT_MODEL,
    };

    let mut config = Training::for_model(model, &args.dataset);
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let mut samples: Vec<(String, Option<u8>)> =
        args.texts.into_iter().map(|text| (text, None)).collect();

    if let Some(file) = &args.file {
        let texts = read_texts(file)
            .await
            .map_err(|e| anyhow!("Unable to read {}: {}", file, e))?;

        samples.extend(texts.into_iter().map(|text| (text, None)));
    }

    if samples.is_empty() {
        let test = labelled::Dataset::load(&config.data_dir, &args.dataset, "test").await?;

        samples = test
            .get_samples(10)
            .into_iter()
            .map(|item| (item.text, Some(item.label)))
            .collect();
    }

    let input: Vec<String> = samples.iter().map(|(text, _)| text.clone()).collect();

    // Get model predictions
    let (probabilities, _) = infer::<Backend>(device(), &config.artifact_dir(), &input)?;

    // Print out predictions for each sample
    for (i, ((text, expected), probability)) in samples.into_iter().zip(probabilities).enumerate()
    {
        let class = u8::from(probability >= 0.5);

        let expected = expected
            .map(|label| label.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "\n=== Item {i} ===\
             \n- Text: {text}\
             \n- Class: {class} ({probability:.3})\
             \n- Expected: {expected}\
             \n================"
        );
    }

    Ok(())
}
