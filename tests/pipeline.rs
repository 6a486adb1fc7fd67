use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};
use burn_textclf::{
    cli::Model,
    datasets::{labelled, Split},
    pipelines::text_classification::{self, Training, Vocabulary, UNK_TOKEN},
};
use pretty_assertions::assert_eq;

type TrainingBackend = Autodiff<NdArray>;

const TRAIN: &str = "\
text,label
a wonderful and moving film,1
wonderful acting and a moving score,1
\"dull, slow and far too long\",0
a dull plot and flat acting,0
moving and wonderful,1
slow and dull,0
";

const TEST: &str = "\
text,label
a wonderful score,1
flat and slow,0
an unseen masterpiece,1
";

fn data_dir(name: &str) -> String {
    let data_dir = std::env::temp_dir()
        .join(format!("burn-textclf-{}-{}", name, std::process::id()))
        .to_str()
        .unwrap()
        .to_string();

    let dataset_dir = format!("{}/datasets/reviews", data_dir);
    std::fs::create_dir_all(&dataset_dir).unwrap();
    std::fs::write(format!("{}/train.csv", dataset_dir), TRAIN).unwrap();
    std::fs::write(format!("{}/test.csv", dataset_dir), TEST).unwrap();

    data_dir
}

async fn split(data_dir: &str) -> Split {
    let train = labelled::Dataset::load(data_dir, "reviews", "train")
        .await
        .unwrap();
    let test = labelled::Dataset::load(data_dir, "reviews", "test")
        .await
        .unwrap();

    Split::from_datasets(&train, &test)
}

fn config(model: Model, data_dir: &str) -> Training {
    let mut config = Training::for_model(model, "reviews")
        .with_num_epochs(2)
        .with_batch_size(4)
        .with_embedding_size(8)
        .with_hidden_size(4)
        .with_window(3)
        .with_learning_rate(1e-2);

    config.data_dir = data_dir.to_string();

    config
}

#[tokio::test]
async fn test_train_and_infer_every_model() {
    let data_dir = data_dir("all");
    let split = split(&data_dir).await;

    assert_eq!(split.x_train.len(), 6);
    assert_eq!(split.y_test, vec![1, 0, 1]);

    for model in Model::ALL {
        let config = config(model, &data_dir);

        let history =
            text_classification::run::<TrainingBackend>(NdArrayDevice::Cpu, &split, &config)
                .unwrap();

        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|m| m.train_loss.is_finite()));

        let artifact_dir = config.artifact_dir();

        let vocab = Vocabulary::load(&format!("{artifact_dir}/vocab.json")).unwrap();
        assert_eq!(vocab.index_of(UNK_TOKEN), Some(0));
        assert!(vocab.index_of("wonderful").is_some());
        // Occurs once in training
        assert_eq!(vocab.index_of("score"), None);
        // Test-only
        assert_eq!(vocab.index_of("masterpiece"), None);

        let samples = vec!["wonderful and moving".to_string(), "".to_string()];
        let (probabilities, stored) =
            text_classification::infer::<NdArray>(NdArrayDevice::Cpu, &artifact_dir, &samples)
                .unwrap();

        assert_eq!(stored.model_name, model.to_string());
        assert_eq!(probabilities.len(), 2);
        assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    std::fs::remove_dir_all(&data_dir).unwrap();
}

#[test]
fn test_unknown_artifacts() {
    let result = text_classification::infer::<NdArray>(
        NdArrayDevice::Cpu,
        "/nonexistent/text-classification/cnn/reviews",
        &["anything".to_string()],
    );

    assert!(result.is_err());
}
