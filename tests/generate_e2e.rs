//! End-to-end generation tests
//!
//! These tests build a small zoo source tree on disk, run the full
//! generation pipeline through the library, and verify the structure of
//! the written catalog.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use choicegen::config::ChoicegenConfig;
use choicegen::generator;

/// Helper to create a zoo source tree with one wrapper file per category.
fn create_zoo(dir: &TempDir) -> PathBuf {
    let root = dir.path().join("src");

    let models = root.join("models");
    fs::create_dir_all(&models).expect("Failed to create models directory");
    fs::write(
        models.join("unet_wrapper.py"),
        r#"from decorators import enforce_types_and_ranges, tag

@tag(task=["segmentation"], modality="image")
class UNetWrapper:
    @enforce_types_and_ranges({
        'depth': {'type': int, 'default': 5, 'range': (1, 10)},
        'activation': {'type': str, 'default': 'relu', 'options': ['relu', 'gelu']},
        'dropout': {'type': float, 'default': 0.1},
    })
    def __init__(self, depth, activation, dropout):
        self.depth = depth
"#,
    )
    .expect("Failed to write unet_wrapper.py");

    let metrics = root.join("metrics");
    fs::create_dir_all(&metrics).expect("Failed to create metrics directory");
    fs::write(
        metrics.join("dice_metric.py"),
        r#"from decorators import enforce_types_and_ranges, tag

@tag(task=["segmentation"], subtask=["binary"])
class DiceMetric:
    @enforce_types_and_ranges({
        'smooth': {'type': float, 'default': 1.0},
    })
    def __init__(self, smooth):
        self.smooth = smooth

class _Hidden:
    def __init__(self, x=1):
        pass
"#,
    )
    .expect("Failed to write dice_metric.py");

    // Files in skipped directories must not contribute entries.
    let checkpoints = models.join(".ipynb_checkpoints");
    fs::create_dir_all(&checkpoints).expect("Failed to create checkpoints directory");
    fs::write(
        checkpoints.join("unet_wrapper.py"),
        "class Stale:\n    def __init__(self, gone=True):\n        pass\n",
    )
    .expect("Failed to write stale file");

    root
}

fn run_generation(dir: &TempDir) -> serde_json::Value {
    let config = ChoicegenConfig {
        source_root: create_zoo(dir),
        output_path: dir.path().join("choices.json"),
        log_level: "info".to_string(),
    };
    config.validate().expect("config should validate");

    let written = generator::generate(&config).expect("generation should succeed");
    let text = fs::read_to_string(written).expect("catalog should be readable");
    serde_json::from_str(&text).expect("catalog should be valid JSON")
}

#[test]
fn test_local_wrapper_constraints_reach_the_catalog() {
    let dir = TempDir::new().unwrap();
    let value = run_generation(&dir);

    let depth = &value["models"]["unet_wrapper"]["UNetWrapper"]["depth"];
    assert_eq!(depth["type"], "int");
    assert_eq!(depth["default"], 5);
    assert_eq!(depth["range"], "(1, 10)");

    let activation = &value["models"]["unet_wrapper"]["UNetWrapper"]["activation"];
    assert_eq!(activation["default"], "relu");
    assert_eq!(activation["options"], "['relu', 'gelu']");
}

#[test]
fn test_tags_index_references_file_and_class() {
    let dir = TempDir::new().unwrap();
    let value = run_generation(&dir);

    let seg_models = value["tags"]["models"]["task"]["segmentation"]
        .as_array()
        .expect("tag refs should be an array");
    assert!(seg_models.contains(&serde_json::json!("unet_wrapper>UNetWrapper")));

    let modality = value["tags"]["models"]["modality"]["image"]
        .as_array()
        .expect("scalar tag should be wrapped into a list");
    assert!(modality.contains(&serde_json::json!("unet_wrapper>UNetWrapper")));

    // Standard keys exist even when nothing filled them.
    assert!(value["tags"]["models"]["submodality"].is_object());
    assert!(value["tags"]["metrics"]["subtask"]["binary"].is_array());
}

#[test]
fn test_private_classes_and_ignored_dirs_are_excluded() {
    let dir = TempDir::new().unwrap();
    let value = run_generation(&dir);

    assert!(value["metrics"]["dice_metric"].get("_Hidden").is_none());
    assert!(value["models"]["unet_wrapper"].get("Stale").is_none());
}

#[test]
fn test_library_merges_are_namespaced() {
    let dir = TempDir::new().unwrap();
    let value = run_generation(&dir);

    let mnist = &value["datasets"]["torchvision>datasets"]["torchvision>datasets>MNIST"];
    assert_eq!(mnist["train"]["type"], "bool");
    assert_eq!(mnist["train"]["default"], true);

    let step_lr =
        &value["lr_schedulers"]["torch>optim>lr_scheduler"]["torch>optim>lr_scheduler>StepLR"];
    assert!(step_lr.get("optimizer").is_none());
    assert_eq!(step_lr["gamma"]["default"], 0.1);

    let sgd = &value["optimizers"]["torch>optim"]["torch>optim>SGD"];
    assert_eq!(sgd["momentum"]["type"], "float");
}

#[test]
fn test_top_level_order_and_static_fields() {
    let dir = TempDir::new().unwrap();
    let value = run_generation(&dir);

    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    let pos = |name: &str| {
        keys.iter()
            .position(|k| k.as_str() == name)
            .unwrap_or_else(|| panic!("missing key {name}"))
    };

    assert_eq!(pos("load_from_checkpoint"), 0);
    assert!(pos("models") < pos("tags"));
    assert!(pos("tags") < pos("lr_schedulers"));
    assert!(pos("lr_schedulers") < pos("batch_size"));
    assert_eq!(keys.last().map(|s| s.as_str()), Some("device"));

    assert_eq!(value["batch_size"]["range"], "(1, 1024)");
    assert_eq!(value["monitor"]["options"], "['train_loss', 'val_loss']");
    assert_eq!(value["data_splits"]["k"]["default"], 5);
    assert!(value["data_splits"]["random_seed"].get("default").is_none());
    assert_eq!(value["training_name"]["type"], "str");
    assert_eq!(value["device"]["default"], "cpu");
}

#[test]
fn test_missing_source_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = ChoicegenConfig {
        source_root: dir.path().join("does_not_exist"),
        output_path: dir.path().join("choices.json"),
        log_level: "info".to_string(),
    };

    let result = generator::generate(&config);
    assert!(result.is_err());
    assert!(!config.output_path.exists());
}

#[test]
fn test_empty_categories_are_omitted() {
    let dir = TempDir::new().unwrap();
    let value = run_generation(&dir);

    // No local files and no library bindings feed these two.
    assert!(value.get("early_stopping").is_none());
    assert!(value.get("postprocessing").is_none());
    // datasets had no local files but gains its library merge.
    assert!(value["datasets"]["torchvision>datasets"].is_object());
}
