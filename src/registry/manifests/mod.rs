//! Registered library manifests
//!
//! One file per external library, each building the `LibraryModule` tree of
//! constructor signatures that library contributes to the catalog. The
//! binding list below fixes which catalog category each library feeds and in
//! which order the merges happen.

pub mod smp;
pub mod timm;
pub mod torch;
pub mod torchmetrics;
pub mod torchvision;

use super::RegistrySource;

/// Category bindings in merge order. Several libraries can feed the same
/// category; each lands under its own `>`-qualified key, so later merges
/// add keys without overwriting earlier ones.
pub fn bindings() -> Vec<(&'static str, RegistrySource)> {
    vec![
        ("datasets", RegistrySource::new(torchvision::datasets())),
        ("augmentations", RegistrySource::new(torchvision::transforms())),
        ("metrics", RegistrySource::new(torchmetrics::metrics())),
        (
            "models",
            RegistrySource::restricted(smp::models(), smp::MODEL_CLASSES),
        ),
        ("models", RegistrySource::new(timm::models())),
        ("lr_schedulers", RegistrySource::new(torch::lr_scheduler())),
        (
            "losses",
            RegistrySource::restricted(torch::nn_loss(), torch::LOSS_CLASSES),
        ),
        ("losses", RegistrySource::new(timm::loss())),
        (
            "optimizers",
            RegistrySource::restricted(torch::optim(), torch::OPTIMIZER_CLASSES),
        ),
        ("optimizers", RegistrySource::new(timm::optim())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaSource;

    #[test]
    fn test_binding_categories_and_qualifiers() {
        let qualifiers: Vec<(String, String)> = bindings()
            .iter()
            .map(|(category, source)| (category.to_string(), source.qualifier()))
            .collect();
        assert_eq!(
            qualifiers,
            vec![
                ("datasets".into(), "torchvision>datasets".into()),
                ("augmentations".into(), "torchvision>transforms".into()),
                ("metrics".into(), "torchmetrics".into()),
                ("models".into(), "segmentation_models_pytorch".into()),
                ("models".into(), "timm>models".into()),
                ("lr_schedulers".into(), "torch>optim>lr_scheduler".into()),
                ("losses".into(), "torch>nn>modules>loss".into()),
                ("losses".into(), "timm>loss".into()),
                ("optimizers".into(), "torch>optim".into()),
                ("optimizers".into(), "timm>optim".into()),
            ]
        );
    }

    #[test]
    fn test_every_binding_extracts_nonempty() {
        for (category, source) in bindings() {
            let extracted = source.extract().unwrap();
            assert_eq!(extracted.len(), 1, "{category}");
            assert!(
                !extracted[0].classes.is_empty(),
                "{category}/{} extracted no classes",
                extracted[0].key
            );
        }
    }
}
