//! torchvision.datasets and torchvision.transforms manifests.

use crate::registry::{ClassSpec, LibraryModule, Param, TypeHint};
use crate::schema::LiteralValue;

fn download_dataset(name: &str) -> ClassSpec {
    ClassSpec::new(name)
        .param(Param::new("root").hint(TypeHint::union([
            TypeHint::string(),
            TypeHint::class("Path"),
        ])))
        .param(
            Param::new("train")
                .hint(TypeHint::boolean())
                .default_value(LiteralValue::Bool(true)),
        )
        .param(
            Param::new("transform")
                .hint(TypeHint::optional(TypeHint::class("Callable")))
                .default_value(LiteralValue::None),
        )
        .param(
            Param::new("target_transform")
                .hint(TypeHint::optional(TypeHint::class("Callable")))
                .default_value(LiteralValue::None),
        )
        .param(
            Param::new("download")
                .hint(TypeHint::boolean())
                .default_value(LiteralValue::Bool(false)),
        )
}

pub fn datasets() -> LibraryModule {
    LibraryModule::new("torchvision.datasets")
        // Re-exported from torch.utils.data; falls outside the torchvision
        // namespace and is dropped during collection.
        .class(
            ClassSpec::new("Dataset")
                .defined_in("torch.utils.data.dataset")
                .without_init(),
        )
        .class(download_dataset("MNIST").defined_in("torchvision.datasets.mnist"))
        .class(download_dataset("FashionMNIST").defined_in("torchvision.datasets.mnist"))
        .class(download_dataset("KMNIST").defined_in("torchvision.datasets.mnist"))
        .class(download_dataset("CIFAR10").defined_in("torchvision.datasets.cifar"))
        .class(download_dataset("CIFAR100").defined_in("torchvision.datasets.cifar"))
        .class(
            ClassSpec::new("ImageFolder")
                .defined_in("torchvision.datasets.folder")
                .param(Param::new("root").hint(TypeHint::union([
                    TypeHint::string(),
                    TypeHint::class("Path"),
                ])))
                .param(
                    Param::new("transform")
                        .hint(TypeHint::optional(TypeHint::class("Callable")))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("target_transform")
                        .hint(TypeHint::optional(TypeHint::class("Callable")))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("loader")
                        .hint(TypeHint::class("Callable"))
                        .default_value(LiteralValue::Opaque(
                            crate::schema::FUNCTION_SENTINEL,
                        )),
                )
                .param(
                    Param::new("is_valid_file")
                        .hint(TypeHint::optional(TypeHint::class("Callable")))
                        .default_value(LiteralValue::None),
                ),
        )
        .class(
            ClassSpec::new("VOCSegmentation")
                .defined_in("torchvision.datasets.voc")
                .param(Param::new("root").hint(TypeHint::union([
                    TypeHint::string(),
                    TypeHint::class("Path"),
                ])))
                .param(
                    Param::new("year")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("2012")),
                )
                .param(
                    Param::new("image_set")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("train")),
                )
                .param(
                    Param::new("download")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                )
                .param(
                    Param::new("transform")
                        .hint(TypeHint::optional(TypeHint::class("Callable")))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("target_transform")
                        .hint(TypeHint::optional(TypeHint::class("Callable")))
                        .default_value(LiteralValue::None),
                ),
        )
}

pub fn transforms() -> LibraryModule {
    LibraryModule::new("torchvision.transforms")
        // ToTensor takes no constructor arguments; it still gets a catalog
        // entry, just an empty one.
        .class(ClassSpec::new("ToTensor").defined_in("torchvision.transforms.transforms"))
        .class(
            ClassSpec::new("Normalize")
                .defined_in("torchvision.transforms.transforms")
                .param(Param::new("mean").hint(TypeHint::list_of(TypeHint::float())))
                .param(Param::new("std").hint(TypeHint::list_of(TypeHint::float())))
                .param(
                    Param::new("inplace")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                ),
        )
        .class(
            ClassSpec::new("Resize")
                .defined_in("torchvision.transforms.transforms")
                .param(Param::new("size").hint(TypeHint::union([
                    TypeHint::int(),
                    TypeHint::list_of(TypeHint::int()),
                ])))
                .param(
                    Param::new("interpolation")
                        .hint(TypeHint::class("InterpolationMode"))
                        .default_value(LiteralValue::Symbol(
                            "InterpolationMode.BILINEAR".to_string(),
                        )),
                )
                .param(
                    Param::new("max_size")
                        .hint(TypeHint::optional(TypeHint::int()))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("antialias")
                        .hint(TypeHint::optional(TypeHint::boolean()))
                        .default_value(LiteralValue::Bool(true)),
                ),
        )
        .class(
            ClassSpec::new("CenterCrop")
                .defined_in("torchvision.transforms.transforms")
                .param(Param::new("size").hint(TypeHint::union([
                    TypeHint::int(),
                    TypeHint::list_of(TypeHint::int()),
                ]))),
        )
        .class(
            ClassSpec::new("RandomCrop")
                .defined_in("torchvision.transforms.transforms")
                .param(Param::new("size").hint(TypeHint::union([
                    TypeHint::int(),
                    TypeHint::list_of(TypeHint::int()),
                ])))
                .param(
                    Param::new("padding")
                        .hint(TypeHint::optional(TypeHint::union([
                            TypeHint::int(),
                            TypeHint::list_of(TypeHint::int()),
                        ])))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("pad_if_needed")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                )
                .param(
                    Param::new("fill")
                        .hint(TypeHint::union([TypeHint::int(), TypeHint::float()]))
                        .default_value(LiteralValue::Int(0)),
                )
                .param(
                    Param::new("padding_mode")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("constant")),
                ),
        )
        .class(
            ClassSpec::new("RandomHorizontalFlip")
                .defined_in("torchvision.transforms.transforms")
                .param(
                    Param::new("p")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.5)),
                ),
        )
        .class(
            ClassSpec::new("RandomVerticalFlip")
                .defined_in("torchvision.transforms.transforms")
                .param(
                    Param::new("p")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.5)),
                ),
        )
        .class(
            ClassSpec::new("RandomRotation")
                .defined_in("torchvision.transforms.transforms")
                .param(Param::new("degrees").hint(TypeHint::union([
                    TypeHint::float(),
                    TypeHint::list_of(TypeHint::float()),
                ])))
                .param(
                    Param::new("interpolation")
                        .hint(TypeHint::class("InterpolationMode"))
                        .default_value(LiteralValue::Symbol(
                            "InterpolationMode.NEAREST".to_string(),
                        )),
                )
                .param(
                    Param::new("expand")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                )
                .param(
                    Param::new("fill")
                        .hint(TypeHint::union([TypeHint::int(), TypeHint::float()]))
                        .default_value(LiteralValue::Int(0)),
                ),
        )
        .class(
            // ColorJitter's constructor is unannotated upstream; types come
            // from the defaults, and the `0` defaults widen to "int, float".
            ClassSpec::new("ColorJitter")
                .defined_in("torchvision.transforms.transforms")
                .param(Param::new("brightness").default_value(LiteralValue::Int(0)))
                .param(Param::new("contrast").default_value(LiteralValue::Int(0)))
                .param(Param::new("saturation").default_value(LiteralValue::Int(0)))
                .param(Param::new("hue").default_value(LiteralValue::Int(0))),
        )
        .class(
            ClassSpec::new("GaussianBlur")
                .defined_in("torchvision.transforms.transforms")
                .param(Param::new("kernel_size").hint(TypeHint::union([
                    TypeHint::int(),
                    TypeHint::list_of(TypeHint::int()),
                ])))
                .param(
                    Param::new("sigma")
                        .hint(TypeHint::tuple_of([TypeHint::float(), TypeHint::float()]))
                        .default_value(LiteralValue::Tuple(vec![
                            LiteralValue::Float(0.1),
                            LiteralValue::Float(2.0),
                        ])),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistrySource;
    use crate::schema::SchemaSource;

    #[test]
    fn test_foreign_reexport_is_dropped() {
        let source = RegistrySource::new(datasets());
        let classes = &source.extract().unwrap()[0].classes;
        assert!(!classes.contains_key("Dataset"));
        assert!(classes.contains_key("MNIST"));
    }

    #[test]
    fn test_to_tensor_yields_empty_entry() {
        let source = RegistrySource::new(transforms());
        let classes = &source.extract().unwrap()[0].classes;
        assert!(classes["ToTensor"].is_empty());
    }

    #[test]
    fn test_zero_default_widens_to_int_float() {
        let source = RegistrySource::new(transforms());
        let classes = &source.extract().unwrap()[0].classes;
        let brightness = &classes["ColorJitter"]["brightness"];
        assert_eq!(
            brightness.type_desc,
            Some(LiteralValue::type_ref("int, float"))
        );
    }
}
