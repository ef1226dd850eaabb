//! timm.models, timm.loss and timm.optim manifests. timm.optim nests a
//! submodule per optimizer family, which exercises the recursive walk.

use crate::registry::{ClassSpec, LibraryModule, Param, TypeHint};
use crate::schema::LiteralValue;

fn backbone(name: &str, module: &str, default_variant: &str) -> ClassSpec {
    ClassSpec::new(name)
        .defined_in(module)
        .param(
            Param::new("variant")
                .hint(TypeHint::string())
                .default_value(LiteralValue::str(default_variant)),
        )
        .param(
            Param::new("pretrained")
                .hint(TypeHint::boolean())
                .default_value(LiteralValue::Bool(false)),
        )
        .param(
            Param::new("num_classes")
                .hint(TypeHint::int())
                .default_value(LiteralValue::Int(1000)),
        )
        .param(
            Param::new("in_chans")
                .hint(TypeHint::int())
                .default_value(LiteralValue::Int(3)),
        )
        .param(
            Param::new("drop_rate")
                .hint(TypeHint::float())
                .default_value(LiteralValue::Float(0.0)),
        )
}

pub fn models() -> LibraryModule {
    LibraryModule::new("timm.models")
        .class(backbone("ResNet", "timm.models.resnet", "resnet50"))
        .class(backbone("EfficientNet", "timm.models.efficientnet", "efficientnet_b0"))
        .class(backbone("VisionTransformer", "timm.models.vision_transformer", "vit_base_patch16_224"))
        .class(backbone("ConvNeXt", "timm.models.convnext", "convnext_tiny"))
        .class(backbone("SwinTransformer", "timm.models.swin_transformer", "swin_tiny_patch4_window7_224"))
        // Helper type re-exported from timm.data; outside the bound namespace.
        .class(
            ClassSpec::new("ImageDataset")
                .defined_in("timm.data.dataset")
                .param(Param::new("root").hint(TypeHint::string())),
        )
}

pub fn loss() -> LibraryModule {
    LibraryModule::new("timm.loss")
        .class(
            ClassSpec::new("LabelSmoothingCrossEntropy")
                .defined_in("timm.loss.cross_entropy")
                .param(
                    Param::new("smoothing")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.1)),
                ),
        )
        .class(
            ClassSpec::new("SoftTargetCrossEntropy").defined_in("timm.loss.cross_entropy"),
        )
        .class(
            ClassSpec::new("BinaryCrossEntropy")
                .defined_in("timm.loss.binary_cross_entropy")
                .param(
                    Param::new("smoothing")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.1)),
                )
                .param(
                    Param::new("target_threshold")
                        .hint(TypeHint::optional(TypeHint::float()))
                        .default_value(LiteralValue::None),
                ),
        )
        .class(
            ClassSpec::new("JsdCrossEntropy")
                .defined_in("timm.loss.jsd")
                .param(
                    Param::new("num_splits")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(3)),
                )
                .param(
                    Param::new("alpha")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(12.0)),
                )
                .param(
                    Param::new("smoothing")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.1)),
                ),
        )
}

fn timm_optimizer(name: &str, module: &str, default_lr: f64) -> ClassSpec {
    ClassSpec::new(name)
        .defined_in(module)
        .param(Param::new("params"))
        .param(
            Param::new("lr")
                .hint(TypeHint::float())
                .default_value(LiteralValue::Float(default_lr)),
        )
        .param(
            Param::new("weight_decay")
                .hint(TypeHint::float())
                .default_value(LiteralValue::Float(0.0)),
        )
}

pub fn optim() -> LibraryModule {
    LibraryModule::new("timm.optim")
        .submodule(
            LibraryModule::new("timm.optim.adabelief").class(
                timm_optimizer("AdaBelief", "timm.optim.adabelief", 1e-3).param(
                    Param::new("eps")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1e-16)),
                ),
            ),
        )
        .submodule(
            LibraryModule::new("timm.optim.lamb").class(
                timm_optimizer("Lamb", "timm.optim.lamb", 1e-3).param(
                    Param::new("trust_clip")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                ),
            ),
        )
        .submodule(
            LibraryModule::new("timm.optim.lars").class(
                timm_optimizer("Lars", "timm.optim.lars", 1.0).param(
                    Param::new("momentum")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.0)),
                ),
            ),
        )
        .submodule(
            LibraryModule::new("timm.optim.madgrad").class(
                timm_optimizer("MADGRAD", "timm.optim.madgrad", 1e-2).param(
                    Param::new("momentum")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.9)),
                ),
            ),
        )
        .submodule(
            LibraryModule::new("timm.optim.rmsprop_tf").class(
                timm_optimizer("RMSpropTF", "timm.optim.rmsprop_tf", 1e-2).param(
                    Param::new("alpha")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.9)),
                ),
            ),
        )
}
