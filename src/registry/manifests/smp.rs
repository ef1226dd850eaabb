//! segmentation_models_pytorch manifest.

use crate::registry::{ClassSpec, LibraryModule, Param, TypeHint};
use crate::schema::LiteralValue;

/// Architectures exposed from segmentation_models_pytorch.
pub const MODEL_CLASSES: &[&str] = &[
    "Unet",
    "UnetPlusPlus",
    "MAnet",
    "Linknet",
    "FPN",
    "PSPNet",
    "DeepLabV3",
    "DeepLabV3Plus",
    "PAN",
];

fn segmentation_model(name: &str, module: &str) -> ClassSpec {
    ClassSpec::new(name)
        .defined_in(module)
        .param(
            Param::new("encoder_name")
                .hint(TypeHint::string())
                .default_value(LiteralValue::str("resnet34")),
        )
        .param(
            Param::new("encoder_depth")
                .hint(TypeHint::int())
                .default_value(LiteralValue::Int(5)),
        )
        .param(
            Param::new("encoder_weights")
                .hint(TypeHint::optional(TypeHint::string()))
                .default_value(LiteralValue::str("imagenet")),
        )
        .param(
            Param::new("in_channels")
                .hint(TypeHint::int())
                .default_value(LiteralValue::Int(3)),
        )
        .param(
            Param::new("classes")
                .hint(TypeHint::int())
                .default_value(LiteralValue::Int(1)),
        )
        .param(
            Param::new("activation")
                .hint(TypeHint::optional(TypeHint::union([
                    TypeHint::string(),
                    TypeHint::class("Callable"),
                ])))
                .default_value(LiteralValue::None),
        )
}

pub fn models() -> LibraryModule {
    LibraryModule::new("segmentation_models_pytorch")
        .class(segmentation_model("Unet", "segmentation_models_pytorch.decoders.unet.model"))
        .class(segmentation_model(
            "UnetPlusPlus",
            "segmentation_models_pytorch.decoders.unetplusplus.model",
        ))
        .class(segmentation_model("MAnet", "segmentation_models_pytorch.decoders.manet.model"))
        .class(segmentation_model(
            "Linknet",
            "segmentation_models_pytorch.decoders.linknet.model",
        ))
        .class(segmentation_model("FPN", "segmentation_models_pytorch.decoders.fpn.model"))
        .class(segmentation_model(
            "PSPNet",
            "segmentation_models_pytorch.decoders.pspnet.model",
        ))
        .class(segmentation_model(
            "DeepLabV3",
            "segmentation_models_pytorch.decoders.deeplabv3.model",
        ))
        .class(segmentation_model(
            "DeepLabV3Plus",
            "segmentation_models_pytorch.decoders.deeplabv3.model",
        ))
        .class(segmentation_model("PAN", "segmentation_models_pytorch.decoders.pan.model"))
        // Losses live under smp.losses and are not part of the model surface.
        .class(
            ClassSpec::new("SegmentationModel")
                .defined_in("segmentation_models_pytorch.base.model")
                .without_init(),
        )
}
