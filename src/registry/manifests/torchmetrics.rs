//! torchmetrics manifest.

use crate::registry::{ClassSpec, LibraryModule, Param, TypeHint};
use crate::schema::LiteralValue;

fn task_param() -> Param {
    Param::new("task").hint(TypeHint::literal_strs(&[
        "binary",
        "multiclass",
        "multilabel",
    ]))
}

fn classification_metric(name: &str) -> ClassSpec {
    ClassSpec::new(name)
        .param(task_param())
        .param(
            Param::new("threshold")
                .hint(TypeHint::float())
                .default_value(LiteralValue::Float(0.5)),
        )
        .param(
            Param::new("num_classes")
                .hint(TypeHint::optional(TypeHint::int()))
                .default_value(LiteralValue::None),
        )
        .param(
            Param::new("num_labels")
                .hint(TypeHint::optional(TypeHint::int()))
                .default_value(LiteralValue::None),
        )
        .param(
            Param::new("average")
                .hint(TypeHint::optional(TypeHint::literal_strs(&[
                    "micro", "macro", "weighted", "none",
                ])))
                .default_value(LiteralValue::str("micro")),
        )
        .param(
            Param::new("ignore_index")
                .hint(TypeHint::optional(TypeHint::int()))
                .default_value(LiteralValue::None),
        )
        .param(
            Param::new("validate_args")
                .hint(TypeHint::boolean())
                .default_value(LiteralValue::Bool(true)),
        )
}

pub fn metrics() -> LibraryModule {
    LibraryModule::new("torchmetrics")
        .class(
            ClassSpec::new("Metric")
                .defined_in("torchmetrics.metric")
                .param(Param::new("kwargs")),
        )
        .class(classification_metric("Accuracy").defined_in("torchmetrics.classification.accuracy"))
        .class(classification_metric("Precision").defined_in("torchmetrics.classification.precision_recall"))
        .class(classification_metric("Recall").defined_in("torchmetrics.classification.precision_recall"))
        .class(classification_metric("F1Score").defined_in("torchmetrics.classification.f_beta"))
        .class(
            ClassSpec::new("AUROC")
                .defined_in("torchmetrics.classification.auroc")
                .param(task_param())
                .param(
                    Param::new("num_classes")
                        .hint(TypeHint::optional(TypeHint::int()))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("average")
                        .hint(TypeHint::optional(TypeHint::literal_strs(&["macro", "weighted", "none"])))
                        .default_value(LiteralValue::str("macro")),
                ),
        )
        .class(
            ClassSpec::new("JaccardIndex")
                .defined_in("torchmetrics.classification.jaccard")
                .param(task_param())
                .param(
                    Param::new("threshold")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.5)),
                )
                .param(
                    Param::new("num_classes")
                        .hint(TypeHint::optional(TypeHint::int()))
                        .default_value(LiteralValue::None),
                ),
        )
        .class(
            ClassSpec::new("Dice")
                .defined_in("torchmetrics.classification.dice")
                .param(
                    Param::new("zero_division")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(0)),
                )
                .param(
                    Param::new("num_classes")
                        .hint(TypeHint::optional(TypeHint::int()))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("threshold")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.5)),
                ),
        )
        .class(
            ClassSpec::new("MeanSquaredError")
                .defined_in("torchmetrics.regression.mse")
                .param(
                    Param::new("squared")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(true)),
                )
                .param(
                    Param::new("num_outputs")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(1)),
                ),
        )
        .class(
            ClassSpec::new("MeanAbsoluteError")
                .defined_in("torchmetrics.regression.mae")
                .param(Param::new("kwargs")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistrySource;
    use crate::schema::SchemaSource;

    #[test]
    fn test_literal_hint_becomes_string_with_options() {
        let source = RegistrySource::new(metrics());
        let classes = &source.extract().unwrap()[0].classes;
        let task = &classes["Accuracy"]["task"];
        assert_eq!(task.type_desc, Some(LiteralValue::type_ref("str")));
        assert_eq!(
            task.options.as_deref(),
            Some("['binary', 'multiclass', 'multilabel']")
        );
    }

    #[test]
    fn test_required_literal_param_defaults_to_null() {
        let source = RegistrySource::new(metrics());
        let classes = &source.extract().unwrap()[0].classes;
        assert_eq!(classes["AUROC"]["task"].default, Some(LiteralValue::None));
    }
}
