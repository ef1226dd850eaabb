//! torch.optim, torch.optim.lr_scheduler and torch.nn.modules.loss manifests.

use crate::registry::{ClassSpec, LibraryModule, Param, TypeHint};
use crate::schema::LiteralValue;

/// Optimizers the catalog exposes from torch.optim.
pub const OPTIMIZER_CLASSES: &[&str] = &[
    "Adadelta", "Adagrad", "Adam", "AdamW", "SparseAdam", "Adamax", "ASGD", "LBFGS", "NAdam",
    "RAdam", "RMSprop", "Rprop", "SGD",
];

/// Loss classes the catalog exposes from torch.nn.
pub const LOSS_CLASSES: &[&str] = &[
    "L1Loss",
    "MSELoss",
    "CrossEntropyLoss",
    "CTCLoss",
    "NLLLoss",
    "PoissonNLLLoss",
    "GaussianNLLLoss",
    "KLDivLoss",
    "BCELoss",
    "BCEWithLogitsLoss",
    "MarginRankingLoss",
    "HingeEmbeddingLoss",
    "MultiLabelMarginLoss",
    "HuberLoss",
    "SmoothL1Loss",
    "SoftMarginLoss",
    "MultiLabelSoftMarginLoss",
    "CosineEmbeddingLoss",
    "MultiMarginLoss",
    "TripletMarginLoss",
    "TripletMarginWithDistanceLoss",
];

fn lr(default: f64) -> Param {
    Param::new("lr")
        .hint(TypeHint::float())
        .default_value(LiteralValue::Float(default))
}

fn eps(default: f64) -> Param {
    Param::new("eps")
        .hint(TypeHint::float())
        .default_value(LiteralValue::Float(default))
}

fn weight_decay(default: f64) -> Param {
    Param::new("weight_decay")
        .hint(TypeHint::float())
        .default_value(LiteralValue::Float(default))
}

fn betas(first: f64, second: f64) -> Param {
    Param::new("betas")
        .hint(TypeHint::tuple_of([TypeHint::float(), TypeHint::float()]))
        .default_value(LiteralValue::Tuple(vec![
            LiteralValue::Float(first),
            LiteralValue::Float(second),
        ]))
}

pub fn optim() -> LibraryModule {
    LibraryModule::new("torch.optim")
        // The abstract base lives in torch.optim.optimizer; the allow-list
        // keeps it out of the catalog regardless.
        .class(
            ClassSpec::new("Optimizer")
                .defined_in("torch.optim.optimizer")
                .param(Param::new("params"))
                .param(Param::new("defaults").hint(TypeHint::class("dict"))),
        )
        .class(
            ClassSpec::new("Adadelta")
                .defined_in("torch.optim.adadelta")
                .param(Param::new("params"))
                .param(lr(1.0))
                .param(
                    Param::new("rho")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.9)),
                )
                .param(eps(1e-6))
                .param(weight_decay(0.0)),
        )
        .class(
            ClassSpec::new("Adagrad")
                .defined_in("torch.optim.adagrad")
                .param(Param::new("params"))
                .param(lr(0.01))
                .param(
                    Param::new("lr_decay")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.0)),
                )
                .param(weight_decay(0.0))
                .param(
                    Param::new("initial_accumulator_value")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.0)),
                )
                .param(eps(1e-10)),
        )
        .class(
            ClassSpec::new("Adam")
                .defined_in("torch.optim.adam")
                .param(Param::new("params"))
                .param(lr(1e-3))
                .param(betas(0.9, 0.999))
                .param(eps(1e-8))
                .param(weight_decay(0.0))
                .param(
                    Param::new("amsgrad")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                ),
        )
        .class(
            ClassSpec::new("AdamW")
                .defined_in("torch.optim.adamw")
                .param(Param::new("params"))
                .param(lr(1e-3))
                .param(betas(0.9, 0.999))
                .param(eps(1e-8))
                .param(weight_decay(0.01))
                .param(
                    Param::new("amsgrad")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                ),
        )
        .class(
            ClassSpec::new("SparseAdam")
                .defined_in("torch.optim.sparse_adam")
                .param(Param::new("params"))
                .param(lr(1e-3))
                .param(betas(0.9, 0.999))
                .param(eps(1e-8)),
        )
        .class(
            ClassSpec::new("Adamax")
                .defined_in("torch.optim.adamax")
                .param(Param::new("params"))
                .param(lr(2e-3))
                .param(betas(0.9, 0.999))
                .param(eps(1e-8))
                .param(weight_decay(0.0)),
        )
        .class(
            ClassSpec::new("ASGD")
                .defined_in("torch.optim.asgd")
                .param(Param::new("params"))
                .param(lr(0.01))
                .param(
                    Param::new("lambd")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1e-4)),
                )
                .param(
                    Param::new("alpha")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.75)),
                )
                .param(
                    Param::new("t0")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1e6)),
                )
                .param(weight_decay(0.0)),
        )
        .class(
            ClassSpec::new("LBFGS")
                .defined_in("torch.optim.lbfgs")
                .param(Param::new("params"))
                .param(lr(1.0))
                .param(
                    Param::new("max_iter")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(20)),
                )
                .param(
                    Param::new("max_eval")
                        .hint(TypeHint::optional(TypeHint::int()))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("tolerance_grad")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1e-7)),
                )
                .param(
                    Param::new("tolerance_change")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1e-9)),
                )
                .param(
                    Param::new("history_size")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(100)),
                ),
        )
        .class(
            ClassSpec::new("NAdam")
                .defined_in("torch.optim.nadam")
                .param(Param::new("params"))
                .param(lr(2e-3))
                .param(betas(0.9, 0.999))
                .param(eps(1e-8))
                .param(weight_decay(0.0))
                .param(
                    Param::new("momentum_decay")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(4e-3)),
                ),
        )
        .class(
            ClassSpec::new("RAdam")
                .defined_in("torch.optim.radam")
                .param(Param::new("params"))
                .param(lr(1e-3))
                .param(betas(0.9, 0.999))
                .param(eps(1e-8))
                .param(weight_decay(0.0)),
        )
        .class(
            ClassSpec::new("RMSprop")
                .defined_in("torch.optim.rmsprop")
                .param(Param::new("params"))
                .param(lr(0.01))
                .param(
                    Param::new("alpha")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.99)),
                )
                .param(eps(1e-8))
                .param(weight_decay(0.0))
                .param(
                    Param::new("momentum")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.0)),
                )
                .param(
                    Param::new("centered")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                ),
        )
        .class(
            ClassSpec::new("Rprop")
                .defined_in("torch.optim.rprop")
                .param(Param::new("params"))
                .param(lr(0.01))
                .param(
                    Param::new("etas")
                        .hint(TypeHint::tuple_of([TypeHint::float(), TypeHint::float()]))
                        .default_value(LiteralValue::Tuple(vec![
                            LiteralValue::Float(0.5),
                            LiteralValue::Float(1.2),
                        ])),
                )
                .param(
                    Param::new("step_sizes")
                        .hint(TypeHint::tuple_of([TypeHint::float(), TypeHint::float()]))
                        .default_value(LiteralValue::Tuple(vec![
                            LiteralValue::Float(1e-6),
                            LiteralValue::Float(50.0),
                        ])),
                ),
        )
        .class(
            ClassSpec::new("SGD")
                .defined_in("torch.optim.sgd")
                .param(Param::new("params"))
                .param(lr(1e-3))
                .param(
                    Param::new("momentum")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.0)),
                )
                .param(
                    Param::new("dampening")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.0)),
                )
                .param(weight_decay(0.0))
                .param(
                    Param::new("nesterov")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                ),
        )
}

fn last_epoch() -> Param {
    Param::new("last_epoch")
        .hint(TypeHint::int())
        .default_value(LiteralValue::Int(-1))
}

pub fn lr_scheduler() -> LibraryModule {
    LibraryModule::new("torch.optim.lr_scheduler")
        .class(
            ClassSpec::new("LambdaLR")
                .param(Param::new("optimizer"))
                .param(Param::new("lr_lambda"))
                .param(last_epoch()),
        )
        .class(
            ClassSpec::new("MultiplicativeLR")
                .param(Param::new("optimizer"))
                .param(Param::new("lr_lambda"))
                .param(last_epoch()),
        )
        .class(
            ClassSpec::new("StepLR")
                .param(Param::new("optimizer"))
                .param(Param::new("step_size").hint(TypeHint::int()))
                .param(
                    Param::new("gamma")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.1)),
                )
                .param(last_epoch()),
        )
        .class(
            ClassSpec::new("MultiStepLR")
                .param(Param::new("optimizer"))
                .param(Param::new("milestones").hint(TypeHint::list_of(TypeHint::int())))
                .param(
                    Param::new("gamma")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.1)),
                )
                .param(last_epoch()),
        )
        .class(
            ClassSpec::new("ConstantLR")
                .param(Param::new("optimizer"))
                .param(
                    Param::new("factor")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1.0 / 3.0)),
                )
                .param(
                    Param::new("total_iters")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(5)),
                )
                .param(last_epoch()),
        )
        .class(
            ClassSpec::new("LinearLR")
                .param(Param::new("optimizer"))
                .param(
                    Param::new("start_factor")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1.0 / 3.0)),
                )
                .param(
                    Param::new("end_factor")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1.0)),
                )
                .param(
                    Param::new("total_iters")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(5)),
                )
                .param(last_epoch()),
        )
        .class(
            ClassSpec::new("ExponentialLR")
                .param(Param::new("optimizer"))
                .param(Param::new("gamma").hint(TypeHint::float()))
                .param(last_epoch()),
        )
        .class(
            ClassSpec::new("CosineAnnealingLR")
                .param(Param::new("optimizer"))
                .param(Param::new("T_max").hint(TypeHint::int()))
                .param(
                    Param::new("eta_min")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.0)),
                )
                .param(last_epoch()),
        )
        .class(
            ClassSpec::new("ReduceLROnPlateau")
                .param(Param::new("optimizer"))
                .param(
                    Param::new("mode")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("min")),
                )
                .param(
                    Param::new("factor")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.1)),
                )
                .param(
                    Param::new("patience")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(10)),
                )
                .param(
                    Param::new("threshold")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1e-4)),
                )
                .param(
                    Param::new("threshold_mode")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("rel")),
                )
                .param(
                    Param::new("cooldown")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(0)),
                )
                .param(
                    Param::new("min_lr")
                        .hint(TypeHint::union([TypeHint::float(), TypeHint::list_of(TypeHint::float())]))
                        .default_value(LiteralValue::Float(0.0)),
                )
                .param(eps(1e-8)),
        )
        .class(
            ClassSpec::new("CosineAnnealingWarmRestarts")
                .param(Param::new("optimizer"))
                .param(Param::new("T_0").hint(TypeHint::int()))
                .param(
                    Param::new("T_mult")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(1)),
                )
                .param(
                    Param::new("eta_min")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.0)),
                )
                .param(last_epoch()),
        )
        .class(
            ClassSpec::new("OneCycleLR")
                .param(Param::new("optimizer"))
                .param(Param::new("max_lr").hint(TypeHint::union([
                    TypeHint::float(),
                    TypeHint::list_of(TypeHint::float()),
                ])))
                .param(
                    Param::new("total_steps")
                        .hint(TypeHint::optional(TypeHint::int()))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("epochs")
                        .hint(TypeHint::optional(TypeHint::int()))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("pct_start")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.3)),
                )
                .param(
                    Param::new("anneal_strategy")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("cos")),
                )
                .param(
                    Param::new("div_factor")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(25.0)),
                )
                .param(
                    Param::new("final_div_factor")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1e4)),
                )
                .param(last_epoch()),
        )
}

/// The three reduction parameters shared by nearly every torch loss.
fn reduction_loss(name: &str) -> ClassSpec {
    ClassSpec::new(name)
        .param(
            Param::new("size_average")
                .hint(TypeHint::optional(TypeHint::boolean()))
                .default_value(LiteralValue::None),
        )
        .param(
            Param::new("reduce")
                .hint(TypeHint::optional(TypeHint::boolean()))
                .default_value(LiteralValue::None),
        )
        .param(
            Param::new("reduction")
                .hint(TypeHint::string())
                .default_value(LiteralValue::str("mean")),
        )
}

fn margin(default: f64) -> Param {
    Param::new("margin")
        .hint(TypeHint::float())
        .default_value(LiteralValue::Float(default))
}

fn optional_weight() -> Param {
    Param::new("weight")
        .hint(TypeHint::optional(TypeHint::class("Tensor")))
        .default_value(LiteralValue::None)
}

pub fn nn_loss() -> LibraryModule {
    LibraryModule::new("torch.nn.modules.loss")
        .class(ClassSpec::new("_Loss").param(Param::new("reduction")))
        .class(reduction_loss("L1Loss"))
        .class(reduction_loss("MSELoss"))
        .class(
            ClassSpec::new("CrossEntropyLoss")
                .param(optional_weight())
                .param(
                    Param::new("size_average")
                        .hint(TypeHint::optional(TypeHint::boolean()))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("ignore_index")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(-100)),
                )
                .param(
                    Param::new("reduce")
                        .hint(TypeHint::optional(TypeHint::boolean()))
                        .default_value(LiteralValue::None),
                )
                .param(
                    Param::new("reduction")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("mean")),
                )
                .param(
                    Param::new("label_smoothing")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.0)),
                ),
        )
        .class(
            ClassSpec::new("CTCLoss")
                .param(
                    Param::new("blank")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(0)),
                )
                .param(
                    Param::new("reduction")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("mean")),
                )
                .param(
                    Param::new("zero_infinity")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                ),
        )
        .class(
            reduction_loss("NLLLoss")
                .param(optional_weight())
                .param(
                    Param::new("ignore_index")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(-100)),
                ),
        )
        .class(
            reduction_loss("PoissonNLLLoss")
                .param(
                    Param::new("log_input")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(true)),
                )
                .param(
                    Param::new("full")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                )
                .param(eps(1e-8)),
        )
        .class(
            ClassSpec::new("GaussianNLLLoss")
                .param(
                    Param::new("full")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                )
                .param(eps(1e-6))
                .param(
                    Param::new("reduction")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("mean")),
                ),
        )
        .class(reduction_loss("KLDivLoss").param(
            Param::new("log_target")
                .hint(TypeHint::boolean())
                .default_value(LiteralValue::Bool(false)),
        ))
        .class(reduction_loss("BCELoss").param(optional_weight()))
        .class(
            reduction_loss("BCEWithLogitsLoss")
                .param(optional_weight())
                .param(
                    Param::new("pos_weight")
                        .hint(TypeHint::optional(TypeHint::class("Tensor")))
                        .default_value(LiteralValue::None),
                ),
        )
        .class(reduction_loss("MarginRankingLoss").param(margin(0.0)))
        .class(reduction_loss("HingeEmbeddingLoss").param(margin(1.0)))
        .class(reduction_loss("MultiLabelMarginLoss"))
        .class(
            ClassSpec::new("HuberLoss")
                .param(
                    Param::new("reduction")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("mean")),
                )
                .param(
                    Param::new("delta")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(1.0)),
                ),
        )
        .class(reduction_loss("SmoothL1Loss").param(
            Param::new("beta")
                .hint(TypeHint::float())
                .default_value(LiteralValue::Float(1.0)),
        ))
        .class(reduction_loss("SoftMarginLoss"))
        .class(reduction_loss("MultiLabelSoftMarginLoss").param(optional_weight()))
        .class(reduction_loss("CosineEmbeddingLoss").param(margin(0.0)))
        .class(
            reduction_loss("MultiMarginLoss")
                .param(
                    Param::new("p")
                        .hint(TypeHint::int())
                        .default_value(LiteralValue::Int(1)),
                )
                .param(margin(1.0))
                .param(optional_weight()),
        )
        .class(
            reduction_loss("TripletMarginLoss")
                .param(margin(1.0))
                .param(
                    Param::new("p")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(2.0)),
                )
                .param(eps(1e-6))
                .param(
                    Param::new("swap")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                ),
        )
        .class(
            ClassSpec::new("TripletMarginWithDistanceLoss")
                .param(
                    Param::new("distance_function")
                        .hint(TypeHint::optional(TypeHint::class("Callable")))
                        .default_value(LiteralValue::None),
                )
                .param(margin(1.0))
                .param(
                    Param::new("swap")
                        .hint(TypeHint::boolean())
                        .default_value(LiteralValue::Bool(false)),
                )
                .param(
                    Param::new("reduction")
                        .hint(TypeHint::string())
                        .default_value(LiteralValue::str("mean")),
                ),
        )
}
