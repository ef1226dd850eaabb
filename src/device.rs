//! Compute device discovery for the `device` catalog field.

use std::env;
use std::path::Path;

use tracing::debug;

use crate::schema::{LiteralValue, ParameterSchema};

/// Overrides GPU probing, for tests and machines without the NVIDIA driver.
pub const CUDA_DEVICES_ENV: &str = "CHOICEGEN_CUDA_DEVICES";

const NVIDIA_PROC_DIR: &str = "/proc/driver/nvidia/gpus";

/// The `device` field: always `cpu`, plus one `cuda:<i>` option per
/// visible GPU.
pub fn device_choices() -> ParameterSchema {
    let mut options = vec![LiteralValue::str("cpu")];
    for index in 0..cuda_device_count() {
        options.push(LiteralValue::Str(format!("cuda:{index}")));
    }
    ParameterSchema::typed("str", LiteralValue::str("cpu"))
        .with_options(&LiteralValue::List(options).py_str())
}

/// Count visible CUDA devices without linking against the CUDA runtime.
///
/// The env override wins; otherwise the driver's procfs directory is
/// enumerated, falling back to probing `/dev/nvidia<i>` nodes.
pub fn cuda_device_count() -> usize {
    if let Ok(raw) = env::var(CUDA_DEVICES_ENV) {
        match raw.trim().parse::<usize>() {
            Ok(count) => return count,
            Err(_) => debug!(value = %raw, "ignoring unparsable {CUDA_DEVICES_ENV}"),
        }
    }

    if let Ok(entries) = std::fs::read_dir(NVIDIA_PROC_DIR) {
        return entries.filter_map(Result::ok).count();
    }

    let mut count = 0;
    while Path::new(&format!("/dev/nvidia{count}")).exists() {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_override_sets_option_count() {
        std::env::set_var(CUDA_DEVICES_ENV, "2");
        let schema = device_choices();
        std::env::remove_var(CUDA_DEVICES_ENV);

        assert_eq!(schema.default, Some(LiteralValue::str("cpu")));
        assert_eq!(
            schema.options.as_deref(),
            Some("['cpu', 'cuda:0', 'cuda:1']")
        );
    }

    #[test]
    #[serial]
    fn test_zero_devices_still_offers_cpu() {
        std::env::set_var(CUDA_DEVICES_ENV, "0");
        let schema = device_choices();
        std::env::remove_var(CUDA_DEVICES_ENV);

        assert_eq!(schema.options.as_deref(), Some("['cpu']"));
    }
}
