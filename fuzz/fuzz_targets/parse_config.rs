//! Fuzz harness for grid configuration files
//!
//! Parses arbitrary input as YAML and JSON grid configs and, when one
//! validates and is small, builds a tree from it.
//! Target: `GridConfig` loader and `GridConfig::build`

#![no_main]

use libfuzzer_sys::fuzz_target;
use orthotree_config::GridConfig;

fuzz_target!(|data: &[u8]| {
    // Ensure the input is valid UTF-8
    let input = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return, // Skip non-UTF-8 input
    };

    for config in [
        GridConfig::from_yaml_str(input),
        GridConfig::from_json_str(input),
    ]
    .into_iter()
    .flatten()
    {
        if config.validate().is_err() || config.extents.iter().product::<i64>() > 4096 {
            continue;
        }
        // Wrong axis counts must be reported, never panic
        let _ = config.build::<1>();
        let _ = config.build::<2>();
        let _ = config.build::<3>();
    }
});
