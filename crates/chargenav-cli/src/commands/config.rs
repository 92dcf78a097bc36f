//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::{ConfigOutput, ConfigValue};
use anyhow::Result;
use chargenav_core::config::LayeredConfig;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let values = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| (key, ConfigValue { value, source }))
        .collect::<std::collections::BTreeMap<_, _>>();

    if output.is_json() {
        output.result(ConfigOutput { values })?;
        return Ok(());
    }

    output.section("Configuration");
    for (key, entry) in &values {
        output.kv(key, format!("{} ({:?})", entry.value, entry.source));
    }

    if let Err(e) = config.vehicle_profile() {
        output.warning(format!("Vehicle profile is invalid: {}", e));
    }

    Ok(())
}
