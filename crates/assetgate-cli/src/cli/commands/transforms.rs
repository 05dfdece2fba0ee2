//! `assetgate transforms` – list config-declared transforms.

use anyhow::Result;
use assetgate_core::config::GateConfig;

pub fn run_transforms(cfg: &GateConfig) -> Result<()> {
    let entries = cfg.sorted_transforms();
    if entries.is_empty() {
        println!("No transforms configured.");
    } else {
        println!("PRIORITY   TRANSFORM");
        for entry in entries {
            println!("{:<10} {}", entry.priority, entry.spec.describe());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetgate_core::builtin::{TransformEntry, TransformSpec};

    #[test]
    fn lists_empty_and_declared_transforms() {
        run_transforms(&GateConfig::default()).unwrap();

        let cfg = GateConfig {
            transforms: vec![TransformEntry {
                priority: 5,
                spec: TransformSpec::QueryAppend {
                    param: "v=1".to_string(),
                    separator: "?".to_string(),
                },
            }],
            ..GateConfig::default()
        };
        run_transforms(&cfg).unwrap();
    }
}
