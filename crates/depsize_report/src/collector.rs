use anyhow::{Context, Result};
use depsize_core::{
    CompiledModule, Reason, format_size, gzip_size, is_dependency_path, normalize_module_path,
};
use log::{debug, trace, warn};
use path_clean::PathClean;
use std::{collections::BTreeSet, fs, path::Path};

use crate::types::DependencyRecord;

#[derive(Debug, Default)]
pub(crate) struct Collected {
    pub(crate) records: Vec<DependencyRecord>,
    pub(crate) gzip_fallbacks: Vec<String>,
}

/// Keep the modules that live under `node_modules` and size each of them.
///
/// With `gzip` set, sizes are compressed sizes; files that cannot be measured
/// are counted at their raw size and listed in `gzip_fallbacks`.
pub(crate) fn collect_dependency_modules(
    modules: &[CompiledModule],
    gzip: bool,
    context: &Path,
) -> Collected {
    debug!("Collecting dependency modules from {} modules (gzip: {})", modules.len(), gzip);
    let mut collected = Collected::default();

    for module in modules {
        let Some(name) = module.name.as_deref() else {
            trace!("Skipping unnamed module");
            continue;
        };

        let filepath = normalize_module_path(name);
        if !is_dependency_path(&filepath) {
            trace!("Skipping non-dependency module: {}", name);
            continue;
        }

        let size = if gzip {
            match compressed_size(module, &filepath, context) {
                Ok(size) => size,
                Err(e) => {
                    debug!("Gzip sizing failed for {}: {:#}", filepath, e);
                    warn!("{}", fallback_warning(&filepath, module.size));
                    collected.gzip_fallbacks.push(filepath.clone());
                    module.size
                }
            }
        } else {
            module.size
        };
        trace!("Module {} sized at {} bytes", filepath, size);

        collected.records.push(DependencyRecord {
            reasons: normalize_reasons(module.reasons()),
            filepath,
            size,
        });
    }

    debug!("Collected {} dependency modules", collected.records.len());
    collected
}

/// Gzip size of the module, from its inline source, from its concatenated
/// children compressed one by one, or from the file on disk.
fn compressed_size(module: &CompiledModule, filepath: &str, context: &Path) -> Result<u64> {
    if let Some(source) = module.source.as_deref() {
        return Ok(gzip_size(source.as_bytes())?);
    }

    let child_sources: Option<Vec<&str>> = module
        .modules
        .as_ref()
        .and_then(|children| children.iter().map(|c| c.source.as_deref()).collect());
    if let Some(sources) = child_sources {
        let mut total = 0;
        for source in sources {
            total += gzip_size(source.as_bytes())?;
        }
        return Ok(total);
    }

    let resolved = context.join(filepath).clean();
    trace!("Measuring {} from disk", resolved.display());
    let bytes =
        fs::read(&resolved).with_context(|| format!("Failed to read {}", resolved.display()))?;
    Ok(gzip_size(&bytes)?)
}

fn fallback_warning(filepath: &str, size: u64) -> String {
    format!(
        "Failed to calculate gzip size for \"{}\". Using original size {}.",
        filepath,
        format_size(size)
    )
}

fn normalize_reasons(reasons: &[Reason]) -> Vec<String> {
    reasons
        .iter()
        .filter_map(|r| r.module_name.as_deref())
        .map(normalize_module_path)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
