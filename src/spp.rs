use std::path::Path;

use log::debug;

use crate::error::LoadError;
use crate::xml::{self, Element};

/// Loads the `iter_num` of every `<spp>` under `<spp_list>` in document order.
pub fn load_spp(path: &Path) -> Result<Vec<u32>, LoadError> {
    let text = xml::read_text(path)?;
    let document = xml::parse(path, &text)?;
    let root = xml::root(&document, path, "spp_list")?;

    let spp = xml::children(root, "spp")
        .map(|node| Element::new(node, path).required::<u32>("iter_num"))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("loaded {} spp value(s) from {}", spp.len(), path.display());
    Ok(spp)
}

/// Sorted, de-duplicated sample counts at which outputs are captured.
///
/// The renderer accumulates up to the last (largest) entry.
pub fn schedule(spp: &[u32]) -> Result<Vec<u32>, LoadError> {
    let mut sorted = spp.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    match sorted.first().copied() {
        None => Err(LoadError::InvalidParameter(
            "SPP collection is empty".to_string(),
        )),
        Some(0) => Err(LoadError::InvalidParameter(
            "SPP values must be positive, found 0".to_string(),
        )),
        Some(_) => Ok(sorted),
    }
}
