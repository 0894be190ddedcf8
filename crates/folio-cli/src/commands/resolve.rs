use anyhow::{bail, Result};

use folio_core::paging::resolve_active_index;
use folio_core::AppConfig;

/// Active index and id for explicit tops, using the configured section names
pub fn active_for(
    config: &AppConfig,
    tops: &[f64],
    scroll: f64,
    viewport_height: f64,
    ratio: Option<f64>,
) -> Result<(usize, String)> {
    let ratio = ratio.unwrap_or(config.paging.reference_ratio);
    if !(0.0..=1.0).contains(&ratio) {
        bail!("ratio must be within [0, 1], got {}", ratio);
    }

    let index = resolve_active_index(tops.iter().map(|&t| Some(t)), scroll, viewport_height, ratio);
    let id = config
        .paging
        .sections
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("#{}", index));
    Ok((index, id))
}

pub fn run(
    config: &AppConfig,
    tops: &[f64],
    scroll: f64,
    viewport_height: f64,
    ratio: Option<f64>,
) -> Result<()> {
    let (index, id) = active_for(config, tops, scroll, viewport_height, ratio)?;
    println!("{}\t{}", index, id);
    Ok(())
}
