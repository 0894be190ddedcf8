use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use folio_core::AppConfig;

fn target(custom: Option<&Path>) -> PathBuf {
    custom
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path)
}

pub fn init(custom: Option<&Path>, force: bool) -> Result<()> {
    let path = target(custom);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

pub fn path(custom: Option<&Path>) -> Result<()> {
    println!("{}", target(custom).display());
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
