//! Init command handler.

use anyhow::bail;
use clap::Args;
use docslice_chunker::config::{get_config_path, save_config};
use docslice_chunker::ChunkerConfig;
use docslice_core::config::AppConfig;

/// Write the default chunker config to the workspace
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Overwrite an existing config
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    pub fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing init command in {:?}", config.workspace);

        config.ensure_state_dir()?;

        let path = get_config_path(&config.workspace);
        if path.exists() && !self.force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }

        let path = save_config(&config.workspace, &ChunkerConfig::default())?;
        println!("Wrote default chunker config to {}", path.display());

        Ok(())
    }
}
