//! Effective configuration.

use clap::Args;

use super::{default_config_path, get_config, output_result};
use crate::Cli;

/// Print the configuration the dispatcher would run with.
#[derive(Args)]
pub struct ConfigCommand {
    /// Print the default config file path and exit
    #[arg(long)]
    path: bool,
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        if self.path {
            match default_config_path() {
                Some(p) => println!("{}", p.display()),
                None => anyhow::bail!("cannot determine home directory"),
            }
            return Ok(());
        }

        let cfg = get_config(cli)?;
        if cli.json {
            return output_result(&cfg, cli.output.as_deref(), true);
        }
        let yaml = cfg.to_yaml()?;
        match cli.output.as_deref() {
            Some(path) => std::fs::write(path, yaml)?,
            None => print!("{yaml}"),
        }
        Ok(())
    }
}
