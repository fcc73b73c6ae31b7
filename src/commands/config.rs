//! Config subcommands handler

use anyhow::Result;

use ansimirror::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
