//! Print the config format

use anyhow::Result;

pub fn run(field_sep: &str) -> Result<()> {
    print!("{}", fileobject::config::format_help(field_sep));
    Ok(())
}
