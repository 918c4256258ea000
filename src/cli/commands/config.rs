//! `config` subcommand: inspect and edit the user configuration file

use crate::args::ConfigSubcommand;
use crate::prompt::Console;
use gradebook::config::Config;
use gradebook::{error, info};
use std::io::{BufRead, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => {
            edit(config, &key, |c| c.set(&key, &value));
            println!("✓ Set {key} = {value}");
        }
        Some(ConfigSubcommand::Unset { key }) => {
            edit(config, &key, |c| c.unset(&key, defaults));
            println!("✓ Reset {key} to default");
        }
        Some(ConfigSubcommand::Reset) => {
            let stdin = std::io::stdin();
            let mut console = Console::new(stdin.lock(), std::io::stdout());
            if let Err(e) = reset(&mut console) {
                error!("Config reset failed: {e}");
                eprintln!("Failed to remove config file: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Print one value, or the whole configuration when `key` is `None`
fn show(config: &Config, key: Option<&str>) {
    match key {
        Some(k) => match config.get(k) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("Unknown config key: '{k}'");
                std::process::exit(1);
            }
        },
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
        }
    }
}

/// Apply `change` and persist the result; exits with status 1 on failure
fn edit(config: &mut Config, key: &str, change: impl FnOnce(&mut Config) -> Result<(), String>) {
    if let Err(e) = change(config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    if let Err(e) = config.save() {
        eprintln!("Failed to save config: {e}");
        std::process::exit(1);
    }
    info!("Config key '{key}' updated");
}

/// Delete the config file after confirmation
///
/// # Errors
/// The I/O error from removing the file
pub fn reset<R: BufRead, W: Write>(console: &mut Console<R, W>) -> std::io::Result<()> {
    if !Config::get_config_file_path().exists() {
        console.println("✓ Config is already at defaults");
        return Ok(());
    }

    if console.confirm("Reset config to defaults?") == Some(true) {
        Config::reset()?;
        info!("Config reset to defaults");
        console.println("✓ Config reset to defaults");
    } else {
        console.println("✗ Reset cancelled");
    }
    Ok(())
}
