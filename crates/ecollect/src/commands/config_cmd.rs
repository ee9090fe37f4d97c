//! Config file commands.

use ecollect_config::{config_path, load_config_or_default, save_config};

use crate::cli::{ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(cmd: ConfigCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        ConfigCommand::Show => {
            let config = load_config_or_default();
            let rendered = toml::to_string_pretty(&config)
                .map_err(ecollect_config::ConfigError::Serialization)?;
            print!("{rendered}");
            Ok(())
        }

        ConfigCommand::Init => {
            let path = config_path();
            if path.exists() {
                return Err(CliError::BadConfig {
                    message: format!("config already exists at {}", path.display()),
                });
            }
            save_config(&ecollect_config::Config::default())?;
            if !global.quiet {
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config_path().display());
            Ok(())
        }
    }
}
