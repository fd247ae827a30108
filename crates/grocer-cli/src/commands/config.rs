use crate::cli::ConfigCommands;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands) -> Result<(), CliError> {
    let mut config = CliConfig::load().map_err(CliError::Config)?;

    match command {
        ConfigCommands::Show => {
            let path = default_config_path().map_err(CliError::Config)?;
            println!("Config file: {}", path.display());
            for line in describe(&config) {
                println!("{line}");
            }
        }
        ConfigCommands::SetOrigin { url } => {
            config.set_origin(&url).map_err(CliError::Config)?;
            let path = config.save().map_err(CliError::Config)?;
            println!("Origin set to {} ({})", config.origin(), path.display());
        }
        ConfigCommands::SetModel { model } => {
            let model = model.trim();
            if model.is_empty() {
                return Err(CliError::EmptyField("Model"));
            }
            config.model = Some(model.to_string());
            let path = config.save().map_err(CliError::Config)?;
            println!("Model set to {model} ({})", path.display());
        }
    }

    Ok(())
}

pub fn describe(config: &CliConfig) -> Vec<String> {
    vec![
        format!("Origin: {}", config.origin()),
        format!(
            "Model:  {}",
            config.model.as_deref().unwrap_or("(from GEMINI_MODEL or default)")
        ),
    ]
}
