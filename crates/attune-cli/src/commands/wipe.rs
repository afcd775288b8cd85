use clap::Parser;

use attune::config::Config;
use attune::learner::Learner;

use crate::commands::save_learner;
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct WipeCommand {
    #[clap(long, help = "Confirm resetting the learner state")]
    pub yes: bool,
}

impl WipeCommand {
    /// Overwrite the state file with a fresh, empty learner state.
    /// Everything learned is lost, including the keyword blocklist.
    pub fn execute(&self, config: &Config, format: OutputFormat) -> CliResult<()> {
        if !self.yes {
            return Err(CliError::from(
                "wipe discards all learned state; pass --yes to confirm",
            ));
        }

        let state_path = config.storage.state_path();
        save_learner(&state_path, &Learner::new())?;
        tracing::info!(path = %state_path.display(), "learner state reset");

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "wiped": true,
                    "state_file": state_path,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!("Learner state reset at {}", state_path.display());
            }
        }

        Ok(())
    }
}
