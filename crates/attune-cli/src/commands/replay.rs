use std::path::PathBuf;

use clap::Parser;

use attune::config::Config;
use attune::learner::ObserveEvent;

use crate::commands::{load_learner, save_learner};
use crate::error::CliResult;
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct ReplayCommand {
    #[clap(help = "Path to a JSON event stream file")]
    pub events: PathBuf,

    #[clap(long, help = "Observations between autotune cycles (overrides config)")]
    pub interval: Option<u32>,

    #[clap(long, help = "Run one extra autotune cycle after the stream ends")]
    pub tune_after: bool,
}

impl ReplayCommand {
    pub fn execute(&self, config: &Config, format: OutputFormat) -> CliResult<()> {
        let state_path = config.storage.state_path();
        let mut learner = load_learner(&state_path)?;

        let data = std::fs::read_to_string(&self.events)?;
        let events: Vec<ObserveEvent> = serde_json::from_str(&data)?;
        let interval = self.interval.unwrap_or(config.tuning.autotune_interval);

        // The cycle boundary belongs to the driver: observe every event and
        // tune whenever the prompt index lands on the interval. A cycle runs
        // to completion before the next observation is applied.
        let mut cycles = 0usize;
        for event in &events {
            learner.observe(event);
            if interval > 0 && learner.prompt_count() % interval == 0 {
                let report = learner.autotune();
                cycles += 1;
                tracing::info!(
                    prompt = learner.prompt_count(),
                    promoted = report.promoted,
                    demoted = report.demoted,
                    pruned = report.pruned,
                    "autotune cycle"
                );
            }
        }
        if self.tune_after {
            learner.autotune();
            cycles += 1;
        }

        save_learner(&state_path, &learner)?;

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "events": events.len(),
                    "cycles": cycles,
                    "prompt_count": learner.prompt_count(),
                    "state_file": state_path,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!(
                    "Replayed {} events ({} autotune cycles), prompt count {}",
                    events.len(),
                    cycles,
                    learner.prompt_count()
                );
            }
        }

        Ok(())
    }
}
