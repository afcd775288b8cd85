use std::path::{Path, PathBuf};

use clap::Parser;

use attune::config::Config;
use attune::fixtures::{
    replay, seeded_learner, stream_1_to_50, stream_51_to_100, stream_101_to_200,
};
use attune::learner::{Learner, ObserveEvent};

use crate::error::CliResult;
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct FixturesCommand {
    #[clap(long, short = 'o', help = "Directory to write fixture files into")]
    pub output_dir: PathBuf,

    #[clap(long, help = "Observations between autotune cycles (overrides config)")]
    pub interval: Option<u32>,
}

impl FixturesCommand {
    /// Write the synthetic event streams plus state snapshots at every
    /// checkpoint: fresh, after each stream, and post-wipe.
    pub fn execute(&self, config: &Config, format: OutputFormat) -> CliResult<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        let interval = self.interval.unwrap_or(config.tuning.autotune_interval);

        let mut written: Vec<String> = Vec::new();

        let streams: [(&str, Vec<ObserveEvent>); 3] = [
            ("events-001-050.json", stream_1_to_50()),
            ("events-051-100.json", stream_51_to_100()),
            ("events-101-200.json", stream_101_to_200()),
        ];
        for (name, events) in &streams {
            let json = serde_json::to_string_pretty(events)?;
            self.write(name, &json, &mut written)?;
        }

        let mut learner = seeded_learner();
        self.write_snapshot("snapshot-000-fresh.json", &learner, &mut written)?;

        for (checkpoint, (_, events)) in ["050", "100", "200"].iter().zip(&streams) {
            replay(&mut learner, events, interval);
            let name = format!("snapshot-{checkpoint}.json");
            self.write_snapshot(&name, &learner, &mut written)?;
        }

        self.write_snapshot("snapshot-post-wipe.json", &Learner::new(), &mut written)?;

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "output_dir": self.output_dir,
                    "files": written,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                for name in &written {
                    println!("Wrote {}", self.output_dir.join(name).display());
                }
            }
        }

        Ok(())
    }

    fn write(&self, name: &str, contents: &str, written: &mut Vec<String>) -> CliResult<()> {
        let path: &Path = &self.output_dir.join(name);
        std::fs::write(path, contents)?;
        written.push(name.to_string());
        Ok(())
    }

    fn write_snapshot(
        &self,
        name: &str,
        learner: &Learner,
        written: &mut Vec<String>,
    ) -> CliResult<()> {
        // Checkpoint exports use the cleaned snapshot form: floats rounded,
        // live state untouched.
        self.write(name, &learner.snapshot()?, written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_write_streams_and_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = FixturesCommand {
            output_dir: dir.path().join("fixtures"),
            interval: None,
        };
        cmd.execute(&Config::default(), OutputFormat::Table).unwrap();

        for name in [
            "events-001-050.json",
            "events-051-100.json",
            "events-101-200.json",
            "snapshot-000-fresh.json",
            "snapshot-050.json",
            "snapshot-100.json",
            "snapshot-200.json",
            "snapshot-post-wipe.json",
        ] {
            assert!(
                cmd.output_dir.join(name).exists(),
                "{name} should have been written"
            );
        }

        let events: Vec<ObserveEvent> = serde_json::from_str(
            &std::fs::read_to_string(cmd.output_dir.join("events-001-050.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(events.len(), 50);

        let snapshot: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(cmd.output_dir.join("snapshot-200.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(snapshot["prompt_count"], 200);
        assert!(
            snapshot["keyword_blocklist"]
                .as_array()
                .unwrap()
                .iter()
                .any(|v| v == "test")
        );
    }

    #[test]
    fn generated_fixtures_are_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        for run in ["a", "b"] {
            FixturesCommand {
                output_dir: dir.path().join(run),
                interval: None,
            }
            .execute(&Config::default(), OutputFormat::Table)
            .unwrap();
        }

        for name in ["events-101-200.json", "snapshot-200.json"] {
            let a = std::fs::read_to_string(dir.path().join("a").join(name)).unwrap();
            let b = std::fs::read_to_string(dir.path().join("b").join(name)).unwrap();
            assert_eq!(a, b, "{name} differs between runs");
        }
    }
}
