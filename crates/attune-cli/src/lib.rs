pub mod commands;
pub mod error;
pub mod output;

pub use commands::{FixturesCommand, ReplayCommand, StatsCommand, WipeCommand};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, format_hits, format_timestamp};
