pub mod fixtures;
pub mod replay;
pub mod stats;
pub mod wipe;

pub use fixtures::FixturesCommand;
pub use replay::ReplayCommand;
pub use stats::StatsCommand;
pub use wipe::WipeCommand;

use std::path::Path;

use attune::learner::Learner;

use crate::error::CliResult;

/// Load the learner from a state file, or start fresh when none exists.
pub(crate) fn load_learner(state_path: &Path) -> CliResult<Learner> {
    if state_path.exists() {
        let data = std::fs::read(state_path)?;
        Ok(Learner::from_json(&data)?)
    } else {
        Ok(Learner::new())
    }
}

/// Persist the learner state at full float precision.
///
/// Resume must be exact, so this writes the live state rather than the
/// rounded snapshot form used for exported checkpoints.
pub(crate) fn save_learner(state_path: &Path, learner: &Learner) -> CliResult<()> {
    if let Some(parent) = state_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(learner.state())?;
    std::fs::write(state_path, json)?;
    Ok(())
}
