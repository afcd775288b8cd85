use chrono::{LocalResult, TimeZone, Utc};

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn format_hits(hits: f64) -> String {
    format!("{hits:.4}")
}

pub fn format_timestamp(epoch_secs: i64) -> String {
    match Utc.timestamp_opt(epoch_secs, 0) {
        LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        _ => epoch_secs.to_string(),
    }
}
