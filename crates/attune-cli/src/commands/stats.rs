use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use attune::config::Config;

use crate::commands::load_learner;
use crate::error::CliResult;
use crate::output::{OutputFormat, format_hits, format_timestamp};

#[derive(Parser)]
pub struct StatsCommand {
    #[clap(long, help = "Show only the domain table")]
    pub domains: bool,
}

impl StatsCommand {
    pub fn execute(&self, config: &Config, format: OutputFormat) -> CliResult<()> {
        let learner = load_learner(&config.storage.state_path())?;
        let state = learner.state();

        // Present domains in curation order: hits descending, name ascending.
        let mut domains: Vec<(&String, &attune::learner::DomainMeta)> =
            state.domain_meta.iter().collect();
        domains.sort_by(|a, b| b.1.hits.total_cmp(&a.1.hits).then_with(|| a.0.cmp(b.0)));

        match format {
            OutputFormat::Json => {
                let domain_rows: Vec<serde_json::Value> = domains
                    .iter()
                    .map(|(name, dm)| {
                        serde_json::json!({
                            "name": name,
                            "hits": dm.hits,
                            "total_hits": dm.total_hits,
                            "tier": dm.tier,
                            "state": dm.state,
                            "stale_cycles": dm.stale_cycles,
                        })
                    })
                    .collect();
                let output = serde_json::json!({
                    "prompt_count": state.prompt_count,
                    "domains": domain_rows,
                    "keywords": state.keyword_hits.len(),
                    "terms": state.term_hits.len(),
                    "bigrams": state.bigrams.len(),
                    "files": state.file_hits.len(),
                    "cohit_kw_term": state.cohit_kw_term.len(),
                    "cohit_term_domain": state.cohit_term_domain.len(),
                    "blocklisted": state.keyword_blocklist.len(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!("Attune Statistics");
                println!("======================\n");

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(["Domain", "Tier", "State", "Hits", "Total", "Stale", "Created"]);

                for (name, dm) in &domains {
                    table.add_row([
                        name.as_str(),
                        &format!("{:?}", dm.tier).to_lowercase(),
                        &format!("{:?}", dm.state).to_lowercase(),
                        &format_hits(dm.hits),
                        &dm.total_hits.to_string(),
                        &dm.stale_cycles.to_string(),
                        &format_timestamp(dm.created_at),
                    ]);
                }

                println!("{table}\n");

                if !self.domains {
                    println!(
                        "Counters: {} keywords, {} terms, {} bigrams, {} files",
                        state.keyword_hits.len(),
                        state.term_hits.len(),
                        state.bigrams.len(),
                        state.file_hits.len(),
                    );
                    println!(
                        "Co-occurrence: {} keyword/term, {} term/domain",
                        state.cohit_kw_term.len(),
                        state.cohit_term_domain.len(),
                    );
                    println!(
                        "Blocklisted keywords: {}",
                        state.keyword_blocklist.len()
                    );
                    println!("Prompt count: {}", state.prompt_count);
                }
            }
        }

        Ok(())
    }
}
