use std::fs;
use std::path::Path;

use anyhow::Context;

use super::TrendAction;
use crate::document::text::decode_ignoring_errors;
use crate::session::SessionStore;
use crate::trends::{frequency_table, trend};
use crate::Config;

pub fn handle_trends(
    store: &mut SessionStore,
    config: &Config,
    path: &Path,
    action: TrendAction,
) -> anyhow::Result<()> {
    let session = store.open_document(path)?;
    let id = session.id.clone();
    let tracked = &mut session.tracked;

    match action {
        TrendAction::Add { keyword } => {
            if tracked.add(&keyword) {
                println!("Added keyword: {}", keyword.trim().to_lowercase());
            } else {
                println!("Keyword '{}' is blank or already tracked.", keyword);
            }
        }
        TrendAction::Remove { keyword } => {
            if tracked.remove(&keyword) {
                println!("Removed keyword: {}", keyword);
            } else {
                println!("Keyword '{}' not found.", keyword);
            }
        }
        TrendAction::Clear => {
            tracked.clear();
            println!("Cleared all keywords.");
        }
        TrendAction::Import { file } => {
            let bytes = fs::read(&file).with_context(|| format!("Cannot read {}", file.display()))?;
            let added = tracked.import(&decode_ignoring_errors(&bytes));
            println!("Added {} words.", added);
        }
        TrendAction::Show => {
            if tracked.is_empty() {
                println!("No keywords tracked.");
            } else {
                let trends = trend(&session.pages, tracked.keywords(), config.trend_chunks);
                println!("\n{:<24}{:>16}", "Keyword", "Total Frequency");
                for (keyword, total) in frequency_table(&trends) {
                    println!("{:<24}{:>16}", keyword, total);
                }
                println!("\nPer-chunk counts ({} chunks):", config.trend_chunks);
                for t in &trends {
                    let counts: Vec<String> = t.counts.iter().map(usize::to_string).collect();
                    println!("{}: {}", t.keyword, counts.join(" "));
                }
            }
        }
    }

    store.save(&id)?;
    Ok(())
}
