use std::path::{Path, PathBuf};

use anyhow::Context;

use super::document::collect_reports;
use crate::answer::answer;
use crate::chat::{Completion, ModelSettings};
use crate::session::SessionStore;
use crate::toc::{build_toc, find_toc_page, Keywords, TocResult};
use crate::Config;

pub async fn handle_toc(
    store: &mut SessionStore,
    client: &dyn Completion,
    settings: &ModelSettings,
    config: &Config,
    path: PathBuf,
    recursive: bool,
    question: Option<String>,
) -> anyhow::Result<()> {
    let keywords = Keywords::load(&config.keywords_path)
        .with_context(|| "Gold keyword list is required to locate the table of contents")?;

    if keywords.is_empty() {
        log::warn!("Gold keyword list {} is empty, no page can qualify", config.keywords_path.display());
    }

    let is_batch = path.is_dir();
    let reports = collect_reports(&path, recursive);
    if reports.is_empty() {
        println!("No PDF or TXT reports found in {}", path.display());
    }

    for report in reports {
        println!("Processing {}", report.display());
        match process_report(store, client, settings, config, &keywords, &report, question.as_deref()).await {
            Ok(()) => {}
            // a directory run reports per-file failures and continues
            Err(err) if is_batch => {
                println!("Failed to process {}: {:#}", report.display(), err);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

async fn process_report(
    store: &mut SessionStore,
    client: &dyn Completion,
    settings: &ModelSettings,
    config: &Config,
    keywords: &Keywords,
    report: &Path,
    question: Option<&str>,
) -> anyhow::Result<()> {
    let session = store.open_document(report)?;
    let id = session.id.clone();
    if session.pages.is_empty() {
        println!("No text could be extracted.");
        return Ok(());
    }

    let Some(toc_page) = find_toc_page(&session.pages, keywords, config.toc_threshold) else {
        println!("No table of contents found.");
        return Ok(());
    };

    let result = match build_toc(client, settings, &session.pages, toc_page, keywords).await {
        Ok(result) => result,
        Err(err) => {
            println!("Contents found on page {} but could not be structured: {}", toc_page, err);
            return Ok(());
        }
    };
    print_toc(toc_page, &result);
    session.toc = Some(result);

    match question {
        Some(question) => {
            let (start, end) = (config.default_start_page, config.default_end_page);
            match answer(client, settings, &session.pages, start, end, question).await {
                Ok(reply) => {
                    println!("\n{}\n", reply);
                    session.record_answer(question, &reply, start, end);
                }
                Err(err) => println!("Could not answer the question: {}", err),
            }
        }
        None => println!("Structure extracted. No question was asked."),
    }

    store.save(&id)?;
    Ok(())
}

fn print_toc(toc_page: usize, result: &TocResult) {
    println!("\nTable of contents (page {}):", toc_page);
    for section in &result.sections {
        println!("\t{:>4}  {}", section.page, section.title);
    }
    if !result.candidates.is_empty() {
        println!("\nMatched contents lines:");
        for candidate in &result.candidates {
            println!("\t{:>4}  {}", candidate.reported_page, candidate.section_title);
        }
    }
}
