use std::path::{Path, PathBuf};

use walkdir::DirEntry;

use crate::document::{is_supported, DocumentId};
use crate::session::SessionStore;

/// Reports to process: the file itself, or every PDF/TXT under a directory.
pub fn collect_reports(path: &Path, recursive: bool) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    let mut reports = Vec::new();
    for entry in get_entries(path, recursive) {
        let entry_path = entry.path();
        if !entry_path.is_file() {
            continue;
        }
        if is_supported(entry_path) {
            reports.push(entry_path.to_path_buf());
        } else {
            log::warn!("Skipping unsupported file: {}", entry_path.display());
        }
    }
    reports.sort();
    reports
}

fn get_entries(path: &Path, recursive: bool) -> Box<dyn Iterator<Item = DirEntry>> {
    let iter = if recursive {
        walkdir::WalkDir::new(path)
    } else {
        walkdir::WalkDir::new(path).max_depth(1)
    };
    Box::new(iter.into_iter().filter_map(|e| e.ok()))
}

pub fn list_documents(store: &SessionStore) -> anyhow::Result<()> {
    let sessions = store.list()?;
    println!("\nCached documents:");
    for session in sessions {
        let sections = session.toc.as_ref().map_or(0, |toc| toc.sections.len());
        println!(
            "\t{}  {} ({} pages, {} sections, {} questions)",
            session.id.short(),
            session.source.display(),
            session.pages.len(),
            sections,
            session.history.len(),
        );
    }
    Ok(())
}

/// Returns whether a cached document was actually removed.
pub fn remove_document(store: &mut SessionStore, id: &str) -> anyhow::Result<bool> {
    let id = resolve_id(store, id)?;
    let source = store.get(&id)?.map(|s| s.source.display().to_string()).unwrap_or_default();
    let removed = store.remove(&id)?;
    if removed {
        println!("Removed {} {}", id.short(), source);
    } else {
        println!("Document {} not found.", id.short());
    }
    Ok(removed)
}

pub fn clean_documents(store: &mut SessionStore) -> anyhow::Result<()> {
    let removed = store.clean()?;
    println!("Removed {} cached documents", removed);
    Ok(())
}

/// Accepts a full id or the short prefix printed by `doc list`.
fn resolve_id(store: &SessionStore, id: &str) -> anyhow::Result<DocumentId> {
    if let Ok(id) = DocumentId::parse(id) {
        return Ok(id);
    }
    let mut matches = store
        .list()?
        .into_iter()
        .map(|s| s.id)
        .filter(|known| known.as_str().starts_with(&id.to_ascii_lowercase()));
    match (matches.next(), matches.next()) {
        (Some(found), None) => Ok(found),
        (Some(_), Some(_)) => anyhow::bail!("Ambiguous document id: {}", id),
        (None, _) => anyhow::bail!("No cached document with id {}", id),
    }
}
