use std::path::Path;

use crate::session::SessionStore;
use crate::toc::section_text;

/// Prints the page a contents entry points to, or lists the entries when no title is given.
pub fn handle_section(store: &mut SessionStore, path: &Path, title: Option<&str>) -> anyhow::Result<()> {
    let session = store.open_document(path)?;
    let Some(toc) = session.toc.as_ref() else {
        println!("No table of contents stored for {}, run `finchat toc` first.", path.display());
        return Ok(());
    };

    match title {
        Some(title) => println!("\n{}\n", section_text(&session.pages, toc, title)),
        None => {
            println!("\nSections:");
            for section in &toc.sections {
                println!("\t{:>4}  {}", section.page, section.title);
            }
        }
    }
    Ok(())
}
