use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::session::{Session, SessionStore};
use crate::trends::{frequency_table, trend};
use crate::Config;

pub fn export_to_excel(store: &mut SessionStore, config: &Config, report: &Path, path: PathBuf) -> anyhow::Result<()> {
    let session = store.open_document(report)?;
    let mut workbook = build_workbook(session, config.trend_chunks)?;
    workbook.save(&path)?;
    println!("Exported {} to {}", report.display(), path.display());
    Ok(())
}

fn build_workbook(session: &Session, trend_chunks: usize) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center);

    let toc = session.toc.clone().unwrap_or_default();

    let sheet = workbook.add_worksheet().set_name("Contents")?;
    write_header(sheet, &["Section", "Page"], &header_format)?;
    for (i, section) in toc.sections.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &section.title)?;
        sheet.write_number(row, 1, section.page as f64)?;
    }
    sheet.autofit();

    let sheet = workbook.add_worksheet().set_name("Candidates")?;
    write_header(sheet, &["Section", "Reported Page"], &header_format)?;
    for (i, candidate) in toc.candidates.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &candidate.section_title)?;
        sheet.write_number(row, 1, candidate.reported_page as f64)?;
    }
    sheet.autofit();

    let sheet = workbook.add_worksheet().set_name("Trends")?;
    write_header(sheet, &["Keyword", "Total Frequency"], &header_format)?;
    let trends = trend(&session.pages, session.tracked.keywords(), trend_chunks);
    for (i, (keyword, total)) in frequency_table(&trends).iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, keyword)?;
        sheet.write_number(row, 1, *total as f64)?;
    }
    sheet.autofit();

    let sheet = workbook.add_worksheet().set_name("Q&A")?;
    write_header(sheet, &["Question", "Answer", "Pages", "Asked At"], &header_format)?;
    for (i, qa) in session.history.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &qa.question)?;
        sheet.write_string(row, 1, &qa.answer)?;
        sheet.write_string(row, 2, &format!("{}-{}", qa.start_page, qa.end_page))?;
        sheet.write_string(row, 3, &qa.asked_at.to_rfc3339())?;
    }
    sheet.autofit();

    Ok(workbook)
}

fn write_header(sheet: &mut Worksheet, titles: &[&str], format: &Format) -> Result<(), XlsxError> {
    for (col, title) in titles.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, format)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::toc::{StructuredSection, TocResult};

    #[test]
    fn test_export_writes_workbook() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let report = dir.path().join("report.txt");
        fs::write(&report, "Revenue grew.\x0cRevenue fell.")?;
        let mut store = SessionStore::open(&dir.path().join("sessions"))?;
        {
            let session = store.open_document(&report)?;
            session.toc = Some(TocResult {
                candidates: Vec::new(),
                sections: vec![StructuredSection { title: "Overview".to_string(), page: 2 }],
            });
            session.tracked.add("revenue");
            session.record_answer("Trend?", "Mixed.", 1, 2);
        }

        let output = dir.path().join("report.xlsx");
        let config = crate::read_config()?;
        export_to_excel(&mut store, &config, &report, output.clone())?;
        assert!(fs::metadata(&output)?.len() > 0);
        Ok(())
    }
}
