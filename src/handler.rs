use std::path::PathBuf;

use clap::{command, Parser, Subcommand};

use crate::chat::{ChatClient, ModelSettings};
use crate::session::SessionStore;
use crate::Config;

mod ask;
mod document;
mod toc;
mod section;
mod trends;
mod write;

#[derive(Parser)]
#[command(name = "finchat")]
#[command(about = "Table of contents extraction and question answering for annual reports", version = "1.0")]
pub enum Cli {
    /// Locate and structure the table of contents of a report
    Toc {
        #[arg(help = "PDF/TXT file or directory")]
        path: PathBuf,

        #[arg(short, long, help = "Process sub-directories")]
        recursive: bool,

        #[arg(short, long, help = "Question answered from the first pages once the contents are found")]
        question: Option<String>,
    },

    /// Ask a question about a page range of a report
    Ask {
        path: PathBuf,

        #[arg(long, default_value_t = 1)]
        start: usize,

        #[arg(long, default_value_t = 5)]
        end: usize,

        question: String,
    },

    /// Show the page a contents entry points to
    Section {
        path: PathBuf,

        #[arg(help = "Section title as listed in the contents; omit to list them")]
        title: Option<String>,
    },

    /// Track keyword frequency across a report
    Trends {
        path: PathBuf,

        #[command(subcommand)]
        action: TrendAction,
    },

    /// Export contents, trends and Q&A history to Excel
    Write {
        path: PathBuf,

        #[arg(short, long, help = "Output .xlsx path")]
        output: PathBuf,
    },

    /// Manage cached documents
    #[command(subcommand)]
    Doc(DocCommand),
}

#[derive(Subcommand)]
pub enum TrendAction {
    Add { keyword: String },
    Remove { keyword: String },
    Clear,
    /// Track every word of a text file
    Import { file: PathBuf },
    Show,
}

#[derive(Parser)]
pub enum DocCommand {
    List,

    Remove {
        #[arg(help = "Document id")]
        id: String,
    },

    Clean,
}

pub async fn handler(args: Cli, config: Config) -> anyhow::Result<()> {
    let mut store = SessionStore::open(&config.session_dir)?;
    let settings = ModelSettings::from_config(&config);

    match args {
        Cli::Toc { path, recursive, question } => {
            let client = ChatClient::from_config(&config)?;
            toc::handle_toc(&mut store, &client, &settings, &config, path, recursive, question).await
        }
        Cli::Ask { path, start, end, question } => {
            let client = ChatClient::from_config(&config)?;
            ask::handle_ask(&mut store, &client, &settings, &path, start, end, &question).await
        }
        Cli::Section { path, title } => section::handle_section(&mut store, &path, title.as_deref()),
        Cli::Trends { path, action } => trends::handle_trends(&mut store, &config, &path, action),
        Cli::Write { path, output } => write::export_to_excel(&mut store, &config, &path, output),
        Cli::Doc(cmd) => handle_doc_command(&mut store, cmd),
    }
}

fn handle_doc_command(store: &mut SessionStore, cmd: DocCommand) -> anyhow::Result<()> {
    use document::*;

    match cmd {
        DocCommand::List => list_documents(store),
        DocCommand::Remove { id } => remove_document(store, &id).map(|_| ()),
        DocCommand::Clean => clean_documents(store),
    }
}
