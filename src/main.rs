use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use handler::Cli;
use serde::{Deserialize, Serialize};

mod answer;
mod chat;
mod document;
mod error;
mod handler;
mod session;
mod toc;
mod trends;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
    let config = read_config()?;
    let args = Cli::parse();
    handler::handler(args, config).await?;
    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    // Completion service
    chat_url: String,
    api_key: String,
    structure_model: String,
    answer_model: String,
    temperature: f32,
    request_timeout_secs: u64,
    max_retries: u32,
    retry_backoff_ms: u64,

    // Table of contents
    toc_threshold: usize,
    keywords_path: PathBuf,

    // Sessions
    session_dir: PathBuf,

    // Pages read for a question asked together with `toc`
    default_start_page: usize,
    default_end_page: usize,

    // Trends
    trend_chunks: usize,
}

fn read_config() -> anyhow::Result<Config> {
    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    Ok(config::Config::builder()
        .set_default("chat_url", "https://api.openai.com/v1/chat/completions")?
        .set_default("api_key", api_key)?
        .set_default("structure_model", "gpt-3.5-turbo")?
        .set_default("answer_model", "gpt-4")?
        .set_default("temperature", 0.2)?
        .set_default("request_timeout_secs", 30_i64)?
        .set_default("max_retries", 1_i64)?
        .set_default("retry_backoff_ms", 500_i64)?
        .set_default("toc_threshold", toc::DEFAULT_THRESHOLD as i64)?
        .set_default("keywords_path", "goldstandard_keywordlist.txt")?
        .set_default("session_dir", ".finchat")?
        .set_default("default_start_page", 1_i64)?
        .set_default("default_end_page", 10_i64)?
        .set_default("trend_chunks", 100_i64)?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("FINCHAT").try_parsing(true))
        .build()?
        .try_deserialize::<Config>()?)
}
