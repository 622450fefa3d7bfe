use std::path::Path;

use crate::answer::answer;
use crate::chat::{Completion, ModelSettings};
use crate::error::Error;
use crate::session::SessionStore;

pub async fn handle_ask(
    store: &mut SessionStore,
    client: &dyn Completion,
    settings: &ModelSettings,
    path: &Path,
    start: usize,
    end: usize,
    question: &str,
) -> anyhow::Result<()> {
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("Question must not be empty");
    }

    let session = store.open_document(path)?;
    let id = session.id.clone();

    match answer(client, settings, &session.pages, start, end, question).await {
        Ok(reply) => {
            println!("\n{}\n", reply);
            session.record_answer(question, &reply, start, end);
            store.save(&id)?;
            Ok(())
        }
        Err(Error::Completion(message)) => {
            println!("The answering service is unavailable, please try again later ({})", message);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::chat::stub::{FixedReply, Unavailable};

    #[tokio::test]
    async fn test_answer_is_recorded_per_document() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let report = dir.path().join("report.txt");
        fs::write(&report, "Cover\x0cRevenue rose.")?;
        let mut store = SessionStore::open(&dir.path().join("sessions"))?;
        let stub = FixedReply::new("It rose.");

        handle_ask(&mut store, &stub, &ModelSettings::default(), &report, 2, 2, "Revenue?").await?;

        let session = store.open_document(&report)?;
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].answer, "It rose.");
        assert!(stub.last_prompt().unwrap().ends_with("Revenue rose."));
        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_service_is_not_fatal() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let report = dir.path().join("report.txt");
        fs::write(&report, "text")?;
        let mut store = SessionStore::open(&dir.path().join("sessions"))?;

        handle_ask(&mut store, &Unavailable, &ModelSettings::default(), &report, 1, 1, "q").await?;
        assert!(store.open_document(&report)?.history.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_start_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let report = dir.path().join("report.txt");
        fs::write(&report, "text")?;
        let mut store = SessionStore::open(&dir.path().join("sessions"))?;
        let stub = FixedReply::new("unused");

        let result = handle_ask(&mut store, &stub, &ModelSettings::default(), &report, 0, 1, "q").await;
        assert!(result.is_err());
        Ok(())
    }
}
