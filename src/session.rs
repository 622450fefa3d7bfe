//! Per-document state, stored one JSON file per document id.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::document::{self, DocumentId, DocumentPages};
use crate::error::{Error, Result};
use crate::toc::TocResult;
use crate::trends::KeywordTracker;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    pub answer: String,
    pub start_page: usize,
    pub end_page: usize,
    pub asked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: DocumentId,
    pub source: PathBuf,
    pub pages: DocumentPages,
    pub toc: Option<TocResult>,
    #[serde(default)]
    pub tracked: KeywordTracker,
    #[serde(default)]
    pub history: Vec<QaRecord>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: DocumentId, source: PathBuf, pages: DocumentPages) -> Self {
        Self {
            id,
            source,
            pages,
            toc: None,
            tracked: KeywordTracker::default(),
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn record_answer(&mut self, question: &str, answer: &str, start_page: usize, end_page: usize) {
        self.history.push(QaRecord {
            question: question.to_string(),
            answer: answer.to_string(),
            start_page,
            end_page,
            asked_at: Utc::now(),
        });
    }
}

pub struct SessionStore {
    dir: PathBuf,
    sessions: HashMap<DocumentId, Session>,
}

impl SessionStore {
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            sessions: HashMap::new(),
        })
    }

    fn path_for(&self, id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn read(&self, id: &DocumentId) -> Result<Option<Session>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let session = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Session(format!("Corrupt session file {}: {}", path.display(), e)))?;
        Ok(Some(session))
    }

    /// Brings a stored session into memory; false when none exists.
    fn load(&mut self, id: &DocumentId) -> Result<bool> {
        if self.sessions.contains_key(id) {
            return Ok(true);
        }
        match self.read(id)? {
            Some(session) => {
                self.sessions.insert(id.clone(), session);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn get(&mut self, id: &DocumentId) -> Result<Option<&Session>> {
        self.load(id)?;
        Ok(self.sessions.get(id))
    }

    pub fn insert(&mut self, session: Session) -> Result<()> {
        let id = session.id.clone();
        self.sessions.insert(id.clone(), session);
        self.save(&id)
    }

    pub fn save(&self, id: &DocumentId) -> Result<()> {
        let session = self
            .sessions
            .get(id)
            .ok_or_else(|| Error::Session(format!("No session loaded for {}", id)))?;
        let json = serde_json::to_vec(session)
            .map_err(|e| Error::Session(format!("Cannot serialize session {}: {}", id, e)))?;
        fs::write(self.path_for(id), json)?;
        debug!("Saved session {}", id.short());
        Ok(())
    }

    /// Returns the session for the document at `path`, extracting its text only
    /// when no session exists for that content yet.
    pub fn open_document(&mut self, path: &Path) -> Result<&mut Session> {
        let (id, bytes) = document::identify(path)?;
        if self.load(&id)? {
            info!("Reusing cached text of {} (session {})", path.display(), id.short());
        } else {
            let pages = document::extract(path, &bytes)?;
            self.insert(Session::new(id.clone(), path.to_path_buf(), pages))?;
        }
        self.sessions
            .get_mut(&id)
            .ok_or_else(|| Error::Session(format!("Session {} vanished", id)))
    }

    pub fn remove(&mut self, id: &DocumentId) -> Result<bool> {
        self.sessions.remove(id);
        let path = self.path_for(id);
        if path.exists() {
            fs::remove_file(path)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn list(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| DocumentId::parse(s).ok())
            else {
                continue;
            };
            if let Some(session) = self.read(&id)? {
                sessions.push(session);
            }
        }
        sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(sessions)
    }

    pub fn clean(&mut self) -> Result<usize> {
        let ids: Vec<DocumentId> = self.list()?.into_iter().map(|s| s.id).collect();
        for id in &ids {
            self.remove(id)?;
        }
        Ok(ids.len())
    }
}
