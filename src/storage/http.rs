use crate::board::note::{NewNote, Note, NoteId, NotePatch};
use crate::storage::NoteStore;
use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

/// Storage backed by the board's REST service.
pub struct HttpNoteStore {
    client: Client,
    base: Url,
}

impl HttpNoteStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url).with_context(|| format!("invalid server url '{base_url}'"))?;
        // `join` drops the last path segment unless the base ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("sticky-board")
            .build()?;
        Ok(Self { client, base })
    }

    pub fn notes_url(&self) -> Result<Url> {
        Ok(self.base.join("api/notes")?)
    }

    pub fn note_url(&self, id: NoteId) -> Result<Url> {
        Ok(self.base.join(&format!("api/notes/{id}"))?)
    }
}

fn ensure_success(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        bail!("{what} failed with {status}: {body}");
    }
    Ok(resp)
}

impl NoteStore for HttpNoteStore {
    fn list(&mut self) -> Result<Vec<Note>> {
        let resp = self
            .client
            .get(self.notes_url()?)
            .send()
            .context("list notes")?;
        let notes = ensure_success(resp, "list notes")?
            .json::<Vec<Note>>()
            .context("decode note list")?;
        tracing::debug!("fetched {} notes", notes.len());
        Ok(notes)
    }

    fn create(&mut self, note: &NewNote) -> Result<Note> {
        let resp = self
            .client
            .post(self.notes_url()?)
            .json(note)
            .send()
            .context("create note")?;
        ensure_success(resp, "create note")?
            .json::<Note>()
            .context("decode created note")
    }

    fn update(&mut self, id: NoteId, patch: &NotePatch) -> Result<Option<Note>> {
        let resp = self
            .client
            .put(self.note_url(id)?)
            .json(patch)
            .send()
            .with_context(|| format!("update note {id}"))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let note = ensure_success(resp, "update note")?
            .json::<Note>()
            .context("decode updated note")?;
        Ok(Some(note))
    }

    fn delete(&mut self, id: NoteId) -> Result<bool> {
        let resp = self
            .client
            .delete(self.note_url(id)?)
            .send()
            .with_context(|| format!("delete note {id}"))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        ensure_success(resp, "delete note")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_relative_to_base_path() {
        let store = HttpNoteStore::new("http://localhost:3456/board", Duration::from_secs(1)).unwrap();
        assert_eq!(store.notes_url().unwrap().as_str(), "http://localhost:3456/board/api/notes");
        assert_eq!(store.note_url(12).unwrap().as_str(), "http://localhost:3456/board/api/notes/12");
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        assert!(HttpNoteStore::new("not a url", Duration::from_secs(1)).is_err());
    }
}
