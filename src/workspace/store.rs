//! In-memory workspace store.
//!
//! Owns the ordered file collection and the active-file pointer. All UI
//! surfaces observe this state and mutate it exclusively through the
//! operations below; nothing else writes to the collection.

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::models::{Language, WorkspaceFile};

/// Result type for store operations that can be refused.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by workspace store operations.
///
/// Most operations are infallible by contract; only explorer-style delete
/// refuses work.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The file id does not exist in the collection.
    #[error("file not found: {0}")]
    NotFound(String),

    /// Deleting the sole remaining file is refused to keep the workspace
    /// non-empty via this path.
    #[error("cannot delete the last remaining file")]
    LastFile,
}

/// The in-memory multi-file workspace.
#[derive(Debug, Default)]
pub struct WorkspaceStore {
    files: Vec<WorkspaceFile>,
    active_file_id: Option<String>,
}

impl WorkspaceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the stock starter document, so a render
    /// path that assumes an active file always finds one at boot.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.create_file(
            "index.html",
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    <title>Hello World</title>\n</head>\n<body>\n    <h1>Hello World!</h1>\n    <p>Welcome to your code editor</p>\n</body>\n</html>",
            None,
        );
        store
    }

    /// All files in collection order.
    pub fn files(&self) -> &[WorkspaceFile] {
        &self.files
    }

    /// The current active file id, if any.
    pub fn active_file_id(&self) -> Option<&str> {
        self.active_file_id.as_deref()
    }

    /// The active file, if the pointer references an existing file.
    pub fn active_file(&self) -> Option<&WorkspaceFile> {
        let id = self.active_file_id.as_deref()?;
        self.files.iter().find(|f| f.id == id)
    }

    /// Whether a file with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.files.iter().any(|f| f.id == id)
    }

    /// Create a new file and make it active.
    ///
    /// The language is inferred from the name's extension, falling back to
    /// `language_hint` and then JavaScript. Always succeeds; duplicate names
    /// are permitted.
    pub fn create_file(
        &mut self,
        name: &str,
        content: &str,
        language_hint: Option<Language>,
    ) -> &WorkspaceFile {
        let file = WorkspaceFile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            content: content.to_string(),
            language: Language::from_file_name(name, language_hint),
            is_active: false,
        };
        debug!(file_id = %file.id, name = %file.name, language = %file.language, "creating file");
        let id = file.id.clone();
        self.files.push(file);
        self.set_active(Some(id));
        self.files.last().expect("file was just pushed")
    }

    /// Replace the content of the active file.
    ///
    /// Silent no-op when the pointer is unset or dangling; stale closures in
    /// the UI can legitimately dispatch this during transitions.
    pub fn update_active_content(&mut self, text: &str) {
        if let Some(id) = self.active_file_id.clone() {
            self.update_content(&id, text);
        }
    }

    /// Replace the content of the file with this id.
    ///
    /// Returns whether a file was found; a missing id is not an error.
    pub fn update_content(&mut self, id: &str, text: &str) -> bool {
        match self.files.iter_mut().find(|f| f.id == id) {
            Some(file) => {
                file.content = text.to_string();
                true
            }
            None => {
                debug!(file_id = %id, "update targeted a missing file, ignoring");
                false
            }
        }
    }

    /// Rename a file. The language tag is fixed at creation and not
    /// re-derived. Silent no-op on a missing id.
    pub fn rename_file(&mut self, id: &str, name: &str) {
        if let Some(file) = self.files.iter_mut().find(|f| f.id == id) {
            file.name = name.to_string();
        }
    }

    /// Set the active pointer unconditionally.
    ///
    /// Callers are responsible for passing a valid id; the API layer
    /// validates existence before dispatching.
    pub fn select_file(&mut self, id: &str) {
        self.set_active(Some(id.to_string()));
    }

    /// Remove a file with tab-close semantics.
    ///
    /// If the removed file was active and files remain, the first remaining
    /// file becomes active. Closing the last file leaves the collection
    /// empty and the pointer unset.
    pub fn close_file(&mut self, id: &str) -> StoreResult<()> {
        let index = self
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.files.remove(index);

        if self.active_file_id.as_deref() == Some(id) {
            let next = self.files.first().map(|f| f.id.clone());
            self.set_active(next);
        }
        Ok(())
    }

    /// Remove a file with explorer-delete semantics.
    ///
    /// Identical to [`close_file`](Self::close_file) except the operation is
    /// refused entirely when exactly one file remains.
    pub fn delete_file(&mut self, id: &str) -> StoreResult<()> {
        if !self.contains(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        if self.files.len() == 1 {
            return Err(StoreError::LastFile);
        }
        self.close_file(id)
    }

    fn set_active(&mut self, id: Option<String>) {
        for file in &mut self.files {
            file.is_active = id.as_deref() == Some(file.id.as_str());
        }
        self.active_file_id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> WorkspaceStore {
        let mut store = WorkspaceStore::new();
        for name in names {
            store.create_file(name, "", None);
        }
        store
    }

    #[test]
    fn test_create_infers_language_and_activates() {
        let mut store = WorkspaceStore::new();
        let id = store.create_file("a.css", "body {}", None).id.clone();
        assert_eq!(store.files().len(), 1);
        assert_eq!(store.files()[0].language, Language::Css);
        assert_eq!(store.active_file_id(), Some(id.as_str()));
        assert!(store.files()[0].is_active);
    }

    #[test]
    fn test_create_unknown_extension_falls_back() {
        let mut store = WorkspaceStore::new();
        store.create_file("a.xyz", "", None);
        assert_eq!(store.files()[0].language, Language::JavaScript);
    }

    #[test]
    fn test_create_permits_duplicate_names() {
        let mut store = store_with(&["a.js", "a.js"]);
        assert_eq!(store.files().len(), 2);
        assert_ne!(store.files()[0].id, store.files()[1].id);
        // The newest duplicate is active.
        let last = store.files()[1].id.clone();
        assert_eq!(store.active_file_id(), Some(last.as_str()));
        store.create_file("a.js", "", None);
        assert_eq!(store.files().len(), 3);
    }

    #[test]
    fn test_update_active_content() {
        let mut store = store_with(&["a.js"]);
        store.update_active_content("updated");
        assert_eq!(store.files()[0].content, "updated");
    }

    #[test]
    fn test_update_with_dangling_pointer_is_noop() {
        let mut store = store_with(&["a.js"]);
        store.select_file("does-not-exist");
        store.update_active_content("updated");
        assert_eq!(store.files()[0].content, "");
    }

    #[test]
    fn test_update_on_empty_store_is_noop() {
        let mut store = WorkspaceStore::new();
        store.update_active_content("updated");
        assert!(store.files().is_empty());
    }

    #[test]
    fn test_close_active_promotes_first_remaining() {
        let mut store = store_with(&["a.js", "b.js"]);
        let a = store.files()[0].id.clone();
        let b = store.files()[1].id.clone();
        store.select_file(&a);

        store.close_file(&a).unwrap();
        assert_eq!(store.active_file_id(), Some(b.as_str()));
        assert!(store.files()[0].is_active);
    }

    #[test]
    fn test_close_inactive_keeps_pointer() {
        let mut store = store_with(&["a.js", "b.js"]);
        let a = store.files()[0].id.clone();
        let b = store.files()[1].id.clone();
        store.select_file(&b);

        store.close_file(&a).unwrap();
        assert_eq!(store.active_file_id(), Some(b.as_str()));
    }

    #[test]
    fn test_close_last_file_leaves_empty_collection() {
        let mut store = store_with(&["a.js"]);
        let a = store.files()[0].id.clone();
        store.close_file(&a).unwrap();
        assert!(store.files().is_empty());
        assert_eq!(store.active_file_id(), None);
        assert!(store.active_file().is_none());
    }

    #[test]
    fn test_delete_last_file_is_refused() {
        let mut store = store_with(&["a.js"]);
        let a = store.files()[0].id.clone();
        assert_eq!(store.delete_file(&a), Err(StoreError::LastFile));
        assert_eq!(store.files().len(), 1);
        assert_eq!(store.active_file_id(), Some(a.as_str()));
    }

    #[test]
    fn test_delete_with_multiple_files() {
        let mut store = store_with(&["a.js", "b.js"]);
        let a = store.files()[0].id.clone();
        let b = store.files()[1].id.clone();
        store.select_file(&a);

        store.delete_file(&a).unwrap();
        assert_eq!(store.files().len(), 1);
        assert_eq!(store.active_file_id(), Some(b.as_str()));
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut store = store_with(&["a.js", "b.js"]);
        assert!(matches!(
            store.delete_file("nope"),
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.files().len(), 2);
    }

    #[test]
    fn test_active_pointer_valid_across_create_close_sequences() {
        let mut store = WorkspaceStore::new();
        let mut ids = Vec::new();
        for name in ["a.js", "b.css", "c.html", "d.md"] {
            ids.push(store.create_file(name, "", None).id.clone());
        }
        for id in ids {
            if !store.files().is_empty() {
                let active = store.active_file_id().map(str::to_string);
                assert!(active.is_some_and(|a| store.contains(&a)));
            }
            let _ = store.close_file(&id);
        }
        assert!(store.files().is_empty());
        assert_eq!(store.active_file_id(), None);
    }

    #[test]
    fn test_seeded_store_has_starter_document() {
        let store = WorkspaceStore::seeded();
        assert_eq!(store.files().len(), 1);
        let file = store.active_file().unwrap();
        assert_eq!(file.name, "index.html");
        assert_eq!(file.language, Language::Html);
        assert!(file.content.contains("Hello World"));
    }

    #[test]
    fn test_rename_keeps_language() {
        let mut store = store_with(&["a.css"]);
        let id = store.files()[0].id.clone();
        store.rename_file(&id, "b.js");
        assert_eq!(store.files()[0].name, "b.js");
        assert_eq!(store.files()[0].language, Language::Css);
    }
}
