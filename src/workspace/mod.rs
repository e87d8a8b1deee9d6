//! In-memory multi-file workspace: models, store, archive export.

mod archive;
mod models;
mod store;

pub use archive::{ArchiveError, build_archive};
pub use models::{Language, WorkspaceFile};
pub use store::{StoreError, StoreResult, WorkspaceStore};
