//! codedeck: backend core for a browser-based code editor shell.
//!
//! Two cooperating units form the core: the [`workspace`] store, which owns
//! the ordered in-memory file collection and its edit/lifecycle invariants,
//! and the [`gateway`], which turns natural-language instructions into a
//! single applied code change via an external generative text endpoint. The
//! [`api`] module exposes both to the presentational collaborators over
//! HTTP.

pub mod api;
pub mod config;
pub mod gateway;
pub mod workspace;
