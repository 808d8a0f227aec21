//! minicard-core - Core library for Minicard
//!
//! This crate contains the shared models, the snapshot state store, the view
//! renderer, and the interaction handlers used by every Minicard front end.

pub mod config;
pub mod error;
pub mod export;
pub mod gradient;
pub mod host;
pub mod models;
pub mod session;
pub mod storage;
pub mod store;
pub mod util;
pub mod view;

pub use config::{Config, DropBehavior};
pub use error::{Error, Result};
pub use models::{AppState, Card, CardId, Note, NoteId, Point, Position, StylePosition};
pub use session::Session;
pub use store::StateStore;
