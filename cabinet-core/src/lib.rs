//! Core data model for the cabinet game library.
//!
//! The canonical [`GameEntry`] record and its enumerations. Every other
//! crate in the workspace (scanners, catalog store, launch dispatcher)
//! depends on this one and nothing else in the workspace.

pub mod entry;

pub use entry::{ArcadeGameKind, CompletionStatus, GameEntry, LaunchMechanism};
