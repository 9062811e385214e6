//! Launch dispatcher for the cabinet game library.
//!
//! Maps an entry's launch mechanism to the matching external invocation
//! protocol: direct process spawn for emulators, standalone games, and
//! the TeknoParrot frontend, or a URI hand-off to the owning storefront
//! client. Every attempt — success or failure — bumps the entry's play
//! statistics in the catalog.

pub mod dispatch;
pub mod spawn;

pub use dispatch::{launch, launch_by_id, LaunchFailure, LaunchOptions, LaunchReport};
pub use spawn::{ProcessSpawner, SystemSpawner};
