//! Source scanners for the cabinet game library.
//!
//! Each external source (Steam, GOG Galaxy, Epic Games Launcher,
//! TeknoParrot) gets one self-contained [`GameSource`] implementation
//! that turns the source's native descriptors into canonical
//! [`cabinet_core::GameEntry`] records. Detection never fails loudly:
//! an absent source reports unavailable, and a malformed record is
//! logged and skipped while the rest of the scan continues.
//!
//! External lookups (registry-like stores, install roots, app-data
//! directories) are injected through [`kv::KeyValueView`] and
//! constructor parameters, so every scanner runs against a fake
//! environment in tests.

pub mod epic;
pub mod gog;
pub mod kv;
pub mod ledger;
pub mod profile;
pub mod source;
pub mod steam;
pub mod teknoparrot;

pub use epic::EpicScanner;
pub use gog::GogScanner;
pub use kv::{EmptyKeyValueView, KeyValueView, StaticKeyValueView};
pub use profile::{parse_profile, validate_profile, write_profile, GameProfile, ProfileError};
pub use source::{dedup_first_wins, scan_all, GameSource, ScanSummary};
pub use steam::SteamScanner;
pub use teknoparrot::TeknoParrotScanner;
