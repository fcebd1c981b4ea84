//! Pain record data model shared by the viewer and its tooling.
//!
//! A record maps calendar days ([`DateKey`]) to the [`Severity`] of each
//! body part recorded that day. It is sparse: a part without an entry has no
//! pain, and a day without entries is absent.

pub mod date_key;
pub mod error;
pub mod severity;
pub mod store;

pub use date_key::DateKey;
pub use error::{PainError, Result};
pub use severity::Severity;
pub use store::{DayRecord, PainStore, PartName};

/// Key under which the serialized record is kept in persistent storage.
pub const STORAGE_KEY: &str = "muscle-pain-data";
