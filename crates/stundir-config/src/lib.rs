#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Static process configuration for the Stundir services.
//!
//! Layout: `model.rs` (typed settings models), `loader.rs` (environment and
//! settings-file loading), `error.rs` (structured errors). Settings are read
//! once at startup; nothing re-reads the environment per request.

pub mod error;
pub mod loader;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ENV_SETTINGS_FILE, load_settings, load_settings_with};
pub use model::{AppProfile, AppSettings, LocaleSettings};
