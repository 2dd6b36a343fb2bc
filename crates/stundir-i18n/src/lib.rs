//! Locale resolution core shared by the request-handling path and the
//! navigation helpers.
//!
//! Layout: `locale.rs` (identifiers and the immutable registry), `resolve.rs`
//! (the pure routing decision), `nav.rs` (href construction and prefix
//! stripping), `messages.rs` (translation bundles).

pub mod locale;
pub mod messages;
pub mod nav;
pub mod resolve;

pub use locale::{LocaleError, LocaleId, LocaleRegistry, LocaleResult};
pub use messages::{MessageBundle, MessageCatalog};
pub use nav::{Navigator, href_for, logical_route};
pub use resolve::{ResolutionOutcome, RoutingPolicy, resolve, route_request};
