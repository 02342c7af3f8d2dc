//! Typed configuration from environment variables
//!
//! envconf fills a configuration struct from the process environment in one
//! synchronous pass, deriving every variable name from a prefix and the field path.
//!
//! ## Naming
//!
//! ```text
//! UPPER(prefix) [ "_" UPPER(segment) ]*
//! ```
//!
//! One segment per nesting level. The segment is the tag name, or the field name
//! when the tag has none. Fields tagged `",inline"` add no segment.
//!
//! ## Tags
//!
//! - `#[env("db")]` - read `PREFIX_..._DB`
//! - `#[env(",inline")]` - splice a nested struct into the parent's namespace
//! - `#[env("-")]` - never load this field
//!
//! Fields that are not `pub` are never loaded.
//!
//! ## Supported types
//!
//! `String`, signed and unsigned integers of every width, `bool`
//! (`true`/`false`/`1`/`0`, any case), `std::time::Duration` (`"10m"`, `"1h30s"`),
//! `Vec<String>` (comma separated, trimmed, empty pieces dropped) and nested
//! `#[derive(EnvConfig)]` structs.
//!
//! Absent variables leave fields untouched. Malformed values, duplicated keys and
//! unsupported field types abort the load with a [`LoadError`].
//!
//! ## Example
//!
//! ```rust
//! use envconf::{EnvConfig, Loader, MapEnv};
//!
//! #[derive(Debug, Default, EnvConfig)]
//! pub struct MongoConfig {
//!     #[env("nodes")]
//!     pub nodes: String,
//!     #[env("port")]
//!     pub port: i32,
//! }
//!
//! #[derive(Debug, Default, EnvConfig)]
//! pub struct Config {
//!     #[env("mongo")]
//!     pub mongo: MongoConfig,
//!     #[env("replicas")]
//!     pub replicas: u32,
//! }
//!
//! let env: MapEnv = [("TEST_MONGO_PORT", "332"), ("TEST_REPLICAS", "3")]
//!     .into_iter()
//!     .collect();
//!
//! let mut config = Config::default();
//! let report = Loader::new("test").source(env).load(&mut config).unwrap();
//!
//! assert_eq!(config.mongo.port, 332);
//! assert_eq!(config.replicas, 3);
//! assert_eq!(report.get("TEST_MONGO_NODES"), Some(false));
//! ```

// Lets the derive's `::envconf` paths resolve inside this crate
extern crate self as envconf;

pub mod coerce;
pub mod error;
pub mod loader;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod schema;
pub mod source;
pub mod tag;
pub mod walker;

// Re-export main types
pub use envconf_macros::EnvConfig;
pub use error::{LoadError, Result};
pub use loader::{Loader, load};
pub use registry::{KeyRegistry, LoadReport};
pub use schema::{EnvConfig, EnvField, FieldSpec, Leaf, SignedSlot, Slot, UnsignedSlot, ValueKind};
pub use source::{Lookup, MapEnv, ProcessEnv};
pub use walker::Walker;
