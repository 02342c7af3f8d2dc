//! Load entry point
//!
//! One call performs one synchronous depth-first pass over the target. The key
//! registry and the report are created per call; nothing survives between loads.

use crate::error::Result;
use crate::registry::{KeyRegistry, LoadReport};
use crate::resolver;
use crate::schema::EnvConfig;
use crate::source::{Lookup, ProcessEnv};
use crate::walker::Walker;
use tracing::debug;

type Reporter<'a> = Box<dyn FnOnce(&LoadReport) + 'a>;

/// Load `target` from the process environment using `prefix`.
///
/// Shorthand for `Loader::new(prefix).load(target)`.
pub fn load<T: EnvConfig + ?Sized>(prefix: &str, target: &mut T) -> Result<LoadReport> {
    Loader::new(prefix).load(target)
}

/// Configurable loader.
///
/// Options apply in the order they are set; setting the same option twice
/// keeps the last value.
///
/// # Example
/// ```ignore
/// let report = Loader::new("app")
///     .reporter(report::json_writer(std::io::stderr()))
///     .load(&mut config)?;
/// ```
pub struct Loader<'a> {
    prefix: String,
    source: Box<dyn Lookup + 'a>,
    reporter: Option<Reporter<'a>>,
}

impl<'a> Loader<'a> {
    /// Create a loader reading the process environment with no reporter.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            source: Box::new(ProcessEnv),
            reporter: None,
        }
    }

    /// Call `reporter` with the load report after a successful load.
    ///
    /// The reporter is never called when the load fails.
    pub fn reporter(mut self, reporter: impl FnOnce(&LoadReport) + 'a) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Read variables from `source` instead of the process environment.
    pub fn source(mut self, source: impl Lookup + 'a) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Populate `target` and return which variables were consulted.
    ///
    /// Fields whose variable is absent keep their current value. On error the
    /// target may be partially populated and must not be used.
    pub fn load<T: EnvConfig + ?Sized>(self, target: &mut T) -> Result<LoadReport> {
        let root = resolver::root_key(&self.prefix);
        debug!(prefix = %root, "loading configuration from environment");

        let mut registry = KeyRegistry::new();
        let mut walker = Walker::new(root, &*self.source, &mut registry);
        target
            .walk(&mut walker)
            .inspect_err(|e| debug!(error = %e, "configuration load aborted"))?;

        let report = registry.snapshot();
        debug!(
            keys = report.len(),
            set = report.set_keys().count(),
            "configuration loaded from environment"
        );

        if let Some(reporter) = self.reporter {
            reporter(&report);
        }
        Ok(report)
    }
}

impl std::fmt::Debug for Loader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("prefix", &self.prefix)
            .field("reporter", &self.reporter.is_some())
            .finish_non_exhaustive()
    }
}
