//! Depth-first walk over a configuration schema.
//!
//! Only leaf keys are registered; a nested struct never reads a variable by
//! itself, its descendants do.

use crate::coerce;
use crate::error::{LoadError, Result};
use crate::registry::KeyRegistry;
use crate::resolver::{self, Resolution};
use crate::schema::{EnvConfig, EnvField, FieldSpec, Leaf, Slot};
use crate::source::Lookup;
use tracing::trace;

/// Visitor handed to [`EnvConfig::walk`] for one struct node
pub struct Walker<'a> {
    key: String,
    source: &'a dyn Lookup,
    registry: &'a mut KeyRegistry,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(key: String, source: &'a dyn Lookup, registry: &'a mut KeyRegistry) -> Self {
        Self {
            key,
            source,
            registry,
        }
    }

    /// Canonical key of the struct being walked
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load one field.
    pub fn field<F: EnvField + ?Sized>(&mut self, spec: FieldSpec, value: &mut F) -> Result<()> {
        let (key, inline) = match resolver::resolve(&self.key, &spec) {
            Resolution::Skip => {
                self.skip(spec);
                return Ok(());
            }
            Resolution::Key { key, inline } => (key, inline),
        };

        match value.slot() {
            Slot::Node(node) => self.descend(key, node),
            Slot::Leaf(_) if inline => Err(LoadError::InlineOnLeaf {
                key,
                field: spec.name(),
            }),
            Slot::Leaf(leaf) => self.leaf(key, leaf),
        }
    }

    /// Record a field that is not loaded.
    pub fn skip(&mut self, spec: FieldSpec) {
        trace!(
            parent = %self.key,
            field = spec.name(),
            private = spec.is_private(),
            "skipping field"
        );
    }

    fn descend(&mut self, key: String, node: &mut dyn EnvConfig) -> Result<()> {
        trace!(key = %key, "entering nested configuration");
        let mut child = Walker::new(key, self.source, &mut *self.registry);
        node.walk(&mut child)
    }

    fn leaf(&mut self, key: String, leaf: Leaf<'_>) -> Result<()> {
        self.registry.register(&key)?;
        let present = coerce::load_leaf(&key, leaf, self.source)?;
        if present {
            self.registry.mark_present(&key);
        }
        trace!(key = %key, present, "resolved environment variable");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MapEnv;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct Pool {
        size: u32,
        idle: Duration,
    }

    impl EnvConfig for Pool {
        fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
            walker.field(FieldSpec::new("size"), &mut self.size)?;
            walker.field(FieldSpec::new("idle").tag("idle_timeout"), &mut self.idle)?;
            Ok(())
        }
    }

    impl EnvField for Pool {
        fn slot(&mut self) -> Slot<'_> {
            Slot::Node(self)
        }
    }

    #[derive(Debug, Default)]
    struct Database {
        url: String,
        pool: Pool,
        shared: Pool,
        secret: String,
    }

    impl EnvConfig for Database {
        fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
            walker.field(FieldSpec::new("url"), &mut self.url)?;
            walker.field(FieldSpec::new("pool"), &mut self.pool)?;
            walker.field(FieldSpec::new("shared").tag("x,inline"), &mut self.shared)?;
            walker.field(FieldSpec::new("secret").private(), &mut self.secret)?;
            Ok(())
        }
    }

    fn walk(prefix: &str, env: &MapEnv, target: &mut dyn EnvConfig) -> Result<KeyRegistry> {
        let mut registry = KeyRegistry::new();
        let mut walker = Walker::new(prefix.to_string(), env, &mut registry);
        target.walk(&mut walker)?;
        Ok(registry)
    }

    #[test]
    fn test_walks_nested_and_inline() {
        let env: MapEnv = [
            ("DB_URL", "postgres://localhost"),
            ("DB_POOL_SIZE", "8"),
            ("DB_POOL_IDLE_TIMEOUT", "30s"),
            ("DB_SIZE", "2"),
            ("DB_SECRET", "hunter2"),
        ]
        .into_iter()
        .collect();

        let mut db = Database::default();
        let registry = walk("DB", &env, &mut db).unwrap();

        assert_eq!(db.url, "postgres://localhost");
        assert_eq!(db.pool.size, 8);
        assert_eq!(db.pool.idle, Duration::from_secs(30));
        assert_eq!(db.shared.size, 2);
        assert_eq!(db.secret, "");

        let report = registry.snapshot();
        assert_eq!(
            report.keys().collect::<Vec<_>>(),
            vec![
                "DB_IDLE_TIMEOUT",
                "DB_POOL_IDLE_TIMEOUT",
                "DB_POOL_SIZE",
                "DB_SIZE",
                "DB_URL"
            ]
        );
        assert!(!report.is_set("DB_IDLE_TIMEOUT"));
        // nested nodes are never registered themselves
        assert!(!report.contains("DB_POOL"));
    }

    #[test]
    fn test_inline_leaf_is_rejected() {
        struct Bad {
            value: String,
        }
        impl EnvConfig for Bad {
            fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
                walker.field(FieldSpec::new("value").tag(",inline"), &mut self.value)
            }
        }

        let mut bad = Bad {
            value: String::new(),
        };
        let err = walk("TEST", &MapEnv::new(), &mut bad).unwrap_err();
        assert_eq!(
            err,
            LoadError::InlineOnLeaf {
                key: "TEST".into(),
                field: "value"
            }
        );
    }

    #[test]
    fn test_walker_key_tracks_nesting() {
        struct Probe {
            seen: Vec<String>,
        }
        impl EnvConfig for Probe {
            fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
                self.seen.push(walker.key().to_string());
                Ok(())
            }
        }
        impl EnvField for Probe {
            fn slot(&mut self) -> Slot<'_> {
                Slot::Node(self)
            }
        }
        struct Root {
            named: Probe,
            inline: Probe,
        }
        impl EnvConfig for Root {
            fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
                walker.field(FieldSpec::new("named"), &mut self.named)?;
                walker.field(FieldSpec::new("inline").tag(",inline"), &mut self.inline)
            }
        }

        let mut root = Root {
            named: Probe { seen: Vec::new() },
            inline: Probe { seen: Vec::new() },
        };
        walk("APP", &MapEnv::new(), &mut root).unwrap();
        assert_eq!(root.named.seen, vec!["APP_NAMED"]);
        assert_eq!(root.inline.seen, vec!["APP"]);
    }
}
