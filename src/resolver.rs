//! Canonical key resolution
//!
//! Keys are `UPPER(PREFIX)` followed by one `_UPPER(SEGMENT)` per non-inline
//! nesting level. An inline field reuses its parent's key unchanged.

use crate::schema::FieldSpec;
use crate::tag::Tag;

/// Separator between key segments
pub const SEPARATOR: char = '_';

/// Outcome of resolving one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The field is excluded: not registered, not read, children not visited
    Skip,
    Key { key: String, inline: bool },
}

/// Key of the root node
pub fn root_key(prefix: &str) -> String {
    prefix.to_uppercase()
}

/// Append one segment to a parent key
pub fn child_key(parent: &str, segment: &str) -> String {
    let segment = segment.to_uppercase();
    if parent.is_empty() {
        segment
    } else {
        format!("{parent}{SEPARATOR}{segment}")
    }
}

/// Resolve the canonical key of `field` under `parent`.
///
/// Private fields and fields tagged `-` are skipped. For inline fields the
/// name token is ignored.
pub fn resolve(parent: &str, field: &FieldSpec) -> Resolution {
    if field.is_private() {
        return Resolution::Skip;
    }

    let tag = field.raw_tag().map_or(Tag::untagged(), Tag::parse);
    match tag {
        Tag::Skip => Resolution::Skip,
        Tag::Field { inline: true, .. } => Resolution::Key {
            key: parent.to_string(),
            inline: true,
        },
        Tag::Field { name, .. } => Resolution::Key {
            key: child_key(parent, name.unwrap_or(field.name())),
            inline: false,
        },
    }
}
