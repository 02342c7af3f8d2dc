//! Field tag grammar
//!
//! A tag is a comma separated list. The first token overrides the field name
//! (empty means "use the field name"), later tokens are directives. The single
//! token `-` skips the field.

/// Directive splicing a nested struct into its parent's namespace
pub const INLINE: &str = "inline";

/// Tag value excluding a field from loading
pub const SKIP: &str = "-";

/// A parsed field tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    Skip,
    Field { name: Option<&'a str>, inline: bool },
}

impl<'a> Tag<'a> {
    /// Parse a raw tag. Unknown directives are ignored.
    pub fn parse(raw: &'a str) -> Self {
        if raw == SKIP {
            return Tag::Skip;
        }

        let mut tokens = raw.split(',');
        let name = tokens.next().filter(|name| !name.is_empty());
        let inline = tokens.any(|directive| directive == INLINE);

        Tag::Field { name, inline }
    }

    /// Tag of a field declared without any tag
    pub const fn untagged() -> Self {
        Tag::Field {
            name: None,
            inline: false,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Tag::Skip)
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Tag::Field { inline: true, .. })
    }
}
