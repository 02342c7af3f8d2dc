//! Schema description
//!
//! A configuration type describes itself by implementing [`EnvConfig`], usually
//! through `#[derive(EnvConfig)]`. Every visited field implements [`EnvField`],
//! which maps it onto the closed set of supported shapes in [`Slot`].

use crate::error::Result;
use crate::walker::Walker;
use std::any::{Any, type_name};
use std::fmt;
use std::time::Duration;

/// A struct whose fields are loaded from environment variables.
///
/// Implementations visit their fields in declaration order, calling
/// [`Walker::field`] for loadable fields and [`Walker::skip`] for the rest.
///
/// # Example
///
/// ```ignore
/// impl EnvConfig for MongoConfig {
///     fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
///         walker.field(FieldSpec::new("nodes"), &mut self.nodes)?;
///         walker.field(FieldSpec::new("port").tag("port"), &mut self.port)?;
///         Ok(())
///     }
/// }
/// ```
pub trait EnvConfig {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()>;
}

/// A value that can be a field of an [`EnvConfig`] struct.
pub trait EnvField {
    fn slot(&mut self) -> Slot<'_>;
}

/// Static description of one struct field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    tag: Option<&'static str>,
    private: bool,
}

impl FieldSpec {
    /// Describe a field by its declared name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            tag: None,
            private: false,
        }
    }

    /// Attach the raw tag, e.g. `"mongo"`, `",inline"` or `"-"`.
    pub const fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the field as not publicly accessible. Private fields are never loaded.
    pub const fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn raw_tag(&self) -> Option<&'static str> {
        self.tag
    }

    pub const fn is_private(&self) -> bool {
        self.private
    }
}

/// Mutable view of a field, dispatched by shape
pub enum Slot<'a> {
    /// A primitive read from a single environment variable
    Leaf(Leaf<'a>),
    /// A nested struct whose fields are walked recursively
    Node(&'a mut dyn EnvConfig),
}

/// The supported leaf types
pub enum Leaf<'a> {
    Text(&'a mut String),
    Signed(SignedSlot<'a>),
    Unsigned(UnsignedSlot<'a>),
    Bool(&'a mut bool),
    Interval(&'a mut Duration),
    TextList(&'a mut Vec<String>),
    /// A type with no coercion; loading it is a fatal error
    Unsupported { type_name: &'static str },
}

pub enum SignedSlot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
}

pub enum UnsignedSlot<'a> {
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
}

impl Leaf<'_> {
    /// Kind of value this leaf expects, `None` for unsupported types
    pub fn kind(&self) -> Option<ValueKind> {
        Some(match self {
            Leaf::Text(_) => ValueKind::Text,
            Leaf::Signed(_) => ValueKind::Signed,
            Leaf::Unsigned(_) => ValueKind::Unsigned,
            Leaf::Bool(_) => ValueKind::Bool,
            Leaf::Interval(_) => ValueKind::Interval,
            Leaf::TextList(_) => ValueKind::TextList,
            Leaf::Unsupported { .. } => return None,
        })
    }
}

/// Value kinds understood by the coercer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Signed,
    Unsigned,
    Bool,
    Interval,
    TextList,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "string",
            ValueKind::Signed => "integer",
            ValueKind::Unsigned => "unsigned integer",
            ValueKind::Bool => "boolean",
            ValueKind::Interval => "time duration",
            ValueKind::TextList => "string list",
        };
        f.write_str(name)
    }
}

impl EnvField for String {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Leaf(Leaf::Text(self))
    }
}

impl EnvField for bool {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Leaf(Leaf::Bool(self))
    }
}

impl EnvField for Duration {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Leaf(Leaf::Interval(self))
    }
}

/// Only `Vec<String>` is loadable; other element types fail at load time.
impl<T: 'static> EnvField for Vec<T> {
    fn slot(&mut self) -> Slot<'_> {
        match (self as &mut dyn Any).downcast_mut::<Vec<String>>() {
            Some(list) => Slot::Leaf(Leaf::TextList(list)),
            None => Slot::Leaf(Leaf::Unsupported {
                type_name: type_name::<Vec<T>>(),
            }),
        }
    }
}

macro_rules! integer_fields {
    ($leaf:ident, $slot:ident, $($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl EnvField for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Leaf(Leaf::$leaf($slot::$variant(self)))
                }
            }
        )*
    };
}

integer_fields!(Signed, SignedSlot, i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
integer_fields!(Unsigned, UnsignedSlot, u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

macro_rules! unsupported_fields {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvField for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Leaf(Leaf::Unsupported { type_name: type_name::<$ty>() })
                }
            }
        )*
    };
}

// Tag these "-" to keep them out of the load.
unsupported_fields!(f32, f64, char);
