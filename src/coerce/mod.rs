//! Type coercion
//!
//! Converts the raw text of an environment variable into a leaf field. An
//! absent variable leaves the field untouched.

mod interval;

pub use interval::{IntervalError, parse_interval};

use crate::error::{LoadError, Result};
use crate::schema::{Leaf, SignedSlot, UnsignedSlot, ValueKind};
use crate::source::Lookup;
use std::str::FromStr;

/// Read `key` from `source` and write it into `leaf`.
///
/// Returns whether the variable was present. Unsupported types fail even
/// when the variable is absent.
pub fn load_leaf(key: &str, leaf: Leaf<'_>, source: &dyn Lookup) -> Result<bool> {
    if let Leaf::Unsupported { type_name } = leaf {
        return Err(LoadError::UnsupportedType {
            key: key.to_string(),
            type_name,
        });
    }

    let Some(raw) = source.lookup(key)? else {
        return Ok(false);
    };
    apply(key, leaf, raw)?;
    Ok(true)
}

/// Coerce `raw` into `leaf`.
pub fn apply(key: &str, leaf: Leaf<'_>, raw: String) -> Result<()> {
    match leaf {
        Leaf::Text(out) => *out = raw,
        Leaf::Signed(out) => apply_signed(key, out, &raw)?,
        Leaf::Unsigned(out) => apply_unsigned(key, out, &raw)?,
        Leaf::Bool(out) => *out = parse_bool(key, &raw)?,
        Leaf::Interval(out) => {
            *out = parse_interval(&raw).map_err(|e| LoadError::parse(key, ValueKind::Interval, e))?
        }
        Leaf::TextList(out) => *out = split_list(&raw),
        Leaf::Unsupported { type_name } => {
            return Err(LoadError::UnsupportedType {
                key: key.to_string(),
                type_name,
            });
        }
    }
    Ok(())
}

fn parse_number<T>(key: &str, kind: ValueKind, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.parse().map_err(|e| LoadError::parse(key, kind, e))
}

fn apply_signed(key: &str, out: SignedSlot<'_>, raw: &str) -> Result<()> {
    let kind = ValueKind::Signed;
    match out {
        SignedSlot::I8(v) => *v = parse_number(key, kind, raw)?,
        SignedSlot::I16(v) => *v = parse_number(key, kind, raw)?,
        SignedSlot::I32(v) => *v = parse_number(key, kind, raw)?,
        SignedSlot::I64(v) => *v = parse_number(key, kind, raw)?,
        SignedSlot::Isize(v) => *v = parse_number(key, kind, raw)?,
    }
    Ok(())
}

fn apply_unsigned(key: &str, out: UnsignedSlot<'_>, raw: &str) -> Result<()> {
    let kind = ValueKind::Unsigned;
    if raw.starts_with('+') {
        return Err(LoadError::parse(key, kind, "sign prefix on an unsigned value"));
    }
    match out {
        UnsignedSlot::U8(v) => *v = parse_number(key, kind, raw)?,
        UnsignedSlot::U16(v) => *v = parse_number(key, kind, raw)?,
        UnsignedSlot::U32(v) => *v = parse_number(key, kind, raw)?,
        UnsignedSlot::U64(v) => *v = parse_number(key, kind, raw)?,
        UnsignedSlot::Usize(v) => *v = parse_number(key, kind, raw)?,
    }
    Ok(())
}

/// `true`/`1` and `false`/`0`, ignoring ASCII case
pub fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    if raw == "1" || raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw == "0" || raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(LoadError::parse(
            key,
            ValueKind::Bool,
            format!("{raw:?} is not one of true, false, 1, 0"),
        ))
    }
}

/// Split on commas, trimming each piece and dropping empty ones
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnvField, Slot};
    use crate::source::MapEnv;
    use std::time::Duration;

    fn coerce<F: EnvField>(raw: &str, value: &mut F) -> Result<()> {
        match value.slot() {
            Slot::Leaf(leaf) => apply("TEST_KEY", leaf, raw.to_string()),
            Slot::Node(_) => panic!("expected a leaf"),
        }
    }

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(split_list(" aa, bb ,cc ,dd"), vec!["aa", "bb", "cc", "dd"]);
        assert_eq!(split_list("a,,b, ,"), vec!["a", "b"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_bool_literals() {
        for raw in ["true", "TRUE", "True", "tRuE", "1"] {
            assert!(parse_bool("K", raw).unwrap(), "{raw}");
        }
        for raw in ["false", "FALSE", "False", "0"] {
            assert!(!parse_bool("K", raw).unwrap(), "{raw}");
        }
        for raw in ["ture", "yes", "", " true", "01"] {
            assert!(parse_bool("K", raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_integer_width_overflow() {
        let mut small = 0i8;
        assert!(coerce("127", &mut small).is_ok());
        assert_eq!(small, 127);
        assert!(coerce("128", &mut small).is_err());
        assert_eq!(small, 127);

        let mut port = 0u16;
        assert!(coerce("65536", &mut port).is_err());
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        let mut replicas = 9u32;
        let err = coerce("-2", &mut replicas).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                kind: ValueKind::Unsigned,
                ..
            }
        ));
        assert_eq!(replicas, 9);
    }

    #[test]
    fn test_sign_prefix_only_for_signed() {
        let mut count = 0i32;
        coerce("+5", &mut count).unwrap();
        assert_eq!(count, 5);

        let mut replicas = 9u32;
        let err = coerce("+5", &mut replicas).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                kind: ValueKind::Unsigned,
                ..
            }
        ));
        assert_eq!(replicas, 9);
    }

    #[test]
    fn test_text_is_verbatim() {
        let mut text = String::from("old");
        coerce("  spaced , value ", &mut text).unwrap();
        assert_eq!(text, "  spaced , value ");
        coerce("", &mut text).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_interval_error_kind() {
        let mut timeout = Duration::from_secs(1);
        let err = coerce("not a duration", &mut timeout).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                kind: ValueKind::Interval,
                ..
            }
        ));
    }

    #[test]
    fn test_absent_leaves_value() {
        let source = MapEnv::default();
        let mut port = 5i32;
        let Slot::Leaf(leaf) = port.slot() else {
            panic!("expected a leaf")
        };
        assert!(!load_leaf("TEST_PORT", leaf, &source).unwrap());
        assert_eq!(port, 5);
    }

    #[test]
    fn test_unsupported_fails_even_when_absent() {
        let source = MapEnv::default();
        let mut ratio = 0.5f64;
        let Slot::Leaf(leaf) = ratio.slot() else {
            panic!("expected a leaf")
        };
        let err = load_leaf("FAIL_UNSUPPORTED", leaf, &source).unwrap_err();
        assert_eq!(
            err,
            LoadError::UnsupportedType {
                key: "FAIL_UNSUPPORTED".into(),
                type_name: "f64"
            }
        );
    }
}
