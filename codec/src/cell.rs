//! Cell values and the text grammar of scalar kinds.
//!
//! Decoding reads text cells; encoding produces [Cell]s that keep the numeric width of the
//! field they came from (an `i8` field yields [Cell::I8], an `f32` field yields [Cell::F32]).
//! Every cell renders back into text that [ScalarKind::parse] accepts, which is what lets an
//! encoded grid be decoded again.

use std::fmt;

/// A single value of an encoded grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    /// Explicit empty marker. Distinct from every other value, including empty text.
    #[default]
    Empty,
    Text(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

/// Kind of a scalar leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Text,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

macro_rules! impl_kinds {
    ($($variant:ident => $type:ty),* $(,)?) => {
        impl ScalarKind {
            /// Returns the zero value of this kind.
            pub fn zero(&self) -> Cell {
                match self {
                    ScalarKind::Text => Cell::Text(String::new()),
                    ScalarKind::Bool => Cell::Bool(false),
                    $(ScalarKind::$variant => Cell::$variant(<$type>::default()),)*
                }
            }

            /// Parses non-blank text into a cell of this kind.
            ///
            /// Returns `None` if the text does not satisfy the grammar of the kind (including
            /// integers that do not fit the kind's width).
            pub fn parse(&self, text: &str) -> Option<Cell> {
                match self {
                    ScalarKind::Text => Some(Cell::Text(text.to_string())),
                    ScalarKind::Bool => parse_bool(text).map(Cell::Bool),
                    $(ScalarKind::$variant => text.parse::<$type>().ok().map(Cell::$variant),)*
                }
            }
        }

        impl Cell {
            /// Returns the kind of this cell, or `None` for [Cell::Empty].
            pub fn kind(&self) -> Option<ScalarKind> {
                match self {
                    Cell::Empty => None,
                    Cell::Text(_) => Some(ScalarKind::Text),
                    Cell::Bool(_) => Some(ScalarKind::Bool),
                    $(Cell::$variant(_) => Some(ScalarKind::$variant),)*
                }
            }
        }
    };
}

impl_kinds!(
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    F32 => f32,
    F64 => f64,
);

macro_rules! impl_integers {
    ($($variant:ident => $type:ty),* $(,)?) => {
        impl ScalarKind {
            /// Builds an integer cell of this kind from a widened value.
            ///
            /// Returns `None` for non-integer kinds or if `value` does not fit.
            pub(crate) fn from_i64(&self, value: i64) -> Option<Cell> {
                match self {
                    $(ScalarKind::$variant => <$type>::try_from(value).ok().map(Cell::$variant),)*
                    _ => None,
                }
            }
        }

        impl Cell {
            /// Widens an integer cell to `i64`.
            ///
            /// Returns `None` for non-integer cells or unsigned values above `i64::MAX`.
            pub(crate) fn to_i64(&self) -> Option<i64> {
                match self {
                    $(Cell::$variant(v) => i64::try_from(*v).ok(),)*
                    _ => None,
                }
            }
        }
    };
}

impl_integers!(
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
);

impl ScalarKind {
    /// Returns a short name of this kind, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Text => "text",
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
        }
    }

    /// Returns true for the signed and unsigned integer kinds.
    pub fn is_integer(&self) -> bool {
        !matches!(
            self,
            ScalarKind::Text | ScalarKind::Bool | ScalarKind::F32 | ScalarKind::F64
        )
    }
}

impl Cell {
    /// Returns true for [Cell::Empty].
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(v) => f.write_str(v),
            Cell::Bool(v) => write!(f, "{v}"),
            Cell::I8(v) => write!(f, "{v}"),
            Cell::I16(v) => write!(f, "{v}"),
            Cell::I32(v) => write!(f, "{v}"),
            Cell::I64(v) => write!(f, "{v}"),
            Cell::U8(v) => write!(f, "{v}"),
            Cell::U16(v) => write!(f, "{v}"),
            Cell::U32(v) => write!(f, "{v}"),
            Cell::U64(v) => write!(f, "{v}"),
            // Shortest text that parses back to the same value at this width.
            Cell::F32(v) => write!(f, "{v}"),
            Cell::F64(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    macro_rules! impl_kind_test {
        ($type:ty, $variant:ident) => {
            paste! {
                #[test]
                fn [<test_ $type _text_round_trip>]() {
                    let kind = ScalarKind::$variant;
                    assert_eq!(kind.zero(), Cell::$variant(0 as $type));
                    for value in [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN] {
                        let cell = Cell::$variant(value);
                        assert_eq!(cell.kind(), Some(kind));
                        let parsed = kind.parse(&cell.to_string()).unwrap();
                        assert_eq!(parsed, cell);
                    }
                    assert_eq!(kind.parse("not a number"), None);
                }
            }
        };
    }

    impl_kind_test!(i8, I8);
    impl_kind_test!(i16, I16);
    impl_kind_test!(i32, I32);
    impl_kind_test!(i64, I64);
    impl_kind_test!(u8, U8);
    impl_kind_test!(u16, U16);
    impl_kind_test!(u32, U32);
    impl_kind_test!(u64, U64);
    impl_kind_test!(f32, F32);
    impl_kind_test!(f64, F64);

    #[test]
    fn test_integer_width_enforced() {
        assert_eq!(ScalarKind::I8.parse("127"), Some(Cell::I8(127)));
        assert_eq!(ScalarKind::I8.parse("128"), None);
        assert_eq!(ScalarKind::U16.parse("-1"), None);
    }

    #[test]
    fn test_float_precision_class() {
        assert_eq!(Cell::F32(0.1).to_string(), "0.1");
        assert_eq!(Cell::F64(0.1).to_string(), "0.1");
        assert_eq!(
            ScalarKind::F64.parse(&Cell::F64(1.0 / 3.0).to_string()),
            Some(Cell::F64(1.0 / 3.0))
        );
        assert_eq!(
            ScalarKind::F32.parse(&Cell::F32(1.0 / 3.0).to_string()),
            Some(Cell::F32(1.0 / 3.0))
        );
    }

    #[test]
    fn test_bool_grammar() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(ScalarKind::Bool.parse(text), Some(Cell::Bool(true)));
        }
        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(ScalarKind::Bool.parse(text), Some(Cell::Bool(false)));
        }
        assert_eq!(ScalarKind::Bool.parse("yes"), None);
    }

    #[test]
    fn test_empty() {
        assert!(Cell::Empty.is_empty());
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Empty.kind(), None);
        assert_ne!(Cell::Empty, Cell::Text(String::new()));
    }

    #[test]
    fn test_integer_widening() {
        assert_eq!(ScalarKind::I32.from_i64(7), Some(Cell::I32(7)));
        assert_eq!(ScalarKind::U8.from_i64(-1), None);
        assert_eq!(ScalarKind::Text.from_i64(1), None);
        assert_eq!(Cell::U64(u64::MAX).to_i64(), None);
        assert_eq!(Cell::I16(-3).to_i64(), Some(-3));
        assert!(ScalarKind::U32.is_integer());
        assert!(!ScalarKind::F32.is_integer());
    }
}
