//! Shape descriptors and the [Sheet] trait.
//!
//! Every type that can be placed on a grid describes itself once as a [Shape] (a closed set
//! of variants) and converts to and from a [Value] tree of the same shape. The decode and
//! encode engines only ever pattern-match on these two trees.

use crate::{cell::ScalarKind, options::EXCLUDED_TAG, Cell, Error, FieldOptions};
use chrono::{DateTime, Utc};

/// Layout class of a type.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A single cell.
    Scalar(ScalarKind),
    /// A compound value handled as a single cell.
    DateTime,
    /// A value that may be unset.
    Optional(Box<Shape>),
    /// Named fields flattened horizontally.
    Struct(StructShape),
    /// A fixed number of elements flattened vertically.
    Array { elem: Box<Shape>, len: usize },
    /// A variable number of elements flattened vertically.
    List(Box<Shape>),
}

impl Shape {
    /// Builds the zero value of this shape.
    pub fn zero(&self) -> Value {
        match self {
            Shape::Scalar(kind) => Value::Scalar(kind.zero()),
            Shape::DateTime => Value::DateTime(DateTime::<Utc>::default()),
            Shape::Optional(_) => Value::Optional(None),
            Shape::Struct(shape) => shape.zero(),
            Shape::Array { elem, len } => Value::Array((0..*len).map(|_| elem.zero()).collect()),
            Shape::List(_) => Value::List(Vec::new()),
        }
    }

    /// Returns the struct descriptor if this is a struct.
    pub fn as_struct(&self) -> Option<&StructShape> {
        match self {
            Shape::Struct(shape) => Some(shape),
            _ => None,
        }
    }

    /// Returns the struct descriptor of a struct or of an optional struct.
    pub fn struct_bearing(&self) -> Option<&StructShape> {
        match self {
            Shape::Struct(shape) => Some(shape),
            Shape::Optional(inner) => inner.as_struct(),
            _ => None,
        }
    }
}

/// Descriptor of a struct: its fields in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct StructShape {
    name: &'static str,
    fields: Vec<FieldShape>,
    excluded: Vec<ExcludedField>,
}

/// Descriptor of one included struct field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldShape {
    ident: &'static str,
    options: FieldOptions,
    shape: Shape,
}

/// Descriptor of a field removed from the grid by the `-` tag.
///
/// Excluded fields keep their alias so that schema keys naming them still resolve (and are
/// then skipped).
#[derive(Clone, Debug, PartialEq)]
pub struct ExcludedField {
    ident: &'static str,
    alias: Option<String>,
}

impl StructShape {
    /// Creates a descriptor with no fields. `name` identifies the type in the key index.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Appends a field. A tag of exactly `-` records the field as excluded instead.
    pub fn field(mut self, ident: &'static str, tag: &str, shape: Shape) -> Self {
        if tag == EXCLUDED_TAG {
            return self.exclude(ident, None);
        }
        self.fields.push(FieldShape {
            ident,
            options: FieldOptions::parse_tag(tag),
            shape,
        });
        self
    }

    /// Records an excluded field, optionally with an alias.
    pub fn exclude(mut self, ident: &'static str, alias: Option<&str>) -> Self {
        self.excluded.push(ExcludedField {
            ident,
            alias: alias.map(str::to_string),
        });
        self
    }

    /// Builds the zero value of this struct.
    pub fn zero(&self) -> Value {
        Value::Struct(self.fields.iter().map(|f| f.shape.zero()).collect())
    }

    /// Returns the type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the included fields in declaration order.
    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }

    /// Returns the excluded fields.
    pub fn excluded(&self) -> &[ExcludedField] {
        &self.excluded
    }

    /// Returns the position of an included field.
    pub fn position(&self, ident: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.ident == ident)
    }

    /// Returns true if `ident` names an excluded field.
    pub fn is_excluded(&self, ident: &str) -> bool {
        self.excluded.iter().any(|f| f.ident == ident)
    }
}

impl FieldShape {
    /// Returns the field's identifier.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Returns the external key: the alias if declared, otherwise the identifier.
    pub fn key(&self) -> &str {
        self.options.alias().unwrap_or(self.ident)
    }

    /// Returns the options parsed from the field's tag.
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Returns the field's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl ExcludedField {
    /// Returns the field's identifier.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Returns the external key: the alias if declared, otherwise the identifier.
    pub fn key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.ident)
    }
}

/// Instance tree mirroring a [Shape].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Cell),
    DateTime(DateTime<Utc>),
    Optional(Option<Box<Value>>),
    /// Included fields in declaration order.
    Struct(Vec<Value>),
    Array(Vec<Value>),
    List(Vec<Value>),
}

impl Value {
    /// Unwraps a scalar cell.
    pub fn into_scalar(self) -> Result<Cell, Error> {
        match self {
            Value::Scalar(cell) => Ok(cell),
            _ => Err(Error::Mismatch("expected scalar")),
        }
    }

    /// Unwraps a datetime.
    pub fn into_datetime(self) -> Result<DateTime<Utc>, Error> {
        match self {
            Value::DateTime(value) => Ok(value),
            _ => Err(Error::Mismatch("expected datetime")),
        }
    }

    /// Unwraps an optional.
    pub fn into_optional(self) -> Result<Option<Value>, Error> {
        match self {
            Value::Optional(inner) => Ok(inner.map(|inner| *inner)),
            _ => Err(Error::Mismatch("expected optional")),
        }
    }

    /// Unwraps the elements of an array or a list.
    pub fn into_elements(self) -> Result<Vec<Value>, Error> {
        match self {
            Value::Array(elems) | Value::List(elems) => Ok(elems),
            _ => Err(Error::Mismatch("expected array or list")),
        }
    }
}

/// Sequential reader over the field values of a [Value::Struct].
pub struct FieldValues {
    fields: std::vec::IntoIter<Value>,
}

impl FieldValues {
    /// Unwraps a struct value.
    pub fn new(value: Value) -> Result<Self, Error> {
        match value {
            Value::Struct(fields) => Ok(Self {
                fields: fields.into_iter(),
            }),
            _ => Err(Error::Mismatch("expected struct")),
        }
    }

    /// Converts the next field value.
    #[allow(clippy::should_implement_trait)]
    pub fn next<T: Sheet>(&mut self) -> Result<T, Error> {
        let value = self
            .fields
            .next()
            .ok_or(Error::Mismatch("missing struct field"))?;
        T::from_value(value)
    }
}

/// Trait for types that can be laid out on a grid.
///
/// Implemented for scalars, `String`, `bool`, [chrono::DateTime], `Option<T>`, `Vec<T>`, and
/// `[T; N]`. Structs implement it with `#[derive(Sheet)]`, or by hand:
///
/// ```
/// use cellgrid_codec::{Error, FieldValues, Shape, Sheet, StructShape, Value};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Sheet for Point {
///     fn shape() -> Shape {
///         Shape::Struct(
///             StructShape::new("Point")
///                 .field("x", "", i32::shape())
///                 .field("y", "", i32::shape()),
///         )
///     }
///
///     fn to_value(&self) -> Value {
///         Value::Struct(vec![self.x.to_value(), self.y.to_value()])
///     }
///
///     fn from_value(value: Value) -> Result<Self, Error> {
///         let mut fields = FieldValues::new(value)?;
///         Ok(Self {
///             x: fields.next()?,
///             y: fields.next()?,
///         })
///     }
/// }
///
/// let grid = cellgrid_codec::encode(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(grid.len(), 1);
/// ```
pub trait Sheet: Sized {
    /// Describes the layout of this type.
    fn shape() -> Shape;

    /// Converts this value into a value tree.
    fn to_value(&self) -> Value;

    /// Rebuilds a value from a tree produced by [Sheet::to_value] or by decoding.
    fn from_value(value: Value) -> Result<Self, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructShape {
        StructShape::new("Sample")
            .field("id", "", Shape::Scalar(ScalarKind::U32))
            .field("created", "at,datetime", Shape::DateTime)
            .field("secret", "-", Shape::Scalar(ScalarKind::Text))
            .field(
                "tags",
                ",csv",
                Shape::List(Box::new(Shape::Scalar(ScalarKind::Text))),
            )
    }

    #[test]
    fn test_struct_shape() {
        let shape = sample();
        assert_eq!(shape.name(), "Sample");
        assert_eq!(shape.fields().len(), 3);
        assert_eq!(shape.position("tags"), Some(2));
        assert_eq!(shape.position("secret"), None);
        assert!(shape.is_excluded("secret"));
        assert_eq!(shape.fields()[1].key(), "at");
        assert!(shape.fields()[1].options().is_datetime());
        assert_eq!(shape.fields()[2].key(), "tags");
        assert!(shape.fields()[2].options().is_packed());
    }

    #[test]
    fn test_zero() {
        let shape = Shape::Array {
            elem: Box::new(Shape::Optional(Box::new(Shape::Scalar(ScalarKind::I8)))),
            len: 2,
        };
        assert_eq!(
            shape.zero(),
            Value::Array(vec![Value::Optional(None), Value::Optional(None)])
        );

        let zero = Shape::Struct(sample()).zero();
        assert_eq!(
            zero,
            Value::Struct(vec![
                Value::Scalar(Cell::U32(0)),
                Value::DateTime(DateTime::<Utc>::default()),
                Value::List(Vec::new()),
            ])
        );
    }

    #[test]
    fn test_struct_bearing() {
        let inner = Shape::Struct(sample());
        assert!(inner.struct_bearing().is_some());
        assert!(Shape::Optional(Box::new(inner)).struct_bearing().is_some());
        assert!(Shape::Scalar(ScalarKind::Bool).struct_bearing().is_none());
    }

    #[test]
    fn test_field_values() {
        let mut fields =
            FieldValues::new(Value::Struct(vec![Value::Scalar(Cell::I32(4))])).unwrap();
        assert_eq!(fields.next::<i32>().unwrap(), 4);
        assert!(matches!(fields.next::<i32>(), Err(Error::Mismatch(_))));
        assert!(FieldValues::new(Value::List(Vec::new())).is_err());
    }
}
