//! Schema authoring.
//!
//! Produces schema grids for a type, laid out exactly as [crate::Encoder] lays out the type's
//! values, so that a grid encoded from `T` decodes back with `schema::<T>()`.

use crate::{Config, FieldShape, Shape, Sheet, StructShape};

/// Returns the top-level schema keys of `T`, each with the option suffix its tag declares.
///
/// Returns an empty list if `T` is not a struct.
///
/// # Examples
///
/// ```
/// use cellgrid_codec::{header, Sheet};
/// use chrono::{DateTime, Utc};
///
/// #[derive(Debug, Default, PartialEq, Sheet)]
/// struct Event {
///     #[sheet(rename = "when", datetime)]
///     at: DateTime<Utc>,
///     name: String,
///     #[sheet(skip)]
///     internal: u8,
/// }
///
/// assert_eq!(header::keys::<Event>(), vec!["when:datetime", "name"]);
/// ```
pub fn keys<T: Sheet>() -> Vec<String> {
    match T::shape() {
        Shape::Struct(shape) => shape.fields().iter().map(schema_key).collect(),
        _ => Vec::new(),
    }
}

/// Returns the full schema grid of `T` with the default [Config].
pub fn schema<T: Sheet>() -> Vec<Vec<String>> {
    schema_with_config::<T>(&Config::default())
}

/// Returns the full schema grid of `T`.
///
/// Unset optionals of `T` are laid out like set ones. Returns an empty grid if `T` is not a
/// struct.
///
/// Sub-keys of a nested struct are read up to the first blank key, so a nested struct can only
/// decode a multi-column field (a struct or a repeated struct) as its last field.
pub fn schema_with_config<T: Sheet>(cfg: &Config) -> Vec<Vec<String>> {
    let shape = T::shape();
    let Some(root) = shape.as_struct() else {
        return Vec::new();
    };
    let mut layout = Layout {
        cfg,
        rows: Vec::new(),
        width: 0,
    };
    layout.place_struct(root, 0, 0);
    layout.finish()
}

fn schema_key(field: &FieldShape) -> String {
    format!("{}{}", field.key(), field.options().suffix())
}

struct Layout<'a> {
    cfg: &'a Config,
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Layout<'_> {
    fn put(&mut self, row: usize, column: usize, key: String) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = key;
        self.width = self.width.max(column + 1);
    }

    /// Places the keys of `shape` on `row` from `column`. Returns the columns consumed.
    fn place_struct(&mut self, shape: &StructShape, row: usize, column: usize) -> usize {
        let mut width = 0;
        for field in shape.fields() {
            self.put(row, column + width, schema_key(field));
            width += self.place_field(field.shape(), row, column + width).max(1);
        }
        width
    }

    /// Places the sub-keys of a field anchored at `(row, column)`. Returns the columns
    /// consumed, where 0 stands for a single column.
    fn place_field(&mut self, shape: &Shape, row: usize, column: usize) -> usize {
        match shape {
            Shape::Scalar(_) | Shape::DateTime => 0,
            Shape::Optional(inner) => self.place_field(inner, row, column),
            Shape::Struct(inner) => self.place_struct(inner, row + 1, column),
            Shape::Array { elem, .. } | Shape::List(elem) => match elem.struct_bearing() {
                Some(inner) => {
                    self.put(row + 1, column, self.cfg.index_key.clone());
                    self.place_struct(inner, row + 1, column + 1) + 1
                }
                None => 0,
            },
        }
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        for row in &mut self.rows {
            row.resize(self.width, String::new());
        }
        self.rows
    }
}
