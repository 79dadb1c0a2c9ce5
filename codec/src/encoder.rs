//! Encoding of typed values into dense cell grids.
//!
//! Encoding walks the value depth-first (struct fields in declaration order, elements in
//! index order), collecting sparse `(row, column, cell)` entries, and then materializes a
//! dense grid sized to the furthest cell written. Positions never written hold
//! [Cell::Empty].
//!
//! Layout mirrors [crate::Decoder]:
//!
//! - Struct fields are laid out left to right; a nested struct takes as many columns as its
//!   own fields.
//! - Element `i` of an array or list is written on row `row + i`. Elements that are structs
//!   (or optional structs) are preceded by a 1-based position marker column.
//! - A list of scalars with the `csv` option is written as one separated cell.
//! - Unset optionals are written as their zero value with every leaf set to [Cell::Empty].

use crate::{
    datetime::{encode_datetime, from_epoch, marshal},
    grid::Grid,
    Cell, Config, Error, FieldOptions, Shape, Sheet, StructShape, Value,
};
use tracing::debug;

/// Encodes values into grids.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    cfg: Config,
}

impl Encoder {
    /// Creates an encoder with the default [Config].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with `cfg`.
    pub fn with_config(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Encodes `value`, a struct or a set optional struct, into a dense grid.
    pub fn encode<T: Sheet>(&self, value: &T) -> Result<Grid, Error> {
        let shape = T::shape();
        let value = value.to_value();
        let (shape, value) = match (&shape, value) {
            (Shape::Optional(inner), Value::Optional(Some(value))) => (inner.as_ref(), *value),
            (Shape::Optional(_), Value::Optional(None)) => {
                return Err(Error::InvalidTarget("source is an unset optional"));
            }
            (shape, value) => (shape, value),
        };
        let root = shape
            .as_struct()
            .ok_or(Error::InvalidTarget("source is not a struct"))?;
        debug!(type_name = root.name(), "encoding value");

        let mut session = Session {
            cfg: &self.cfg,
            cells: Vec::new(),
            max_row: 0,
            max_column: 0,
        };
        session.reflect_struct(root, &value, 0, 0, false)?;
        let grid = session.materialize();
        debug!(
            type_name = root.name(),
            rows = grid.len(),
            columns = grid.first().map_or(0, Vec::len),
            "encoded grid"
        );
        Ok(grid)
    }
}

/// Encodes `value` with the default [Config].
///
/// # Examples
///
/// ```
/// use cellgrid_codec::{encode, Cell, Sheet};
///
/// #[derive(Debug, Default, PartialEq, Sheet)]
/// struct Row {
///     id: u8,
///     scores: Vec<f32>,
/// }
///
/// let grid = encode(&Row { id: 1, scores: vec![0.5, 1.5] }).unwrap();
/// assert_eq!(
///     grid,
///     vec![
///         vec![Cell::U8(1), Cell::F32(0.5)],
///         vec![Cell::Empty, Cell::F32(1.5)],
///     ]
/// );
/// ```
pub fn encode<T: Sheet>(value: &T) -> Result<Grid, Error> {
    Encoder::new().encode(value)
}

/// State of one encode call.
struct Session<'a> {
    cfg: &'a Config,
    cells: Vec<(usize, usize, Cell)>,
    max_row: usize,
    max_column: usize,
}

impl Session<'_> {
    fn add(&mut self, cell: Cell, row: usize, column: usize) {
        self.max_row = self.max_row.max(row);
        self.max_column = self.max_column.max(column);
        self.cells.push((row, column, cell));
    }

    fn materialize(self) -> Grid {
        let mut grid = vec![vec![Cell::Empty; self.max_column + 1]; self.max_row + 1];
        for (row, column, cell) in self.cells {
            grid[row][column] = cell;
        }
        grid
    }

    /// Encodes the fields of a struct starting at `column`. Returns the number of columns
    /// consumed.
    fn reflect_struct(
        &mut self,
        shape: &StructShape,
        value: &Value,
        column: usize,
        row: usize,
        absent: bool,
    ) -> Result<usize, Error> {
        let Value::Struct(fields) = value else {
            return Err(Error::Mismatch("expected struct"));
        };
        if fields.len() != shape.fields().len() {
            return Err(Error::Mismatch("struct field count"));
        }
        let mut width = 0;
        for (field, value) in shape.fields().iter().zip(fields) {
            let consumed = self.reflect_value(
                field.shape(),
                value,
                column + width,
                row,
                field.options(),
                absent,
            )?;
            width += consumed.max(1);
        }
        Ok(width)
    }

    /// Encodes one value at `(row, column)`. Returns the number of columns consumed, where 0
    /// stands for a single column.
    fn reflect_value(
        &mut self,
        shape: &Shape,
        value: &Value,
        column: usize,
        row: usize,
        opts: &FieldOptions,
        absent: bool,
    ) -> Result<usize, Error> {
        match (shape, value) {
            (Shape::Optional(inner), Value::Optional(Some(value))) => {
                self.reflect_value(inner, value, column, row, opts, false)
            }
            (Shape::Optional(inner), Value::Optional(None)) => {
                let zero = inner.zero();
                self.reflect_value(inner, &zero, column, row, opts, true)
            }
            (Shape::DateTime, Value::DateTime(value)) => {
                let cell = if absent {
                    Cell::Empty
                } else if opts.is_datetime() {
                    Cell::Text(encode_datetime(value, self.cfg)?)
                } else {
                    Cell::Text(marshal(value))
                };
                self.add(cell, row, column);
                Ok(0)
            }
            (Shape::Struct(inner), value) => self.reflect_struct(inner, value, column, row, absent),
            (Shape::Array { elem, .. }, Value::Array(elems)) => {
                let width = self.reflect_list(elem, elems, column, row, opts, absent)?;
                Ok(width + usize::from(elem.struct_bearing().is_some()))
            }
            (Shape::List(elem), Value::List(elems)) => {
                let struct_bearing = elem.struct_bearing().is_some();
                let width = if !elems.is_empty() {
                    self.reflect_list(elem, elems, column, row, opts, absent)?
                } else if struct_bearing {
                    // Reserve the marker column and the element's columns.
                    self.add(Cell::Empty, row, column);
                    let zero = elem.zero();
                    self.reflect_value(elem, &zero, column + 1, row, opts, true)?
                } else if opts.is_packed() {
                    0
                } else {
                    let zero = elem.zero();
                    self.reflect_value(elem, &zero, column, row, opts, true)?
                };
                Ok(width + usize::from(struct_bearing))
            }
            (Shape::Scalar(kind), Value::Scalar(cell)) => {
                let cell = if absent {
                    Cell::Empty
                } else if opts.is_datetime() && kind.is_integer() {
                    Cell::Text(self.format_epoch(cell)?)
                } else {
                    cell.clone()
                };
                self.add(cell, row, column);
                Ok(0)
            }
            _ => Err(Error::Mismatch("value does not match shape")),
        }
    }

    /// Encodes the elements of an array or a non-empty list. Returns the widest element.
    fn reflect_list(
        &mut self,
        elem: &Shape,
        elems: &[Value],
        column: usize,
        row: usize,
        opts: &FieldOptions,
        absent: bool,
    ) -> Result<usize, Error> {
        let struct_bearing = elem.struct_bearing().is_some();
        if opts.is_packed() && !struct_bearing {
            let cell = if absent {
                Cell::Empty
            } else {
                let pieces = elems
                    .iter()
                    .map(|value| self.pack_piece(elem, value, opts))
                    .collect::<Result<Vec<_>, _>>()?;
                let separator = self.cfg.separator.to_string();
                Cell::Text(pieces.join(separator.as_str()))
            };
            self.add(cell, row, column);
            return Ok(0);
        }

        let mut width = 0;
        for (i, value) in elems.iter().enumerate() {
            let mut offset = 0;
            if struct_bearing {
                let marker = if absent {
                    Cell::Empty
                } else {
                    Cell::U64(i as u64 + 1)
                };
                self.add(marker, row + i, column);
                offset = 1;
            }
            let consumed = self.reflect_value(elem, value, column + offset, row + i, opts, absent)?;
            width = width.max(consumed);
        }
        Ok(width)
    }

    /// Renders one element of a packed list.
    fn pack_piece(
        &self,
        elem: &Shape,
        value: &Value,
        opts: &FieldOptions,
    ) -> Result<String, Error> {
        match (elem, value) {
            (Shape::Optional(inner), Value::Optional(Some(value))) => {
                self.pack_piece(inner, value, opts)
            }
            (Shape::Optional(_), Value::Optional(None)) => Ok(String::new()),
            (Shape::Scalar(kind), Value::Scalar(cell)) => {
                if opts.is_datetime() && kind.is_integer() {
                    self.format_epoch(cell)
                } else {
                    Ok(cell.to_string())
                }
            }
            (Shape::DateTime, Value::DateTime(value)) => {
                if opts.is_datetime() {
                    encode_datetime(value, self.cfg)
                } else {
                    Ok(marshal(value))
                }
            }
            _ => Err(Error::Mismatch("packed list element is not a scalar")),
        }
    }

    /// Formats an integer cell holding Unix epoch seconds.
    fn format_epoch(&self, cell: &Cell) -> Result<String, Error> {
        let secs = cell.to_i64().ok_or_else(|| Error::Datetime {
            text: cell.to_string(),
            reason: "epoch seconds out of range".to_string(),
        })?;
        encode_datetime(&from_epoch(secs)?, self.cfg)
    }
}
