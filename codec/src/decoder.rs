//! Decoding of text grids into typed values.
//!
//! # Layout
//!
//! The schema grid names, for every column, the field whose data lives in that column:
//!
//! - Row 0 holds the keys of the target struct's fields. Blank cells name nothing.
//! - A struct-valued field anchored at `(r, c)` spans its anchor plus the blank cells that
//!   follow it on row `r`; its own fields are named on row `r + 1`, starting at column `c`.
//! - A repeated field stores element `k` on data row `row + k`. Repeated structs reserve
//!   their first column for a 1-based position marker, named by [Config::index_key] in the
//!   schema.
//! - A key may carry options after a colon, e.g. `created:datetime` or `tags:csv`.
//!
//! Keys that do not resolve to a field, keys of excluded fields, and blank scalar cells are
//! skipped. Text that does not parse as its field's kind aborts the decode.

use crate::{
    cell::ScalarKind,
    datetime::decode_datetime,
    grid::{DataGrid, SchemaGrid},
    index::KeyIndex,
    options::split_key,
    rows::RowPool,
    Cell, Config, Error, FieldOptions, Shape, Sheet, StructShape, Value,
};
use tracing::{debug, trace};

/// Decodes text grids laid out by a fixed schema grid.
#[derive(Clone, Debug)]
pub struct Decoder {
    schema: SchemaGrid,
    cfg: Config,
}

impl Decoder {
    /// Creates a decoder for `schema` with the default [Config].
    pub fn new<S: AsRef<str>>(schema: &[Vec<S>]) -> Self {
        Self::with_config(schema, Config::default())
    }

    /// Creates a decoder for `schema`.
    pub fn with_config<S: AsRef<str>>(schema: &[Vec<S>], cfg: Config) -> Self {
        Self {
            schema: SchemaGrid::new(schema),
            cfg,
        }
    }

    /// Returns the rectangularized schema grid.
    pub fn schema(&self) -> &SchemaGrid {
        &self.schema
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Decodes `values` into a new `T`, starting from the zero value of every field.
    pub fn decode<T: Sheet, S: AsRef<str>>(&self, values: &[Vec<S>]) -> Result<T, Error> {
        let shape = T::shape();
        let mut value = shape.zero();
        self.run(&shape, &mut value, values)?;
        T::from_value(value)
    }

    /// Decodes `values` over the current contents of `dest`.
    ///
    /// Scalars, datetimes, optionals, and array elements without data keep their current
    /// value. List fields named by the schema are replaced, even when they have no data (they
    /// become empty). `dest` is only assigned if the whole decode succeeds.
    pub fn decode_into<T: Sheet, S: AsRef<str>>(
        &self,
        values: &[Vec<S>],
        dest: &mut T,
    ) -> Result<(), Error> {
        let shape = T::shape();
        let mut value = dest.to_value();
        self.run(&shape, &mut value, values)?;
        *dest = T::from_value(value)?;
        Ok(())
    }

    fn run<S: AsRef<str>>(
        &self,
        shape: &Shape,
        value: &mut Value,
        values: &[Vec<S>],
    ) -> Result<(), Error> {
        let root = shape
            .as_struct()
            .ok_or(Error::InvalidTarget("destination is not a struct"))?;
        debug!(
            type_name = root.name(),
            schema_rows = self.schema.height(),
            schema_columns = self.schema.width(),
            data_rows = values.len(),
            "decoding grid"
        );

        let mut session = Session {
            schema: &self.schema,
            cfg: &self.cfg,
            data: DataGrid::new(values),
            index: KeyIndex::new(shape),
            rows: RowPool::default(),
        };
        let Value::Struct(fields) = value else {
            return Err(Error::Mismatch("expected struct"));
        };
        for column in 0..self.schema.width() {
            let key = self.schema.key(0, column);
            if key.is_empty() {
                continue;
            }
            session.decode_field(root, fields, key, 0, 0, column)?;
        }
        debug!(type_name = root.name(), "decoded grid");
        Ok(())
    }
}

/// Decodes `values` into a new `T`, laid out by `schema`.
///
/// # Examples
///
/// ```
/// use cellgrid_codec::{decode, Sheet};
///
/// #[derive(Debug, Default, PartialEq, Sheet)]
/// struct Row {
///     id: u32,
///     #[sheet(rename = "label")]
///     name: String,
/// }
///
/// let schema = vec![vec!["label", "id"]];
/// let values = vec![vec!["first", "1"]];
/// let row: Row = decode(&schema, &values).unwrap();
/// assert_eq!(row, Row { id: 1, name: "first".into() });
/// ```
pub fn decode<T: Sheet, K: AsRef<str>, S: AsRef<str>>(
    schema: &[Vec<K>],
    values: &[Vec<S>],
) -> Result<T, Error> {
    Decoder::new(schema).decode(values)
}

/// State of one decode call.
struct Session<'a, S> {
    schema: &'a SchemaGrid,
    cfg: &'a Config,
    data: DataGrid<'a, S>,
    index: KeyIndex,
    rows: RowPool,
}

impl<S: AsRef<str>> Session<'_, S> {
    /// Resolves `raw` (a schema key, possibly with options) to a field of `shape` and decodes
    /// the field from `(data_row, column)`.
    fn decode_field(
        &mut self,
        shape: &StructShape,
        fields: &mut [Value],
        raw: &str,
        schema_row: usize,
        data_row: usize,
        column: usize,
    ) -> Result<(), Error> {
        let (key, opts) = split_key(raw);
        if self.cfg.is_index_key(key) {
            return Ok(());
        }
        let position = {
            let ident = self.index.resolve(shape.name(), key);
            if shape.is_excluded(ident) {
                trace!(type_name = shape.name(), key, "skipping excluded field");
                return Ok(());
            }
            shape.position(ident)
        };
        let Some(position) = position else {
            trace!(type_name = shape.name(), key, "skipping unresolved key");
            return Ok(());
        };
        let (Some(field), Some(slot)) = (shape.fields().get(position), fields.get_mut(position))
        else {
            return Err(Error::Mismatch("struct field count"));
        };
        self.decode_value(
            field.shape(),
            slot,
            schema_row,
            data_row,
            column,
            opts.as_ref(),
        )
    }

    fn decode_value(
        &mut self,
        shape: &Shape,
        slot: &mut Value,
        schema_row: usize,
        data_row: usize,
        column: usize,
        opts: Option<&FieldOptions>,
    ) -> Result<(), Error> {
        match shape {
            Shape::Scalar(kind) => {
                let text = self.data.get(data_row, column);
                if text.is_empty() {
                    return Ok(());
                }
                *slot = Value::Scalar(self.parse_scalar(*kind, text, opts, data_row, column)?);
            }
            Shape::DateTime => {
                let text = self.data.get(data_row, column);
                if text.is_empty() {
                    return Ok(());
                }
                *slot = Value::DateTime(decode_datetime(text, self.cfg)?);
            }
            Shape::Struct(inner) => {
                self.decode_struct(inner, slot, schema_row, data_row, column)?;
            }
            Shape::Optional(inner) => {
                let present = match inner.as_struct() {
                    Some(_) => self.struct_present(schema_row, data_row, column),
                    None => !self.data.is_blank(data_row, column),
                };
                if present {
                    let mut value = inner.zero();
                    self.decode_value(inner, &mut value, schema_row, data_row, column, opts)?;
                    *slot = Value::Optional(Some(Box::new(value)));
                }
            }
            Shape::Array { elem, len } => {
                let Value::Array(elems) = slot else {
                    return Err(Error::Mismatch("expected array"));
                };
                self.decode_array(elem, *len, elems, schema_row, data_row, column, opts)?;
            }
            Shape::List(elem) => {
                *slot = Value::List(self.decode_list(elem, schema_row, data_row, column, opts)?);
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn decode_array(
        &mut self,
        elem: &Shape,
        len: usize,
        elems: &mut [Value],
        schema_row: usize,
        data_row: usize,
        column: usize,
        opts: Option<&FieldOptions>,
    ) -> Result<(), Error> {
        if let Some(inner) = elem.struct_bearing() {
            let rows = self.rows.target_rows(&self.data, data_row, column);
            for &offset in rows.iter().take_while(|&&offset| offset < len) {
                let Some(slot) = elems.get_mut(offset) else {
                    break;
                };
                if elem.as_struct().is_some() {
                    self.decode_struct(inner, slot, schema_row, data_row + offset, column)?;
                    continue;
                }
                if !self.struct_present(schema_row, data_row + offset, column) {
                    continue;
                }
                let mut value = inner.zero();
                self.decode_struct(inner, &mut value, schema_row, data_row + offset, column)?;
                *slot = Value::Optional(Some(Box::new(value)));
            }
            self.rows.release(rows);
            return Ok(());
        }

        for (i, slot) in elems.iter_mut().enumerate().take(len) {
            if self.data.is_blank(data_row + i, column) {
                continue;
            }
            self.decode_value(elem, slot, schema_row, data_row + i, column, opts)?;
        }
        Ok(())
    }

    fn decode_list(
        &mut self,
        elem: &Shape,
        schema_row: usize,
        data_row: usize,
        column: usize,
        opts: Option<&FieldOptions>,
    ) -> Result<Vec<Value>, Error> {
        if let Some(inner) = elem.struct_bearing() {
            let rows = self.rows.target_rows(&self.data, data_row, column);
            let mut elems = Vec::with_capacity(rows.len());
            for &offset in &rows {
                let row = data_row + offset;
                if elem.as_struct().is_none() && !self.struct_present(schema_row, row, column) {
                    elems.push(Value::Optional(None));
                    continue;
                }
                let mut value = inner.zero();
                self.decode_struct(inner, &mut value, schema_row, row, column)?;
                if elem.as_struct().is_some() {
                    elems.push(value);
                } else {
                    elems.push(Value::Optional(Some(Box::new(value))));
                }
            }
            self.rows.release(rows);
            return Ok(elems);
        }

        if opts.is_some_and(FieldOptions::is_packed) {
            let text = self.data.get(data_row, column);
            if text.is_empty() {
                return Ok(Vec::new());
            }
            return text
                .split(self.cfg.separator)
                .map(|piece| self.decode_piece(elem, piece, opts, data_row, column))
                .collect();
        }

        let rows = self.rows.target_rows(&self.data, data_row, column);
        let last = rows.last().copied();
        self.rows.release(rows);
        let Some(last) = last else {
            return Ok(Vec::new());
        };
        let mut elems = Vec::with_capacity(last + 1);
        for i in 0..=last {
            let mut value = elem.zero();
            if !self.data.is_blank(data_row + i, column) {
                self.decode_value(elem, &mut value, schema_row, data_row + i, column, opts)?;
            }
            elems.push(value);
        }
        Ok(elems)
    }

    /// Decodes one piece of a packed list cell.
    fn decode_piece(
        &self,
        elem: &Shape,
        piece: &str,
        opts: Option<&FieldOptions>,
        row: usize,
        column: usize,
    ) -> Result<Value, Error> {
        match elem {
            Shape::Optional(_) if piece.is_empty() => Ok(Value::Optional(None)),
            Shape::Optional(inner) => Ok(Value::Optional(Some(Box::new(
                self.decode_piece(inner, piece, opts, row, column)?,
            )))),
            Shape::Scalar(_) | Shape::DateTime if piece.is_empty() => Ok(elem.zero()),
            Shape::Scalar(kind) => Ok(Value::Scalar(
                self.parse_scalar(*kind, piece, opts, row, column)?,
            )),
            Shape::DateTime => Ok(Value::DateTime(decode_datetime(piece, self.cfg)?)),
            _ => Err(Error::Mismatch("packed list element is not a scalar")),
        }
    }

    /// Decodes the fields of the struct anchored at `(schema_row, column)` from data row
    /// `data_row`.
    fn decode_struct(
        &mut self,
        shape: &StructShape,
        slot: &mut Value,
        schema_row: usize,
        data_row: usize,
        column: usize,
    ) -> Result<(), Error> {
        let Value::Struct(fields) = slot else {
            return Err(Error::Mismatch("expected struct"));
        };
        let schema = self.schema;
        for (i, key) in schema.sub_keys(schema_row, column) {
            self.decode_field(shape, fields, key, schema_row + 1, data_row, column + i)?;
        }
        Ok(())
    }

    /// Returns true if any data cell under the sub-keys of the struct anchored at
    /// `(schema_row, column)` is non-blank on `data_row`. Position-marker columns are ignored.
    fn struct_present(&self, schema_row: usize, data_row: usize, column: usize) -> bool {
        self.schema
            .sub_keys(schema_row, column)
            .filter(|(_, key)| !self.cfg.is_index_key(split_key(key).0))
            .any(|(i, _)| !self.data.is_blank(data_row, column + i))
    }

    fn parse_scalar(
        &self,
        kind: ScalarKind,
        text: &str,
        opts: Option<&FieldOptions>,
        row: usize,
        column: usize,
    ) -> Result<Cell, Error> {
        let parse_error = || Error::Parse {
            kind: kind.name(),
            text: text.to_string(),
            row,
            column,
        };
        if kind.is_integer() && opts.is_some_and(FieldOptions::is_datetime) {
            let secs = decode_datetime(text, self.cfg)?.timestamp();
            return kind.from_i64(secs).ok_or_else(parse_error);
        }
        kind.parse(text).ok_or_else(parse_error)
    }
}
