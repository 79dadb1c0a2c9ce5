//! Map nested typed values to and from two-dimensional cell grids.
//!
//! # Overview
//!
//! A grid codec designed to:
//! - Decode rows of spreadsheet-like text cells into nested typed values, guided by a schema
//!   grid that names the field living in each column
//! - Encode nested typed values into dense grids of typed cells, laid out the same way
//!
//! Structs are flattened horizontally (one column per leaf field). Arrays and lists are
//! flattened vertically (one row per element). Repeated structs carry a 1-based position
//! marker in their first column.
//!
//! # Supported Types
//!
//! Natively supports:
//! - Scalars: `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`, `f32`, `f64`, `bool`,
//!   `String`
//! - Datetimes: [chrono::DateTime] in [chrono::Utc]
//! - Collections: `Option<T>`, `Vec<T>`, and fixed-size arrays like `[T; N]`
//!
//! Structs implement [Sheet] with `#[derive(Sheet)]`. Field attributes:
//! - `#[sheet(rename = "key")]`: use `key` instead of the field name in schema grids
//! - `#[sheet(datetime)]`: read and write the field through the configured datetime format
//!   (integer fields hold Unix epoch seconds)
//! - `#[sheet(csv)]`: pack a list of scalars into a single separated cell
//! - `#[sheet(skip)]`: leave the field out of the grid (it must implement [Default])
//!
//! # Example
//!
//! ```
//! use cellgrid_codec::{decode, encode, grid::to_text, header, Sheet};
//!
//! #[derive(Debug, Default, PartialEq, Sheet)]
//! struct Item {
//!     name: String,
//!     qty: u32,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Sheet)]
//! struct Order {
//!     id: u64,
//!     items: Vec<Item>,
//!     #[sheet(csv)]
//!     tags: Vec<String>,
//! }
//!
//! let order = Order {
//!     id: 7,
//!     items: vec![
//!         Item { name: "apple".into(), qty: 2 },
//!         Item { name: "pear".into(), qty: 1 },
//!     ],
//!     tags: vec!["fresh".into(), "fruit".into()],
//! };
//!
//! // Encode into typed cells, render as text, and decode again.
//! let grid = encode(&order).unwrap();
//! let schema = header::schema::<Order>();
//! assert_eq!(schema[0], vec!["id", "items", "", "", "tags:csv"]);
//! assert_eq!(schema[1], vec!["", "_index", "name", "qty", ""]);
//!
//! let decoded: Order = decode(&schema, &to_text(&grid)).unwrap();
//! assert_eq!(decoded, order);
//! ```

extern crate self as cellgrid_codec;

pub mod cell;
pub mod config;
pub mod datetime;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod header;
mod index;
pub mod options;
mod rows;
pub mod shape;
pub mod types;

// Re-export main types and traits
pub use cell::{Cell, ScalarKind};
pub use cellgrid_macros::Sheet;
pub use config::Config;
pub use decoder::{decode, Decoder};
pub use encoder::{encode, Encoder};
pub use error::Error;
pub use grid::{DataGrid, Grid, SchemaGrid};
pub use options::FieldOptions;
pub use shape::{ExcludedField, FieldShape, FieldValues, Shape, Sheet, StructShape, Value};
