//! Sheet implementations for Rust primitive types.
//!
//! Each primitive is a single cell whose [ScalarKind] keeps the primitive's width, so an
//! encoded `u8` stays a [Cell::U8] and an `f32` stays a [Cell::F32].

use crate::{cell::ScalarKind, Cell, Error, Shape, Sheet, Value};

macro_rules! impl_scalar {
    ($type:ty, $variant:ident) => {
        impl Sheet for $type {
            #[inline]
            fn shape() -> Shape {
                Shape::Scalar(ScalarKind::$variant)
            }

            #[inline]
            fn to_value(&self) -> Value {
                Value::Scalar(Cell::$variant(<$type as Clone>::clone(self)))
            }

            #[inline]
            fn from_value(value: Value) -> Result<Self, Error> {
                match value.into_scalar()? {
                    Cell::$variant(v) => Ok(v),
                    _ => Err(Error::Mismatch(stringify!($type))),
                }
            }
        }
    };
}

impl_scalar!(u8, U8);
impl_scalar!(u16, U16);
impl_scalar!(u32, U32);
impl_scalar!(u64, U64);
impl_scalar!(i8, I8);
impl_scalar!(i16, I16);
impl_scalar!(i32, I32);
impl_scalar!(i64, I64);
impl_scalar!(f32, F32);
impl_scalar!(f64, F64);
impl_scalar!(bool, Bool);
impl_scalar!(String, Text);
