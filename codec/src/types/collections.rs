//! Sheet implementations for optional values and collections.

use crate::{Error, Shape, Sheet, Value};

impl<T: Sheet> Sheet for Option<T> {
    #[inline]
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|inner| Box::new(inner.to_value())))
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, Error> {
        value.into_optional()?.map(T::from_value).transpose()
    }
}

impl<T: Sheet> Sheet for Vec<T> {
    #[inline]
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Sheet::to_value).collect())
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, Error> {
        value.into_elements()?.into_iter().map(T::from_value).collect()
    }
}

impl<T: Sheet, const N: usize> Sheet for [T; N] {
    #[inline]
    fn shape() -> Shape {
        Shape::Array {
            elem: Box::new(T::shape()),
            len: N,
        }
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Sheet::to_value).collect())
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, Error> {
        let elems = value
            .into_elements()?
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<T>, Error>>()?;
        <[T; N]>::try_from(elems).map_err(|_| Error::Mismatch("array length"))
    }
}
