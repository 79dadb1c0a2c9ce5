//! Resolution of schema keys to struct fields.
//!
//! Schema keys name fields by their alias (the first segment of the field's tag) or, when no
//! alias is declared, by the field's own identifier. The index maps, per struct type, every
//! external key to the field identifier. It is built for one decode call, walking the target
//! type and every struct type reachable through optionals, arrays, and lists.

use crate::{Shape, StructShape};
use std::collections::HashMap;

/// Per-type map from external key to field identifier.
#[derive(Debug, Default)]
pub struct KeyIndex {
    types: HashMap<&'static str, HashMap<String, &'static str>>,
}

impl KeyIndex {
    /// Builds the index of `shape` and every struct reachable from it.
    pub fn new(shape: &Shape) -> Self {
        let mut index = Self::default();
        index.index(shape);
        index
    }

    /// Adds `shape` to the index. Struct types already present are not walked again.
    pub fn index(&mut self, shape: &Shape) {
        match shape {
            Shape::Struct(shape) => self.index_struct(shape),
            Shape::Optional(inner) | Shape::List(inner) | Shape::Array { elem: inner, .. } => {
                self.index(inner)
            }
            Shape::Scalar(_) | Shape::DateTime => {}
        }
    }

    fn index_struct(&mut self, shape: &StructShape) {
        if self.types.contains_key(shape.name()) {
            return;
        }
        let mut keys = HashMap::with_capacity(shape.fields().len() + shape.excluded().len());
        for field in shape.fields() {
            keys.insert(field.key().to_string(), field.ident());
        }
        for field in shape.excluded() {
            keys.insert(field.key().to_string(), field.ident());
        }
        self.types.insert(shape.name(), keys);

        for field in shape.fields() {
            self.index(field.shape());
        }
    }

    /// Resolves `key` to a field identifier of `type_name`.
    ///
    /// Unknown types and unknown keys resolve to `key` itself, so a schema may name fields
    /// directly.
    pub fn resolve<'a>(&'a self, type_name: &str, key: &'a str) -> &'a str {
        self.types
            .get(type_name)
            .and_then(|keys| keys.get(key))
            .copied()
            .unwrap_or(key)
    }

    /// Returns true if `type_name` has been indexed.
    #[cfg(test)]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }
}
