//! Logical schema types. Pure data.
//!
//! Sampled schemas are positional: field `i` describes column `i` of every
//! sampled file. Duplicate names are allowed because headers are trusted
//! as-is.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::{hash_serde, Hash256};

/// Column type. Sampling never infers beyond raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Utf8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    pub fn utf8(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Utf8)
    }

    /// Synthetic name used when the source has no header row.
    pub fn placeholder_name(index: usize) -> String {
        format!("col_{index}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, idx: usize) -> Option<&Field> {
        self.fields.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Stable content hash of the field list.
    pub fn fingerprint(&self) -> Result<Hash256> {
        hash_serde(&self.fields)
    }
}

impl From<Vec<Field>> for Schema {
    fn from(fields: Vec<Field>) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_names_are_positional() {
        assert_eq!(Field::placeholder_name(0), "col_0");
        assert_eq!(Field::placeholder_name(12), "col_12");
    }

    #[test]
    fn index_of_returns_first_duplicate() {
        let schema = Schema::new(vec![Field::utf8("a"), Field::utf8("b"), Field::utf8("a")]);
        assert_eq!(schema.index_of("a"), Some(0));
        assert_eq!(schema.index_of("missing"), None);
        assert_eq!(schema.names(), vec!["a", "b", "a"]);
    }

    #[test]
    fn fingerprint_depends_on_order() {
        let ab = Schema::new(vec![Field::utf8("a"), Field::utf8("b")]);
        let ba = Schema::new(vec![Field::utf8("b"), Field::utf8("a")]);
        assert_eq!(ab.fingerprint().unwrap(), ab.clone().fingerprint().unwrap());
        assert_ne!(ab.fingerprint().unwrap(), ba.fingerprint().unwrap());
    }
}
