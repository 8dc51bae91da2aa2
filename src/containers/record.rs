//! # Record Projection
//!
//! [`RecordMap`] exposes one tabular record as a keyed container from field
//! name to field value. Reads and writes go straight to the record's field
//! storage; the field set is fixed by the record's schema, so adding or
//! removing keys is not supported.
//!
//! ```rust
//! use container_adapters::containers::{DataRow, Map, RecordMap};
//!
//! let mut row = DataRow::new(["id", "name"], vec!["7".to_string(), "ada".to_string()]).unwrap();
//! let mut fields = RecordMap::new(&mut row);
//! fields.set("name".to_string(), "grace".to_string()).unwrap();
//! assert_eq!(fields.get(&"name".to_string()).unwrap(), "grace");
//! assert!(fields.get(&"email".to_string()).is_err());
//! ```

use std::fmt;

use super::{Collection, Enumerator, Map};
use crate::errors::{CollectionError, Result};

/// A record with a fixed, named set of fields.
pub trait Record {
    type Value;

    fn field_count(&self) -> usize;

    /// Returns the name of the field at `ordinal`.
    fn field_name(&self, ordinal: usize) -> Option<&str>;

    /// Returns the ordinal of the field called `name`.
    fn ordinal(&self, name: &str) -> Option<usize> {
        (0..self.field_count()).find(|&ordinal| self.field_name(ordinal) == Some(name))
    }

    fn value(&self, ordinal: usize) -> Option<&Self::Value>;

    /// Overwrites the value stored at `ordinal`.
    fn set_value(&mut self, ordinal: usize, value: Self::Value) -> Result<()>;
}

impl<R: Record + ?Sized> Record for &mut R {
    type Value = R::Value;

    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn field_name(&self, ordinal: usize) -> Option<&str> {
        (**self).field_name(ordinal)
    }

    fn ordinal(&self, name: &str) -> Option<usize> {
        (**self).ordinal(name)
    }

    fn value(&self, ordinal: usize) -> Option<&Self::Value> {
        (**self).value(ordinal)
    }

    fn set_value(&mut self, ordinal: usize, value: Self::Value) -> Result<()> {
        (**self).set_value(ordinal, value)
    }
}

/// An in-memory record: a column list and one value per column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataRow<V> {
    columns: Vec<String>,
    values: Vec<V>,
}

impl<V> DataRow<V> {
    /// Create a row, failing if the column and value counts differ or a column
    /// name repeats.
    pub fn new<I, S>(columns: I, values: Vec<V>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.len() != values.len() {
            return Err(CollectionError::invalid_argument(
                "values",
                format!(
                    "row has {} columns but {} values",
                    columns.len(),
                    values.len()
                ),
            ));
        }
        for (position, column) in columns.iter().enumerate() {
            if columns[..position].contains(column) {
                return Err(CollectionError::duplicate_key(column));
            }
        }
        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }
}

impl<V> Record for DataRow<V> {
    type Value = V;

    fn field_count(&self) -> usize {
        self.columns.len()
    }

    fn field_name(&self, ordinal: usize) -> Option<&str> {
        self.columns.get(ordinal).map(String::as_str)
    }

    fn value(&self, ordinal: usize) -> Option<&V> {
        self.values.get(ordinal)
    }

    fn set_value(&mut self, ordinal: usize, value: V) -> Result<()> {
        let available = self.values.len();
        let slot = self
            .values
            .get_mut(ordinal)
            .ok_or_else(|| CollectionError::index_out_of_range(ordinal, available))?;
        *slot = value;
        Ok(())
    }
}

/// A keyed view of one record, from field name to field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordMap<R> {
    record: R,
}

impl<R: Record> RecordMap<R> {
    pub fn new(record: R) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn into_inner(self) -> R {
        self.record
    }

    fn ordinal_of(&self, key: &str) -> Result<usize> {
        self.record
            .ordinal(key)
            .ok_or_else(|| CollectionError::key_not_found(key))
    }
}

impl<R> Collection<(String, R::Value)> for RecordMap<R>
where
    R: Record,
    R::Value: Clone + PartialEq,
{
    fn enumerate(&self) -> Enumerator<'_, (String, R::Value)> {
        Box::new((0..self.record.field_count()).filter_map(move |ordinal| {
            let name = self.record.field_name(ordinal)?;
            let value = self.record.value(ordinal)?;
            Some((name.to_string(), value.clone()))
        }))
    }

    fn count(&self) -> usize {
        self.record.field_count()
    }

    fn contains(&self, item: &(String, R::Value)) -> bool {
        self.try_get(&item.0).is_some_and(|value| value == item.1)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn add(&mut self, _item: (String, R::Value)) -> Result<()> {
        Err(CollectionError::NotSupported("adding a field to a record"))
    }

    fn remove(&mut self, _item: &(String, R::Value)) -> Result<bool> {
        Err(CollectionError::NotSupported("removing a field from a record"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(CollectionError::NotSupported("clearing a record"))
    }
}

impl<R> Map<String, R::Value> for RecordMap<R>
where
    R: Record,
    R::Value: Clone + PartialEq,
{
    fn try_get(&self, key: &String) -> Option<R::Value> {
        let ordinal = self.record.ordinal(key)?;
        self.record.value(ordinal).cloned()
    }

    fn get(&self, key: &String) -> Result<R::Value> {
        let ordinal = self.ordinal_of(key)?;
        self.record
            .value(ordinal)
            .cloned()
            .ok_or_else(|| CollectionError::key_not_found(key))
    }

    fn contains_key(&self, key: &String) -> bool {
        self.record.ordinal(key).is_some()
    }

    fn insert(&mut self, _key: String, _value: R::Value) -> Result<()> {
        Err(CollectionError::NotSupported("adding a field to a record"))
    }

    fn set(&mut self, key: String, value: R::Value) -> Result<()> {
        let ordinal = self.ordinal_of(&key)?;
        self.record.set_value(ordinal, value)
    }

    fn remove_key(&mut self, _key: &String) -> Result<bool> {
        Err(CollectionError::NotSupported("removing a field from a record"))
    }
}

impl<R> fmt::Display for RecordMap<R>
where
    R: Record,
    R::Value: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordMap(")?;
        let mut first = true;
        for ordinal in 0..self.record.field_count() {
            if let (Some(name), Some(value)) =
                (self.record.field_name(ordinal), self.record.value(ordinal))
            {
                if !first {
                    write!(f, ", ")?;
                }
                first = false;
                write!(f, "{}={}", name, value)?;
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> DataRow<String> {
        DataRow::new(
            ["id", "name"],
            vec!["1".to_string(), "ada".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_get_and_set_act_on_record() {
        let mut row = person();
        {
            let mut map = RecordMap::new(&mut row);
            assert_eq!(map.get(&"id".to_string()).unwrap(), "1");
            map.set("name".to_string(), "grace".to_string()).unwrap();
        }
        assert_eq!(row.values()[1], "grace");
    }

    #[test]
    fn test_missing_field_is_key_not_found() {
        let mut map = RecordMap::new(person());
        assert_eq!(
            map.get(&"email".to_string()).unwrap_err(),
            CollectionError::KeyNotFound("\"email\"".to_string())
        );
        assert!(matches!(
            map.set("email".to_string(), String::new()),
            Err(CollectionError::KeyNotFound(_))
        ));
        assert_eq!(map.try_get(&"email".to_string()), None);
    }

    #[test]
    fn test_field_set_is_fixed() {
        let mut map = RecordMap::new(person());
        assert!(matches!(
            map.insert("email".to_string(), String::new()),
            Err(CollectionError::NotSupported(_))
        ));
        assert!(matches!(
            map.remove_key(&"id".to_string()),
            Err(CollectionError::NotSupported(_))
        ));
        assert!(matches!(map.clear(), Err(CollectionError::NotSupported(_))));
        assert_eq!(map.count(), 2);
    }

    #[test]
    fn test_enumerates_in_column_order() {
        let map = RecordMap::new(person());
        assert_eq!(
            map.to_vec(),
            vec![
                ("id".to_string(), "1".to_string()),
                ("name".to_string(), "ada".to_string())
            ]
        );
        assert!(map.contains(&("name".to_string(), "ada".to_string())));
        assert!(!map.contains(&("name".to_string(), "bob".to_string())));
        assert_eq!(map.to_string(), "RecordMap(id=1, name=ada)");
    }

    #[test]
    fn test_row_shape_is_validated() {
        assert!(matches!(
            DataRow::new(["a"], vec![1, 2]),
            Err(CollectionError::InvalidArgument { name: "values", .. })
        ));
        assert!(matches!(
            DataRow::new(["a", "a"], vec![1, 2]),
            Err(CollectionError::DuplicateKey(_))
        ));
    }

    /// A record whose leading field has no value.
    struct Sparse;

    impl Record for Sparse {
        type Value = i32;

        fn field_count(&self) -> usize {
            3
        }

        fn field_name(&self, ordinal: usize) -> Option<&str> {
            match ordinal {
                0 => Some("a"),
                1 => Some("b"),
                2 => Some("c"),
                _ => None,
            }
        }

        fn value(&self, ordinal: usize) -> Option<&i32> {
            match ordinal {
                1 => Some(&2),
                2 => Some(&3),
                _ => None,
            }
        }

        fn set_value(&mut self, _ordinal: usize, _value: i32) -> Result<()> {
            Err(CollectionError::ReadOnly)
        }
    }

    #[test]
    fn test_display_skips_missing_leading_field() {
        assert_eq!(RecordMap::new(Sparse).to_string(), "RecordMap(b=2, c=3)");
    }
}
