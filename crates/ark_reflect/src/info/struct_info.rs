use ark_utils::hash::HashMap;

use crate::info::NamedField;

/// The fields of a record, in declaration order.
///
/// # Examples
///
/// ```
/// use ark_reflect::{derive::Record, info::Typed};
///
/// #[derive(Record)]
/// struct A {
///     val: f32,
///     #[record(skip)]
///     cache: Vec<u8>,
/// }
///
/// let info = A::type_info().as_struct().unwrap();
/// assert_eq!(info.field_len(), 1);
/// assert_eq!(info.index_of("val"), Some(0));
/// assert!(info.field("cache").is_none());
/// # let _ = A { val: 0.0, cache: vec![] }.cache;
/// ```
#[derive(Debug)]
pub struct StructInfo {
    fields: Box<[NamedField]>,
    indices: HashMap<&'static str, usize>,
}

impl StructInfo {
    /// Creates the information from fields in declaration order.
    pub fn new(fields: &[NamedField]) -> Self {
        let indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();

        Self {
            fields: fields.into(),
            indices,
        }
    }

    /// Returns the field called `name`.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.get(*self.indices.get(name)?)
    }

    /// Returns the field at `index`.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns the position of the field called `name`.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Iterates over the fields in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> Box<[&'static str]> {
        self.fields.iter().map(NamedField::name).collect()
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
