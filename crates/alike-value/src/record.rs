use crate::value::Value;

/// A composite value: a type name plus insertion-ordered named members.
///
/// Member lookup is by name only, so two records of different types compare
/// member-by-member as long as their names line up.
#[derive(Clone, Debug, Default)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record for the given type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Append the members of `base` that this record does not declare itself.
    ///
    /// Models members contributed by an embedded or "parent" part: they are
    /// enumerated after the record's own members.
    pub fn extend_from(mut self, base: &Record) -> Self {
        for (name, value) in &base.fields {
            if self.get(name).is_none() {
                self.fields.push((name.clone(), value.clone()));
            }
        }
        self
    }

    /// Set a member, replacing an existing member of the same name in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Look up a member by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Members in declaration order.
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
