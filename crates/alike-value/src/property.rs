//! Dotted property-path lookup (`address.street`).
//!
//! A path step applied to a list or set is applied to every element, so
//! `users.id` on a list of users yields the list of their ids.

use crate::error::{ValueError, ValueResult};
use crate::key::Key;
use crate::value::Value;

impl Value {
    /// Resolve a dotted property path against this value.
    pub fn property(&self, path: &str) -> ValueResult<Value> {
        path.split('.')
            .try_fold(self.clone(), |current, name| current.member(name))
    }

    /// Resolve a single member name.
    pub fn member(&self, name: &str) -> ValueResult<Value> {
        match self {
            Value::Record(node) => {
                let record = node.read()?;
                record
                    .get(name)
                    .cloned()
                    .ok_or_else(|| not_found(name, record.type_name()))
            }
            Value::Map(node) => node
                .read()?
                .get(&Key::Str(name.to_string()))
                .cloned()
                .ok_or_else(|| not_found(name, "map")),
            Value::List(node) => {
                let items = node.snapshot()?;
                let members = items
                    .iter()
                    .map(|item| item.member(name))
                    .collect::<ValueResult<Vec<_>>>()?;
                Ok(Value::list(members))
            }
            Value::Set(node) => {
                let items = node.snapshot()?;
                let members = items
                    .iter()
                    .map(|item| item.member(name))
                    .collect::<ValueResult<Vec<_>>>()?;
                Ok(Value::set(members))
            }
            other => Err(not_found(name, other.type_label())),
        }
    }
}

fn not_found(property: &str, owner: &str) -> ValueError {
    ValueError::PropertyNotFound {
        property: property.to_string(),
        owner: owner.to_string(),
    }
}
