//! Resource descriptors
//!
//! A descriptor is the raw JSON record produced by resource discovery. Its
//! shape differs per kind, so it stays a [`Value`] and widget sets pull typed
//! views out of it with [`ResourceDescriptor::field`].

use super::registry::{classify, ResourceKind};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key/value tag attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceDescriptor(Value);

impl ResourceDescriptor {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Identifier string, required by every widget set
    pub fn arn(&self) -> Result<&str> {
        self.identifier().ok_or(Error::MissingField("ResourceARN"))
    }

    pub fn identifier(&self) -> Option<&str> {
        self.0.get("ResourceARN").and_then(Value::as_str)
    }

    /// Kind from the explicit `Kind` tag, else from the identifier
    pub fn kind(&self) -> Option<ResourceKind> {
        if let Some(tag) = self.0.get("Kind").and_then(Value::as_str) {
            return ResourceKind::from_tag(tag);
        }
        classify(self.identifier()?)
    }

    /// Look up a value using a dot-notation path (`Extras.LoadBalancerName`)
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut current = &self.0;
        for part in path.split('.') {
            current = match part.parse::<usize>() {
                Ok(idx) => current.get(idx)?,
                Err(_) => current.get(part)?,
            };
        }
        Some(current)
    }

    /// Non-empty string at a dot-notation path
    pub fn str_field(&self, path: &str) -> Option<&str> {
        self.lookup(path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Deserialize the value at `path` into a typed view.
    /// Absent and null values are `None`; a value of the wrong shape is an error.
    pub fn field<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.lookup(path) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(T::deserialize(value)?)),
        }
    }

    /// Like [`field`](Self::field) but treats absence as an empty list
    pub fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        Ok(self.field(path)?.unwrap_or_default())
    }

    pub fn tags(&self) -> Result<Vec<Tag>> {
        self.list("Tags")
    }

    /// Value of the first tag with `key`. Malformed tag lists read as untagged.
    pub fn tag_value(&self, key: &str) -> Option<String> {
        self.tags()
            .ok()?
            .into_iter()
            .find(|t| t.key == key)
            .map(|t| t.value)
    }
}

impl From<Value> for ResourceDescriptor {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
