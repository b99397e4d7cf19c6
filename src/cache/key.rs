//! Cache keys.

use std::fmt;

/// Identifies one cache entry: a resource name plus its parameters.
///
/// Displayed like `["wardrobe", "u1"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    resource: String,
    params: Vec<String>,
}

impl QueryKey {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn with(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// True when `prefix` has the same resource and its params lead ours.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.resource == prefix.resource && self.params.starts_with(&prefix.params)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}", self.resource)?;
        for param in &self.params {
            write!(f, ", {:?}", param)?;
        }
        write!(f, "]")
    }
}
