//! Transit stop types.

use std::fmt;

use serde::Serialize;

/// Opaque stop identifier assigned by the transit API.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical boarding location, as returned by a name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    id: StopId,
    name: String,
}

impl Stop {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: StopId::new(id),
            name: name.into(),
        }
    }

    pub fn id(&self) -> &StopId {
        &self.id
    }

    /// Canonical display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_id_display() {
        let stop = Stop::new("9021014004830000", "Musikvägen, Göteborg");
        assert_eq!(stop.id().to_string(), "9021014004830000");
        assert_eq!(format!("{:?}", stop.id()), "StopId(9021014004830000)");
    }
}
