use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

const MASK: &str = "********";

/// Wraps a credential (API key, account password) so it never leaks through
/// `Debug`/`Display`, which is what `tracing` fields and error messages use.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(T);

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Access the real value. Call sites should be the ones that hand the
    /// credential to its consumer (an HTTP header, a password check).
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl Masked<String> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialized snapshots (persisted session, API responses) get the mask too.
        serializer.serialize_str(MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_masked() {
        let key = Masked::new("rapid-key-123".to_string());
        assert_eq!(format!("{:?}", key), MASK);
        assert_eq!(format!("{}", key), MASK);
        assert_eq!(key.expose(), "rapid-key-123");
    }

    #[test]
    fn test_deserialize_is_transparent_and_serialize_masks() {
        let key: Masked<String> = serde_json::from_str("\"secret\"").unwrap();
        assert_eq!(key.expose(), "secret");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"********\"");
    }
}
