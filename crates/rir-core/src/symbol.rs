use std::fmt;
use std::sync::Arc;

/// An opaque finite string identifying a network location, e.g. a device, an
/// interface, or the distinguished `"drop"` location.
///
/// Two symbols are equal iff their underlying strings are equal. The empty
/// string is never a valid symbol; [`Symbol::new`] is the only constructor and
/// it enforces this.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Builds a symbol from any string-like value.
    ///
    /// # Panics
    ///
    /// Panics if `s` is empty. Callers that can receive attacker-controlled or
    /// otherwise untrusted strings should use [`Symbol::try_new`] instead.
    pub fn new(s: impl Into<Arc<str>>) -> Self {
        Self::try_new(s).expect("symbol must not be empty")
    }

    /// Builds a symbol, rejecting the empty string.
    pub fn try_new(s: impl Into<Arc<str>>) -> Result<Self, EmptySymbol> {
        let s = s.into();
        if s.is_empty() {
            Err(EmptySymbol)
        } else {
            Ok(Self(s))
        }
    }

    /// Joins two components with `|`, the convention used for interface- and
    /// device-group-level alphabet symbols (`"node|interface"`).
    pub fn joined(lhs: &str, rhs: &str) -> Self {
        Self::new(format!("{lhs}|{rhs}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raised when constructing a [`Symbol`] from the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a symbol must be a non-empty string")]
pub struct EmptySymbol;

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Symbol {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Symbol::try_new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_string() {
        assert_eq!(Symbol::try_new(""), Err(EmptySymbol));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Symbol::new("r1"), Symbol::new("r1".to_string()));
        assert_ne!(Symbol::new("r1"), Symbol::new("r2"));
    }

    #[test]
    fn joined_uses_pipe_separator() {
        assert_eq!(Symbol::joined("SPINE-1", "vrf").as_str(), "SPINE-1|vrf");
    }
}
