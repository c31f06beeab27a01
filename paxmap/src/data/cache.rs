use std::fmt;

use crate::config::DEFAULT_CACHE_MAX_AGE_SECS;

/// `Cache-Control` policy advertised for the feature data endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// `max-age` in seconds
    pub max_age: u64,
    pub public: bool,
    pub must_revalidate: bool,
}

impl CachePolicy {
    /// Public policy with the given `max-age` that must be revalidated once stale.
    pub fn with_max_age(max_age: u64) -> Self {
        Self {
            max_age,
            ..Self::default()
        }
    }

    /// Value of the `Cache-Control` header.
    pub fn header_value(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        parts.push(if self.public { "public" } else { "private" }.to_string());
        parts.push(format!("max-age={}", self.max_age));
        if self.must_revalidate {
            parts.push("must-revalidate".to_string());
        }
        parts.join(", ")
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_CACHE_MAX_AGE_SECS,
            public: true,
            must_revalidate: true,
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cache-Control: {}", self.header_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header() {
        assert_eq!(
            CachePolicy::default().header_value(),
            "public, max-age=100, must-revalidate"
        );
    }

    #[test]
    fn test_custom_policy() {
        let policy = CachePolicy {
            public: false,
            must_revalidate: false,
            ..CachePolicy::with_max_age(30)
        };
        assert_eq!(policy.header_value(), "private, max-age=30");
        assert_eq!(policy.to_string(), "Cache-Control: private, max-age=30");
    }
}
