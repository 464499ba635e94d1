//! Request-scoped log attributes.
//!
//! A [`RequestContext`] travels with a single request through the handling
//! pipeline. Middleware appends labeled values to it; anything that logs with
//! the context afterwards picks them up without re-declaring them.
//!
//! # Design Decisions
//! - Appending returns a new context; the previous value is left untouched
//! - Attributes keep insertion order
//! - The attribute list is shared behind an `Arc`, so cloning is cheap

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, Extensions};

/// A single labeled value attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    key: &'static str,
    value: String,
}

impl Attr {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Immutable carrier of the attributes accumulated for one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    attrs: Arc<[Attr]>,
}

impl RequestContext {
    /// Create a context with no attributes.
    pub fn new() -> Self {
        Self {
            attrs: Arc::from(Vec::new()),
        }
    }

    /// Return a new context carrying the current attributes followed by `attrs`.
    pub fn append_attrs(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let mut merged = self.attrs.to_vec();
        merged.extend(attrs);
        Self {
            attrs: Arc::from(merged),
        }
    }

    /// Attributes attached so far, oldest first.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Value of the most recently attached attribute named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .rev()
            .find(|attr| attr.key == key)
            .map(Attr::value)
    }

    /// Read the context stored in request extensions, or an empty one.
    pub fn from_extensions(extensions: &Extensions) -> Self {
        extensions.get::<Self>().cloned().unwrap_or_default()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attrs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", attr.key, attr.value)?;
        }
        Ok(())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_extensions(&parts.extensions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context_has_no_attrs() {
        let ctx = RequestContext::new();
        assert!(ctx.attrs().is_empty());
        assert_eq!(ctx.to_string(), "");
    }

    #[test]
    fn test_append_leaves_original_untouched() {
        let base = RequestContext::new().append_attrs([Attr::new("request_id", "abc")]);
        let extended = base.append_attrs([Attr::new("user", "bob"), Attr::new("tenant", "t1")]);

        assert_eq!(base.attrs().len(), 1);
        assert_eq!(extended.attrs().len(), 3);
        assert_eq!(extended.attrs()[0], Attr::new("request_id", "abc"));
        assert_eq!(extended.attrs()[2].key(), "tenant");
        assert_eq!(extended.to_string(), "request_id=abc user=bob tenant=t1");
    }

    #[test]
    fn test_get_returns_latest_value() {
        let ctx = RequestContext::new()
            .append_attrs([Attr::new("step", "one")])
            .append_attrs([Attr::new("step", "two")]);

        assert_eq!(ctx.get("step"), Some("two"));
        assert_eq!(ctx.get("missing"), None);
    }

    #[test]
    fn test_from_extensions_defaults_to_empty() {
        let mut extensions = Extensions::new();
        assert!(RequestContext::from_extensions(&extensions).attrs().is_empty());

        extensions.insert(RequestContext::new().append_attrs([Attr::new("request_id", "r1")]));
        let ctx = RequestContext::from_extensions(&extensions);
        assert_eq!(ctx.get("request_id"), Some("r1"));
    }
}
