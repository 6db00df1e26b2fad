use http::Method;
use smallvec::SmallVec;

/// Methods a method map may carry through the CORS wrapper by default.
pub const DEFAULT_ROUTE_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
];

/// Set of HTTP methods accepted in method maps
///
/// Methods outside the set are dropped from method maps when a route table is
/// wrapped. The set is plain configuration, so extension methods (or `TRACE`)
/// can be admitted without touching the wrapper.
///
/// ```rust
/// use http::Method;
/// use route_cors::route::MethodSet;
///
/// let set = MethodSet::standard().with(Method::TRACE);
/// assert!(set.contains(&Method::TRACE));
/// assert!(set.contains(&Method::PATCH));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSet {
    methods: SmallVec<[Method; 8]>,
}

impl MethodSet {
    /// GET, POST, PUT, DELETE, PATCH, OPTIONS and HEAD
    #[must_use]
    pub fn standard() -> Self {
        DEFAULT_ROUTE_METHODS.into_iter().collect()
    }

    /// A set with no methods (every method-map entry loses all its handlers
    /// and keeps only the synthesized preflight).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            methods: SmallVec::new(),
        }
    }

    /// Admit an additional method
    #[must_use]
    pub fn with(mut self, method: Method) -> Self {
        if !self.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    /// Remove a method from the set
    #[must_use]
    pub fn without(mut self, method: &Method) -> Self {
        self.methods.retain(|m| m != method);
        self
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, method: &Method) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl Default for MethodSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromIterator<Method> for MethodSet {
    fn from_iter<I: IntoIterator<Item = Method>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), MethodSet::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set_matches_default_methods() {
        let set = MethodSet::standard();
        assert_eq!(set.len(), 7);
        for method in DEFAULT_ROUTE_METHODS.iter() {
            assert!(set.contains(method), "{method} missing");
        }
        assert!(!set.contains(&Method::TRACE));
        assert!(!set.contains(&Method::CONNECT));
    }

    #[test]
    fn test_extension_methods() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        let set = MethodSet::standard().with(purge.clone()).without(&Method::HEAD);
        assert!(set.contains(&purge));
        assert!(!set.contains(&Method::HEAD));
        assert_eq!(set.len(), 7);
        assert_eq!(set.iter().last(), Some(&purge));
        assert!(MethodSet::empty().iter().next().is_none());
    }

    #[test]
    fn test_duplicates_collapse() {
        let set: MethodSet = [Method::GET, Method::GET, Method::POST].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
