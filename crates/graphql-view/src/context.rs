//! Per-operation context made visible to resolvers.

/// Read-only details of the HTTP request an operation arrived in, inserted
/// into the engine context for every execution.
#[derive(Debug, Clone)]
pub struct HttpRequestContext {
    pub method: http::Method,
    pub uri: http::Uri,
    pub headers: http::HeaderMap,
}

impl HttpRequestContext {
    pub(crate) fn new(parts: &http::request::Parts) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
        }
    }

    /// First value of a query-string parameter, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.uri.query()?;
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
        pairs
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// A request header as text, when present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

type InstallFn = Box<dyn Fn(&mut async_graphql::Data) + Send + Sync>;

/// Builds the resolver-visible context for each operation: either a fixed
/// value cloned into every execution, or a factory invoked once per
/// operation so batch items don't share state unless the factory makes
/// them.
pub struct ContextProvider {
    install: InstallFn,
}

impl ContextProvider {
    pub fn value<T>(value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self {
            install: Box::new(move |data| data.insert(value.clone())),
        }
    }

    pub fn factory<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            install: Box::new(move |data| data.insert(factory())),
        }
    }

    pub(crate) fn install(&self, data: &mut async_graphql::Data) {
        (self.install)(data);
    }
}

impl std::fmt::Debug for ContextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextProvider").finish_non_exhaustive()
    }
}
