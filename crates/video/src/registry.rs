//! Scheme-keyed backend registries and the recursive URI factory.
//!
//! Terminal backends consume the locator of their URI directly. Compositional
//! backends get their locator resolved first, as a nested URI, and take
//! ownership of the resulting inner backend.

use {
    crate::*,
    std::{collections::HashMap, sync::OnceLock},
};

pub type TerminalConstructor<T> = Box<dyn Fn(&Uri) -> Result<Box<T>, VideoError> + Send + Sync>;

pub type CompositionalConstructor<T> =
    Box<dyn Fn(&Uri, Box<T>) -> Result<Box<T>, VideoError> + Send + Sync>;

pub enum Factory<T: ?Sized> {
    Terminal(TerminalConstructor<T>),
    Compositional(CompositionalConstructor<T>),
}

impl<T: ?Sized> Factory<T> {
    pub fn is_compositional(&self) -> bool {
        matches!(self, Factory::Compositional(_))
    }
}

/// Mapping from scheme token to backend constructor.
pub struct Registry<T: ?Sized> {
    factories: HashMap<String, Factory<T>>,
}

pub type SourceRegistry = Registry<dyn VideoSource>;
pub type SinkRegistry = Registry<dyn RecordingSink>;

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Registry<T> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    fn insert(&mut self, scheme: &str, factory: Factory<T>) -> &mut Self {
        if self.factories.insert(scheme.to_string(), factory).is_some() {
            log::warn!("scheme {scheme} registered twice, keeping the latest");
        }
        self
    }

    pub fn register_terminal<F>(&mut self, scheme: &str, constructor: F) -> &mut Self
    where
        F: Fn(&Uri) -> Result<Box<T>, VideoError> + Send + Sync + 'static,
    {
        self.insert(scheme, Factory::Terminal(Box::new(constructor)))
    }

    pub fn register_compositional<F>(&mut self, scheme: &str, constructor: F) -> &mut Self
    where
        F: Fn(&Uri, Box<T>) -> Result<Box<T>, VideoError> + Send + Sync + 'static,
    {
        self.insert(scheme, Factory::Compositional(Box::new(constructor)))
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.factories.contains_key(scheme)
    }

    pub fn get(&self, scheme: &str) -> Option<&Factory<T>> {
        self.factories.get(scheme)
    }

    /// Registered schemes, sorted.
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }

    /// Parse `uri` and build the backend chain it describes.
    pub fn open(&self, uri: &str) -> Result<Box<T>, VideoError> {
        self.open_uri(&parse_uri(uri)?)
    }

    /// Build the backend chain for an already parsed URI.
    ///
    /// Errors raised below the top level are wrapped in [`VideoError::Backend`]
    /// once per enclosing scheme.
    pub fn open_uri(&self, uri: &Uri) -> Result<Box<T>, VideoError> {
        let factory = self
            .factories
            .get(&uri.scheme)
            .ok_or_else(|| VideoError::UnknownScheme(uri.scheme.clone()))?;
        let wrap = |error| VideoError::backend(&uri.scheme, error);
        match factory {
            Factory::Terminal(constructor) => {
                log::debug!("opening {} backend at {:?}", uri.scheme, uri.locator);
                constructor(uri).map_err(wrap)
            }
            Factory::Compositional(constructor) => {
                log::debug!("opening {} backend around {:?}", uri.scheme, uri.locator);
                let inner = self.open(&uri.locator).map_err(wrap)?;
                constructor(uri, inner).map_err(wrap)
            }
        }
    }
}

impl Registry<dyn VideoSource> {
    /// A registry holding every capture backend built into this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        videoin::register_builtin(&mut registry);
        registry
    }
}

impl Registry<dyn RecordingSink> {
    /// A registry holding every recording backend built into this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        videoout::register_builtin(&mut registry);
        registry
    }
}

/// The process-wide source registry, built on first use.
pub fn default_source_registry() -> &'static SourceRegistry {
    static REGISTRY: OnceLock<SourceRegistry> = OnceLock::new();
    REGISTRY.get_or_init(SourceRegistry::with_builtin)
}

/// The process-wide sink registry, built on first use.
pub fn default_sink_registry() -> &'static SinkRegistry {
    static REGISTRY: OnceLock<SinkRegistry> = OnceLock::new();
    REGISTRY.get_or_init(SinkRegistry::with_builtin)
}

/// Open a capture source through the default registry.
pub fn open_video(uri: &str) -> Result<Box<dyn VideoSource>, VideoError> {
    default_source_registry().open(uri)
}

/// Open a recording sink through the default registry.
pub fn open_output(uri: &str) -> Result<Box<dyn RecordingSink>, VideoError> {
    default_sink_registry().open(uri)
}
