//! Extension hooks.
//!
//! A [`Hook`] observes three moments of the pipeline:
//!
//! | Extension point      | Invoked by            | Receives |
//! |----------------------|-----------------------|----------|
//! | `on_route_register`  | `Registry::register`  | the endpoint about to be stored |
//! | `on_schema_generate` | the schema builder    | a named component schema, fully populated |
//! | `on_spec_build`      | the document builder  | the assembled document |
//!
//! Hooks run in ascending name order. The first error stops the chain.
//!
//! # Example
//!
//! ```ignore
//! struct AutoTag;
//!
//! impl Hook for AutoTag {
//!     fn name(&self) -> &str { "auto-tag" }
//!
//!     fn on_route_register(&self, endpoint: &mut EndpointDescriptor) -> Result<(), HookError> {
//!         if endpoint.path.starts_with("/admin/") {
//!             endpoint.tags.push("admin".into());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let hooks = Arc::new(Hooks::new());
//! hooks.register(AutoTag);
//! let registry = Registry::with_hooks(hooks);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use crate::descriptor::EndpointDescriptor;
use crate::document::{Document, Schema};
use crate::error::{HookError, HookFailure};

/// Observer of the generation pipeline. Every callback defaults to a no-op.
pub trait Hook: Send + Sync + 'static {
    /// Unique name; also the execution order key.
    fn name(&self) -> &str;

    /// Inspect or mutate an endpoint before it is stored. An error rejects
    /// the registration.
    fn on_route_register(&self, _endpoint: &mut EndpointDescriptor) -> Result<(), HookError> {
        Ok(())
    }

    /// Enrich a named component schema in place.
    fn on_schema_generate(&self, _component: &str, _schema: &mut Schema) -> Result<(), HookError> {
        Ok(())
    }

    /// Adjust the finished document (servers, security schemes, ...).
    fn on_spec_build(&self, _document: &mut Document) -> Result<(), HookError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    RouteRegister,
    SchemaGenerate,
    SpecBuild,
}

impl HookPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookPoint::RouteRegister => "on_route_register",
            HookPoint::SchemaGenerate => "on_schema_generate",
            HookPoint::SpecBuild => "on_spec_build",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name-keyed set of hooks.
#[derive(Default)]
pub struct Hooks {
    inner: RwLock<BTreeMap<String, Arc<dyn Hook>>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook, replacing any hook with the same name.
    pub fn register<H: Hook>(&self, hook: H) {
        self.register_arc(Arc::new(hook));
    }

    pub fn register_arc(&self, hook: Arc<dyn Hook>) {
        let name = hook.name().to_string();
        info!(hook = %name, "hook registered");
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, hook);
    }

    /// Remove a hook, returning it if it was registered.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn Hook>> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Hook>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Registered names in execution order.
    pub fn names(&self) -> Vec<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn run_route_register(&self, endpoint: &mut EndpointDescriptor) -> Result<(), HookFailure> {
        self.run(HookPoint::RouteRegister, |hook| hook.on_route_register(endpoint))
    }

    pub fn run_schema_generate(&self, component: &str, schema: &mut Schema) -> Result<(), HookFailure> {
        self.run(HookPoint::SchemaGenerate, |hook| {
            hook.on_schema_generate(component, schema)
        })
    }

    pub fn run_spec_build(&self, document: &mut Document) -> Result<(), HookFailure> {
        self.run(HookPoint::SpecBuild, |hook| hook.on_spec_build(document))
    }

    // Callbacks run on a snapshot, outside the lock, so a hook may itself
    // touch the hook set or the registry.
    fn run<F>(&self, point: HookPoint, mut call: F) -> Result<(), HookFailure>
    where
        F: FnMut(&dyn Hook) -> Result<(), HookError>,
    {
        let hooks: Vec<Arc<dyn Hook>> = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        for hook in hooks {
            debug!(hook = hook.name(), point = %point, "hook executed");
            call(hook.as_ref()).map_err(|source| HookFailure {
                hook: hook.name().to_string(),
                point,
                source,
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").field("names", &self.names()).finish()
    }
}

type RouteFn = Box<dyn Fn(&mut EndpointDescriptor) -> Result<(), HookError> + Send + Sync>;
type SchemaFn = Box<dyn Fn(&str, &mut Schema) -> Result<(), HookError> + Send + Sync>;
type SpecFn = Box<dyn Fn(&mut Document) -> Result<(), HookError> + Send + Sync>;

/// A hook assembled from closures, for observers that need a single callback.
///
/// ```ignore
/// hooks.register(FnHook::new("servers").on_spec_build(|doc| {
///     doc.servers.push(Server::new("https://api.example.com"));
///     Ok(())
/// }));
/// ```
pub struct FnHook {
    name: String,
    route: Option<RouteFn>,
    schema: Option<SchemaFn>,
    spec: Option<SpecFn>,
}

impl FnHook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: None,
            schema: None,
            spec: None,
        }
    }

    pub fn on_route_register<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut EndpointDescriptor) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.route = Some(Box::new(f));
        self
    }

    pub fn on_schema_generate<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &mut Schema) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.schema = Some(Box::new(f));
        self
    }

    pub fn on_spec_build<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.spec = Some(Box::new(f));
        self
    }
}

impl Hook for FnHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_route_register(&self, endpoint: &mut EndpointDescriptor) -> Result<(), HookError> {
        match &self.route {
            Some(f) => f(endpoint),
            None => Ok(()),
        }
    }

    fn on_schema_generate(&self, component: &str, schema: &mut Schema) -> Result<(), HookError> {
        match &self.schema {
            Some(f) => f(component, schema),
            None => Ok(()),
        }
    }

    fn on_spec_build(&self, document: &mut Document) -> Result<(), HookError> {
        match &self.spec {
            Some(f) => f(document),
            None => Ok(()),
        }
    }
}
