use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use crate::descriptor::EndpointDescriptor;
use crate::error::RegistryError;
use crate::hooks::Hooks;

/// Thread-safe store of endpoint descriptors.
///
/// Producers call [`register`](Registry::register), typically during
/// process startup and possibly from several threads. The document builder
/// consumes a [`snapshot`](Registry::snapshot), which is sorted by path then
/// method so the output never depends on registration order.
///
/// # Example
///
/// ```ignore
/// let registry = Registry::new();
/// registry.register(
///     EndpointDescriptor::get("/users/{id}")
///         .with_summary("Fetch a user")
///         .with_response::<User>(200),
/// )?;
/// let endpoints = registry.snapshot();
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    hooks: Arc<Hooks>,
    endpoints: RwLock<Vec<EndpointDescriptor>>,
}

impl Registry {
    /// Create an empty registry with no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose registrations pass through `hooks`.
    pub fn with_hooks(hooks: Arc<Hooks>) -> Self {
        Self {
            hooks,
            endpoints: RwLock::new(Vec::new()),
        }
    }

    pub fn hooks(&self) -> &Arc<Hooks> {
        &self.hooks
    }

    /// Default unset fields, run the route-registration hooks, then store.
    ///
    /// A hook error aborts this registration only; the registry is left as
    /// it was.
    pub fn register(&self, mut endpoint: EndpointDescriptor) -> Result<(), RegistryError> {
        endpoint.apply_defaults();

        self.hooks
            .run_route_register(&mut endpoint)
            .map_err(|failure| RegistryError::Rejected {
                hook: failure.hook,
                method: endpoint.method.to_string(),
                path: endpoint.path.clone(),
                source: failure.source,
            })?;

        info!(
            method = %endpoint.method,
            path = %endpoint.path,
            operation_id = %endpoint.operation_id,
            "route registered"
        );
        self.write().push(endpoint);
        Ok(())
    }

    /// Copy of all endpoints, sorted by path then method.
    pub fn snapshot(&self) -> Vec<EndpointDescriptor> {
        let mut out = self.read().clone();
        out.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.method.as_str().cmp(b.method.as_str()))
        });
        out
    }

    /// Drop every registered endpoint. Hooks are kept.
    pub fn reset(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Data is only appended or cleared; a poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Vec<EndpointDescriptor>> {
        self.endpoints.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<EndpointDescriptor>> {
        self.endpoints.write().unwrap_or_else(PoisonError::into_inner)
    }
}
