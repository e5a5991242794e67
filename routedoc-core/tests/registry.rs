use std::sync::Arc;
use std::thread;

use routedoc_core::{
    EndpointDescriptor, FnHook, Hook, HookError, Hooks, Method, Registry, RegistryError,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn registry_with(hooks: Hooks) -> Registry {
    Registry::with_hooks(Arc::new(hooks))
}

// ── Registration defaults ───────────────────────────────────────────────────

#[test]
fn new_registry_is_empty() {
    let registry = Registry::new();
    assert!(registry.is_empty());
    assert!(registry.snapshot().is_empty());
}

#[test]
fn register_defaults_success_status() {
    let registry = Registry::new();
    registry.register(EndpointDescriptor::post("/users")).unwrap();
    registry.register(EndpointDescriptor::delete("/users/{id}")).unwrap();
    registry.register(EndpointDescriptor::get("/users")).unwrap();

    let snapshot = registry.snapshot();
    let status = |method: Method, path: &str| {
        snapshot
            .iter()
            .find(|e| e.method == method && e.path == path)
            .and_then(|e| e.success_status)
    };
    assert_eq!(status(Method::POST, "/users"), Some(201));
    assert_eq!(status(Method::DELETE, "/users/{id}"), Some(204));
    assert_eq!(status(Method::GET, "/users"), Some(200));
}

#[test]
fn register_defaults_operation_id() {
    let registry = Registry::new();
    registry
        .register(EndpointDescriptor::get("/users/{id}/posts"))
        .unwrap();
    assert_eq!(registry.snapshot()[0].operation_id, "get_users_id_posts");
}

#[test]
fn register_keeps_explicit_operation_id() {
    let registry = Registry::new();
    registry
        .register(EndpointDescriptor::get("/users").with_operation_id("listUsers"))
        .unwrap();
    assert_eq!(registry.snapshot()[0].operation_id, "listUsers");
}

#[test]
fn register_adds_success_response_when_none_declared() {
    let registry = Registry::new();
    registry.register(EndpointDescriptor::post("/users")).unwrap();
    let endpoint = &registry.snapshot()[0];
    assert_eq!(endpoint.responses.keys().copied().collect::<Vec<_>>(), vec![201]);
}

#[test]
fn register_does_not_touch_declared_responses() {
    let registry = Registry::new();
    registry
        .register(EndpointDescriptor::post("/jobs").with_empty_response(202))
        .unwrap();
    let endpoint = &registry.snapshot()[0];
    assert_eq!(endpoint.responses.keys().copied().collect::<Vec<_>>(), vec![202]);
}

// ── Snapshot ────────────────────────────────────────────────────────────────

#[test]
fn snapshot_sorted_by_path_then_method() {
    let registry = Registry::new();
    registry.register(EndpointDescriptor::post("/users")).unwrap();
    registry.register(EndpointDescriptor::get("/health")).unwrap();
    registry.register(EndpointDescriptor::get("/users")).unwrap();
    registry.register(EndpointDescriptor::delete("/users")).unwrap();

    let order: Vec<(String, String)> = registry
        .snapshot()
        .iter()
        .map(|e| (e.path.clone(), e.method.to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("/health".to_string(), "GET".to_string()),
            ("/users".to_string(), "DELETE".to_string()),
            ("/users".to_string(), "GET".to_string()),
            ("/users".to_string(), "POST".to_string()),
        ]
    );
}

#[test]
fn snapshot_does_not_reflect_later_registrations() {
    let registry = Registry::new();
    registry.register(EndpointDescriptor::get("/a")).unwrap();
    let snapshot = registry.snapshot();
    registry.register(EndpointDescriptor::get("/b")).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(registry.len(), 2);
}

#[test]
fn reset_clears_endpoints() {
    let registry = Registry::new();
    registry.register(EndpointDescriptor::get("/a")).unwrap();
    registry.reset();
    assert!(registry.is_empty());
}

#[test]
fn concurrent_registration() {
    let registry = Arc::new(Registry::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                for j in 0..25 {
                    registry
                        .register(EndpointDescriptor::get(format!("/r{i}/{j}")))
                        .unwrap();
                    let _ = registry.snapshot();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.len(), 200);
}

// ── Route-registration hooks ────────────────────────────────────────────────

struct AutoTag;

impl Hook for AutoTag {
    fn name(&self) -> &str {
        "auto-tag"
    }

    fn on_route_register(&self, endpoint: &mut EndpointDescriptor) -> Result<(), HookError> {
        if endpoint.path.starts_with("/admin/") {
            endpoint.tags.push("admin".to_string());
        }
        Ok(())
    }
}

#[test]
fn hook_mutates_endpoint_before_storage() {
    let hooks = Hooks::new();
    hooks.register(AutoTag);
    let registry = registry_with(hooks);

    registry
        .register(EndpointDescriptor::get("/admin/users"))
        .unwrap();
    registry.register(EndpointDescriptor::get("/users")).unwrap();

    let snapshot = registry.snapshot();
    assert_eq!(snapshot[0].tags, vec!["admin".to_string()]);
    assert!(snapshot[1].tags.is_empty());
}

#[test]
fn hook_sees_defaulted_fields() {
    let hooks = Hooks::new();
    hooks.register(FnHook::new("check").on_route_register(|endpoint| {
        if endpoint.operation_id.is_empty() || endpoint.success_status.is_none() {
            return Err(HookError::new("defaults missing"));
        }
        Ok(())
    }));
    let registry = registry_with(hooks);
    registry.register(EndpointDescriptor::get("/ok")).unwrap();
}

#[test]
fn hook_rejection_aborts_registration() {
    let hooks = Hooks::new();
    hooks.register(FnHook::new("no-internal").on_route_register(|endpoint| {
        if endpoint.path.starts_with("/internal") {
            Err(HookError::new("internal routes are not documented"))
        } else {
            Ok(())
        }
    }));
    let registry = registry_with(hooks);

    let err = registry
        .register(EndpointDescriptor::get("/internal/metrics"))
        .unwrap_err();
    let RegistryError::Rejected { hook, method, path, source } = err;
    assert_eq!(hook, "no-internal");
    assert_eq!(method, "GET");
    assert_eq!(path, "/internal/metrics");
    assert_eq!(source.message(), "internal routes are not documented");

    assert!(registry.is_empty());
    registry.register(EndpointDescriptor::get("/public")).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn rejection_message_names_hook_and_route() {
    let hooks = Hooks::new();
    hooks.register(FnHook::new("deny").on_route_register(|_| Err("nope".into())));
    let registry = registry_with(hooks);
    let err = registry.register(EndpointDescriptor::put("/x")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "registration of PUT /x rejected by hook `deny`: nope"
    );
}
