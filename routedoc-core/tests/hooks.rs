use std::sync::{Arc, Mutex};

use routedoc_core::{
    Document, EndpointDescriptor, FnHook, Hook, HookError, HookPoint, Hooks, Info, Schema,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn recording_hook(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> FnHook {
    FnHook::new(name).on_route_register(move |_| {
        log.lock().unwrap().push(name.to_string());
        Ok(())
    })
}

fn empty_document() -> Document {
    Document::new(Info {
        title: "Test".into(),
        version: "1.0.0".into(),
        description: None,
    })
}

// ── Hook set management ─────────────────────────────────────────────────────

#[test]
fn register_and_lookup() {
    let hooks = Hooks::new();
    hooks.register(FnHook::new("test-hook"));

    let hook = hooks.get("test-hook").unwrap();
    assert_eq!(hook.name(), "test-hook");
    assert_eq!(hooks.names(), vec!["test-hook".to_string()]);
    assert_eq!(hooks.len(), 1);
}

#[test]
fn unregister_removes_hook() {
    let hooks = Hooks::new();
    hooks.register(FnHook::new("test-hook"));
    assert!(hooks.unregister("test-hook").is_some());
    assert!(hooks.get("test-hook").is_none());
    assert!(hooks.is_empty());
}

#[test]
fn same_name_replaces() {
    let hooks = Hooks::new();
    hooks.register(FnHook::new("dup"));
    hooks.register(FnHook::new("dup").on_spec_build(|doc| {
        doc.info.title = "replaced".into();
        Ok(())
    }));
    assert_eq!(hooks.len(), 1);

    let mut doc = empty_document();
    hooks.run_spec_build(&mut doc).unwrap();
    assert_eq!(doc.info.title, "replaced");
}

#[test]
fn clear_removes_everything() {
    let hooks = Hooks::new();
    hooks.register(FnHook::new("a"));
    hooks.register(FnHook::new("b"));
    hooks.clear();
    assert!(hooks.names().is_empty());
}

// ── Execution order ─────────────────────────────────────────────────────────

#[test]
fn hooks_run_in_name_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let hooks = Hooks::new();
    hooks.register(recording_hook("zeta", log.clone()));
    hooks.register(recording_hook("alpha", log.clone()));
    hooks.register(recording_hook("mid", log.clone()));

    let mut endpoint = EndpointDescriptor::get("/x");
    hooks.run_route_register(&mut endpoint).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn first_failure_stops_the_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let hooks = Hooks::new();
    hooks.register(FnHook::new("b-fail").on_route_register(|_| Err("boom".into())));
    hooks.register(recording_hook("a-ok", log.clone()));
    hooks.register(recording_hook("c-never", log.clone()));

    let mut endpoint = EndpointDescriptor::get("/x");
    let failure = hooks.run_route_register(&mut endpoint).unwrap_err();

    assert_eq!(failure.hook, "b-fail");
    assert_eq!(failure.point, HookPoint::RouteRegister);
    assert_eq!(failure.source, HookError::new("boom"));
    assert_eq!(*log.lock().unwrap(), vec!["a-ok"]);
}

// ── Default callbacks ───────────────────────────────────────────────────────

struct OnlyName;

impl Hook for OnlyName {
    fn name(&self) -> &str {
        "only-name"
    }
}

#[test]
fn default_callbacks_are_no_ops() {
    let hooks = Hooks::new();
    hooks.register(OnlyName);

    let mut endpoint = EndpointDescriptor::get("/x");
    hooks.run_route_register(&mut endpoint).unwrap();
    assert!(endpoint.tags.is_empty());

    let mut schema = Schema::object();
    hooks.run_schema_generate("User", &mut schema).unwrap();
    assert_eq!(schema, Schema::object());

    let mut doc = empty_document();
    hooks.run_spec_build(&mut doc).unwrap();
    assert_eq!(doc, empty_document());
}

#[test]
fn schema_hook_receives_component_name() {
    let hooks = Hooks::new();
    hooks.register(FnHook::new("validated").on_schema_generate(|name, schema| {
        schema
            .extensions
            .insert("x-component".into(), serde_json::json!(name));
        Ok(())
    }));

    let mut schema = Schema::object();
    hooks.run_schema_generate("dto_User", &mut schema).unwrap();
    assert_eq!(schema.extensions["x-component"], "dto_User");
}

#[test]
fn failure_display_includes_point() {
    let hooks = Hooks::new();
    hooks.register(FnHook::new("bad").on_spec_build(|_| Err("no servers".into())));
    let mut doc = empty_document();
    let failure = hooks.run_spec_build(&mut doc).unwrap_err();
    assert_eq!(
        failure.to_string(),
        "hook `bad` failed during on_spec_build: no servers"
    );
}
