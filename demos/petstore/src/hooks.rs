//! Project conventions enforced while routes are registered and the
//! document is built.

use std::collections::BTreeSet;
use std::sync::Arc;

use routedoc::{Document, EndpointDescriptor, FnHook, Hook, HookError, Hooks, Tag};

/// Tags untagged routes with the first segment of their path.
pub struct AutoTag;

impl Hook for AutoTag {
    fn name(&self) -> &str {
        "auto-tag"
    }

    fn on_route_register(&self, endpoint: &mut EndpointDescriptor) -> Result<(), HookError> {
        if endpoint.tags.is_empty() {
            if let Some(first) = endpoint.path.trim_start_matches('/').split('/').next() {
                if !first.is_empty() {
                    endpoint.tags.push(first.to_string());
                }
            }
        }
        Ok(())
    }
}

/// Every public route needs a summary.
pub struct RequireSummary;

impl Hook for RequireSummary {
    fn name(&self) -> &str {
        "require-summary"
    }

    fn on_route_register(&self, endpoint: &mut EndpointDescriptor) -> Result<(), HookError> {
        match endpoint.summary.as_deref() {
            Some(summary) if !summary.trim().is_empty() => Ok(()),
            _ => Err(HookError::new("missing summary")),
        }
    }
}

/// Declare every tag used by an operation in the top-level tag list.
fn tag_catalog(document: &mut Document) -> Result<(), HookError> {
    let declared: BTreeSet<String> = document.tags.iter().map(|t| t.name.clone()).collect();
    let used: BTreeSet<String> = document
        .paths
        .values()
        .flat_map(|item| item.operations())
        .flat_map(|(_, op)| op.tags.iter().cloned())
        .collect();

    for name in used.difference(&declared) {
        document.tags.push(Tag {
            name: name.clone(),
            description: None,
        });
    }
    Ok(())
}

pub fn install(hooks: &Hooks) {
    hooks.register(AutoTag);
    hooks.register(RequireSummary);
    hooks.register(FnHook::new("tag-catalog").on_spec_build(tag_catalog));
}

pub fn default_hooks() -> Arc<Hooks> {
    let hooks = Arc::new(Hooks::new());
    install(&hooks);
    hooks
}
