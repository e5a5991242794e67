/// Rewrite framework path placeholders into OpenAPI form.
///
/// `:id` segments become `{id}`; segments already in braces and catch-all
/// `*rest` segments are left as they are.
///
/// ```
/// use routedoc_openapi::normalize_path;
///
/// assert_eq!(normalize_path("/users/:id/posts"), "/users/{id}/posts");
/// assert_eq!(normalize_path("/users/{id}"), "/users/{id}");
/// ```
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => format!("{{{name}}}"),
            _ => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
