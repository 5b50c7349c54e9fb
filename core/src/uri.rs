//! Splitting and joining diagram URIs.
//!
//! A diagram URI is `<base route>/<process model id>`. The base route
//! addresses one management endpoint; the last segment names the model.

/// A diagram URI taken apart at its last separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDiagramUri {
    pub base_route: String,
    pub process_model_id: String,
}

/// Split `uri` at its rightmost `/`.
///
/// A URI without any separator yields an empty base route and the whole
/// string as the process model id.
pub fn parse_diagram_uri(uri: &str) -> ParsedDiagramUri {
    match uri.rfind('/') {
        Some(idx) => ParsedDiagramUri {
            base_route: uri[..idx].to_string(),
            process_model_id: uri[idx + 1..].to_string(),
        },
        None => ParsedDiagramUri {
            base_route: String::new(),
            process_model_id: uri.to_string(),
        },
    }
}

/// Join a base route and a process model id.
pub fn diagram_uri(base_route: &str, process_model_id: &str) -> String {
    format!("{base_route}/{process_model_id}")
}

/// Strip one trailing `/` from a pathspec.
pub fn normalize_pathspec(pathspec: &str) -> &str {
    pathspec.strip_suffix('/').unwrap_or(pathspec)
}
