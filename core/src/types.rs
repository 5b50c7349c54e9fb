//! Wire DTOs of the management API and the repository's own records.
//!
//! # Design
//! The process model types mirror the mock-server's schema but are defined
//! independently; integration tests catch drift. Extra fields the engine
//! sends along with a process model (start events, flags) are ignored.

use serde::{Deserialize, Serialize};

/// A stored process definition as the management API returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessModel {
    pub id: String,
    pub xml: String,
}

/// Envelope returned by `GET process_models`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessModelList {
    #[serde(default)]
    pub process_models: Vec<ProcessModel>,
}

/// Request payload for `POST process_models/{id}/update`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcessModelPayload {
    pub overwrite_existing: bool,
    pub xml: String,
}

/// One remotely stored process definition, seen as a file in a folder.
///
/// `id` and `name` both carry the process model id. `uri` is always
/// `<base route>/<id>` for the endpoint the diagram was read from or last
/// written to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagram {
    pub name: String,
    pub xml: String,
    pub id: String,
    pub uri: String,
}

/// An ordered set of diagrams sharing one base route.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Solution {
    pub uri: String,
    pub diagrams: Vec<Diagram>,
}
