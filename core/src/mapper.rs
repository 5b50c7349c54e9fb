//! Conversions between process models and diagrams.

use crate::types::{Diagram, ProcessModel, UpdateProcessModelPayload};
use crate::uri::diagram_uri;

/// Map a process model read through the client at `owner_base_route`.
pub fn to_diagram(process_model: &ProcessModel, owner_base_route: &str) -> Diagram {
    Diagram {
        name: process_model.id.clone(),
        xml: process_model.xml.clone(),
        id: process_model.id.clone(),
        uri: diagram_uri(owner_base_route, &process_model.id),
    }
}

/// Payload overwriting the remote model with the diagram's XML.
pub fn to_update_payload(diagram: &Diagram) -> UpdateProcessModelPayload {
    UpdateProcessModelPayload {
        overwrite_existing: true,
        xml: diagram.xml.clone(),
    }
}

/// `diagram` as it reads once stored under `base_route`.
pub fn rebase_diagram(diagram: &Diagram, base_route: &str) -> Diagram {
    Diagram {
        uri: diagram_uri(base_route, &diagram.id),
        ..diagram.clone()
    }
}
