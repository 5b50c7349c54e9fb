//! Solution explorer repository backed by the process management API.
//!
//! # Overview
//! Lets a caller treat a remote management endpoint as a folder of diagram
//! files: open it, list and fetch diagrams, save single diagrams or whole
//! solutions, possibly to a different endpoint than the one opened.
//!
//! # Design
//! - `ManagementClient` builds `HttpRequest`s and parses `HttpResponse`s;
//!   the host supplies the `Transport` that executes them (host-does-IO).
//! - `ClientFactory` mints one client per base route; clients are never
//!   shared across routes.
//! - `ManagementApiRepository::open_path` returns an immutable `Session`
//!   which every later operation takes explicitly.
//! - Diagram URIs are always `<base route>/<process model id>`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod mapper;
pub mod repository;
pub mod types;
pub mod uri;

pub use client::{ClientFactory, ManagementClient};
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use identity::{build_context, AuthorizationContext, Identity};
pub use repository::{ManagementApiRepository, Session, SolutionExplorerRepository};
pub use types::{Diagram, ProcessModel, ProcessModelList, Solution, UpdateProcessModelPayload};
pub use uri::{parse_diagram_uri, ParsedDiagramUri};
