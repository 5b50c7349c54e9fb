//! Solution explorer repository over the management API.
//!
//! # Design
//! Opening a path yields a `Session`: the client bound to that endpoint
//! plus the authorization context built from the caller's identity. The
//! session is an immutable value the caller passes into every later call,
//! so which endpoint and token an operation uses is always visible at the
//! call site. Operations aimed at another endpoint (`*_at`, or an absolute
//! diagram URI) mint a transient client for that call only and leave the
//! session alone.
//!
//! Remote failures are returned exactly as the client produced them.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::client::{ClientFactory, ManagementClient};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::Transport;
use crate::identity::{build_context, AuthorizationContext, Identity};
use crate::mapper::{rebase_diagram, to_diagram, to_update_payload};
use crate::types::{Diagram, Solution};
use crate::uri::{diagram_uri, normalize_pathspec, parse_diagram_uri};

/// Folder-like access to diagrams stored behind some endpoint.
#[async_trait]
pub trait SolutionExplorerRepository: Send + Sync {
    /// Handle to an opened endpoint, passed into every other operation.
    type Session: Send + Sync;

    /// Connect to `pathspec` and verify the endpoint accepts `identity`.
    async fn open_path(&self, pathspec: &str, identity: &Identity) -> Result<Self::Session>;

    async fn get_diagrams(&self, session: &Self::Session) -> Result<Vec<Diagram>>;

    async fn get_diagram_by_name(&self, session: &Self::Session, name: &str) -> Result<Diagram>;

    /// Fetch the diagram behind an absolute URI, which may point at an
    /// endpoint other than the session's. Uses the session's credentials.
    async fn open_single_diagram(&self, session: &Self::Session, uri: &str) -> Result<Diagram>;

    /// Store `diagram` at the session's endpoint under credentials taken
    /// from `identity`. Returns the diagram as it now reads there.
    async fn save_single_diagram(
        &self,
        session: &Self::Session,
        diagram: &Diagram,
        identity: &Identity,
    ) -> Result<Diagram>;

    /// Store `diagram` at `pathspec` under credentials taken from `identity`.
    /// Returns the diagram rooted at `pathspec`.
    async fn save_single_diagram_at(
        &self,
        diagram: &Diagram,
        identity: &Identity,
        pathspec: &str,
    ) -> Result<Diagram>;

    /// Store `diagram` at the session's endpoint under the session's credentials.
    async fn save_diagram(&self, session: &Self::Session, diagram: &Diagram) -> Result<()>;

    /// Store `diagram` at `pathspec` under the session's credentials.
    async fn save_diagram_at(
        &self,
        session: &Self::Session,
        diagram: &Diagram,
        pathspec: &str,
    ) -> Result<()>;

    /// Store every diagram of `solution` at the session's endpoint, under the
    /// id taken from each diagram's URI, concurrently.
    /// Returns once all writes finished, or with the first failure.
    async fn save_solution(&self, session: &Self::Session, solution: &Solution) -> Result<()>;

    /// Re-root `solution` at `pathspec` and store every diagram there,
    /// concurrently. Returns once all writes finished, or with the first
    /// failure. URIs are rewritten before any write is issued.
    async fn save_solution_at(
        &self,
        session: &Self::Session,
        solution: &mut Solution,
        pathspec: &str,
    ) -> Result<()>;
}

/// An opened management endpoint.
#[derive(Debug, Clone)]
pub struct Session {
    client: ManagementClient,
    context: AuthorizationContext,
}

impl Session {
    pub fn base_route(&self) -> &str {
        self.client.base_route()
    }

}

/// `SolutionExplorerRepository` backed by the process management API.
#[derive(Debug, Clone)]
pub struct ManagementApiRepository {
    factory: ClientFactory,
}

impl ManagementApiRepository {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// Repository whose API segment follows `MANAGEMENT_API_SEGMENT`.
    pub fn from_env(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, ClientConfig::from_env())
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self {
            factory: ClientFactory::new(transport, config),
        }
    }

    async fn update(
        client: &ManagementClient,
        context: &AuthorizationContext,
        id: &str,
        diagram: &Diagram,
    ) -> Result<()> {
        client
            .update_process_model_by_id(context, id, &to_update_payload(diagram))
            .await
    }
}

#[async_trait]
impl SolutionExplorerRepository for ManagementApiRepository {
    type Session = Session;

    async fn open_path(&self, pathspec: &str, identity: &Identity) -> Result<Session> {
        let pathspec = normalize_pathspec(pathspec);
        let client = self.factory.create_client(pathspec);
        let context = build_context(identity);

        debug!(base_route = pathspec, "probing endpoint");
        if let Err(err) = client.list_process_models(&context).await {
            warn!(base_route = pathspec, error = %err, "endpoint probe failed");
            return Err(err);
        }

        Ok(Session { client, context })
    }

    async fn get_diagrams(&self, session: &Session) -> Result<Vec<Diagram>> {
        let list = session.client.list_process_models(&session.context).await?;
        let base_route = session.client.base_route();
        Ok(list
            .process_models
            .iter()
            .map(|model| to_diagram(model, base_route))
            .collect())
    }

    async fn get_diagram_by_name(&self, session: &Session, name: &str) -> Result<Diagram> {
        let model = session
            .client
            .get_process_model_by_id(&session.context, name)
            .await?;
        Ok(to_diagram(&model, session.client.base_route()))
    }

    async fn open_single_diagram(&self, session: &Session, uri: &str) -> Result<Diagram> {
        let parsed = parse_diagram_uri(uri);
        let client = self.factory.create_client(&parsed.base_route);
        debug!(base_route = %parsed.base_route, process_model_id = %parsed.process_model_id, "opening single diagram");

        let model = client
            .get_process_model_by_id(&session.context, &parsed.process_model_id)
            .await?;
        Ok(to_diagram(&model, client.base_route()))
    }

    async fn save_single_diagram(
        &self,
        session: &Session,
        diagram: &Diagram,
        identity: &Identity,
    ) -> Result<Diagram> {
        let context = build_context(identity);
        let parsed = parse_diagram_uri(&diagram.uri);

        Self::update(&session.client, &context, &parsed.process_model_id, diagram).await?;
        Ok(Diagram {
            name: parsed.process_model_id.clone(),
            xml: diagram.xml.clone(),
            uri: diagram_uri(session.client.base_route(), &parsed.process_model_id),
            id: parsed.process_model_id,
        })
    }

    async fn save_single_diagram_at(
        &self,
        diagram: &Diagram,
        identity: &Identity,
        pathspec: &str,
    ) -> Result<Diagram> {
        let context = build_context(identity);
        let client = self.factory.create_client(normalize_pathspec(pathspec));

        Self::update(&client, &context, &diagram.id, diagram).await?;
        Ok(rebase_diagram(diagram, client.base_route()))
    }

    async fn save_diagram(&self, session: &Session, diagram: &Diagram) -> Result<()> {
        let parsed = parse_diagram_uri(&diagram.uri);
        Self::update(&session.client, &session.context, &parsed.process_model_id, diagram).await
    }

    async fn save_diagram_at(
        &self,
        session: &Session,
        diagram: &Diagram,
        pathspec: &str,
    ) -> Result<()> {
        let client = self.factory.create_client(normalize_pathspec(pathspec));
        Self::update(&client, &session.context, &diagram.id, diagram).await
    }

    async fn save_solution(&self, session: &Session, solution: &Solution) -> Result<()> {
        debug!(diagrams = solution.diagrams.len(), "saving solution");
        let writes: Vec<_> = solution
            .diagrams
            .iter()
            .map(|diagram| self.save_diagram(session, diagram))
            .collect();
        try_join_all(writes).await?;
        Ok(())
    }

    async fn save_solution_at(
        &self,
        session: &Session,
        solution: &mut Solution,
        pathspec: &str,
    ) -> Result<()> {
        let pathspec = normalize_pathspec(pathspec);
        let client = self.factory.create_client(pathspec);

        solution.uri = pathspec.to_string();
        for diagram in &mut solution.diagrams {
            diagram.uri = diagram_uri(pathspec, &diagram.id);
        }

        debug!(base_route = pathspec, diagrams = solution.diagrams.len(), "saving solution");
        let writes: Vec<_> = solution
            .diagrams
            .iter()
            .map(|diagram| Self::update(&client, &session.context, &diagram.id, diagram))
            .collect();
        try_join_all(writes).await?;
        Ok(())
    }
}
