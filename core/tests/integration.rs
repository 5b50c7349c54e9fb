//! Full repository lifecycle against live mock servers.
//!
//! # Design
//! Starts one mock management engine per endpoint on random ports and
//! drives the repository over real HTTP. The transport wraps a blocking
//! ureq agent in `spawn_blocking`, standing in for whatever client a host
//! would plug in.

use std::sync::Arc;

use async_trait::async_trait;
use mock_server::{db_with, Db};
use solution_explorer::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, Identity, ManagementApiRepository, Solution,
    SolutionExplorerRepository, Transport,
};
use uuid::Uuid;

struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
    /// responses come back as data and the client interprets them.
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let result = match req.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&req.path);
            for (key, value) in &req.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&req.path);
            for (key, value) in &req.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            match req.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

/// Serve `db` on a random port and return the endpoint's base route.
async fn start_engine(db: Db) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, db));
    format!("http://{addr}")
}

/// A base route nothing listens on.
async fn dead_route() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn repository() -> ManagementApiRepository {
    ManagementApiRepository::new(Arc::new(UreqTransport::new()))
}

#[tokio::test(flavor = "multi_thread")]
async fn repository_lifecycle() {
    let id = format!("Process_{}", Uuid::new_v4().simple());
    let identity = Identity::with_token("integration");

    // Step 1: endpoint A holds one model, endpoint B is empty.
    let db_a = db_with(vec![mock_server::ProcessModel {
        id: id.clone(),
        xml: "<definitions v=\"1\"/>".to_string(),
    }]);
    let db_b = db_with(Vec::new());
    let route_a = start_engine(db_a.clone()).await;
    let route_b = start_engine(db_b.clone()).await;

    let repo = repository();

    // Step 2: open A through a trailing separator.
    let session = repo
        .open_path(&format!("{route_a}/"), &identity)
        .await
        .unwrap();
    assert_eq!(session.base_route(), route_a);

    // Step 3: list.
    let diagrams = repo.get_diagrams(&session).await.unwrap();
    assert_eq!(diagrams.len(), 1);
    assert_eq!(diagrams[0].id, id);
    assert_eq!(diagrams[0].name, id);
    assert_eq!(diagrams[0].uri, format!("{route_a}/{id}"));

    // Step 4: fetch by name, then a missing one.
    let mut diagram = repo.get_diagram_by_name(&session, &id).await.unwrap();
    assert_eq!(diagram.xml, "<definitions v=\"1\"/>");
    let err = repo.get_diagram_by_name(&session, "missing").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 5: save a change back to A.
    diagram.xml = "<definitions v=\"2\"/>".to_string();
    let saved = repo
        .save_single_diagram(&session, &diagram, &identity)
        .await
        .unwrap();
    assert_eq!(saved.uri, format!("{route_a}/{id}"));
    assert_eq!(db_a.read().await[&id].xml, "<definitions v=\"2\"/>");

    // Step 6: copy the whole solution over to B.
    let mut solution = Solution {
        uri: route_a.clone(),
        diagrams: repo.get_diagrams(&session).await.unwrap(),
    };
    repo.save_solution_at(&session, &mut solution, &route_b)
        .await
        .unwrap();
    assert_eq!(solution.uri, route_b);
    assert_eq!(solution.diagrams[0].uri, format!("{route_b}/{id}"));
    assert_eq!(db_b.read().await[&id].xml, "<definitions v=\"2\"/>");

    // Step 7: open the copy on B by absolute URI through A's session.
    let copy = repo
        .open_single_diagram(&session, &format!("{route_b}/{id}"))
        .await
        .unwrap();
    assert_eq!(copy.uri, format!("{route_b}/{id}"));
    assert_eq!(copy.xml, "<definitions v=\"2\"/>");

    // Step 8: session still lists A.
    let diagrams = repo.get_diagrams(&session).await.unwrap();
    assert_eq!(diagrams[0].uri, format!("{route_a}/{id}"));

    // Step 9: save the solution in place.
    solution.diagrams[0].xml = "<definitions v=\"3\"/>".to_string();
    let session_b = repo.open_path(&route_b, &identity).await.unwrap();
    repo.save_solution(&session_b, &solution).await.unwrap();
    assert_eq!(db_b.read().await[&id].xml, "<definitions v=\"3\"/>");
    assert_eq!(db_a.read().await[&id].xml, "<definitions v=\"2\"/>");
}

#[tokio::test(flavor = "multi_thread")]
async fn open_unreachable_endpoint_fails() {
    let repo = repository();
    let route = dead_route().await;

    let err = repo
        .open_path(&route, &Identity::with_token("t"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn open_without_token_is_unauthorized() {
    let route = start_engine(db_with(Vec::new())).await;
    let repo = repository();

    let err = repo
        .open_path(&route, &Identity::anonymous())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { status: 401 }));
}
