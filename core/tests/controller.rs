//! `TodoController` over a real transport and over scripted ones.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;
use todo_page::{
    ApiError, ClientConfig, HttpRequest, HttpResponse, ReqwestTransport, TodoClient, TodoController, TodoId,
    TodoPage, TodoSummary, Transport,
};

const BASE_URL: &str = "http://todo.test";

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

/// Answers requests in order from a fixed script and records what was sent.
#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::default(),
        })
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("script exhausted".into())))
    }
}

/// Holds each request until the test releases its response, keyed by
/// "METHOD path".
#[derive(Default)]
struct GatedTransport {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<HttpResponse, ApiError>>>>,
}

impl GatedTransport {
    fn gate(&self, key: &str) -> oneshot::Sender<Result<HttpResponse, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key.to_string(), rx);
        tx
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let key = format!("{} {}", request.method.as_str(), request.path);
        let gate = self.gates.lock().unwrap().remove(&key);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("gate dropped".into()))),
            None => Err(ApiError::Transport(format!("no gate for {key}"))),
        }
    }
}

fn controller(transport: Arc<dyn Transport>) -> TodoController {
    TodoController::new(TodoPage::new(TodoClient::new(BASE_URL)), transport)
}

fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::new(status, body))
}

#[tokio::test]
async fn full_session_against_mock_server() {
    let base_url = start_server().await;
    let controller = TodoController::new(
        TodoPage::new(TodoClient::new(&base_url)),
        Arc::new(ReqwestTransport::default()),
    );

    controller.activate().await.unwrap();
    assert!(controller.items().await.is_empty());

    controller.set_input("Buy milk").await;
    controller.on_add_click().await.unwrap();
    controller.set_input("Walk dog").await;
    controller.on_key_press().await.unwrap();
    assert_eq!(controller.input().await, "");

    let items = controller.items().await;
    assert_eq!(items.len(), 2);
    let (first, second) = (items[0].id.clone(), items[1].id.clone());

    controller.toggle_done(&first).await.unwrap();
    controller.change_mode(&second, true).await;
    controller.save(&second, "Walk cat").await.unwrap();

    let items = controller.items().await;
    assert!(items[0].is_done);
    assert_eq!(items[1].title, "Walk cat");
    assert!(items.iter().all(|item| !item.is_edit));
    assert_eq!(
        controller.summary().await,
        TodoSummary {
            total: 2,
            done: 1,
            remaining: 1,
        }
    );

    controller.delete(&first).await.unwrap();
    assert!(matches!(controller.delete(&first).await, Err(ApiError::NotFound)));
    assert_eq!(controller.items().await.len(), 1);

    // A second page sees the same server state.
    let other = TodoController::from_config(&ClientConfig { base_url });
    other.activate().await.unwrap();
    assert_eq!(other.items().await, controller.items().await);
}

#[tokio::test]
async fn activation_loads_only_once() {
    let transport = ScriptedTransport::new(vec![ok(200, r#"[{"id":2,"title":"X","isDone":true}]"#)]);
    let controller = controller(transport.clone());

    controller.activate().await.unwrap();
    controller.activate().await.unwrap();

    assert_eq!(transport.sent().len(), 1);
    let items = controller.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, TodoId::Number(2));
    assert!(items[0].is_done);
    assert!(!items[0].is_edit);
}

#[tokio::test]
async fn failed_load_leaves_page_empty() {
    let transport = ScriptedTransport::new(vec![Err(ApiError::Transport("connection refused".into()))]);
    let controller = controller(transport);

    assert!(controller.activate().await.is_err());
    assert!(controller.items().await.is_empty());
}

#[tokio::test]
async fn empty_input_sends_nothing() {
    let transport = ScriptedTransport::new(Vec::new());
    let controller = controller(transport.clone());

    controller.on_add_click().await.unwrap();
    controller.on_key_press().await.unwrap();

    assert!(transport.sent().is_empty());
    assert!(controller.items().await.is_empty());
}

#[tokio::test]
async fn delete_of_unknown_id_still_hits_the_api() {
    let transport = ScriptedTransport::new(vec![ok(204, "")]);
    let controller = controller(transport.clone());

    controller.delete(&TodoId::Number(5)).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, format!("{BASE_URL}/todos/5"));
    assert!(controller.items().await.is_empty());
}

#[tokio::test]
async fn overlapping_handlers_resolve_against_latest_state() {
    let transport = Arc::new(GatedTransport::default());
    let controller = controller(transport.clone());

    let load = transport.gate(&format!("GET {BASE_URL}/todos"));
    load.send(ok(
        200,
        r#"[{"id":1,"title":"a","isDone":false},{"id":2,"title":"b","isDone":false}]"#,
    ))
    .unwrap();
    controller.activate().await.unwrap();

    let delete_gate = transport.gate(&format!("DELETE {BASE_URL}/todos/1"));
    let toggle_gate = transport.gate(&format!("PATCH {BASE_URL}/todos/2"));

    let deleting = tokio::spawn({
        let controller = controller.clone();
        async move { controller.delete(&TodoId::Number(1)).await }
    });
    let toggling = tokio::spawn({
        let controller = controller.clone();
        async move { controller.toggle_done(&TodoId::Number(2)).await }
    });

    // The later request finishes first.
    toggle_gate
        .send(ok(200, r#"{"id":2,"title":"b","isDone":true}"#))
        .unwrap();
    toggling.await.unwrap().unwrap();

    let items = controller.items().await;
    assert_eq!(items.len(), 2);
    assert!(items[1].is_done);

    delete_gate.send(ok(204, "")).unwrap();
    deleting.await.unwrap().unwrap();

    let items = controller.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, TodoId::Number(2));
    assert!(items[0].is_done);
}
