//! In-process HTTP stub standing in for the Pub/Sub and Cloud Tasks REST APIs.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::Value;
use url::Url;

/// One request received by the stub.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

struct StubState {
    status: StatusCode,
    response: Value,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Running stub answering every request with a canned status and body.
pub struct StubApi {
    pub base: Url,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: ServerHandle,
}

impl StubApi {
    /// Start a stub on an ephemeral loopback port.
    pub async fn start(status: StatusCode, response: Value) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let port = listener.local_addr().expect("stub address").port();
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            status,
            response,
            captured: Arc::clone(&captured),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .default_service(web::route().to(record))
        })
        .workers(1)
        .listen(listener)
        .expect("listen on stub socket")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base: Url::parse(&format!("http://127.0.0.1:{port}")).expect("stub URL"),
            captured,
            handle,
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().expect("stub lock").clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn record(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let captured = CapturedRequest {
        path: req.path().to_owned(),
        authorization: req
            .headers()
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    state.captured.lock().expect("stub lock").push(captured);
    HttpResponse::build(state.status).json(&state.response)
}

/// A loopback URL with nothing listening on it.
pub fn unreachable_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral listener");
    let port = listener.local_addr().expect("ephemeral address").port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{port}")).expect("stub URL")
}
