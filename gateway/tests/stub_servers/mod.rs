//! Stub identity provider and backend servers for adapter tests.
//!
//! Each stub binds `127.0.0.1:0`, answers every path with a scripted
//! response, and records what it received. Run them inside an Actix runtime
//! (`#[actix_web::test]`); the server future is spawned on the local set.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

/// Scripted reply of a stub.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
            delay: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
            content_type: "text/plain",
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// One request as seen by a stub.
#[derive(Clone, Debug, Default)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Received {
    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn form(&self) -> HashMap<String, String> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }
}

struct StubState {
    reply: Reply,
    received: Arc<Mutex<Vec<Received>>>,
}

async fn answer(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let header = |name| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    let received = Received {
        method: req.method().to_string(),
        path: req.path().to_owned(),
        query: req.query_string().to_owned(),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        headers: req
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_owned(), value.to_owned()))
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    state
        .received
        .lock()
        .expect("stub record lock")
        .push(received);

    if let Some(delay) = state.reply.delay {
        tokio::time::sleep(delay).await;
    }
    let status = actix_web::http::StatusCode::from_u16(state.reply.status).expect("valid status");
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, state.reply.content_type))
        .body(state.reply.body.clone())
}

/// A running stub server.
pub struct Stub {
    pub base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
    handle: ServerHandle,
}

impl Stub {
    /// Start a stub answering every request with `reply`.
    pub fn start(reply: Reply) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            reply,
            received: Arc::clone(&received),
        });
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .default_service(web::to(answer))
        })
        .workers(1)
        .listen(listener)
        .expect("listen on stub socket")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self {
            base_url: format!("http://{addr}"),
            received,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn hits(&self) -> usize {
        self.received.lock().expect("stub record lock").len()
    }

    pub fn last(&self) -> Received {
        self.received
            .lock()
            .expect("stub record lock")
            .last()
            .cloned()
            .expect("stub received a request")
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Address with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral listener");
    let addr = listener.local_addr().expect("ephemeral local addr");
    drop(listener);
    format!("http://{addr}")
}
