// tests/common/mod.rs
//! A stand-in documentation API served by actix-web on an ephemeral port.
//! The last path segment of `repo_url` picks the behaviour.

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use std::sync::Mutex;
use std::time::Duration;

pub struct MockApi {
    pub base: String,
    received: web::Data<Mutex<Vec<Value>>>,
    handle: ServerHandle,
}

impl MockApi {
    /// Bodies of every `POST /generate-docs` seen so far.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn generate_docs(
    body: web::Json<Value>,
    received: web::Data<Mutex<Vec<Value>>>,
) -> HttpResponse {
    received.lock().unwrap().push(body.0.clone());

    let repo_url = body.get("repo_url").and_then(Value::as_str).unwrap_or("");
    match repo_url.rsplit('/').next().unwrap_or("") {
        "boom" => HttpResponse::InternalServerError().json(json!({"detail": "boom"})),
        "empty" => HttpResponse::InternalServerError().finish(),
        "html" => HttpResponse::BadGateway()
            .content_type("text/html")
            .body("<h1>502 Bad Gateway</h1>"),
        "invalid" => HttpResponse::UnprocessableEntity()
            .json(json!({"detail": [{"loc": ["body", "repo_url"], "msg": "field required"}]})),
        "garbled" => HttpResponse::Ok().content_type("application/json").body("{not json"),
        "slow" => {
            actix_rt::time::sleep(Duration::from_secs(3)).await;
            HttpResponse::Ok().json(json!({"message": "too late", "doc_url": "/docs/slow"}))
        }
        "cached" => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Documentation retrieved from cache",
            "doc_url": "/docs/cached/index.html",
            "task_id": null
        })),
        _ => HttpResponse::Ok().json(json!({"message": "ok", "doc_url": "/docs/1"})),
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "services": {
            "repo_processor": "active",
            "doc_generator": "active",
            "cache_manager": "active"
        }
    }))
}

async fn docs(path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(format!("<h1>docs for {}</h1>", path.into_inner()))
}

pub async fn spawn_mock_api() -> MockApi {
    let received = web::Data::new(Mutex::new(Vec::new()));
    let data = received.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/generate-docs", web::post().to(generate_docs))
            .route("/health", web::get().to(health))
            .route("/docs/{id}", web::get().to(docs))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind mock api");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    MockApi {
        base: format!("http://{}", addr),
        received,
        handle,
    }
}
