//! A throwaway HTTP server standing in for Apollo or OpenAI.
#![allow(dead_code)]

use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::Value;

use research_tools_backend::Upstream;
use research_tools_backend::apollo::ApolloClient;
use research_tools_backend::config::{ApolloConfig, OpenAiConfig};
use research_tools_backend::openai::OpenAiClient;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

struct FakeState {
    status: StatusCode,
    reply: Value,
    requests: Mutex<Vec<CapturedRequest>>,
}

pub struct FakeUpstream {
    pub base_url: String,
    state: web::Data<FakeState>,
    handle: ServerHandle,
}

impl FakeUpstream {
    /// Answers every request with `status` and `reply`; a `Null` reply sends an empty body.
    pub async fn spawn(status: StatusCode, reply: Value) -> Self {
        let state = web::Data::new(FakeState {
            status,
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .default_service(web::to(record))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind fake upstream");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn apollo(&self) -> Upstream<ApolloClient> {
        apollo_upstream(&self.base_url)
    }

    pub fn openai(&self) -> Upstream<OpenAiClient> {
        openai_upstream(&self.base_url)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn record(req: HttpRequest, body: web::Bytes, state: web::Data<FakeState>) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(CapturedRequest {
        path: req.path().to_string(),
        api_key: header("X-Api-Key"),
        authorization: header("Authorization"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    if state.reply.is_null() {
        HttpResponse::build(state.status).finish()
    } else {
        HttpResponse::build(state.status).json(&state.reply)
    }
}

pub fn apollo_upstream(base_url: &str) -> Upstream<ApolloClient> {
    let config = ApolloConfig::from_lookup(|key| match key {
        "APOLLO_API_KEY" => Some("apollo-test-key".to_string()),
        "APOLLO_BASE_URL" => Some(base_url.to_string()),
        "HTTP_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();
    Upstream::new(ApolloClient::new(&config))
}

pub fn openai_upstream(base_url: &str) -> Upstream<OpenAiClient> {
    let config = OpenAiConfig::from_lookup(|key| match key {
        "OPEN_AI_API_KEY" => Some("sk-test".to_string()),
        "OPENAI_BASE_URL" => Some(base_url.to_string()),
        "HTTP_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();
    Upstream::new(OpenAiClient::new(&config))
}

/// Upstreams built from an empty environment, so both report missing keys.
pub fn unconfigured_apollo() -> Upstream<ApolloClient> {
    Upstream::new(ApolloConfig::from_lookup(|_| None).and_then(|c| ApolloClient::new(&c)))
}

pub fn unconfigured_openai() -> Upstream<OpenAiClient> {
    Upstream::new(OpenAiConfig::from_lookup(|_| None).and_then(|c| OpenAiClient::new(&c)))
}
