pub mod choices;
pub mod companies;
pub mod people;
pub mod thinking;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::de::DeserializeOwned;

use crate::apollo::ApolloClient;
use crate::error::ConfigError;
use crate::openai::OpenAiClient;

/// An upstream client, or the configuration error that kept it from being built.
pub struct Upstream<C>(Result<C, ConfigError>);

impl<C> Upstream<C> {
    pub fn new(client: Result<C, ConfigError>) -> Self {
        Self(client)
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_ok()
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        self.0.as_ref().err()
    }

    /// The client, or a 503 naming the missing configuration. No request is sent.
    pub fn client(&self) -> Result<&C, HttpResponse> {
        self.0.as_ref().map_err(|e| {
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": e.to_string(),
            }))
        })
    }
}

pub type ApolloService = web::Data<Upstream<ApolloClient>>;
pub type OpenAiService = web::Data<Upstream<OpenAiClient>>;

/// Decodes a request body as urlencoded form data (repeated keys allowed)
/// or, for any other content type, as JSON.
pub fn decode_body<T: DeserializeOwned>(req: &HttpRequest, body: &[u8]) -> Result<T, HttpResponse> {
    let is_form = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    let decoded = if is_form {
        serde_html_form::from_bytes(body).map_err(|e| e.to_string())
    } else {
        serde_json::from_slice(body).map_err(|e| e.to_string())
    };

    decoded.map_err(|e| {
        HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Invalid request body: {e}"),
        }))
    })
}

/// Decodes the query string, allowing repeated keys for multi-selects.
pub fn decode_query<T: DeserializeOwned>(req: &HttpRequest) -> Result<T, HttpResponse> {
    serde_html_form::from_str(req.query_string()).map_err(|e| {
        HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Invalid query string: {e}"),
        }))
    })
}

/// GET /api/health — liveness plus which upstreams are usable.
pub async fn health(apollo: ApolloService, openai: OpenAiService) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "apollo_configured": apollo.is_configured(),
        "openai_configured": openai.is_configured(),
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
    cfg.route("/choices", web::get().to(choices::get_choices));

    // ── Apollo search (same combined form for both) ──
    cfg.service(
        web::resource("/companies/search")
            .route(web::get().to(companies::search_companies_query))
            .route(web::post().to(companies::search_companies)),
    );
    cfg.service(
        web::resource("/people/search")
            .route(web::get().to(people::search_people_query))
            .route(web::post().to(people::search_people)),
    );

    // ── OpenAI ──
    cfg.route("/thinking", web::post().to(thinking::ask));
}
