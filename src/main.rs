use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use research_tools_backend::apollo::ApolloClient;
use research_tools_backend::config::{ApolloConfig, OpenAiConfig};
use research_tools_backend::handlers;
use research_tools_backend::openai::OpenAiClient;
use research_tools_backend::Upstream;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Missing credentials disable the matching routes; they are reported once here.
    let apollo = Upstream::new(ApolloConfig::from_env().and_then(|config| ApolloClient::new(&config)));
    match apollo.config_error() {
        None => tracing::info!("Apollo search configured"),
        Some(e) => tracing::error!("Apollo search disabled: {e}"),
    }
    let apollo_data = web::Data::new(apollo);

    let openai = OpenAiConfig::from_env().and_then(|config| OpenAiClient::new(&config));
    match &openai {
        Ok(client) => tracing::info!("OpenAI configured with model {}", client.model()),
        Err(e) => tracing::error!("OpenAI thinking disabled: {e}"),
    }
    let openai_data = web::Data::new(Upstream::new(openai));

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(apollo_data.clone())
            .app_data(openai_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
