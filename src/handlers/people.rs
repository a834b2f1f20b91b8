use actix_web::{HttpRequest, HttpResponse, Responder, web};

use crate::apollo::ApolloClient;
use crate::handlers::{ApolloService, Upstream, decode_body, decode_query};
use crate::models::search::SearchForm;
use crate::search::normalize::normalize;

/// POST /api/people/search — contacts for organizations, titles and seniorities.
///
/// Accepts the same combined form as company search; organization-level
/// filters are ignored here.
pub async fn search_people(
    req: HttpRequest,
    body: web::Bytes,
    apollo: ApolloService,
) -> impl Responder {
    match decode_body::<SearchForm>(&req, &body) {
        Ok(form) => run_search(&form, apollo.get_ref()).await,
        Err(resp) => resp,
    }
}

/// GET /api/people/search?…
pub async fn search_people_query(req: HttpRequest, apollo: ApolloService) -> impl Responder {
    match decode_query::<SearchForm>(&req) {
        Ok(form) => run_search(&form, apollo.get_ref()).await,
        Err(resp) => resp,
    }
}

async fn run_search(form: &SearchForm, apollo: &Upstream<ApolloClient>) -> HttpResponse {
    let search = match normalize(form) {
        Ok(search) => search,
        Err(errors) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }));
        }
    };

    let client = match apollo.client() {
        Ok(client) => client,
        Err(resp) => return resp,
    };

    let response = client.search_people(&search).await;
    match response.error {
        Some(_) => HttpResponse::BadGateway().json(response),
        None => HttpResponse::Ok().json(response),
    }
}
