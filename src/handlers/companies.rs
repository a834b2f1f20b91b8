use actix_web::{HttpRequest, HttpResponse, Responder, web};

use crate::apollo::ApolloClient;
use crate::handlers::{ApolloService, Upstream, decode_body, decode_query};
use crate::models::search::SearchForm;
use crate::search::normalize::normalize;

/// POST /api/companies/search — JSON or urlencoded combined search form.
pub async fn search_companies(
    req: HttpRequest,
    body: web::Bytes,
    apollo: ApolloService,
) -> impl Responder {
    match decode_body::<SearchForm>(&req, &body) {
        Ok(form) => run_search(&form, apollo.get_ref()).await,
        Err(resp) => resp,
    }
}

/// GET /api/companies/search?… — same fields as a query string.
pub async fn search_companies_query(req: HttpRequest, apollo: ApolloService) -> impl Responder {
    match decode_query::<SearchForm>(&req) {
        Ok(form) => run_search(&form, apollo.get_ref()).await,
        Err(resp) => resp,
    }
}

async fn run_search(form: &SearchForm, apollo: &Upstream<ApolloClient>) -> HttpResponse {
    // 1. Validate every field before anything leaves the process.
    let search = match normalize(form) {
        Ok(search) => search,
        Err(errors) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }));
        }
    };

    // 2. Refuse when Apollo was never configured.
    let client = match apollo.client() {
        Ok(client) => client,
        Err(resp) => return resp,
    };

    // 3. One upstream call; failures come back inside the payload.
    let response = client.search_companies(&search).await;
    if response.error.is_some() {
        HttpResponse::BadGateway().json(response)
    } else {
        HttpResponse::Ok().json(response)
    }
}
