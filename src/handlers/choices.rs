use actix_web::{HttpResponse, Responder};

use crate::models::choices::ChoicesResponse;

/// GET /api/choices — option sets for rendering the search form.
pub async fn get_choices() -> impl Responder {
    HttpResponse::Ok().json(ChoicesResponse::new())
}
