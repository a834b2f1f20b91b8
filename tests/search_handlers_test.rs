//! Company and people search routes, driven against a fake Apollo.
//!
//! Run with: `cargo test --test search_handlers_test`
mod common;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use common::{FakeUpstream, apollo_upstream, unconfigured_apollo, unconfigured_openai};
use research_tools_backend::Upstream;
use research_tools_backend::apollo::ApolloClient;
use research_tools_backend::handlers;

macro_rules! app {
    ($apollo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($apollo))
                .app_data(web::Data::new(unconfigured_openai()))
                .service(web::scope("/api").configure(handlers::init_routes)),
        )
        .await
    };
}

fn companies_reply() -> Value {
    json!({
        "organizations": [
            {"id": "o1", "name": "Acme", "primary_domain": "acme.com", "estimated_num_employees": 120},
        ],
        "accounts": [],
        "pagination": {"page": 2, "per_page": 50, "total_entries": 51, "total_pages": 2},
    })
}

#[actix_web::test]
async fn test_company_search_sends_normalized_query() {
    let fake = FakeUpstream::spawn(StatusCode::OK, companies_reply()).await;
    let app = app!(fake.apollo());

    let req = test::TestRequest::post()
        .uri("/api/companies/search")
        .set_json(json!({
            "employees_min": 10,
            "employees_max": 500,
            "industries": ["5567cd4e7369643b70010000"],
            "job_titles": ["engineer"],
            "seniorities": ["vp"],
            "page": 2,
            "per_page": 50,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["companies"][0]["name"], "Acme");
    assert_eq!(body["companies"][0]["estimated_num_employees"], 120);
    assert!(body["companies"][0]["logo_url"].is_null());
    assert_eq!(body["total_count"], 51);
    assert_eq!(body["page"], 2);
    assert_eq!(body["per_page"], 50);
    assert!(body["error"].is_null());

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/mixed_companies/search");
    assert_eq!(requests[0].api_key.as_deref(), Some("apollo-test-key"));
    assert_eq!(
        requests[0].body,
        json!({
            "page": 2,
            "per_page": 50,
            "organization_num_employees_range": {"min": 10, "max": 500},
            "organization_industry_tag_ids": {"is_any_of": ["5567cd4e7369643b70010000"]},
        })
    );

    fake.stop().await;
}

#[actix_web::test]
async fn test_people_search_from_urlencoded_form() {
    let fake = FakeUpstream::spawn(
        StatusCode::OK,
        json!({
            "people": [{
                "id": "p1",
                "first_name": "Grace",
                "title": "VP Engineering",
                "organization": {"name": "Acme"},
            }],
            "total_entries": 1,
        }),
    )
    .await;
    let app = app!(fake.apollo());

    let req = test::TestRequest::post()
        .uri("/api/people/search")
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(
            "organization_id=57c4ace7a6da9867ee5599e7&job_titles=engineer&job_titles=director\
             &seniorities=vp&company_name=Acme&per_page=10",
        )
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["people"][0]["organization_name"], "Acme");
    assert_eq!(body["people"][0]["phone_numbers"], json!([]));
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["per_page"], 10);

    let requests = fake.requests();
    assert_eq!(requests[0].path, "/mixed_people/api_search");
    assert_eq!(
        requests[0].body,
        json!({
            "page": 1,
            "per_page": 10,
            "organization_ids": {"is_any_of": ["57c4ace7a6da9867ee5599e7"]},
            "person_titles": {"is_any_of": ["engineer", "director"]},
            "person_seniorities": {"is_any_of": ["vp"]},
        })
    );

    fake.stop().await;
}

#[actix_web::test]
async fn test_company_search_from_query_string() {
    let fake = FakeUpstream::spawn(StatusCode::OK, companies_reply()).await;
    let app = app!(fake.apollo());

    let req = test::TestRequest::get()
        .uri("/api/companies/search?domains=acme.com,%20globex.com&industries_exclude=5567ce237369644ee5490000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let sent = &fake.requests()[0].body;
    assert_eq!(
        sent["q_organization_domains_list"],
        json!({"is_any_of": ["acme.com", "globex.com"]})
    );
    assert_eq!(
        sent["organization_not_industry_tag_ids"],
        json!({"is_none_of": ["5567ce237369644ee5490000"]})
    );

    fake.stop().await;
}

#[actix_web::test]
async fn test_validation_errors_block_the_upstream_call() {
    let fake = FakeUpstream::spawn(StatusCode::OK, companies_reply()).await;
    let app = app!(fake.apollo());

    let req = test::TestRequest::post()
        .uri("/api/companies/search")
        .set_json(json!({
            "employees_min": 0,
            "revenue_min": "a lot",
            "industries": ["made-up"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"],
        json!({
            "employees_min": "Ensure this value is greater than or equal to 1.",
            "revenue_min": "Enter a whole number.",
            "industries": "Select a valid choice. made-up is not one of the available choices.",
        })
    );
    assert!(fake.requests().is_empty());

    fake.stop().await;
}

#[actix_web::test]
async fn test_wrongly_typed_values_are_field_errors() {
    let fake = FakeUpstream::spawn(StatusCode::OK, companies_reply()).await;
    let app = app!(fake.apollo());

    let req = test::TestRequest::post()
        .uri("/api/companies/search")
        .set_json(json!({
            "domains": ["a.com", "b.com"],
            "employees_min": 0,
            "industries": [42],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"],
        json!({
            "domains": "Not a valid string.",
            "employees_min": "Ensure this value is greater than or equal to 1.",
            "industries": "Select a valid choice. 42 is not one of the available choices.",
        })
    );
    assert!(fake.requests().is_empty());

    fake.stop().await;
}

#[actix_web::test]
async fn test_missing_credential_answers_503() {
    let app = app!(unconfigured_apollo());

    let req = test::TestRequest::post()
        .uri("/api/people/search")
        .set_json(json!({"organization_id": "o1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing APOLLO_API_KEY in environment (.env)");
}

#[actix_web::test]
async fn test_upstream_failure_is_reported_with_empty_results() {
    let fake = FakeUpstream::spawn(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({"error": "invalid filter"}),
    )
    .await;
    let app = app!(fake.apollo());

    let req = test::TestRequest::post()
        .uri("/api/companies/search")
        .set_json(json!({"company_name": "Acme"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["companies"], json!([]));
    assert_eq!(body["total_count"], 0);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("HTTP 422"), "{error}");
    assert!(error.contains("invalid filter"), "{error}");

    fake.stop().await;
}

#[actix_web::test]
async fn test_empty_upstream_body_is_an_error() {
    let fake = FakeUpstream::spawn(StatusCode::OK, Value::Null).await;
    let app = app!(fake.apollo());

    let req = test::TestRequest::get()
        .uri("/api/people/search?organization_id=o1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Upstream returned an empty body");
    assert_eq!(body["people"], json!([]));

    fake.stop().await;
}

#[actix_web::test]
async fn test_unreachable_upstream_is_reported() {
    // Nothing listens on the discard port.
    let apollo: Upstream<ApolloClient> = apollo_upstream("http://127.0.0.1:9");
    let app = app!(apollo);

    let req = test::TestRequest::post()
        .uri("/api/companies/search")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Request failed"));
}

#[actix_web::test]
async fn test_malformed_json_body_is_400() {
    let app = app!(unconfigured_apollo());

    let req = test::TestRequest::post()
        .uri("/api/companies/search")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_choices_and_health() {
    let app = app!(unconfigured_apollo());

    let req = test::TestRequest::get().uri("/api/choices").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["per_page"], json!([10, 25, 50, 100]));
    assert_eq!(body["seniorities"][2], json!({"value": "c_suite", "label": "C-Suite"}));

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        json!({"status": "ok", "apollo_configured": false, "openai_configured": false})
    );
}
