use actix_web::{HttpRequest, HttpResponse, Responder, web};

use crate::error::UpstreamError;
use crate::handlers::{OpenAiService, decode_body};
use crate::models::thinking::{ReasoningEffort, ThinkingForm, ThinkingResponse};

/// POST /api/thinking — send a prompt to the model, optionally with web search.
///
/// The effort is coerced to `high` when missing or unrecognised. Upstream
/// failures are reported in `error` with no reply; an empty model answer
/// still carries its usage and citations.
pub async fn ask(req: HttpRequest, body: web::Bytes, openai: OpenAiService) -> impl Responder {
    let form: ThinkingForm = match decode_body(&req, &body) {
        Ok(form) => form,
        Err(resp) => return resp,
    };

    let prompt = form.prompt.as_deref().unwrap_or_default().trim().to_string();
    let effort = form
        .reasoning_effort
        .as_deref()
        .map(ReasoningEffort::parse_lenient)
        .unwrap_or_default();

    let mut response = ThinkingResponse::new(prompt, effort, form.use_web_search);

    if response.prompt.is_empty() {
        response.error = Some("Please enter a prompt.".to_string());
        return HttpResponse::BadRequest().json(response);
    }

    let client = match openai.client() {
        Ok(client) => client,
        Err(resp) => return resp,
    };

    match client
        .ask(&response.prompt, effort, response.use_web_search)
        .await
    {
        Ok(reply) => {
            response.reply = Some(reply.reply);
            response.reasoning = Some(reply.reasoning);
            response.citations = reply.citations;
            response.usage = reply.usage;
        }
        Err(e) => {
            response.error = Some(e.to_string());
            if let UpstreamError::EmptyResponse { usage, citations } = e {
                response.usage = usage;
                response.citations = citations;
            }
        }
    }

    HttpResponse::Ok().json(response)
}
