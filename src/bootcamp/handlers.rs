use actix_web::{web, HttpResponse, Responder};
use chrono::{Local, Utc};
use log::{error, info};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::bootcamp::models::{
    BootcampDocument, GenerateBootcampRequest, GenerateResponse, Identitas,
};
use crate::scripts::{GenerateParams, ScriptError, ScriptRunner};
use crate::{ApiError, AppState};

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[utoipa::path(
    context_path = "/api",
    tag = "Bootcamp Service",
    post,
    path = "/generate-bootcamp",
    request_body = GenerateBootcampRequest,
    responses(
        (status = 200, description = "Curriculum generated", body = GenerateResponse),
        (status = 400, description = "Missing required fields", body = ApiError),
        (status = 500, description = "Generation failed", body = ApiError)
    )
)]
pub async fn generate_bootcamp(
    req: web::Json<GenerateBootcampRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Executing generate_bootcamp handler");
    let req = req.into_inner();

    let (name, duration, level, description) = match (
        req.name.as_deref().map(str::trim).filter(|v| !v.is_empty()),
        req.duration,
        req.level,
        req.description
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty()),
    ) {
        (Some(name), Some(duration), Some(level), Some(description)) => {
            (name.to_string(), duration, level, description.to_string())
        }
        _ => {
            error!("generate-bootcamp request is missing required fields");
            return HttpResponse::BadRequest().json(ApiError::new("Missing required fields"));
        }
    };

    // The generator takes a single context argument; fold the optional
    // free-text context into the description.
    let mut context = description;
    if let Some(extra) = req
        .additional_context
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        context.push_str("\n\nAdditional context: ");
        context.push_str(extra);
    }

    let params = GenerateParams {
        name: name.clone(),
        duration,
        level: level.to_string(),
        context,
    };

    match data.runner.generate_curriculum(&params).await {
        Ok(curriculum) => {
            let content = match curriculum {
                Value::Object(map) => map,
                other => {
                    let mut map = Map::new();
                    map.insert("curriculum".to_string(), other);
                    map
                }
            };
            let document = BootcampDocument::assemble(content, Identitas::new(name, duration, level));
            info!(
                "Curriculum generated for bootcamp '{}' ({})",
                document.identitas.nama, document.id
            );
            HttpResponse::Ok().json(GenerateResponse::new(document))
        }
        Err(e @ ScriptError::MissingCredential) => {
            error!("Generator configuration problem: {}", e);
            HttpResponse::InternalServerError().json(ApiError::new(&e.to_string()))
        }
        Err(e) => {
            error!("Curriculum generation failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiError::new(&format!("Failed to generate curriculum: {}", e)))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Bootcamp Service",
    post,
    path = "/convert-to-docx",
    request_body = BootcampDocument,
    responses(
        (status = 200, description = "DOCX document stream"),
        (status = 400, description = "Document lacks the identity block", body = ApiError),
        (status = 500, description = "Conversion failed", body = ApiError)
    )
)]
pub async fn convert_to_docx(
    body: web::Json<Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Executing convert_to_docx handler");
    let document = body.into_inner();

    let identitas = match document.get("identitas") {
        Some(Value::Object(map)) => map.clone(),
        _ => {
            error!("convert-to-docx request lacks the identitas block");
            return HttpResponse::BadRequest().json(ApiError::new("Invalid bootcamp data"));
        }
    };

    match data.runner.convert_document(&document).await {
        Ok(bytes) => {
            let nama = identitas
                .get("nama")
                .and_then(Value::as_str)
                .unwrap_or("bootcamp");
            let filename = format!(
                "{}-{}.docx",
                sanitize_filename::sanitize(nama).replace(' ', "-"),
                Local::now().format("%Y%m%d-%H%M%S")
            );
            info!("Converted bootcamp '{}' to {} ({} bytes)", nama, filename, bytes.len());
            HttpResponse::Ok()
                .content_type(DOCX_CONTENT_TYPE)
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(bytes)
        }
        Err(e) => {
            error!("DOCX conversion failed: {}", e);
            HttpResponse::InternalServerError().json(ApiError::new(&e.to_string()))
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "2026-08-07T14:30:00+00:00")]
    pub timestamp: String,
}

#[utoipa::path(
    tag = "Bootcamp Service",
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
