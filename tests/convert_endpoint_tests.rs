use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use bootcamp_builder_server::bootcamp::handlers;
use bootcamp_builder_server::scripts::{GenerateParams, ScriptError, ScriptRunner};
use bootcamp_builder_server::AppState;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

struct StubRunner;

#[async_trait]
impl ScriptRunner for StubRunner {
    async fn generate_curriculum(&self, _params: &GenerateParams) -> Result<Value, ScriptError> {
        Ok(json!({"modules": []}))
    }

    async fn convert_document(&self, _document: &Value) -> Result<Vec<u8>, ScriptError> {
        Ok(b"PK\x03\x04docx".to_vec())
    }
}

struct FailingRunner;

#[async_trait]
impl ScriptRunner for FailingRunner {
    async fn generate_curriculum(&self, _params: &GenerateParams) -> Result<Value, ScriptError> {
        Err(ScriptError::Exit {
            script: "scripts/generate_curriculum.py".to_string(),
            code: 1,
        })
    }

    async fn convert_document(&self, _document: &Value) -> Result<Vec<u8>, ScriptError> {
        Err(ScriptError::Timeout {
            script: "scripts/convert_to_docx.py".to_string(),
            seconds: 60,
        })
    }
}

macro_rules! convert_app {
    ($runner:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::with_runner(Arc::new($runner))))
                .service(web::scope("/api").service(
                    web::resource("/convert-to-docx")
                        .route(web::post().to(handlers::convert_to_docx)),
                )),
        )
        .await
    };
}

fn document_with_identitas() -> Value {
    json!({
        "identitas": {
            "nama": "Web Dev",
            "kode": "BC-1754550000000",
            "durasi": 8,
            "mode": "Online",
            "level": "Beginner",
            "kapasitas": 25
        },
        "modules": []
    })
}

#[actix_web::test]
async fn test_convert_streams_docx_attachment() {
    let app = convert_app!(StubRunner);

    let req = test::TestRequest::post()
        .uri("/api/convert-to-docx")
        .set_json(document_with_identitas())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(content_type, DOCX_CONTENT_TYPE);

    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"Web-Dev-"));
    assert!(disposition.ends_with(".docx\""));

    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"PK\x03\x04docx");
}

#[actix_web::test]
async fn test_convert_without_identitas_is_rejected() {
    let app = convert_app!(StubRunner);

    let req = test::TestRequest::post()
        .uri("/api/convert-to-docx")
        .set_json(json!({"modules": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid bootcamp data");
}

#[actix_web::test]
async fn test_convert_rejects_non_object_identitas() {
    let app = convert_app!(StubRunner);

    let req = test::TestRequest::post()
        .uri("/api/convert-to-docx")
        .set_json(json!({"identitas": "Web Dev", "modules": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_convert_failure_returns_envelope_with_message() {
    let app = convert_app!(FailingRunner);

    let req = test::TestRequest::post()
        .uri("/api/convert-to-docx")
        .set_json(document_with_identitas())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("did not finish within 60 seconds"));
}
