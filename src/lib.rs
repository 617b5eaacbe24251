use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod bootcamp;
pub mod client;
pub mod config;
pub mod editor;
pub mod form;
pub mod scripts;

use crate::config::ScriptConfig;
use crate::scripts::{PythonScriptEngine, ScriptRunner};

/// Failure envelope shared by every endpoint: `{success: false, error}`.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub success: bool,
    #[schema(example = "Missing required fields")]
    pub error: String,
}

impl ApiError {
    pub fn new(message: &str) -> Self {
        Self {
            success: false,
            error: message.to_string(),
        }
    }
}

/// Shared application state: the seam to the external scripts.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<dyn ScriptRunner + Send + Sync>,
}

impl AppState {
    pub fn new(config: ScriptConfig) -> Self {
        Self {
            runner: Arc::new(PythonScriptEngine::new(config)),
        }
    }

    /// State backed by an arbitrary runner; used by tests.
    pub fn with_runner(runner: Arc<dyn ScriptRunner + Send + Sync>) -> Self {
        Self { runner }
    }
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::bootcamp::handlers::generate_bootcamp,
            crate::bootcamp::handlers::convert_to_docx,
            crate::bootcamp::handlers::health,
        ),
        components(
            schemas(
                bootcamp::models::GenerateBootcampRequest,
                bootcamp::models::GenerateResponse,
                bootcamp::models::BootcampDocument,
                bootcamp::models::Identitas,
                bootcamp::models::Level,
                bootcamp::handlers::HealthResponse,
                ApiError,
            )
        ),
        tags(
            (name = "Bootcamp Service", description = "Curriculum generation and export endpoints.")
        )
    )]
    struct ApiDoc;

    let script_config = ScriptConfig::from_env();
    log::info!(
        "Using generator {} and converter {} via {}",
        script_config.generator_script,
        script_config.converter_script,
        script_config.python_bin
    );
    let app_state = web::Data::new(AppState::new(script_config));

    let prometheus = PrometheusMetricsBuilder::new("bootcamp_builder_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting server at http://0.0.0.0:8080");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/generate-bootcamp")
                            .route(web::post().to(bootcamp::handlers::generate_bootcamp)),
                    )
                    .service(
                        web::resource("/convert-to-docx")
                            .route(web::post().to(bootcamp::handlers::convert_to_docx)),
                    ),
            )
            .service(web::resource("/health").route(web::get().to(bootcamp::handlers::health)))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
