use actix_web::{http::StatusCode, test, web, App};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde_json::Value;

use bootcamp_builder_server::bootcamp::handlers;

#[actix_web::test]
async fn test_health_reports_ok_with_timestamp() {
    let app = test::init_service(
        App::new().service(web::resource("/health").route(web::get().to(handlers::health))),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[actix_web::test]
async fn test_metrics_endpoint_responds() {
    let prometheus = PrometheusMetricsBuilder::new("bootcamp_builder_test")
        .endpoint("/metrics")
        .build()
        .unwrap();

    let app = test::init_service(
        App::new()
            .wrap(prometheus)
            .service(web::resource("/health").route(web::get().to(handlers::health))),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
