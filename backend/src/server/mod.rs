//! Server construction and middleware wiring.

mod config;
mod shutdown;
mod state_builders;

pub use config::ServerConfig;
pub use shutdown::{drain, shutdown_signal};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_directory::Trace;
#[cfg(debug_assertions)]
use user_directory::doc::ApiDoc;
use user_directory::inbound::http::api_scope;
use user_directory::inbound::http::health::{HealthState, live, ready};
use user_directory::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "user directory listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    use user_directory::domain::TRACE_ID_HEADER;

    #[rstest]
    #[actix_web::test]
    async fn app_serves_users_health_and_trace_headers() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("socket address"));
        let app = actix_test::init_service(build_app(health_state, build_http_state(&config)))
            .await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(json!({
                    "firstName": "Ann",
                    "lastName": "Lee",
                    "birthDate": "1990-04-12",
                    "email": "ann@example.com",
                    "phone": "555-0100",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        assert!(created.headers().contains_key(TRACE_ID_HEADER));

        let readiness = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(readiness.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn extractor_errors_carry_the_trace_id() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("socket address"));
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            build_http_state(&config),
        ))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users?limit=0")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace header");
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["traceId"], header.as_str());
    }

    #[rstest]
    #[actix_web::test]
    async fn draining_fails_probes_and_stops_the_server() {
        let health_state = web::Data::new(HealthState::new());
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("socket address"));
        let server = create_server(health_state.clone(), config).expect("server binds");
        assert!(health_state.is_ready());

        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        drain(&health_state, handle).await;

        assert!(!health_state.is_ready());
        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
