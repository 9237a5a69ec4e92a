//! Handler coverage against the in-memory user store.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::UserDirectoryService;
use crate::domain::ports::{MockUserDirectoryCommand, MockUserDirectoryQuery};
use crate::inbound::http::api_scope;
use crate::outbound::memory::InMemoryUserRepository;

#[fixture]
fn state() -> HttpState {
    let service = UserDirectoryService::new(Arc::new(InMemoryUserRepository::new()));
    HttpState::from_service(Arc::new(service))
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(api_scope())
}

fn registration(first: &str, last: &str, email: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "birthDate": "1990-04-12",
        "email": email,
        "phone": "555-0100",
    })
}

async fn json_body(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

macro_rules! call {
    ($app:expr, $request:expr) => {
        actix_test::call_service(&$app, $request.to_request()).await
    };
}

#[rstest]
#[actix_web::test]
async fn registration_assigns_sequential_handles(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;

    let mut handles = Vec::new();
    for (first, email) in [
        ("Ann", "ann@example.com"),
        ("Alice", "alice@example.com"),
        ("Al", "al@example.com"),
    ] {
        let res = call!(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(registration(first, "Lee", email))
        );
        assert_eq!(res.status(), StatusCode::CREATED);
        let location = res
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("Location header");
        let body = json_body(res).await;
        let handle = body["handle"].as_str().expect("handle").to_owned();
        assert_eq!(location, format!("/api/v1/users/{handle}"));
        handles.push(handle);
    }

    assert_eq!(handles, ["alee", "alee2", "alee3"]);
}

#[rstest]
#[actix_web::test]
async fn created_users_are_camel_case_without_ids(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    let res = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(registration("  Ann ", "Lee", " Ann@Example.COM "))
    );
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = json_body(res).await;

    // The leading space is the initial, so only the last name survives.
    assert_eq!(
        body,
        json!({
            "handle": "lee",
            "firstName": "Ann",
            "lastName": "Lee",
            "birthDate": "1990-04-12",
            "email": "ann@example.com",
            "phone": "555-0100",
        })
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_conflict(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    let first = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(registration("Ann", "Lee", "ann@example.com"))
    );
    assert_eq!(first.status(), StatusCode::CREATED);

    let res = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(registration("Bob", "Ray", " ANN@example.com"))
    );
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = json_body(res).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "email already exists");
    assert_eq!(body["details"]["code"], "duplicate_email");
}

#[rstest]
#[case::bad_email(json!({"email": "not-an-email"}), "email", "invalid_email")]
#[case::blank_first_name(json!({"firstName": "   "}), "firstName", "empty_first_name")]
#[case::short_phone(json!({"phone": "12"}), "phone", "phone_too_short")]
#[case::bad_birth_date(json!({"birthDate": "1990-13-01"}), "birthDate", "invalid_birth_date")]
#[actix_web::test]
async fn invalid_fields_are_rejected(
    state: HttpState,
    #[case] overrides: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(state)).await;
    let mut payload = registration("Ann", "Lee", "ann@example.com");
    if let (Some(target), Some(patch)) = (payload.as_object_mut(), overrides.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }

    let res = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(payload)
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_an_invalid_request(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    let res = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(r#"{"firstName": "Ann""#)
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case("/api/v1/users/nobody")]
#[case("/api/v1/users/A%20Lee")]
#[actix_web::test]
async fn unknown_handles_are_not_found(state: HttpState, #[case] uri: &str) {
    let app = actix_test::init_service(test_app(state)).await;
    let res = call!(app, actix_test::TestRequest::get().uri(uri));
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = json_body(res).await;
    assert_eq!(body["details"]["code"], "user_not_found");
}

#[rstest]
#[actix_web::test]
async fn delete_frees_the_handle(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(registration("Ann", "Lee", "ann@example.com"))
    );

    let found = call!(app, actix_test::TestRequest::get().uri("/api/v1/users/alee"));
    assert_eq!(found.status(), StatusCode::OK);

    let deleted = call!(
        app,
        actix_test::TestRequest::delete().uri("/api/v1/users/alee")
    );
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = call!(
        app,
        actix_test::TestRequest::delete().uri("/api/v1/users/alee")
    );
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let recreated = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(registration("Alice", "Lee", "alice@example.com"))
    );
    assert_eq!(json_body(recreated).await["handle"], "alee");
}

#[rstest]
#[case::free_text("q=LEE", &["alee", "blee", "clee"])]
#[case::per_field("firstName=an&lastName=lee", &["alee"])]
#[case::combined("q=example&handle=c", &["clee"])]
#[case::paged("limit=1&offset=1", &["blee"])]
#[case::no_match("email=zzz", &[])]
#[actix_web::test]
async fn search_filters_and_pages(
    state: HttpState,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    let app = actix_test::init_service(test_app(state)).await;
    for (first, email) in [
        ("Ann", "ann@example.com"),
        ("Bob", "bob@example.com"),
        ("Cat", "cat@example.com"),
    ] {
        let res = call!(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(registration(first, "Lee", email))
        );
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = call!(
        app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/users?{query}"))
    );
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    let handles: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|user| user["handle"].as_str())
        .collect();
    assert_eq!(handles, expected);
}

#[rstest]
#[case("limit=0", Some("limit_out_of_range"))]
#[case("limit=201", Some("limit_out_of_range"))]
#[case("offset=-1", Some("negative_offset"))]
#[case("limit=ten", None)]
#[actix_web::test]
async fn invalid_page_windows_are_rejected(
    state: HttpState,
    #[case] query: &str,
    #[case] detail_code: Option<&str>,
) {
    let app = actix_test::init_service(test_app(state)).await;
    let res = call!(
        app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/users?{query}"))
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"].as_str(), detail_code);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut query = MockUserDirectoryQuery::new();
    query
        .expect_get()
        .times(1)
        .returning(|_| Err(Error::internal("connection string leaked")));
    let state = HttpState::new(Arc::new(MockUserDirectoryCommand::new()), Arc::new(query));
    let app = actix_test::init_service(test_app(state)).await;

    let res = call!(app, actix_test::TestRequest::get().uri("/api/v1/users/alee"));
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(res).await;
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn unavailable_store_is_503() {
    let mut command = MockUserDirectoryCommand::new();
    command
        .expect_register()
        .times(1)
        .returning(|_| Err(Error::service_unavailable("user repository unavailable")));
    let state = HttpState::new(Arc::new(command), Arc::new(MockUserDirectoryQuery::new()));
    let app = actix_test::init_service(test_app(state)).await;

    let res = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(registration("Ann", "Lee", "ann@example.com"))
    );
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
