use std::sync::Arc;

use futures::executor::block_on;

use crate::net::http::testing::{MockTransport, RecordingNavigator};
use crate::net::http::{API_BASE, ApiClient, ApiError, HttpResponse, Method, Navigator, Transport};
use crate::net::types::{NewBooking, NewSlot};
use crate::storage::MemoryStore;

fn client(script: Vec<Result<HttpResponse, ApiError>>) -> (ApiClient, Arc<MockTransport>) {
    let transport = MockTransport::new(script);
    let api = ApiClient::new(
        API_BASE,
        Arc::new(MemoryStore::default()),
        Arc::clone(&transport) as Arc<dyn Transport>,
        Arc::new(RecordingNavigator::default()) as Arc<dyn Navigator>,
    );
    (api, transport)
}

// =============================================================
// Login response shapes
// =============================================================

#[test]
fn login_accepts_bare_token_and_trims_it() {
    let (api, transport) = client(vec![MockTransport::response(200, "  header.payload.sig \n")]);

    let credentials = block_on(api.login("a@b.com", "x")).expect("login ok");

    assert_eq!(credentials.access_token, "header.payload.sig");
    assert_eq!(credentials.refresh_token, None);

    let log = transport.log.lock();
    assert_eq!(log[0].method, Method::Post);
    assert_eq!(log[0].url, "/api/auth/login");
    assert_eq!(
        log[0].body,
        Some(serde_json::json!({ "email": "a@b.com", "password": "x" }))
    );
}

#[test]
fn login_accepts_token_pair_json() {
    let body = r#"{"accessToken":"acc-1","refreshToken":"ref-1"}"#;
    let (api, _) = client(vec![MockTransport::response(200, body)]);

    let credentials = block_on(api.login("a@b.com", "x")).expect("login ok");

    assert_eq!(credentials.access_token, "acc-1");
    assert_eq!(credentials.refresh_token.as_deref(), Some("ref-1"));
}

#[test]
fn login_rejection_surfaces_as_status_error() {
    let (api, _) = client(vec![MockTransport::response(401, "bad credentials")]);

    let err = block_on(api.login("a@b.com", "nope")).expect_err("login fails");

    assert_eq!(
        err,
        ApiError::Status {
            status: 401,
            body: "bad credentials".to_owned(),
        }
    );
}

// =============================================================
// Endpoint paths and methods
// =============================================================

#[test]
fn booking_endpoints_use_expected_routes() {
    let (api, transport) = client(vec![
        MockTransport::response(
            200,
            r#"{"id":7,"studentId":1,"teacherId":2,"startTime":"s","endTime":"e","status":"PENDING"}"#,
        ),
        MockTransport::response(200, ""),
        MockTransport::response(200, ""),
        MockTransport::response(
            200,
            r#"{"id":7,"studentId":1,"teacherId":2,"startTime":"s","endTime":"e","status":"COMPLETED"}"#,
        ),
    ]);

    block_on(api.create_booking(&NewBooking {
        teacher_id: 2,
        slot_id: 9,
    }))
    .expect("create");
    block_on(api.cancel_booking(7)).expect("cancel");
    block_on(api.teacher_cancel_booking(7)).expect("teacher cancel");
    block_on(api.complete_booking(7)).expect("complete");

    let log = transport.log.lock();
    assert_eq!(log[0].url, "/api/bookings");
    assert_eq!(log[0].method, Method::Post);
    assert_eq!(log[1].url, "/api/bookings/7");
    assert_eq!(log[1].method, Method::Delete);
    assert_eq!(log[2].url, "/api/bookings/teacher/7");
    assert_eq!(log[2].method, Method::Delete);
    assert_eq!(log[3].url, "/api/bookings/7/complete");
    assert_eq!(log[3].method, Method::Put);
}

#[test]
fn availability_endpoints_distinguish_public_and_owner_views() {
    let (api, transport) = client(vec![
        MockTransport::response(200, "[]"),
        MockTransport::response(200, "[]"),
        MockTransport::response(
            200,
            r#"{"id":1,"teacherId":4,"startTime":"s","endTime":"e","booked":false}"#,
        ),
    ]);

    block_on(api.fetch_teacher_availability(4)).expect("public view");
    block_on(api.fetch_own_availability(4)).expect("owner view");
    block_on(api.add_availability_slot(
        4,
        &NewSlot {
            start_time: "s".to_owned(),
            end_time: "e".to_owned(),
        },
    ))
    .expect("add slot");

    let log = transport.log.lock();
    assert_eq!(log[0].url, "/api/availability/teacher/4");
    assert_eq!(log[1].url, "/api/availability/4");
    assert_eq!(log[2].url, "/api/availability/4");
    assert_eq!(log[2].method, Method::Post);
}

#[test]
fn payment_endpoints_use_expected_routes() {
    let (api, transport) = client(vec![
        MockTransport::response(200, r#"{"url":"https://checkout.example/cs_1"}"#),
        MockTransport::response(200, ""),
        MockTransport::response(200, ""),
        MockTransport::response(200, "[]"),
        MockTransport::response(200, "[]"),
    ]);

    let checkout = block_on(api.create_checkout_session(12)).expect("checkout");
    assert_eq!(checkout.url, "https://checkout.example/cs_1");
    block_on(api.confirm_payment_success(12)).expect("success");
    block_on(api.confirm_payment_cancel(12)).expect("cancel");
    block_on(api.fetch_teacher_payments(3)).expect("teacher payments");
    block_on(api.fetch_student_payments(5)).expect("student payments");

    let log = transport.log.lock();
    assert_eq!(log[0].url, "/api/stripe/create-checkout-session/12");
    assert_eq!(log[0].method, Method::Post);
    assert_eq!(log[1].url, "/api/stripe/success/12");
    assert_eq!(log[2].url, "/api/stripe/cancel/12");
    assert_eq!(log[3].url, "/api/stripe/payments/teacher/3");
    assert_eq!(log[4].url, "/api/payments/student/5");
}

// =============================================================
// Decoding
// =============================================================

#[test]
fn fetch_teachers_parses_profile_list() {
    let body = r#"[{"id":2,"name":"Ada","email":"ada@example.com","subjects":["Math"],"hourlyRate":40.0}]"#;
    let (api, transport) = client(vec![MockTransport::response(200, body)]);

    let teachers = block_on(api.fetch_teachers()).expect("list");

    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0].name, "Ada");
    assert_eq!(teachers[0].subjects, vec!["Math".to_owned()]);
    assert_eq!(transport.log.lock()[0].url, "/api/teachers");
}

#[test]
fn stats_tolerate_missing_fields() {
    let (api, transport) = client(vec![MockTransport::response(200, "{}")]);

    let stats = block_on(api.fetch_teacher_stats(8)).expect("stats");

    assert_eq!(stats.total_earnings, 0.0);
    assert_eq!(stats.completed_sessions, 0);
    assert_eq!(transport.log.lock()[0].url, "/api/teacher-dashboard/8/stats");
}

#[test]
fn malformed_body_maps_to_decode_error() {
    let (api, _) = client(vec![MockTransport::response(200, "not json")]);

    let err = block_on(api.fetch_teachers()).expect_err("decode fails");

    assert!(matches!(err, ApiError::Decode(_)));
}
