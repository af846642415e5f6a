use super::*;

// =============================================================
// Auth payloads
// =============================================================

#[test]
fn refresh_response_parses_camel_case() {
    let parsed: RefreshResponse =
        serde_json::from_str(r#"{"accessToken":"abc"}"#).expect("parses");
    assert_eq!(parsed.access_token, "abc");
}

#[test]
fn token_pair_parses_camel_case() {
    let parsed: TokenPair =
        serde_json::from_str(r#"{"accessToken":"a","refreshToken":"r"}"#).expect("parses");
    assert_eq!(parsed.access_token, "a");
    assert_eq!(parsed.refresh_token, "r");
}

#[test]
fn refresh_request_serializes_camel_case() {
    let raw = serde_json::to_value(RefreshRequest {
        refresh_token: "r-1".to_owned(),
    })
    .expect("serializes");
    assert_eq!(raw, serde_json::json!({ "refreshToken": "r-1" }));
}

// =============================================================
// Profiles
// =============================================================

#[test]
fn profile_union_round_trips_with_kind_tag() {
    let profile = Profile::Teacher(TeacherProfile {
        id: 3,
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        bio: None,
        subjects: vec!["Math".to_owned()],
        hourly_rate: 42.5,
    });

    let raw = serde_json::to_string(&profile).expect("serializes");
    assert!(raw.contains(r#""kind":"Teacher""#));

    let back: Profile = serde_json::from_str(&raw).expect("parses");
    assert_eq!(back, profile);
    assert_eq!(back.id(), 3);
    assert_eq!(back.name(), "Ada");
}

#[test]
fn student_profile_defaults_optional_fields() {
    let parsed: StudentProfile =
        serde_json::from_str(r#"{"id":1,"name":"Li","email":"li@example.com"}"#).expect("parses");
    assert_eq!(parsed.bio, None);
    assert!(parsed.subjects_of_interest.is_empty());
}

// =============================================================
// Bookings and availability
// =============================================================

#[test]
fn booking_status_uses_screaming_wire_names() {
    let parsed: BookingStatus = serde_json::from_str(r#""PENDING""#).expect("parses");
    assert_eq!(parsed, BookingStatus::Pending);
    assert_eq!(
        serde_json::to_string(&BookingStatus::Cancelled).expect("serializes"),
        r#""CANCELLED""#
    );
}

#[test]
fn booking_parses_with_optional_names_missing() {
    let raw = r#"{"id":7,"studentId":1,"teacherId":2,"startTime":"s","endTime":"e","status":"PAID"}"#;
    let parsed: Booking = serde_json::from_str(raw).expect("parses");
    assert_eq!(parsed.student_name, None);
    assert_eq!(parsed.status, BookingStatus::Paid);
    assert_eq!(parsed.price, 0.0);
}

#[test]
fn availability_slot_defaults_booked_to_false() {
    let raw = r#"{"id":1,"teacherId":4,"startTime":"s","endTime":"e"}"#;
    let parsed: AvailabilitySlot = serde_json::from_str(raw).expect("parses");
    assert!(!parsed.booked);
}

#[test]
fn new_booking_serializes_camel_case() {
    let raw = serde_json::to_value(NewBooking {
        teacher_id: 2,
        slot_id: 9,
    })
    .expect("serializes");
    assert_eq!(raw, serde_json::json!({ "teacherId": 2, "slotId": 9 }));
}
