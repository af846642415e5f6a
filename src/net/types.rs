//! Request and response types for the marketplace REST API.
//!
//! Wire names are camelCase to match the server's JSON. Profiles are a tagged
//! union resolved from the role claim at login, so views never probe an
//! untyped object for fields that may not exist.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================
// Auth
// =============================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Access/refresh pair some deployments return from login instead of a bare
/// token string.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

// =============================================================
// Profiles
// =============================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub subjects_of_interest: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub hourly_rate: f64,
}

/// The signed-in user's profile, tagged by kind.
///
/// Admins have no profile record; their session carries `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Profile {
    Student(StudentProfile),
    Teacher(TeacherProfile),
}

impl Profile {
    pub fn id(&self) -> i64 {
        match self {
            Profile::Student(p) => p.id,
            Profile::Teacher(p) => p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Profile::Student(p) => &p.name,
            Profile::Teacher(p) => &p.name,
        }
    }
}

// =============================================================
// Availability
// =============================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub id: i64,
    pub teacher_id: i64,
    /// ISO-8601 timestamps, passed through untouched for display.
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub booked: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlot {
    pub start_time: String,
    pub end_time: String,
}

// =============================================================
// Bookings
// =============================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Paid,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Paid => "Paid",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub price: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub teacher_id: i64,
    pub slot_id: i64,
}

// =============================================================
// Payments and dashboard stats
// =============================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStats {
    #[serde(default)]
    pub total_earnings: f64,
    #[serde(default)]
    pub completed_sessions: u32,
    #[serde(default)]
    pub upcoming_sessions: u32,
    #[serde(default)]
    pub unique_students: u32,
}

/// Response of the checkout-session endpoint; the client hard-redirects to
/// `url`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub url: String,
}
