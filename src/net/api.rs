//! Typed helpers for the marketplace REST API.
//!
//! One method per remote endpoint. Methods return `Result` so pages can
//! surface failures as toasts; nothing here panics. All calls pass through
//! the auth interceptor in [`super::http`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::json;

use super::http::{ApiClient, ApiError};
use super::types::{
    AvailabilitySlot, Booking, CheckoutSession, NewBooking, NewSlot, Payment, RegisterRequest,
    StudentProfile, TeacherProfile, TeacherStats, TokenPair,
};
use crate::state::session::Credentials;

impl ApiClient {
    // =============================================================
    // Auth
    // =============================================================

    /// `POST /auth/login`.
    ///
    /// The endpoint historically returns the access token as a bare string
    /// (not JSON-wrapped); newer deployments return an access/refresh pair.
    /// Both shapes are accepted, and the bare form is trimmed before use.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError> {
        let body = json!({ "email": email, "password": password });
        let resp = self.post("/auth/login", Some(body)).await?.require_success()?;
        let raw = resp.body.trim();
        if let Ok(pair) = serde_json::from_str::<TokenPair>(raw) {
            return Ok(Credentials {
                access_token: pair.access_token,
                refresh_token: Some(pair.refresh_token),
            });
        }
        Ok(Credentials {
            access_token: raw.to_owned(),
            refresh_token: None,
        })
    }

    /// `POST /auth/register`.
    pub async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        let body = serde_json::to_value(req).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.post("/auth/register", Some(body)).await?.require_success()?;
        Ok(())
    }

    // =============================================================
    // Profiles
    // =============================================================

    /// `GET /students/me`.
    pub async fn fetch_student_me(&self) -> Result<StudentProfile, ApiError> {
        self.get("/students/me").await?.require_success()?.json()
    }

    /// `PUT /students/me`.
    pub async fn update_student_me(
        &self,
        profile: &StudentProfile,
    ) -> Result<StudentProfile, ApiError> {
        let body = serde_json::to_value(profile).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.put("/students/me", Some(body)).await?.require_success()?.json()
    }

    /// `GET /teachers/me`.
    pub async fn fetch_teacher_me(&self) -> Result<TeacherProfile, ApiError> {
        self.get("/teachers/me").await?.require_success()?.json()
    }

    /// `PUT /teachers/me`.
    pub async fn update_teacher_me(
        &self,
        profile: &TeacherProfile,
    ) -> Result<TeacherProfile, ApiError> {
        let body = serde_json::to_value(profile).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.put("/teachers/me", Some(body)).await?.require_success()?.json()
    }

    /// `GET /teachers`.
    pub async fn fetch_teachers(&self) -> Result<Vec<TeacherProfile>, ApiError> {
        self.get("/teachers").await?.require_success()?.json()
    }

    /// `GET /teachers/{id}`.
    pub async fn fetch_teacher(&self, id: i64) -> Result<TeacherProfile, ApiError> {
        self.get(&format!("/teachers/{id}")).await?.require_success()?.json()
    }

    // =============================================================
    // Availability
    // =============================================================

    /// `GET /availability/teacher/{id}` — the public view students book from.
    pub async fn fetch_teacher_availability(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<AvailabilitySlot>, ApiError> {
        self.get(&format!("/availability/teacher/{teacher_id}"))
            .await?
            .require_success()?
            .json()
    }

    /// `GET /availability/{teacherId}` — the owner's management view.
    pub async fn fetch_own_availability(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<AvailabilitySlot>, ApiError> {
        self.get(&format!("/availability/{teacher_id}"))
            .await?
            .require_success()?
            .json()
    }

    /// `POST /availability/{teacherId}`.
    pub async fn add_availability_slot(
        &self,
        teacher_id: i64,
        slot: &NewSlot,
    ) -> Result<AvailabilitySlot, ApiError> {
        let body = serde_json::to_value(slot).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.post(&format!("/availability/{teacher_id}"), Some(body))
            .await?
            .require_success()?
            .json()
    }

    // =============================================================
    // Bookings
    // =============================================================

    /// `POST /bookings`.
    pub async fn create_booking(&self, req: &NewBooking) -> Result<Booking, ApiError> {
        let body = serde_json::to_value(req).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.post("/bookings", Some(body)).await?.require_success()?.json()
    }

    /// `GET /bookings/student/{id}`.
    pub async fn fetch_student_bookings(&self, student_id: i64) -> Result<Vec<Booking>, ApiError> {
        self.get(&format!("/bookings/student/{student_id}"))
            .await?
            .require_success()?
            .json()
    }

    /// `GET /bookings/teacher/{id}`.
    pub async fn fetch_teacher_bookings(&self, teacher_id: i64) -> Result<Vec<Booking>, ApiError> {
        self.get(&format!("/bookings/teacher/{teacher_id}"))
            .await?
            .require_success()?
            .json()
    }

    /// `DELETE /bookings/{id}` — student-side cancellation.
    pub async fn cancel_booking(&self, booking_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/bookings/{booking_id}")).await?.require_success()?;
        Ok(())
    }

    /// `DELETE /bookings/teacher/{id}` — teacher-side cancellation.
    pub async fn teacher_cancel_booking(&self, booking_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/bookings/teacher/{booking_id}"))
            .await?
            .require_success()?;
        Ok(())
    }

    /// `PUT /bookings/{id}/complete`.
    pub async fn complete_booking(&self, booking_id: i64) -> Result<Booking, ApiError> {
        self.put(&format!("/bookings/{booking_id}/complete"), None)
            .await?
            .require_success()?
            .json()
    }

    // =============================================================
    // Payments
    // =============================================================

    /// `POST /stripe/create-checkout-session/{bookingId}`.
    pub async fn create_checkout_session(
        &self,
        booking_id: i64,
    ) -> Result<CheckoutSession, ApiError> {
        self.post(&format!("/stripe/create-checkout-session/{booking_id}"), None)
            .await?
            .require_success()?
            .json()
    }

    /// `GET /stripe/success/{bookingId}` — confirm a completed checkout.
    pub async fn confirm_payment_success(&self, booking_id: i64) -> Result<(), ApiError> {
        self.get(&format!("/stripe/success/{booking_id}"))
            .await?
            .require_success()?;
        Ok(())
    }

    /// `GET /stripe/cancel/{bookingId}` — release an abandoned checkout.
    pub async fn confirm_payment_cancel(&self, booking_id: i64) -> Result<(), ApiError> {
        self.get(&format!("/stripe/cancel/{booking_id}"))
            .await?
            .require_success()?;
        Ok(())
    }

    /// `GET /stripe/payments/teacher/{id}`.
    pub async fn fetch_teacher_payments(&self, teacher_id: i64) -> Result<Vec<Payment>, ApiError> {
        self.get(&format!("/stripe/payments/teacher/{teacher_id}"))
            .await?
            .require_success()?
            .json()
    }

    /// `GET /payments/student/{id}`.
    pub async fn fetch_student_payments(&self, student_id: i64) -> Result<Vec<Payment>, ApiError> {
        self.get(&format!("/payments/student/{student_id}"))
            .await?
            .require_success()?
            .json()
    }

    // =============================================================
    // Dashboard
    // =============================================================

    /// `GET /teacher-dashboard/{id}/stats`.
    pub async fn fetch_teacher_stats(&self, teacher_id: i64) -> Result<TeacherStats, ApiError> {
        self.get(&format!("/teacher-dashboard/{teacher_id}/stats"))
            .await?
            .require_success()?
            .json()
    }
}
