//! Routed pages, one module per view.

pub mod admin;
pub mod home;
pub mod not_authorized;
pub mod payment_result;
pub mod register;
pub mod student_bookings;
pub mod student_home;
pub mod student_payments;
pub mod student_profile;
pub mod teacher_availability;
pub mod teacher_detail;
pub mod teacher_home;
pub mod teacher_payments;
pub mod teacher_profile;
