//! Reusable view components.

pub mod booking_table;
pub mod navbar;
pub mod payment_table;
pub mod teacher_card;
pub mod toast;
