//! Reusable card component for tutor listings.

use leptos::prelude::*;

use crate::net::types::TeacherProfile;

/// A clickable card representing a tutor in the browse grid.
#[component]
pub fn TeacherCard(teacher: TeacherProfile) -> impl IntoView {
    let href = format!("/student/teachers/{}", teacher.id);
    let subjects = if teacher.subjects.is_empty() {
        "No subjects listed".to_owned()
    } else {
        teacher.subjects.join(", ")
    };
    let rate = format!("${:.2}/hr", teacher.hourly_rate);

    view! {
        <a class="teacher-card" href=href>
            <span class="teacher-card__name">{teacher.name}</span>
            <span class="teacher-card__subjects">{subjects}</span>
            <span class="teacher-card__rate">{rate}</span>
        </a>
    }
}
