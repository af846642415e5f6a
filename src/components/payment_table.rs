//! Read-only payment history table.

use leptos::prelude::*;

use crate::net::types::Payment;

#[component]
pub fn PaymentTable(payments: Vec<Payment>) -> impl IntoView {
    let rows = payments
        .into_iter()
        .map(|payment| {
            let amount = if payment.currency.is_empty() {
                format!("${:.2}", payment.amount)
            } else {
                format!("{:.2} {}", payment.amount, payment.currency.to_uppercase())
            };
            view! {
                <tr class="payment-table__row">
                    <td>{payment.created_at.clone()}</td>
                    <td>{format!("#{}", payment.booking_id)}</td>
                    <td>{amount}</td>
                    <td>{payment.status.clone()}</td>
                </tr>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <table class="payment-table">
            <thead>
                <tr>
                    <th>"Date"</th>
                    <th>"Booking"</th>
                    <th>"Amount"</th>
                    <th>"Status"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
