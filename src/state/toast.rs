//! Transient user-facing notifications.
//!
//! Failures are reported here instead of crashing the view tree; entries are
//! dismissed by the host component after a short delay or by the user.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Notification queue with monotonically increasing ids.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u32,
}

impl ToastState {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u32 {
        self.push(ToastKind::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u32 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u32 {
        self.push(ToastKind::Error, message)
    }

    /// Remove a toast by id. Unknown ids are ignored, so a timer firing after
    /// a manual dismissal is harmless.
    pub fn dismiss(&mut self, id: u32) {
        self.toasts.retain(|t| t.id != id);
    }
}
