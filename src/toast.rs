//! Toast Queue
//!
//! Transient notifications shown in the corner of the screen. The queue
//! itself is plain data; the context schedules the auto-dismiss timers.

/// Toasts visible at once; older ones are dropped first
pub const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Info => "toast toast-info",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u32,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Add a toast and return its id. Repeating the newest message does
    /// not stack a second copy.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u32 {
        let message = message.into();
        if let Some(last) = self.toasts.last() {
            if last.kind == kind && last.message == message {
                return last.id;
            }
        }
        self.next_id += 1;
        self.toasts.push(Toast { id: self.next_id, kind, message });
        if self.toasts.len() > MAX_VISIBLE {
            let excess = self.toasts.len() - MAX_VISIBLE;
            self.toasts.drain(..excess);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u32) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Success, "Client saved");
        let b = queue.push(ToastKind::Error, "Network error");
        assert_ne!(a, b);
        assert!(queue.dismiss(a));
        assert!(!queue.dismiss(a));
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].message, "Network error");
    }

    #[test]
    fn test_duplicate_message_not_stacked() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Error, "Server unavailable");
        let b = queue.push(ToastKind::Error, "Server unavailable");
        assert_eq!(a, b);
        assert_eq!(queue.toasts().len(), 1);
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut queue = ToastQueue::default();
        for i in 0..MAX_VISIBLE + 2 {
            queue.push(ToastKind::Info, format!("message {}", i));
        }
        assert_eq!(queue.toasts().len(), MAX_VISIBLE);
        assert_eq!(queue.toasts()[0].message, "message 2");
    }
}
