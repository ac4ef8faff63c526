//! Status Badges
//!
//! Shared presentation contract for anything rendered as a colored pill.

/// Color family of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Danger,
    Neutral,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Success => "badge badge-success",
            Tone::Info => "badge badge-info",
            Tone::Warning => "badge badge-warning",
            Tone::Danger => "badge badge-danger",
            Tone::Neutral => "badge badge-neutral",
        }
    }
}

/// Anything that renders as a status badge
pub trait Badge {
    fn label(&self) -> String;
    fn tone(&self) -> Tone;

    fn badge_class(&self) -> &'static str {
        self.tone().css_class()
    }
}

/// Implements `Badge` for a fieldless status enum from a
/// `Variant => ("Label", Tone)` table, plus an `ALL` list for filters.
macro_rules! status_badge {
    ($ty:ident { $($variant:ident => ($label:expr, $tone:ident)),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_label(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl $crate::badge::Badge for $ty {
            fn label(&self) -> String {
                self.as_label().to_string()
            }

            fn tone(&self) -> $crate::badge::Tone {
                match self {
                    $($ty::$variant => $crate::badge::Tone::$tone),+
                }
            }
        }
    };
}

pub(crate) use status_badge;
