#![forbid(unsafe_code)]

//! Presentation surfaces and the host's topmost-presenter capability.
//!
//! Surfaces are plain data: a title, a message, and a list of items. The host
//! decides how to draw them (action sheet, alert, terminal modal) and reports
//! the user's answer back as a [`SurfaceResponse`].
//!
//! Items carry an index into the environment catalog instead of the variant
//! itself, so [`TopPresenter`] stays object-safe and independent of the
//! environment type.

/// Which flow a surface belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// The environment choice list.
    Choice,
    /// The "restart required" notice after a selection.
    Confirmation,
    /// A surface the host application presented itself.
    Host,
}

/// Preferred presentation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStyle {
    /// A list of actions anchored to the screen edge.
    ActionSheet,
    /// A centered alert.
    Alert,
}

/// What activating an item means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRole {
    /// Choose the catalog entry at this index.
    Choice(usize),
    /// Close the surface without side effects.
    Dismiss,
}

/// One actionable row of a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceItem {
    pub label: String,
    pub role: ItemRole,
}

impl SurfaceItem {
    #[must_use]
    pub fn choice(label: impl Into<String>, index: usize) -> Self {
        Self {
            label: label.into(),
            role: ItemRole::Choice(index),
        }
    }

    #[must_use]
    pub fn dismiss(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: ItemRole::Dismiss,
        }
    }

    /// The response produced by activating this item.
    #[must_use]
    pub fn response(&self) -> SurfaceResponse {
        match self.role {
            ItemRole::Choice(index) => SurfaceResponse::Chose(index),
            ItemRole::Dismiss => SurfaceResponse::Dismissed,
        }
    }
}

/// A presentable surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub style: SurfaceStyle,
    pub title: String,
    pub message: String,
    pub items: Vec<SurfaceItem>,
}

impl Surface {
    /// Number of choice items.
    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.role, ItemRole::Choice(_)))
            .count()
    }

    /// Index of the first dismiss item, if any.
    #[must_use]
    pub fn dismiss_index(&self) -> Option<usize> {
        self.items.iter().position(|i| i.role == ItemRole::Dismiss)
    }

    /// Item labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.label.as_str())
    }
}

/// The user's answer to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceResponse {
    /// A choice item was activated.
    Chose(usize),
    /// The surface was dismissed (dismiss item, escape, outside tap).
    Dismissed,
}

/// User-facing texts of the overlay's surfaces.
///
/// `{env}` in a template is replaced with an environment's identifying
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceCopy {
    pub choice_title: String,
    pub choice_message: String,
    pub dismiss_label: String,
    pub confirmation_title: String,
    pub confirmation_message: String,
}

impl Default for SurfaceCopy {
    fn default() -> Self {
        Self {
            choice_title: "Current env: {env}".into(),
            choice_message: "Please select a backend environment".into(),
            dismiss_label: "Cancel".into(),
            confirmation_title: "Environment changed successfully.".into(),
            confirmation_message: "Please restart the app to access {env}".into(),
        }
    }
}

impl SurfaceCopy {
    /// Fill `{env}` in a template.
    #[must_use]
    pub fn render(template: &str, env: &str) -> String {
        template.replace("{env}", env)
    }
}

/// The host's topmost presentation capability.
///
/// The overlay never draws surfaces itself. It asks the host whether
/// anything is presented system-wide, and hands surfaces over for display.
pub trait TopPresenter {
    /// Returns true if any surface (the overlay's or the host's) is shown.
    fn has_active_presentation(&self) -> bool;

    /// Show `surface` above everything else.
    fn present(&mut self, surface: Surface);

    /// Remove the surface most recently handed to [`present`](Self::present).
    ///
    /// Must be a no-op if that surface is already gone.
    fn dismiss(&mut self);
}

impl<T: TopPresenter + ?Sized> TopPresenter for Box<T> {
    fn has_active_presentation(&self) -> bool {
        (**self).has_active_presentation()
    }

    fn present(&mut self, surface: Surface) {
        (**self).present(surface);
    }

    fn dismiss(&mut self) {
        (**self).dismiss();
    }
}
