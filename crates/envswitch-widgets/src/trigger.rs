#![forbid(unsafe_code)]

//! The floating trigger control.
//!
//! A [`Trigger`] is created from a [`TriggerAppearance`] and placed at a fixed
//! origin. Styling is a separate step ([`Trigger::apply_appearance`]) so a
//! host can defer it until the trigger has been installed with valid bounds.
//!
//! Sizes are in host units. Text width is measured in terminal columns with
//! `unicode-width`; GUI hosts that measure differently call
//! [`Trigger::resize`] after installation.

use envswitch_core::geometry::{Insets, Point, Rect, Size};
use unicode_width::UnicodeWidthStr;

/// Label used when no appearance is configured.
pub const DEFAULT_TRIGGER_LABEL: &str = "EN";

/// Content inset applied to image triggers.
pub const IMAGE_CONTENT_INSET: f32 = 30.0;

/// Size of a trigger that has nothing to show yet.
const EMPTY_TRIGGER_SIZE: Size = Size::new(3.0, 1.0);

/// Horizontal padding around a text label, per side.
const LABEL_PADDING: f32 = 1.0;

/// An opaque image reference with its intrinsic size.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    name: String,
    size: Size,
}

impl ImageHandle {
    /// Create a handle.
    #[must_use]
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Asset name the host uses to draw the image.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intrinsic size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

/// How the trigger presents itself.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerAppearance {
    /// A short text label.
    Label(String),
    /// An image the host already loaded.
    Image(ImageHandle),
    /// An image looked up by asset name when styling is applied.
    NamedImage(String),
}

impl Default for TriggerAppearance {
    fn default() -> Self {
        Self::Label(DEFAULT_TRIGGER_LABEL.to_string())
    }
}

/// Resolves named images for [`TriggerAppearance::NamedImage`].
pub trait ImageResolver {
    /// Look up an image by asset name.
    fn resolve(&self, name: &str) -> Option<ImageHandle>;
}

impl<F> ImageResolver for F
where
    F: Fn(&str) -> Option<ImageHandle>,
{
    fn resolve(&self, name: &str) -> Option<ImageHandle> {
        self(name)
    }
}

/// Resolver for hosts without an asset catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&self, _name: &str) -> Option<ImageHandle> {
        None
    }
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
}

/// How image content is scaled inside the content rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    #[default]
    Center,
    AspectFit,
}

/// Visual attributes applied by [`Trigger::apply_appearance`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TriggerStyle {
    pub corner_radius: f32,
    pub border_width: f32,
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
    pub content_mode: ContentMode,
}

impl TriggerStyle {
    /// Style for text labels: gray rounded box with a white title.
    #[must_use]
    pub const fn label() -> Self {
        Self {
            corner_radius: 4.0,
            border_width: 1.0,
            foreground: Some(Rgb::WHITE),
            background: Some(Rgb::GRAY),
            content_mode: ContentMode::Center,
        }
    }

    /// Style for images: no chrome, aspect-fit content.
    #[must_use]
    pub const fn image() -> Self {
        Self {
            corner_radius: 0.0,
            border_width: 0.0,
            foreground: None,
            background: None,
            content_mode: ContentMode::AspectFit,
        }
    }
}

/// What the trigger currently displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TriggerContent {
    /// Not styled yet, or the named image could not be resolved.
    #[default]
    Empty,
    Text(String),
    Image(ImageHandle),
}

/// The interactive control hosted by the overlay.
#[derive(Debug, Clone)]
pub struct Trigger {
    frame: Rect,
    appearance: TriggerAppearance,
    content: TriggerContent,
    style: TriggerStyle,
    content_insets: Insets,
    styled: bool,
    explicit_size: bool,
}

impl Trigger {
    /// Create an unstyled trigger with its top-left corner at `origin`.
    #[must_use]
    pub fn new(appearance: TriggerAppearance, origin: Point) -> Self {
        Self {
            frame: Rect::from_origin_size(origin, EMPTY_TRIGGER_SIZE),
            appearance,
            content: TriggerContent::Empty,
            style: TriggerStyle::default(),
            content_insets: Insets::default(),
            styled: false,
            explicit_size: false,
        }
    }

    /// Apply the configured appearance.
    ///
    /// Returns false when a named image could not be resolved; the trigger
    /// then stays blank but keeps working.
    pub fn apply_appearance(&mut self, images: &dyn ImageResolver) -> bool {
        let resolved = match self.appearance.clone() {
            TriggerAppearance::Label(text) => {
                self.content = TriggerContent::Text(text);
                self.style = TriggerStyle::label();
                true
            }
            TriggerAppearance::Image(handle) => {
                self.set_image(handle);
                true
            }
            TriggerAppearance::NamedImage(name) => match images.resolve(&name) {
                Some(handle) => {
                    self.set_image(handle);
                    true
                }
                None => {
                    tracing::debug!(name = %name, "trigger image not found, leaving trigger blank");
                    false
                }
            },
        };
        self.styled = true;
        if !self.explicit_size {
            self.size_to_fit();
        }
        resolved
    }

    fn set_image(&mut self, handle: ImageHandle) {
        self.content = TriggerContent::Image(handle);
        self.style = TriggerStyle::image();
        if !self.explicit_size {
            self.content_insets = Insets::uniform(IMAGE_CONTENT_INSET);
        }
    }

    /// Size the frame to its content, keeping the origin.
    pub fn size_to_fit(&mut self) {
        let size = match &self.content {
            TriggerContent::Empty => EMPTY_TRIGGER_SIZE,
            TriggerContent::Text(text) => {
                Size::new(text.width() as f32 + LABEL_PADDING * 2.0, 1.0)
            }
            TriggerContent::Image(handle) => handle.size(),
        };
        self.frame = self.frame.with_size(size);
    }

    /// Set an explicit size and derive the content insets from it.
    ///
    /// Every inset becomes the mean of `width` and `height`. Later calls to
    /// [`apply_appearance`](Self::apply_appearance) keep this size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.frame = self.frame.with_size(Size::new(width, height));
        self.content_insets = Insets::uniform((width + height) / 2.0);
        self.explicit_size = true;
    }

    /// Move the trigger by `offset`. No clamping is applied.
    pub fn translate(&mut self, offset: Point) {
        let center = self.frame.center() + offset;
        self.frame = self.frame.with_center(center);
    }

    /// Returns true if `point` lies within the trigger's bounds.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.frame.contains(point)
    }

    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.frame.center()
    }

    #[must_use]
    pub fn appearance(&self) -> &TriggerAppearance {
        &self.appearance
    }

    #[must_use]
    pub fn content(&self) -> &TriggerContent {
        &self.content
    }

    #[must_use]
    pub fn style(&self) -> &TriggerStyle {
        &self.style
    }

    #[must_use]
    pub fn content_insets(&self) -> Insets {
        self.content_insets
    }

    /// Area left for content after the insets.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.frame.inset(self.content_insets)
    }

    /// Returns true once [`apply_appearance`](Self::apply_appearance) ran.
    #[must_use]
    pub fn is_styled(&self) -> bool {
        self.styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_appearance_is_en_label() {
        assert_eq!(
            TriggerAppearance::default(),
            TriggerAppearance::Label("EN".into())
        );
    }

    #[test]
    fn unstyled_until_applied() {
        let t = Trigger::new(TriggerAppearance::default(), Point::new(20.0, 20.0));
        assert!(!t.is_styled());
        assert_eq!(t.content(), &TriggerContent::Empty);
        assert_eq!(t.frame().origin(), Point::new(20.0, 20.0));
    }

    #[test]
    fn label_sizes_to_fit_with_padding() {
        let mut t = Trigger::new(TriggerAppearance::Label("STG".into()), Point::ZERO);
        assert!(t.apply_appearance(&NoImages));
        assert_eq!(t.frame().size(), Size::new(5.0, 1.0));
        assert_eq!(t.style(), &TriggerStyle::label());
        assert_eq!(t.content(), &TriggerContent::Text("STG".into()));
    }

    #[test]
    fn wide_label_measured_in_columns() {
        let mut t = Trigger::new(TriggerAppearance::Label("環境".into()), Point::ZERO);
        t.apply_appearance(&NoImages);
        assert_eq!(t.frame().width, 6.0);
    }

    #[test]
    fn image_gets_fixed_insets() {
        let handle = ImageHandle::new("AppIcon", Size::new(8.0, 4.0));
        let mut t = Trigger::new(TriggerAppearance::Image(handle.clone()), Point::ZERO);
        t.apply_appearance(&NoImages);
        assert_eq!(t.content_insets(), Insets::uniform(IMAGE_CONTENT_INSET));
        assert_eq!(t.style().content_mode, ContentMode::AspectFit);
        assert_eq!(t.frame().size(), handle.size());
    }

    #[test]
    fn named_image_resolves_through_resolver() {
        let resolver = |name: &str| {
            (name == "gear").then(|| ImageHandle::new("gear", Size::new(2.0, 1.0)))
        };
        let mut t = Trigger::new(TriggerAppearance::NamedImage("gear".into()), Point::ZERO);
        assert!(t.apply_appearance(&resolver));
        assert!(matches!(t.content(), TriggerContent::Image(h) if h.name() == "gear"));
    }

    #[test]
    fn missing_named_image_leaves_trigger_blank() {
        let mut t = Trigger::new(TriggerAppearance::NamedImage("nope".into()), Point::ZERO);
        assert!(!t.apply_appearance(&NoImages));
        assert!(t.is_styled());
        assert_eq!(t.content(), &TriggerContent::Empty);
        assert_eq!(t.frame().size(), EMPTY_TRIGGER_SIZE);
    }

    #[test]
    fn resize_uses_mean_inset() {
        let mut t = Trigger::new(TriggerAppearance::default(), Point::ZERO);
        t.resize(40.0, 20.0);
        assert_eq!(t.content_insets(), Insets::uniform(30.0));
        assert_eq!(t.frame().size(), Size::new(40.0, 20.0));
    }

    #[test]
    fn resize_survives_styling() {
        let mut t = Trigger::new(TriggerAppearance::default(), Point::ZERO);
        t.resize(10.0, 4.0);
        t.apply_appearance(&NoImages);
        assert_eq!(t.frame().size(), Size::new(10.0, 4.0));
    }

    #[test]
    fn image_keeps_insets_from_earlier_resize() {
        let handle = ImageHandle::new("AppIcon", Size::new(8.0, 4.0));
        let mut t = Trigger::new(TriggerAppearance::Image(handle), Point::ZERO);
        t.resize(6.0, 2.0);
        t.apply_appearance(&NoImages);
        assert_eq!(t.content_insets(), Insets::uniform(4.0));
        assert_eq!(t.frame().size(), Size::new(6.0, 2.0));
    }

    #[test]
    fn translate_moves_center_without_clamping() {
        let mut t = Trigger::new(TriggerAppearance::default(), Point::new(1.0, 1.0));
        t.apply_appearance(&NoImages);
        let before = t.center();
        t.translate(Point::new(-10.0, -10.0));
        assert_eq!(t.center(), before + Point::new(-10.0, -10.0));
        assert!(t.frame().x < 0.0);
    }
}
