#![forbid(unsafe_code)]

//! Tap/pan gesture recognition for the overlay trigger.
//!
//! The recognizer consumes raw [`PointerEvent`]s for one contact and decides
//! whether the contact is a tap (press and release without meaningful
//! movement) or a pan (movement past the slop distance).
//!
//! # Translation
//!
//! While panning, the recognizer accumulates a translation: the total
//! movement since the last call to [`GestureRecognizer::reset_translation`].
//! Consumers read it, apply it, and reset it, so a delta is never applied
//! twice even when several move events arrive between two reads.
//!
//! # Invariants
//!
//! 1. A contact is well-formed: `Down`, zero or more `Moved`, then `Up` or
//!    `Cancelled`. Events outside a contact are ignored.
//! 2. A contact produces at most one [`Gesture::Tap`], and never a tap after
//!    a pan began.
//! 3. Translation only accumulates while panning.

use crate::event::{PointerEvent, PointerPhase};
use crate::geometry::Point;

/// Configuration for gesture recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Distance a pressed pointer must travel before the contact becomes a
    /// pan (default: 1.0 host unit).
    pub slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { slop: 1.0 }
    }
}

impl GestureConfig {
    /// Create a config with a custom slop distance.
    #[must_use]
    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop.max(0.0);
        self
    }
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Press and release without a pan, at the release position.
    Tap(Point),
    /// The contact moved past the slop; translation is available.
    PanBegan,
    /// The pan moved further; translation is available.
    PanChanged,
    /// The pan ended with a release.
    PanEnded,
    /// The pan was interrupted.
    PanCancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RecognizerState {
    Idle,
    Pressed { start: Point },
    Panning { last: Point },
}

/// Tap/pan recognizer for a single pointer contact at a time.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    state: RecognizerState,
    translation: Point,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    /// Create a recognizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: RecognizerState::Idle,
            translation: Point::ZERO,
        }
    }

    /// Returns true while a contact is being tracked.
    ///
    /// Hosts route every pointer event to the recognizer while this holds,
    /// even when the pointer has left the trigger.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        !matches!(self.state, RecognizerState::Idle)
    }

    /// Returns true while a pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.state, RecognizerState::Panning { .. })
    }

    /// Movement accumulated since the last reset.
    #[must_use]
    pub fn translation(&self) -> Point {
        self.translation
    }

    /// Reset the accumulated translation to zero.
    pub fn reset_translation(&mut self) {
        self.translation = Point::ZERO;
    }

    /// Feed one pointer event.
    pub fn handle(&mut self, event: PointerEvent) -> Option<Gesture> {
        let pos = event.position;
        match (self.state, event.phase) {
            (_, PointerPhase::Down) => {
                self.state = RecognizerState::Pressed { start: pos };
                self.translation = Point::ZERO;
                None
            }
            (RecognizerState::Pressed { start }, PointerPhase::Moved) => {
                let slop = self.config.slop;
                if pos.distance_squared(start) > slop * slop {
                    self.translation += pos - start;
                    self.state = RecognizerState::Panning { last: pos };
                    Some(Gesture::PanBegan)
                } else {
                    None
                }
            }
            (RecognizerState::Panning { last }, PointerPhase::Moved) => {
                self.translation += pos - last;
                self.state = RecognizerState::Panning { last: pos };
                Some(Gesture::PanChanged)
            }
            (RecognizerState::Pressed { .. }, PointerPhase::Up) => {
                self.state = RecognizerState::Idle;
                Some(Gesture::Tap(pos))
            }
            (RecognizerState::Panning { last }, PointerPhase::Up) => {
                self.translation += pos - last;
                self.state = RecognizerState::Idle;
                Some(Gesture::PanEnded)
            }
            (RecognizerState::Panning { .. }, PointerPhase::Cancelled) => {
                self.state = RecognizerState::Idle;
                Some(Gesture::PanCancelled)
            }
            (RecognizerState::Pressed { .. }, PointerPhase::Cancelled) => {
                self.state = RecognizerState::Idle;
                None
            }
            (RecognizerState::Idle, _) => None,
        }
    }
}
