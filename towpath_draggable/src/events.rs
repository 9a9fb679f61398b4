// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The notification surface: pointer input, drag contexts, and listeners.
//!
//! Towpath notifies observers at six points: before a drag starts, at drag
//! start, per pointer move, at drag stop, and when elements are selected or
//! unselected. Each notification has two forms that both fire when present,
//! structured listener first:
//!
//! - the **structured form**: the [`DragListener`] supplied per call through
//!   the controller's [`Host`](crate::Host) bundle, and
//! - the **callback form**: the per-element closures configured on
//!   [`DraggableOptions`](crate::DraggableOptions).
//!
//! The cancellable notifications (`before_drag_start`, `drag_start`, `drag`)
//! return an [`Outcome`]; `Stop` from either form cancels. There is no
//! unwinding-based cancellation: a handler that wants to abort returns
//! [`Outcome::Stop`] and the dispatcher reacts.

use alloc::vec::Vec;

use towpath_dom::{ElementId, Offset};

/// Propagation decision returned by cancellable notification handlers.
///
/// `Stop` raised from a `before_drag_start` handler aborts that element's
/// start entirely (no helper is created). Raised from a `drag_start` or
/// `drag` handler — after a helper exists — it triggers an immediate
/// synthetic stop, as if the pointer had been released.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going.
    #[default]
    Continue,
    /// Abort the phase being notified.
    Stop,
}

impl Outcome {
    /// Folds a second decision into this one; `Stop` wins.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        if self == Self::Stop || other == Self::Stop {
            Self::Stop
        } else {
            Self::Continue
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers accompanying a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Control key.
        const CONTROL = 0b0000_0010;
        /// Alt/Option key.
        const ALT = 0b0000_0100;
        /// Meta/Command key.
        const META = 0b0000_1000;
    }
}

impl Modifiers {
    /// Returns `true` if this modifier combination toggles selection
    /// membership in multi-selection mode (control or meta held).
    #[must_use]
    pub fn toggles_selection(self) -> bool {
        self.intersects(Self::CONTROL | Self::META)
    }
}

/// A pointer event as delivered by the host.
///
/// `page` is the pointer position in page pixels. `time_ms` is any
/// monotonic millisecond clock; it drives the drag-start delay threshold and
/// the revert animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in page coordinates.
    pub page: Offset,
    /// The element under the pointer, when the host knows it. Used for
    /// drag-handle checks.
    pub target: Option<ElementId>,
    /// Held keyboard modifiers.
    pub modifiers: Modifiers,
    /// Monotonic timestamp in milliseconds.
    pub time_ms: u64,
}

impl PointerEvent {
    /// Creates an event at the given page position with no target, no
    /// modifiers, and a zero timestamp.
    #[must_use]
    pub fn at(page: Offset) -> Self {
        Self {
            page,
            target: None,
            modifiers: Modifiers::empty(),
            time_ms: 0,
        }
    }

    /// Sets the element under the pointer.
    #[must_use]
    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn at_time(mut self, time_ms: u64) -> Self {
        self.time_ms = time_ms;
        self
    }
}

/// Per-(element, session) drag context handed to plugins and listeners.
///
/// A fresh context is built for each (element, phase) dispatch and never
/// mutated. `draggable == initial_draggable` identifies the session leader —
/// the element that was under the pointer at drag start — which is the idiom
/// plugins use to act once per session rather than once per selected
/// element.
#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    /// The element this context describes.
    pub draggable: ElementId,
    /// The element under the pointer at drag start.
    pub initial_draggable: ElementId,
    /// All elements moving together, in selection order.
    pub selected_draggables: Vec<ElementId>,
}

impl DragContext {
    /// Creates a context for `draggable` within a session led by
    /// `initial_draggable`.
    #[must_use]
    pub fn new(
        draggable: ElementId,
        initial_draggable: ElementId,
        selected_draggables: Vec<ElementId>,
    ) -> Self {
        Self {
            draggable,
            initial_draggable,
            selected_draggables,
        }
    }

    /// Returns `true` if this context describes the session leader.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.draggable == self.initial_draggable
    }
}

/// Structured notification sink for drag lifecycle events.
///
/// All methods have no-op defaults; implement the ones you care about. The
/// unit type implements this trait, which is convenient when no structured
/// listener is wanted:
///
/// ```
/// use towpath_draggable::DragListener;
///
/// fn takes_listener(_listener: &mut dyn DragListener) {}
/// takes_listener(&mut ());
/// ```
pub trait DragListener {
    /// Fired per selected element before any helper is created.
    /// Returning [`Outcome::Stop`] aborts that element's start.
    fn on_before_drag_start(&mut self, _ctx: &DragContext) -> Outcome {
        Outcome::Continue
    }

    /// Fired per selected element once its helper exists and plugins have
    /// run their start phase. Returning [`Outcome::Stop`] stops the session.
    fn on_drag_start(&mut self, _ctx: &DragContext) -> Outcome {
        Outcome::Continue
    }

    /// Fired per selected element on every pointer move while dragging.
    /// Returning [`Outcome::Stop`] stops the session.
    fn on_drag(&mut self, _ctx: &DragContext) -> Outcome {
        Outcome::Continue
    }

    /// Fired per selected element after the drag has stopped and any drop
    /// has been resolved. Deferred: runs from [`Draggable::pump`].
    ///
    /// [`Draggable::pump`]: crate::Draggable::pump
    fn on_drag_stop(&mut self, _ctx: &DragContext) {}

    /// Fired when an element joins the selection.
    fn on_selected(&mut self, _element: ElementId) {}

    /// Fired when an element leaves the selection.
    fn on_unselected(&mut self, _element: ElementId) {}
}

impl DragListener for () {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_and_prefers_stop() {
        assert_eq!(Outcome::Continue.and(Outcome::Continue), Outcome::Continue);
        assert_eq!(Outcome::Continue.and(Outcome::Stop), Outcome::Stop);
        assert_eq!(Outcome::Stop.and(Outcome::Continue), Outcome::Stop);
        assert_eq!(Outcome::Stop.and(Outcome::Stop), Outcome::Stop);
    }

    #[test]
    fn selection_toggle_modifiers() {
        assert!(Modifiers::CONTROL.toggles_selection());
        assert!(Modifiers::META.toggles_selection());
        assert!((Modifiers::META | Modifiers::SHIFT).toggles_selection());
        assert!(!Modifiers::SHIFT.toggles_selection());
        assert!(!Modifiers::empty().toggles_selection());
    }

    #[test]
    fn leader_detection() {
        let a = ElementId::new(0, 1);
        let b = ElementId::new(1, 1);
        let ctx = DragContext::new(a, a, alloc::vec![a, b]);
        assert!(ctx.is_initial());
        let ctx = DragContext::new(b, a, alloc::vec![a, b]);
        assert!(!ctx.is_initial());
    }
}
