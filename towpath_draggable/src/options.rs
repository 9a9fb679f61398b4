// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag configuration: the options bag read by the handler and every plugin.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;
use towpath_dom::{Dom, ElementId};

use crate::events::{DragContext, Outcome};

/// Callback form of a cancellable drag notification.
pub type DragCallback = Box<dyn FnMut(&DragContext) -> Outcome>;

/// Callback form of the (non-cancellable) stop notification.
pub type StopCallback = Box<dyn FnMut(&DragContext)>;

/// Callback form of the selected/unselected notifications.
pub type SelectionCallback = Box<dyn FnMut(ElementId)>;

/// Produces the follower elements to auto-select when a drag starts.
///
/// Invoked once at drag start to select followers, and again at stop to
/// unselect exactly those — elements selected by direct user action are left
/// alone.
pub type SelectElementsFn = Box<dyn FnMut(&mut dyn Dom) -> Vec<ElementId>>;

/// Axis constraint for helper movement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Axis {
    /// Move freely on both axes.
    #[default]
    None,
    /// Horizontal movement only.
    X,
    /// Vertical movement only.
    Y,
}

/// Where a non-original helper is attached when it is not already in the
/// tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AppendTo {
    /// The dragged element's parent.
    #[default]
    Parent,
    /// The first element matching a selector.
    Selector(String),
}

/// A configured set of elements, either by selector or listed explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementMatch {
    /// Elements matching a host selector.
    Selector(String),
    /// An explicit element list.
    Elements(Vec<ElementId>),
}

impl ElementMatch {
    /// Matches every enabled draggable, via the marker class the controller
    /// applies at enable time.
    #[must_use]
    pub fn draggables() -> Self {
        Self::Selector(String::from(crate::css_class::DRAGGABLE_SELECTOR))
    }

    /// Resolves to concrete elements against the given host.
    #[must_use]
    pub fn resolve(&self, dom: &dyn Dom) -> Vec<ElementId> {
        match self {
            Self::Selector(selector) => dom.query(selector),
            Self::Elements(elements) => elements.clone(),
        }
    }
}

/// Boundary constraining the helper's position.
///
/// The three forms are mutually exclusive by construction: replacing the
/// value replaces the form, last write wins.
#[derive(Clone, Debug, PartialEq)]
pub enum Containment {
    /// A container element found by selector. The values `"window"`,
    /// `"parent"`, and `"document"` are recognized specially.
    Selector(String),
    /// An explicit page-space region `[left, top, right, bottom]` bounding
    /// the helper's top-left corner.
    Region(Rect),
    /// The first element of an explicit set as container.
    Elements(Vec<ElementId>),
}

/// Fixed helper grip point under the cursor, per edge.
///
/// Components that are set rewrite the click offset after helper creation;
/// `bottom` and `right` are measured from the helper's far edges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CursorAt {
    /// Pixels from the helper's top edge.
    pub top: Option<f64>,
    /// Pixels from the helper's left edge.
    pub left: Option<f64>,
    /// Pixels from the helper's bottom edge.
    pub bottom: Option<f64>,
    /// Pixels from the helper's right edge.
    pub right: Option<f64>,
}

/// How co-dragged helpers are arranged around the leader at drag start.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GroupingMode {
    /// Followers keep their own positions.
    #[default]
    None,
    /// Stack followers above the leader.
    Up,
    /// Stack followers below the leader.
    Down,
    /// Stack followers to the left of the leader.
    Left,
    /// Stack followers to the right of the leader.
    Right,
}

/// Which element is moved and rendered during the drag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Helper {
    /// Drag the element itself.
    #[default]
    Original,
    /// Drag a deep clone of the element.
    Clone,
    /// Drag a specific other element.
    Element(ElementId),
    /// Drag the first element matching a selector.
    Selector(String),
}

impl Helper {
    /// Returns `true` when the dragged element is the original element.
    #[must_use]
    pub fn is_original(&self) -> bool {
        matches!(self, Self::Original)
    }
}

/// What the helper does when the drag stops.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RevertPolicy {
    /// Stay where it was dropped.
    #[default]
    Never,
    /// Always animate back to the start position.
    Always,
    /// Animate back only when a drop target accepted the drag.
    OnValidDrop,
    /// Animate back only when no drop target accepted the drag.
    OnInvalidDrop,
}

impl RevertPolicy {
    /// Evaluates the policy against the session's drop result.
    #[must_use]
    pub fn applies(self, dropped: bool) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::OnValidDrop => dropped,
            Self::OnInvalidDrop => !dropped,
        }
    }
}

/// Which snap-target edges the helper aligns with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SnapMode {
    /// Inner and outer edges.
    #[default]
    Both,
    /// Inner edges only.
    Inner,
    /// Outer edges only.
    Outer,
}

/// Configuration for one draggable element.
///
/// Constructed once per enablement call and read by the geometry handler and
/// every plugin on every phase. Scalar fields are plain data; the `on_*`
/// fields carry the callback form of the notification surface, which is why
/// this type is not `Clone` and debug-prints without them.
pub struct DraggableOptions {
    /// Where a detached non-original helper is attached.
    pub append_to: AppendTo,
    /// Axis constraint.
    pub axis: Axis,
    /// Positional boundary, if any.
    pub containment: Option<Containment>,
    /// CSS cursor applied to the body during the drag.
    pub cursor: Option<String>,
    /// Fixed grip point under the cursor.
    pub cursor_at: Option<CursorAt>,
    /// Delay before the drag threshold can be crossed, in milliseconds.
    pub delay_ms: u64,
    /// Disables dragging while `true`.
    pub disabled: bool,
    /// Minimum pointer travel in pixels before a drag starts.
    pub distance: f64,
    /// Snap-grid cell dimensions `[x, y]`, if grid movement is wanted.
    pub grid: Option<[f64; 2]>,
    /// Spacing between grouped helpers, in pixels.
    pub group_spacing: f64,
    /// Arrangement of co-dragged helpers around the leader.
    pub grouping_mode: GroupingMode,
    /// Selector for the drag handle; when set, drags start only from it.
    pub handle: Option<String>,
    /// Which element is dragged.
    pub helper: Helper,
    /// Whether this element can join multi-element selections.
    pub multiple_selection: bool,
    /// Helper opacity during the drag (`0.0..=1.0`).
    pub opacity: Option<f64>,
    /// Revert behavior at drag stop.
    pub revert: RevertPolicy,
    /// Duration of the revert animation in milliseconds.
    pub revert_duration_ms: u64,
    /// Compatibility tag partitioning draggables and drop targets.
    pub scope: String,
    /// Whether edge-proximity scrolling is active.
    pub scroll: bool,
    /// Distance from a scroll container's edge at which scrolling begins,
    /// relative to the pointer.
    pub scroll_sensitivity: f64,
    /// Pixels scrolled per qualifying pointer move.
    pub scroll_speed: f64,
    /// Class added to the element while selected.
    pub selected_class_name: Option<String>,
    /// Elements whose edges the helper snaps to.
    pub snap: Option<ElementMatch>,
    /// Which snap-target edges qualify.
    pub snap_mode: SnapMode,
    /// Edge proximity in pixels at which snapping occurs.
    pub snap_tolerance: f64,
    /// Element set restacked by z-index at drag start.
    pub stack: Option<ElementMatch>,
    /// Z-index applied to the helper during the drag.
    pub z_index: Option<i32>,

    /// Callback fired before any helper is created; may cancel the start.
    pub on_before_drag_start: Option<DragCallback>,
    /// Callback fired at drag start; may stop the session.
    pub on_drag_start: Option<DragCallback>,
    /// Callback fired per pointer move; may stop the session.
    pub on_drag: Option<DragCallback>,
    /// Callback fired after the drag stops.
    pub on_drag_stop: Option<StopCallback>,
    /// Callback fired when the element joins the selection.
    pub on_selected: Option<SelectionCallback>,
    /// Callback fired when the element leaves the selection.
    pub on_unselected: Option<SelectionCallback>,
    /// Auto-selects follower elements at drag start.
    pub select: Option<SelectElementsFn>,
}

impl DraggableOptions {
    /// The scope elements belong to unless configured otherwise.
    pub const DEFAULT_SCOPE: &'static str = "default";
}

impl Default for DraggableOptions {
    fn default() -> Self {
        Self {
            append_to: AppendTo::Parent,
            axis: Axis::None,
            containment: None,
            cursor: None,
            cursor_at: None,
            delay_ms: 0,
            disabled: false,
            distance: 1.0,
            grid: None,
            group_spacing: 2.0,
            grouping_mode: GroupingMode::None,
            handle: None,
            helper: Helper::Original,
            multiple_selection: false,
            opacity: None,
            revert: RevertPolicy::Never,
            revert_duration_ms: 500,
            scope: String::from(Self::DEFAULT_SCOPE),
            scroll: true,
            scroll_sensitivity: 20.0,
            scroll_speed: 20.0,
            selected_class_name: None,
            snap: None,
            snap_mode: SnapMode::Both,
            snap_tolerance: 20.0,
            stack: None,
            z_index: None,
            on_before_drag_start: None,
            on_drag_start: None,
            on_drag: None,
            on_drag_stop: None,
            on_selected: None,
            on_unselected: None,
            select: None,
        }
    }
}

impl fmt::Debug for DraggableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableOptions")
            .field("append_to", &self.append_to)
            .field("axis", &self.axis)
            .field("containment", &self.containment)
            .field("cursor", &self.cursor)
            .field("cursor_at", &self.cursor_at)
            .field("delay_ms", &self.delay_ms)
            .field("disabled", &self.disabled)
            .field("distance", &self.distance)
            .field("grid", &self.grid)
            .field("group_spacing", &self.group_spacing)
            .field("grouping_mode", &self.grouping_mode)
            .field("handle", &self.handle)
            .field("helper", &self.helper)
            .field("multiple_selection", &self.multiple_selection)
            .field("opacity", &self.opacity)
            .field("revert", &self.revert)
            .field("revert_duration_ms", &self.revert_duration_ms)
            .field("scope", &self.scope)
            .field("scroll", &self.scroll)
            .field("scroll_sensitivity", &self.scroll_sensitivity)
            .field("scroll_speed", &self.scroll_speed)
            .field("selected_class_name", &self.selected_class_name)
            .field("snap", &self.snap)
            .field("snap_mode", &self.snap_mode)
            .field("snap_tolerance", &self.snap_tolerance)
            .field("stack", &self.stack)
            .field("z_index", &self.z_index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = DraggableOptions::default();
        assert_eq!(options.append_to, AppendTo::Parent);
        assert_eq!(options.axis, Axis::None);
        assert_eq!(options.revert, RevertPolicy::Never);
        assert_eq!(options.revert_duration_ms, 500);
        assert!(options.scroll);
        assert_eq!(options.scroll_sensitivity, 20.0);
        assert_eq!(options.scroll_speed, 20.0);
        assert_eq!(options.snap_mode, SnapMode::Both);
        assert_eq!(options.snap_tolerance, 20.0);
        assert!(!options.multiple_selection);
        assert_eq!(options.grouping_mode, GroupingMode::None);
        assert_eq!(options.group_spacing, 2.0);
        assert_eq!(options.scope, "default");
    }

    #[test]
    fn revert_policy_predicates() {
        assert!(!RevertPolicy::Never.applies(true));
        assert!(!RevertPolicy::Never.applies(false));
        assert!(RevertPolicy::Always.applies(true));
        assert!(RevertPolicy::Always.applies(false));
        assert!(RevertPolicy::OnValidDrop.applies(true));
        assert!(!RevertPolicy::OnValidDrop.applies(false));
        assert!(!RevertPolicy::OnInvalidDrop.applies(true));
        assert!(RevertPolicy::OnInvalidDrop.applies(false));
    }

    #[test]
    fn containment_forms_are_exclusive() {
        // One field, three forms: replacing the value replaces the form.
        let mut options = DraggableOptions {
            containment: Some(Containment::Selector(String::from("#pen"))),
            ..DraggableOptions::default()
        };
        options.containment = Some(Containment::Region(Rect::new(0.0, 0.0, 300.0, 300.0)));
        assert!(matches!(
            options.containment,
            Some(Containment::Region(_))
        ));
    }

    #[test]
    fn debug_omits_callbacks() {
        let options = DraggableOptions {
            on_drag: Some(Box::new(|_| Outcome::Continue)),
            ..DraggableOptions::default()
        };
        let printed = alloc::format!("{options:?}");
        assert!(printed.contains("axis"));
        assert!(!printed.contains("on_drag"));
    }
}
