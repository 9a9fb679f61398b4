// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element drag geometry: coordinate conversion, containment, and grid
//! math.
//!
//! One [`DraggableHandler`] exists per enabled element. At drag start it
//! captures the geometry the session needs — margins, click offset, the
//! helper's positioning scheme, its scroll and offset parents — and from
//! then on translates raw pointer positions into helper `left`/`top`
//! offsets, honoring containment bounds, grid quanta, and the axis lock.
//!
//! ## Coordinate spaces
//!
//! Pointer input arrives in *page* coordinates. The helper's style offsets
//! live in a *drag-relative* space determined by its offset parent, any
//! relative-position offset, and scroll compensation.
//! [`DraggableHandler::generate_position`] maps page → drag-relative;
//! [`DraggableHandler::convert_position_to`] converts between the two spaces
//! in either direction, and the two are inverses of one another.

use kurbo::Rect;

use towpath_dom::{CssPosition, Dom, ElementId, Offset, Size};

use crate::events::PointerEvent;
use crate::float::round;
use crate::options::{AppendTo, Containment, CursorAt, DraggableOptions, Helper};

/// Drag geometry state for one enabled element.
#[derive(Debug)]
pub struct DraggableHandler {
    options: DraggableOptions,
    helper: Option<ElementId>,
    helper_css_position: CssPosition,
    helper_scroll_parent: Option<ElementId>,
    helper_offset_parent: Option<ElementId>,
    helper_size: Size,
    margin: Offset,
    offset: Offset,
    abs_position: Offset,
    offset_click: Offset,
    parent_offset: Offset,
    relative_offset: Offset,
    original_pointer: Offset,
    position: Offset,
    original_position: Offset,
    containment: Option<Rect>,
    cancel_helper_removal: bool,
}

impl DraggableHandler {
    /// Creates a handler owning the element's options. Geometry fields stay
    /// zeroed until [`DraggableHandler::initialize`] runs at drag start.
    #[must_use]
    pub fn new(options: DraggableOptions) -> Self {
        Self {
            options,
            helper: None,
            helper_css_position: CssPosition::Static,
            helper_scroll_parent: None,
            helper_offset_parent: None,
            helper_size: Size::ZERO,
            margin: Offset::ZERO,
            offset: Offset::ZERO,
            abs_position: Offset::ZERO,
            offset_click: Offset::ZERO,
            parent_offset: Offset::ZERO,
            relative_offset: Offset::ZERO,
            original_pointer: Offset::ZERO,
            position: Offset::ZERO,
            original_position: Offset::ZERO,
            containment: None,
            cancel_helper_removal: false,
        }
    }

    /// The element's live options.
    #[must_use]
    pub fn options(&self) -> &DraggableOptions {
        &self.options
    }

    /// Mutable access to the element's options.
    pub fn options_mut(&mut self) -> &mut DraggableOptions {
        &mut self.options
    }

    /// Replaces the element's options.
    pub fn set_options(&mut self, options: DraggableOptions) {
        self.options = options;
    }

    /// The element being visually dragged, once a session is active.
    #[must_use]
    pub fn helper(&self) -> Option<ElementId> {
        self.helper
    }

    /// The helper's positioning scheme, captured at initialization.
    #[must_use]
    pub fn helper_css_position(&self) -> CssPosition {
        self.helper_css_position
    }

    /// The helper's nearest scrolling ancestor, captured at initialization.
    #[must_use]
    pub fn helper_scroll_parent(&self) -> Option<ElementId> {
        self.helper_scroll_parent
    }

    /// The helper's cached border-box dimensions.
    #[must_use]
    pub fn helper_size(&self) -> Size {
        self.helper_size
    }

    /// The element's left/top margins.
    #[must_use]
    pub fn margin(&self) -> Offset {
        self.margin
    }

    /// Pointer-to-element click offset.
    #[must_use]
    pub fn offset_click(&self) -> Offset {
        self.offset_click
    }

    /// Rewrites the click offset. The group-position plugin uses this to
    /// shift where a follower helper rides relative to the pointer.
    pub fn set_offset_click(&mut self, offset_click: Offset) {
        self.offset_click = offset_click;
    }

    /// The last computed drag-relative position.
    #[must_use]
    pub fn position(&self) -> Offset {
        self.position
    }

    /// Overrides the computed position. Plugins (snap) call this between
    /// position generation and the helper move.
    pub fn set_position(&mut self, position: Offset) {
        self.position = position;
    }

    /// The last computed absolute page position of the helper.
    #[must_use]
    pub fn abs_position(&self) -> Offset {
        self.abs_position
    }

    /// The drag-relative position captured at initialization; revert
    /// animates back to this.
    #[must_use]
    pub fn original_position(&self) -> Offset {
        self.original_position
    }

    /// The containment bounds for the helper's top-left corner, if any.
    #[must_use]
    pub fn containment(&self) -> Option<Rect> {
        self.containment
    }

    /// Keeps a non-original helper alive past normal cleanup when set.
    pub fn set_cancel_helper_removal(&mut self, cancel: bool) {
        self.cancel_helper_removal = cancel;
    }

    /// Creates this session's helper for `element` and attaches it if
    /// necessary.
    pub fn create_helper(&mut self, dom: &mut dyn Dom, element: ElementId) {
        let helper = match &self.options.helper {
            Helper::Original => element,
            Helper::Clone => dom.clone_element(element),
            Helper::Element(id) => *id,
            Helper::Selector(selector) => {
                dom.query(selector).first().copied().unwrap_or(element)
            }
        };

        if !dom.is_attached(helper) {
            let parent = match &self.options.append_to {
                AppendTo::Parent => dom.parent(element).unwrap_or_else(|| dom.body()),
                AppendTo::Selector(selector) => {
                    dom.query(selector).first().copied().unwrap_or_else(|| dom.body())
                }
            };
            dom.append_to(helper, parent);
        }

        if !self.options.helper.is_original()
            && !matches!(
                dom.css_position(helper),
                CssPosition::Fixed | CssPosition::Absolute
            )
        {
            dom.set_css_position(helper, CssPosition::Absolute);
        }

        self.helper = Some(helper);
    }

    /// Re-reads the helper's border-box dimensions. Called after plugins may
    /// have resized it.
    pub fn cache_helper_size(&mut self, dom: &dyn Dom) {
        if let Some(helper) = self.helper {
            self.helper_size = dom.outer_size(helper);
        }
    }

    /// Captures the session's geometry. Must run exactly once per drag
    /// session, after the helper exists and before the first move.
    pub fn initialize(&mut self, dom: &dyn Dom, element: ElementId, event: &PointerEvent) {
        let Some(helper) = self.helper else { return };

        self.helper_css_position = dom.css_position(helper);
        self.helper_scroll_parent = Some(dom.scroll_parent(helper));
        let mut offset_parent = dom.offset_parent(helper);
        if offset_parent == dom.root() {
            offset_parent = dom.body();
        }
        self.helper_offset_parent = Some(offset_parent);

        self.margin = dom.margins(element);
        self.abs_position = dom.absolute_position(element);
        self.offset = self.abs_position - self.margin;
        self.offset_click = event.page - self.offset;
        self.parent_offset = self.calculate_parent_offset(dom);
        self.relative_offset = self.calculate_relative_helper_offset(dom, element);
        self.original_pointer = event.page;

        self.position = self.calculate_original_position(dom, element, event);
        self.original_position = self.position;

        if let Some(cursor_at) = self.options.cursor_at {
            self.adjust_offset_from_helper(cursor_at);
        }
        self.calculate_containment(dom);
    }

    /// Maps a pointer event to a drag-relative helper position.
    ///
    /// On non-initial calls the pointer is clamped to containment, then grid
    /// displacement rounding applies; a rounded coordinate that would leave
    /// containment steps back exactly one grid cell (preserving alignment)
    /// rather than snapping to the raw boundary.
    #[must_use]
    pub fn generate_position(&self, dom: &dyn Dom, event: &PointerEvent, initial: bool) -> Offset {
        let scroll = self.effective_scroll_parent(dom);
        let scroll_is_root = scroll.is_none_or(|s| dom.is_root(s));

        let mut page_x = event.page.left;
        let mut page_y = event.page.top;

        if !initial {
            if let Some(c) = self.containment {
                if event.page.left - self.offset_click.left < c.x0 {
                    page_x = c.x0 + self.offset_click.left;
                }
                if event.page.top - self.offset_click.top < c.y0 {
                    page_y = c.y0 + self.offset_click.top;
                }
                if event.page.left - self.offset_click.left > c.x1 {
                    page_x = c.x1 + self.offset_click.left;
                }
                if event.page.top - self.offset_click.top > c.y1 {
                    page_y = c.y1 + self.offset_click.top;
                }
            }

            if let Some([grid_x, grid_y]) = self.options.grid {
                let rounded_x = if grid_x > 0.0 {
                    self.original_pointer.left
                        + round((page_x - self.original_pointer.left) / grid_x) * grid_x
                } else {
                    page_x
                };
                let rounded_y = if grid_y > 0.0 {
                    self.original_pointer.top
                        + round((page_y - self.original_pointer.top) / grid_y) * grid_y
                } else {
                    page_y
                };

                if let Some(c) = self.containment {
                    let out_left = rounded_x - self.offset_click.left < c.x0;
                    let out_top = rounded_y - self.offset_click.top < c.y0;
                    let out_right = rounded_x - self.offset_click.left > c.x1;
                    let out_bottom = rounded_y - self.offset_click.top > c.y1;

                    page_y = if !(out_top || out_bottom) {
                        rounded_y
                    } else if out_top {
                        rounded_y + grid_y
                    } else {
                        rounded_y - grid_y
                    };
                    page_x = if !(out_left || out_right) {
                        rounded_x
                    } else if out_left {
                        rounded_x + grid_x
                    } else {
                        rounded_x - grid_x
                    };
                } else {
                    page_x = rounded_x;
                    page_y = rounded_y;
                }
            }
        }

        let comp = self.scroll_compensation(dom, scroll, scroll_is_root);
        Offset::new(
            page_x - self.offset_click.left - self.relative_offset.left - self.parent_offset.left
                + comp.left,
            page_y - self.offset_click.top - self.relative_offset.top - self.parent_offset.top
                + comp.top,
        )
    }

    /// Recomputes `position`, `offset`, and `abs_position` for a pointer
    /// move.
    pub fn regenerate_positions(&mut self, dom: &dyn Dom, event: &PointerEvent) {
        self.position = self.generate_position(dom, event, false);
        self.offset = self.convert_position_to(dom, true, self.position);
        self.abs_position = self.offset + self.margin;
    }

    /// Converts between drag-relative and absolute page coordinates.
    ///
    /// With `to_absolute` the drag-relative `position` becomes a page
    /// position; without it the conversion runs the other way. The two
    /// directions are inverses.
    #[must_use]
    pub fn convert_position_to(
        &self,
        dom: &dyn Dom,
        to_absolute: bool,
        position: Offset,
    ) -> Offset {
        let modifier = if to_absolute { 1.0 } else { -1.0 };
        let scroll = self.effective_scroll_parent(dom);
        let scroll_is_root = scroll.is_none_or(|s| dom.is_root(s));
        let comp = self.scroll_compensation(dom, scroll, scroll_is_root);

        Offset::new(
            position.left
                + self.relative_offset.left * modifier
                + self.parent_offset.left * modifier
                - comp.left * modifier,
            position.top
                + self.relative_offset.top * modifier
                + self.parent_offset.top * modifier
                - comp.top * modifier,
        )
    }

    /// Writes `position` to the helper's left/top style.
    ///
    /// The first placement writes both axes regardless of the axis lock so
    /// the helper starts exactly under the pointer; later calls write only
    /// the unlocked axis.
    pub fn move_helper(&self, dom: &mut dyn Dom, first_time: bool) {
        use crate::options::Axis;

        let Some(helper) = self.helper else { return };
        let axis = self.options.axis;
        if matches!(axis, Axis::None | Axis::X) || first_time {
            dom.set_left(helper, self.position.left);
        }
        if matches!(axis, Axis::None | Axis::Y) || first_time {
            dom.set_top(helper, self.position.top);
        }
    }

    /// Releases the session's helper.
    ///
    /// Non-original helpers are removed from the tree unless a plugin
    /// cancelled removal.
    pub fn clear(&mut self, dom: &mut dyn Dom) {
        let Some(helper) = self.helper else { return };
        dom.remove_class(helper, crate::css_class::DRAGGING);
        if !self.options.helper.is_original() && !self.cancel_helper_removal {
            dom.remove(helper);
        }
        self.helper = None;
        self.cancel_helper_removal = false;
    }

    fn calculate_original_position(
        &self,
        dom: &dyn Dom,
        element: ElementId,
        event: &PointerEvent,
    ) -> Offset {
        if self.options.helper.is_original() {
            dom.position_style(element)
        } else {
            self.generate_position(dom, event, true)
        }
    }

    fn calculate_parent_offset(&self, dom: &dyn Dom) -> Offset {
        let Some(offset_parent) = self.helper_offset_parent else {
            return Offset::ZERO;
        };
        let mut position = dom.absolute_position(offset_parent);

        if self.helper_css_position == CssPosition::Absolute
            && self.offset_parent_in_scroll_parent(dom)
            && let Some(scroll_parent) = self.helper_scroll_parent
        {
            position = position + dom.scroll_offset(scroll_parent);
        }

        // The body establishes the page coordinate frame itself.
        if offset_parent == dom.body() {
            position = Offset::ZERO;
        }

        let border = dom.border(offset_parent);
        position.add(border.left, border.top)
    }

    // Only nonzero for relatively positioned helpers: the element's static
    // slot in its offset parent minus whatever left/top it already carries.
    fn calculate_relative_helper_offset(&self, dom: &dyn Dom, element: ElementId) -> Offset {
        if self.helper_css_position != CssPosition::Relative {
            return Offset::ZERO;
        }
        let Some(helper) = self.helper else {
            return Offset::ZERO;
        };
        let position = dom.offset_in_parent(element);
        let style = dom.position_style(helper);
        Offset::new(
            position.left - style.left - self.margin.left,
            position.top - style.top - self.margin.top,
        )
    }

    fn adjust_offset_from_helper(&mut self, cursor_at: CursorAt) {
        if let Some(left) = cursor_at.left {
            self.offset_click.left = left + self.margin.left;
        }
        if let Some(right) = cursor_at.right {
            self.offset_click.left = self.helper_size.width - right + self.margin.left;
        }
        if let Some(top) = cursor_at.top {
            self.offset_click.top = top + self.margin.top;
        }
        if let Some(bottom) = cursor_at.bottom {
            self.offset_click.top = self.helper_size.height - bottom + self.margin.top;
        }
    }

    fn calculate_containment(&mut self, dom: &dyn Dom) {
        self.containment = None;
        let Some(helper) = self.helper else { return };
        let Some(configured) = &self.options.containment else {
            return;
        };

        let container = match configured {
            Containment::Region(rect) => {
                // The region bounds the helper body: shrink the far edges so
                // the top-left corner cannot push the helper outside.
                self.containment = Some(Rect::new(
                    rect.x0,
                    rect.y0,
                    rect.x1 - self.helper_size.width - self.margin.left,
                    rect.y1 - self.helper_size.height - self.margin.top,
                ));
                return;
            }
            Containment::Selector(selector) => match selector.as_str() {
                "window" => {
                    let viewport = dom.viewport();
                    self.containment = Some(Rect::new(
                        0.0,
                        0.0,
                        viewport.width - self.helper_size.width - self.margin.left,
                        viewport.height - self.helper_size.height - self.margin.top,
                    ));
                    return;
                }
                "parent" => dom.parent(helper),
                "document" => Some(dom.body()),
                _ => dom.query(selector).first().copied(),
            },
            Containment::Elements(elements) => elements.first().copied(),
        };

        let Some(container) = container else { return };
        if !dom.is_attached(container) {
            return;
        }

        let origin = dom.absolute_position(container);
        let border = dom.border(container);
        let padding = dom.padding(container);
        let outer = dom.outer_size(container);
        let extent = if dom.clips_overflow(container) {
            outer
        } else {
            let scrollable = dom.scroll_size(container);
            Size::new(
                scrollable.width.max(outer.width),
                scrollable.height.max(outer.height),
            )
        };

        self.containment = Some(Rect::new(
            origin.left + border.left + padding.left - self.margin.left,
            origin.top + border.top + padding.top - self.margin.top,
            origin.left + extent.width
                - border.left
                - padding.right
                - self.helper_size.width
                - self.margin.left,
            origin.top + extent.height
                - border.top
                - padding.bottom
                - self.helper_size.height
                - self.margin.top,
        ));
    }

    fn offset_parent_in_scroll_parent(&self, dom: &dyn Dom) -> bool {
        match (self.helper_scroll_parent, self.helper_offset_parent) {
            (Some(scroll), Some(offset)) => {
                !dom.is_root(scroll) && dom.contains(scroll, offset)
            }
            _ => false,
        }
    }

    fn effective_scroll_parent(&self, dom: &dyn Dom) -> Option<ElementId> {
        if self.helper_css_position == CssPosition::Absolute
            && !self.offset_parent_in_scroll_parent(dom)
        {
            self.helper_offset_parent
        } else {
            self.helper_scroll_parent
        }
    }

    fn scroll_compensation(
        &self,
        dom: &dyn Dom,
        scroll: Option<ElementId>,
        scroll_is_root: bool,
    ) -> Offset {
        if self.helper_css_position == CssPosition::Fixed {
            // Fixed helpers do not scroll with content; compensate negatively.
            let scroll_parent = self.helper_scroll_parent.unwrap_or_else(|| dom.root());
            let offset = dom.scroll_offset(scroll_parent);
            Offset::new(-offset.left, -offset.top)
        } else if scroll_is_root {
            Offset::ZERO
        } else {
            scroll.map(|s| dom.scroll_offset(s)).unwrap_or(Offset::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use towpath_dom::MemoryDom;

    fn dom_with_item(origin: Offset, size: Size) -> (MemoryDom, ElementId) {
        let mut dom = MemoryDom::new(Size::new(800.0, 600.0));
        let body = dom.body();
        let item = dom
            .build("div")
            .class("item")
            .position(CssPosition::Absolute)
            .at(origin)
            .size(size)
            .styled_at(origin.left, origin.top)
            .child_of(body);
        (dom, item)
    }

    fn started_handler(
        dom: &mut MemoryDom,
        item: ElementId,
        options: DraggableOptions,
        down: PointerEvent,
    ) -> DraggableHandler {
        let mut handler = DraggableHandler::new(options);
        handler.create_helper(dom, item);
        handler.cache_helper_size(dom);
        handler.initialize(dom, item, &down);
        handler
    }

    #[test]
    fn position_tracks_pointer_without_constraints() {
        let (mut dom, item) = dom_with_item(Offset::new(100.0, 100.0), Size::new(50.0, 50.0));
        let down = PointerEvent::at(Offset::new(110.0, 110.0));
        let handler = started_handler(&mut dom, item, DraggableOptions::default(), down);

        // Click offset is (10, 10); moving the pointer moves the corner with it.
        let pos = handler.generate_position(&dom, &PointerEvent::at(Offset::new(150.0, 130.0)), false);
        assert_eq!(pos, Offset::new(140.0, 120.0));
    }

    #[test]
    fn containment_region_clamps_helper_body() {
        let (mut dom, item) = dom_with_item(Offset::new(100.0, 100.0), Size::new(50.0, 50.0));
        let options = DraggableOptions {
            containment: Some(Containment::Region(Rect::new(0.0, 0.0, 300.0, 300.0))),
            ..DraggableOptions::default()
        };
        let down = PointerEvent::at(Offset::new(110.0, 110.0));
        let handler = started_handler(&mut dom, item, options, down);

        // Dragging far right would imply left = 320; the 50px helper body
        // must stay inside [0, 300], so left clamps to 250.
        let pos = handler.generate_position(&dom, &PointerEvent::at(Offset::new(330.0, 120.0)), false);
        assert_eq!(pos.left, 250.0);
        assert_eq!(pos.top, 110.0);

        // And the lower bound.
        let pos = handler.generate_position(&dom, &PointerEvent::at(Offset::new(-40.0, 5.0)), false);
        assert_eq!(pos, Offset::new(0.0, 0.0));
    }

    #[test]
    fn grid_rounds_pointer_displacement() {
        let (mut dom, item) = dom_with_item(Offset::new(90.0, 90.0), Size::new(20.0, 20.0));
        let options = DraggableOptions {
            grid: Some([20.0, 20.0]),
            ..DraggableOptions::default()
        };
        let down = PointerEvent::at(Offset::new(100.0, 100.0));
        let handler = started_handler(&mut dom, item, options, down);

        // 37px of x travel rounds to 40; 64px of y travel rounds to 60.
        let pos = handler.generate_position(&dom, &PointerEvent::at(Offset::new(137.0, 164.0)), false);
        assert_eq!(pos, Offset::new(130.0, 150.0));
    }

    #[test]
    fn grid_rounding_is_idempotent() {
        let (mut dom, item) = dom_with_item(Offset::new(90.0, 90.0), Size::new(20.0, 20.0));
        let options = DraggableOptions {
            grid: Some([20.0, 20.0]),
            ..DraggableOptions::default()
        };
        let down = PointerEvent::at(Offset::new(100.0, 100.0));
        let handler = started_handler(&mut dom, item, options, down);

        let event = PointerEvent::at(Offset::new(137.0, 164.0));
        let first = handler.generate_position(&dom, &event, false);
        let second = handler.generate_position(&dom, &event, false);
        assert_eq!(first, second);
    }

    #[test]
    fn grid_steps_back_one_cell_at_containment_edge() {
        let (mut dom, item) = dom_with_item(Offset::new(10.0, 10.0), Size::new(20.0, 20.0));
        let options = DraggableOptions {
            grid: Some([20.0, 20.0]),
            containment: Some(Containment::Region(Rect::new(0.0, 0.0, 100.0, 100.0))),
            ..DraggableOptions::default()
        };
        let down = PointerEvent::at(Offset::new(20.0, 20.0));
        let handler = started_handler(&mut dom, item, options, down);

        // Bounds for the 20px helper corner are [0, 80]. A move rounding to
        // left = 90 is out of bounds; the result steps back one 20px cell to
        // 70 rather than clamping to 80, keeping grid alignment.
        let pos = handler.generate_position(&dom, &PointerEvent::at(Offset::new(108.0, 30.0)), false);
        assert_eq!(pos.left, 70.0);
        assert_eq!(pos.top, 10.0);
    }

    #[test]
    fn convert_position_round_trips() {
        let mut dom = MemoryDom::new(Size::new(800.0, 600.0));
        let body = dom.body();
        let anchor = dom
            .build("div")
            .position(CssPosition::Relative)
            .at(Offset::new(40.0, 60.0))
            .size(Size::new(400.0, 400.0))
            .child_of(body);
        let item = dom
            .build("div")
            .position(CssPosition::Absolute)
            .at(Offset::new(100.0, 100.0))
            .size(Size::new(50.0, 50.0))
            .child_of(anchor);

        let down = PointerEvent::at(Offset::new(110.0, 110.0));
        let handler = started_handler(&mut dom, item, DraggableOptions::default(), down);

        let position = Offset::new(123.0, 45.0);
        let there = handler.convert_position_to(&dom, false, position);
        let back = handler.convert_position_to(&dom, true, there);
        assert_eq!(back, position);

        // Offset parents other than the body shift the frame.
        assert_eq!(handler.convert_position_to(&dom, true, Offset::ZERO), Offset::new(40.0, 60.0));
    }

    #[test]
    fn axis_lock_writes_single_axis_after_first_move() {
        use crate::options::Axis;

        let (mut dom, item) = dom_with_item(Offset::new(90.0, 90.0), Size::new(20.0, 20.0));
        let options = DraggableOptions {
            axis: Axis::X,
            grid: Some([20.0, 20.0]),
            ..DraggableOptions::default()
        };
        let down = PointerEvent::at(Offset::new(100.0, 100.0));
        let mut handler = started_handler(&mut dom, item, options, down);

        handler.move_helper(&mut dom, true);
        let initial = dom.position_style(item);

        handler.regenerate_positions(&dom, &PointerEvent::at(Offset::new(137.0, 164.0)));
        handler.move_helper(&mut dom, false);

        let moved = dom.position_style(item);
        // Left advanced by the rounded 40px displacement; top is locked.
        assert_eq!(moved.left, initial.left + 40.0);
        assert_eq!(moved.top, initial.top);
    }

    #[test]
    fn window_containment_subtracts_helper_and_margin() {
        let (mut dom, item) = dom_with_item(Offset::new(0.0, 0.0), Size::new(50.0, 40.0));
        let options = DraggableOptions {
            containment: Some(Containment::Selector("window".into())),
            ..DraggableOptions::default()
        };
        let down = PointerEvent::at(Offset::new(10.0, 10.0));
        let handler = started_handler(&mut dom, item, options, down);

        let bounds = handler.containment().expect("window containment resolves");
        assert_eq!(bounds, Rect::new(0.0, 0.0, 750.0, 560.0));
    }

    #[test]
    fn dead_containment_target_means_unconstrained() {
        let (mut dom, item) = dom_with_item(Offset::new(0.0, 0.0), Size::new(50.0, 40.0));
        let options = DraggableOptions {
            containment: Some(Containment::Selector("#missing".into())),
            ..DraggableOptions::default()
        };
        let down = PointerEvent::at(Offset::new(10.0, 10.0));
        let handler = started_handler(&mut dom, item, options, down);
        assert_eq!(handler.containment(), None);
    }

    #[test]
    fn clone_helper_is_removed_on_clear_unless_cancelled() {
        let (mut dom, item) = dom_with_item(Offset::new(100.0, 100.0), Size::new(50.0, 50.0));
        let options = DraggableOptions {
            helper: Helper::Clone,
            ..DraggableOptions::default()
        };
        let down = PointerEvent::at(Offset::new(110.0, 110.0));
        let mut handler = started_handler(&mut dom, item, options, down);

        let helper = handler.helper().expect("clone helper created");
        assert_ne!(helper, item);
        assert!(dom.is_attached(helper));

        handler.clear(&mut dom);
        assert!(!dom.is_attached(helper));
        assert_eq!(handler.helper(), None);

        // With removal cancelled the clone stays in the tree.
        let mut handler = DraggableHandler::new(DraggableOptions {
            helper: Helper::Clone,
            ..DraggableOptions::default()
        });
        handler.create_helper(&mut dom, item);
        let kept = handler.helper().expect("clone helper created");
        handler.set_cancel_helper_removal(true);
        handler.clear(&mut dom);
        assert!(dom.is_attached(kept));
    }

    #[test]
    fn cursor_at_overrides_click_offset() {
        let (mut dom, item) = dom_with_item(Offset::new(100.0, 100.0), Size::new(60.0, 40.0));
        let options = DraggableOptions {
            cursor_at: Some(CursorAt {
                left: Some(5.0),
                bottom: Some(4.0),
                ..CursorAt::default()
            }),
            ..DraggableOptions::default()
        };
        let down = PointerEvent::at(Offset::new(130.0, 120.0));
        let handler = started_handler(&mut dom, item, options, down);

        assert_eq!(handler.offset_click(), Offset::new(5.0, 36.0));
    }

    #[test]
    fn scroll_parent_compensation_applies_to_contained_helpers() {
        let mut dom = MemoryDom::new(Size::new(800.0, 600.0));
        let body = dom.body();
        let pane = dom
            .build("div")
            .scroll_container()
            .at(Offset::new(0.0, 0.0))
            .size(Size::new(300.0, 300.0))
            .scroll_size(Size::new(300.0, 900.0))
            .child_of(body);
        let item = dom
            .build("div")
            .position(CssPosition::Relative)
            .at(Offset::new(20.0, 20.0))
            .size(Size::new(40.0, 40.0))
            .child_of(pane);
        dom.set_scroll_offset(pane, Offset::new(0.0, 120.0));

        let down = PointerEvent::at(Offset::new(30.0, 30.0));
        let handler = started_handler(&mut dom, item, DraggableOptions::default(), down);

        let unmoved = handler.generate_position(&dom, &down, false);
        let scrolled_in = handler
            .generate_position(&dom, &PointerEvent::at(Offset::new(30.0, 40.0)), false);
        // Pane scroll is added back into the drag-relative frame.
        assert_eq!(unmoved.top - handler.original_position().top, 120.0);
        assert_eq!(scrolled_in.top - unmoved.top, 10.0);
    }
}
