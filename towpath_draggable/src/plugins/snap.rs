// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge snapping against configured target elements.

use alloc::vec::Vec;

use kurbo::Rect;

use towpath_dom::Offset;

use crate::controller::Host;
use crate::events::{DragContext, PointerEvent};
use crate::float::abs;
use crate::options::{DraggableOptions, SnapMode};
use crate::plugins::DraggablePlugin;
use crate::session::{HandlerMap, PluginData};

const TARGETS_KEY: &str = "snap.targets";

/// Aligns the helper's edges exactly with nearby snap-target edges.
///
/// Target bounding boxes are captured once at drag start (excluding the
/// dragged element itself); on every move, any target edge within
/// `snap_tolerance` of a helper edge — under the configured [`SnapMode`] —
/// overrides the corresponding axis of the computed position.
#[derive(Copy, Clone, Debug, Default)]
pub struct SnapPlugin;

impl DraggablePlugin for SnapPlugin {
    fn name(&self) -> &'static str {
        "snap"
    }

    fn should_run(&self, options: &DraggableOptions) -> bool {
        options.snap.is_some()
    }

    fn on_start(
        &self,
        host: &mut Host<'_>,
        handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        let Some(handler) = handlers.get(&ctx.draggable) else {
            return;
        };
        let Some(snap) = handler.options().snap.as_ref() else {
            return;
        };

        let mut targets: Vec<Rect> = Vec::new();
        for element in snap.resolve(host.dom) {
            if element == ctx.draggable {
                continue;
            }
            let origin = host.dom.absolute_position(element);
            let size = host.dom.outer_size(element);
            targets.push(Rect::new(
                origin.left,
                origin.top,
                origin.left + size.width,
                origin.top + size.height,
            ));
        }
        data.set(ctx.draggable, TARGETS_KEY, targets);
    }

    fn on_drag(
        &self,
        host: &mut Host<'_>,
        handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        let Some(handler) = handlers.get_mut(&ctx.draggable) else {
            return;
        };
        let Some(targets) = data.get::<Vec<Rect>>(ctx.draggable, TARGETS_KEY) else {
            return;
        };

        let tolerance = handler.options().snap_tolerance;
        let mode = handler.options().snap_mode;
        let size = handler.helper_size();
        let helper_left = handler.abs_position().left;
        let helper_right = helper_left + size.width;
        let helper_top = handler.abs_position().top;
        let helper_bottom = helper_top + size.height;

        for target in targets {
            let near_x_left = target.x0 - tolerance < helper_left && helper_left < target.x1 + tolerance;
            let near_x_right =
                target.x0 - tolerance < helper_right && helper_right < target.x1 + tolerance;
            let near_y_top = target.y0 - tolerance < helper_top && helper_top < target.y1 + tolerance;
            let near_y_bottom =
                target.y0 - tolerance < helper_bottom && helper_bottom < target.y1 + tolerance;

            if !((near_x_left || near_x_right) && (near_y_top || near_y_bottom)) {
                continue;
            }

            let mut new_top = None;
            let mut new_left = None;

            if mode != SnapMode::Inner {
                // Outer edges: helper rests against the outside of the target.
                let snap_top = abs(target.y0 - helper_bottom) <= tolerance;
                let snap_bottom = abs(target.y1 - helper_top) <= tolerance;
                let snap_left = abs(target.x0 - helper_right) <= tolerance;
                let snap_right = abs(target.x1 - helper_left) <= tolerance;

                if snap_top {
                    new_top = Some(
                        handler
                            .convert_position_to(
                                host.dom,
                                false,
                                Offset::new(0.0, target.y0 - size.height),
                            )
                            .top,
                    );
                } else if snap_bottom {
                    new_top = Some(
                        handler
                            .convert_position_to(host.dom, false, Offset::new(0.0, target.y1))
                            .top,
                    );
                }
                if snap_left {
                    new_left = Some(
                        handler
                            .convert_position_to(
                                host.dom,
                                false,
                                Offset::new(target.x0 - size.width, 0.0),
                            )
                            .left,
                    );
                } else if snap_right {
                    new_left = Some(
                        handler
                            .convert_position_to(host.dom, false, Offset::new(target.x1, 0.0))
                            .left,
                    );
                }
            }

            if mode != SnapMode::Outer {
                // Inner edges: helper aligns flush with the target's own edges.
                let snap_top = abs(target.y0 - helper_top) <= tolerance;
                let snap_bottom = abs(target.y1 - helper_bottom) <= tolerance;
                let snap_left = abs(target.x0 - helper_left) <= tolerance;
                let snap_right = abs(target.x1 - helper_right) <= tolerance;

                if snap_top {
                    new_top = Some(
                        handler
                            .convert_position_to(host.dom, false, Offset::new(0.0, target.y0))
                            .top,
                    );
                } else if snap_bottom {
                    new_top = Some(
                        handler
                            .convert_position_to(
                                host.dom,
                                false,
                                Offset::new(0.0, target.y1 - size.height),
                            )
                            .top,
                    );
                }
                if snap_left {
                    new_left = Some(
                        handler
                            .convert_position_to(host.dom, false, Offset::new(target.x0, 0.0))
                            .left,
                    );
                } else if snap_right {
                    new_left = Some(
                        handler
                            .convert_position_to(
                                host.dom,
                                false,
                                Offset::new(target.x1 - size.width, 0.0),
                            )
                            .left,
                    );
                }
            }

            if let Some(top) = new_top {
                let left = handler.position().left;
                handler.set_position(Offset::new(left, top - handler.margin().top));
            }
            if let Some(left) = new_left {
                let top = handler.position().top;
                handler.set_position(Offset::new(left - handler.margin().left, top));
            }
        }
    }
}
