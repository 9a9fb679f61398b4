// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-proximity scrolling of the helper's scroll container.

use towpath_dom::Offset;

use crate::controller::Host;
use crate::events::{DragContext, PointerEvent};
use crate::options::{Axis, DraggableOptions};
use crate::plugins::DraggablePlugin;
use crate::session::{HandlerMap, PluginData};

const PARENT_OFFSET_KEY: &str = "scroll.parent-offset";

/// Scrolls the helper's scroll container (or the document) when the pointer
/// comes within `scroll_sensitivity` of an edge, by `scroll_speed` pixels
/// per qualifying move. Active by default.
#[derive(Copy, Clone, Debug, Default)]
pub struct ScrollPlugin;

impl DraggablePlugin for ScrollPlugin {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn should_run(&self, options: &DraggableOptions) -> bool {
        options.scroll
    }

    fn on_start(
        &self,
        host: &mut Host<'_>,
        handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        let Some(scroll_parent) = handlers
            .get(&ctx.draggable)
            .and_then(|h| h.helper_scroll_parent())
        else {
            return;
        };
        if !host.dom.is_root(scroll_parent) {
            data.set(
                ctx.draggable,
                PARENT_OFFSET_KEY,
                host.dom.absolute_position(scroll_parent),
            );
        }
    }

    fn on_drag(
        &self,
        host: &mut Host<'_>,
        handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        event: &PointerEvent,
    ) {
        let Some(handler) = handlers.get(&ctx.draggable) else {
            return;
        };
        let axis = handler.options().axis;
        let sensitivity = handler.options().scroll_sensitivity;
        let speed = handler.options().scroll_speed;
        let scroll_parent = handler.helper_scroll_parent();

        let vertical = matches!(axis, Axis::None | Axis::Y);
        let horizontal = matches!(axis, Axis::None | Axis::X);
        let mut scrolled = false;

        match scroll_parent {
            Some(parent) if !host.dom.is_root(parent) => {
                let Some(parent_offset) =
                    data.get::<Offset>(ctx.draggable, PARENT_OFFSET_KEY).copied()
                else {
                    return;
                };
                let size = host.dom.outer_size(parent);
                let mut scroll = host.dom.scroll_offset(parent);

                if vertical {
                    if (parent_offset.top + size.height) - event.page.top < sensitivity {
                        scroll.top += speed;
                        scrolled = true;
                    } else if event.page.top - parent_offset.top < sensitivity {
                        scroll.top -= speed;
                        scrolled = true;
                    }
                }
                if horizontal {
                    if (parent_offset.left + size.width) - event.page.left < sensitivity {
                        scroll.left += speed;
                        scrolled = true;
                    } else if event.page.left - parent_offset.left < sensitivity {
                        scroll.left -= speed;
                        scrolled = true;
                    }
                }
                if scrolled {
                    host.dom.set_scroll_offset(parent, scroll);
                }
            }
            _ => {
                // No scrollable ancestor: scroll the document instead.
                let root = host.dom.root();
                let viewport = host.dom.viewport();
                let mut scroll = host.dom.scroll_offset(root);

                if vertical {
                    if event.page.top - scroll.top < sensitivity {
                        scroll.top -= speed;
                        scrolled = true;
                    } else if viewport.height - (event.page.top - scroll.top) < sensitivity {
                        scroll.top += speed;
                        scrolled = true;
                    }
                }
                if horizontal {
                    if event.page.left - scroll.left < sensitivity {
                        scroll.left -= speed;
                        scrolled = true;
                    } else if viewport.width - (event.page.left - scroll.left) < sensitivity {
                        scroll.left += speed;
                        scrolled = true;
                    }
                }
                if scrolled {
                    host.dom.set_scroll_offset(root, scroll);
                }
            }
        }

        // Scrolling shifts drop-target geometry under the pointer.
        if scrolled && host.drops.is_handle_droppable(ctx) {
            host.drops.initialize(host.dom, ctx, event);
        }
    }

    fn on_stop(
        &self,
        _host: &mut Host<'_>,
        _handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        data.remove(ctx.draggable, PARENT_OFFSET_KEY);
    }
}
