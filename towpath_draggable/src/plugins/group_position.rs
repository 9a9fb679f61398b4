// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arranging follower helpers around the session leader.

use towpath_dom::Offset;

use crate::controller::Host;
use crate::events::{DragContext, PointerEvent};
use crate::options::{DraggableOptions, GroupingMode};
use crate::plugins::DraggablePlugin;
use crate::session::{HandlerMap, PluginData};

const LAST_UP_KEY: &str = "group-position.last-up";
const LAST_DOWN_KEY: &str = "group-position.last-down";
const LAST_LEFT_KEY: &str = "group-position.last-left";
const LAST_RIGHT_KEY: &str = "group-position.last-right";

/// The previously placed helper in a grouping direction.
#[derive(Copy, Clone, Debug, PartialEq)]
struct PlacedHelper {
    offset: Offset,
    width: f64,
    height: f64,
}

/// Stacks follower helpers in the configured direction from the leader.
///
/// Acts on followers only, at drag start: each follower computes its slot
/// from the previously placed helper (leader first), records itself as the
/// new tail, and shifts its click offset so subsequent position generation
/// keeps the computed placement. The leader clears the chain at stop.
#[derive(Copy, Clone, Debug, Default)]
pub struct GroupPositionPlugin;

impl GroupPositionPlugin {
    fn key_for(mode: GroupingMode) -> Option<&'static str> {
        match mode {
            GroupingMode::None => None,
            GroupingMode::Up => Some(LAST_UP_KEY),
            GroupingMode::Down => Some(LAST_DOWN_KEY),
            GroupingMode::Left => Some(LAST_LEFT_KEY),
            GroupingMode::Right => Some(LAST_RIGHT_KEY),
        }
    }
}

impl DraggablePlugin for GroupPositionPlugin {
    fn name(&self) -> &'static str {
        "group-position"
    }

    fn should_run(&self, options: &DraggableOptions) -> bool {
        options.grouping_mode != GroupingMode::None
    }

    fn on_start(
        &self,
        _host: &mut Host<'_>,
        handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        if ctx.is_initial() {
            return;
        }
        let leader = ctx.initial_draggable;
        let Some(leader_seed) = handlers.get(&leader).map(|leader_handler| PlacedHelper {
            offset: leader_handler.abs_position(),
            width: leader_handler.helper_size().width,
            height: leader_handler.helper_size().height,
        }) else {
            return;
        };

        let Some(handler) = handlers.get_mut(&ctx.draggable) else {
            return;
        };
        let mode = handler.options().grouping_mode;
        let spacing = handler.options().group_spacing;
        let Some(key) = Self::key_for(mode) else { return };
        let size = handler.helper_size();

        let last = data.get::<PlacedHelper>(leader, key).copied().unwrap_or(leader_seed);
        let new_position = match mode {
            GroupingMode::Down => last.offset.add(0.0, last.height + spacing),
            GroupingMode::Up => last.offset.add(0.0, -(size.height + spacing)),
            GroupingMode::Left => last.offset.add(-(size.width + spacing), 0.0),
            GroupingMode::Right => last.offset.add(last.width + spacing, 0.0),
            GroupingMode::None => return,
        };
        data.set(
            leader,
            key,
            PlacedHelper {
                offset: new_position,
                width: size.width,
                height: size.height,
            },
        );

        // Shift the click offset by the displacement so generate_position
        // keeps the follower at its computed slot from now on.
        let actual = handler.abs_position();
        let click = handler.offset_click();
        handler.set_offset_click(click.add(
            actual.left - new_position.left,
            actual.top - new_position.top,
        ));
    }

    fn on_stop(
        &self,
        _host: &mut Host<'_>,
        _handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        if !ctx.is_initial() {
            return;
        }
        data.remove(ctx.draggable, LAST_UP_KEY);
        data.remove(ctx.draggable, LAST_DOWN_KEY);
        data.remove(ctx.draggable, LAST_LEFT_KEY);
        data.remove(ctx.draggable, LAST_RIGHT_KEY);
    }
}
