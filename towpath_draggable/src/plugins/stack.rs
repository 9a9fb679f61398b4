// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order restacking at drag start.

use crate::controller::Host;
use crate::events::{DragContext, PointerEvent};
use crate::options::DraggableOptions;
use crate::plugins::DraggablePlugin;
use crate::session::{HandlerMap, PluginData};

/// Sorts the configured element set by current z-index, reassigns contiguous
/// ascending indices, and places the helper one above the maximum.
#[derive(Copy, Clone, Debug, Default)]
pub struct StackPlugin;

impl DraggablePlugin for StackPlugin {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn should_run(&self, options: &DraggableOptions) -> bool {
        options.stack.is_some()
    }

    fn on_start(
        &self,
        host: &mut Host<'_>,
        handlers: &mut HandlerMap,
        _data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        let Some(handler) = handlers.get(&ctx.draggable) else {
            return;
        };
        let Some(stack) = handler.options().stack.as_ref() else {
            return;
        };

        let mut elements = stack.resolve(host.dom);
        if elements.is_empty() {
            return;
        }
        elements.sort_by_key(|element| host.dom.z_index(*element).unwrap_or(0));

        let z_min = host.dom.z_index(elements[0]).unwrap_or(0);
        let mut z = z_min;
        for element in &elements {
            host.dom.set_z_index(*element, Some(z));
            z += 1;
        }
        if let Some(helper) = handler.helper() {
            host.dom.set_z_index(helper, Some(z));
        }
    }
}
