// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session manager: selection, plugin registry, handlers, and
//! plugin-attached data.
//!
//! One [`DragSessionManager`] exists per application and is passed by
//! mutable reference into every controller call. It replaces what would
//! otherwise be process-wide state: the shared selection set, the ordered
//! plugin registry, the per-element [`DraggableHandler`]s, and the
//! [`PluginData`] store plugins stash session state in.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use towpath_dom::{Dom, ElementId};
use towpath_selection::SelectionSet;

use crate::handler::DraggableHandler;
use crate::options::DraggableOptions;
use crate::plugins::{
    CursorPlugin, DraggablePlugin, GroupPositionPlugin, OpacityPlugin, ScrollPlugin, SnapPlugin,
    StackPlugin, ZIndexPlugin,
};

/// Handlers for every enabled element, keyed by element.
pub type HandlerMap = HashMap<ElementId, DraggableHandler>;

struct DataEntry {
    key: &'static str,
    value: Box<dyn Any>,
}

impl fmt::Debug for DataEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataEntry")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Per-element key/value storage for plugin session state.
///
/// Plugins communicate across phases through here rather than through shared
/// mutable fields, each under its own key, so independent plugins cannot
/// interfere. State written in a start phase is read and cleared in the
/// matching stop phase.
///
/// Entries are kept per element in a small inline vector; typical drags
/// attach one or two values per element.
#[derive(Debug, Default)]
pub struct PluginData {
    entries: HashMap<ElementId, SmallVec<[DataEntry; 2]>>,
}

impl PluginData {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` for `(element, key)`, replacing any previous value.
    pub fn set<T: Any>(&mut self, element: ElementId, key: &'static str, value: T) {
        let entries = self.entries.entry(element).or_default();
        let value: Box<dyn Any> = Box::new(value);
        if let Some(entry) = entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
        } else {
            entries.push(DataEntry { key, value });
        }
    }

    /// Reads the value stored for `(element, key)`, if it has type `T`.
    #[must_use]
    pub fn get<T: Any>(&self, element: ElementId, key: &str) -> Option<&T> {
        self.entries
            .get(&element)?
            .iter()
            .find(|e| e.key == key)?
            .value
            .downcast_ref()
    }

    /// Removes and returns the value stored for `(element, key)`, if it has
    /// type `T`. A present value of another type is removed and discarded.
    pub fn take<T: Any>(&mut self, element: ElementId, key: &str) -> Option<T> {
        let entries = self.entries.get_mut(&element)?;
        let idx = entries.iter().position(|e| e.key == key)?;
        let entry = entries.remove(idx);
        if entries.is_empty() {
            self.entries.remove(&element);
        }
        entry.value.downcast().ok().map(|boxed| *boxed)
    }

    /// Removes the value stored for `(element, key)` without reading it.
    pub fn remove(&mut self, element: ElementId, key: &str) {
        if let Some(entries) = self.entries.get_mut(&element) {
            entries.retain(|e| e.key != key);
            if entries.is_empty() {
                self.entries.remove(&element);
            }
        }
    }

    /// Returns `true` if a value is stored for `(element, key)`.
    #[must_use]
    pub fn contains(&self, element: ElementId, key: &str) -> bool {
        self.entries
            .get(&element)
            .is_some_and(|entries| entries.iter().any(|e| e.key == key))
    }
}

/// Application-wide drag state: the selection set, the ordered plugin
/// registry, per-element handlers, and plugin data.
///
/// Construct one per application with [`DragSessionManager::new`] — which
/// registers the seven built-in plugins — and share it across all
/// [`Draggable`](crate::Draggable) controllers so they agree on the
/// selection.
pub struct DragSessionManager {
    pub(crate) selection: SelectionSet<ElementId>,
    pub(crate) plugins: Vec<Box<dyn DraggablePlugin>>,
    pub(crate) handlers: HandlerMap,
    pub(crate) data: PluginData,
    pub(crate) drop_result: Option<bool>,
}

impl DragSessionManager {
    /// Creates a manager with the built-in plugins registered in their
    /// canonical order: opacity, scroll, cursor, z-index, stack, snap,
    /// group-position.
    #[must_use]
    pub fn new() -> Self {
        let mut manager = Self {
            selection: SelectionSet::new(),
            plugins: Vec::new(),
            handlers: HandlerMap::new(),
            data: PluginData::new(),
            drop_result: None,
        };
        manager.register_plugin(Box::new(OpacityPlugin));
        manager.register_plugin(Box::new(ScrollPlugin));
        manager.register_plugin(Box::new(CursorPlugin));
        manager.register_plugin(Box::new(ZIndexPlugin));
        manager.register_plugin(Box::new(StackPlugin));
        manager.register_plugin(Box::new(SnapPlugin));
        manager.register_plugin(Box::new(GroupPositionPlugin));
        manager
    }

    /// Registers a plugin.
    ///
    /// Dispatch order is registration order. Registering a name again
    /// replaces the previous instance in place, keeping its position.
    /// Registration is not safe while a drag session is in progress.
    pub fn register_plugin(&mut self, plugin: Box<dyn DraggablePlugin>) {
        if let Some(existing) = self
            .plugins
            .iter_mut()
            .find(|existing| existing.name() == plugin.name())
        {
            *existing = plugin;
        } else {
            self.plugins.push(plugin);
        }
    }

    /// Enables dragging for `element` with the given options.
    ///
    /// Original-helper elements with static positioning are coerced to
    /// relative so their `left`/`top` offsets take effect, and the
    /// draggable marker classes are applied.
    pub fn make_draggable(
        &mut self,
        dom: &mut dyn Dom,
        element: ElementId,
        options: DraggableOptions,
    ) {
        if options.helper.is_original() && !dom.css_position(element).is_positioned() {
            dom.set_css_position(element, towpath_dom::CssPosition::Relative);
        }
        dom.add_class(element, crate::css_class::DRAGGABLE);
        if options.disabled {
            dom.add_class(element, crate::css_class::DISABLED);
        }
        self.handlers
            .insert(element, DraggableHandler::new(options));
    }

    /// Releases all drag state for `element` and removes its CSS markers.
    ///
    /// Safe to call for elements never made draggable.
    pub fn destroy(&mut self, dom: &mut dyn Dom, element: ElementId) {
        self.selection.remove(&element);
        self.handlers.remove(&element);
        dom.remove_class(element, crate::css_class::DRAGGABLE);
        dom.remove_class(element, crate::css_class::DISABLED);
        dom.remove_class(element, crate::css_class::DRAGGING);
    }

    /// The shared selection set.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet<ElementId> {
        &self.selection
    }

    /// The handler for `element`, if it is draggable.
    #[must_use]
    pub fn handler(&self, element: ElementId) -> Option<&DraggableHandler> {
        self.handlers.get(&element)
    }

    /// Mutable handler access for droppable integrations and plugins.
    pub fn handler_mut(&mut self, element: ElementId) -> Option<&mut DraggableHandler> {
        self.handlers.get_mut(&element)
    }

    /// The options of `element`, or `None` if it was never made draggable.
    #[must_use]
    pub fn options(&self, element: ElementId) -> Option<&DraggableOptions> {
        self.handlers.get(&element).map(DraggableHandler::options)
    }

    /// Replaces the options of `element`. Returns `false` if the element is
    /// not draggable.
    pub fn set_options(&mut self, element: ElementId, options: DraggableOptions) -> bool {
        match self.handlers.get_mut(&element) {
            Some(handler) => {
                handler.set_options(options);
                true
            }
            None => false,
        }
    }

    /// The plugin data store.
    pub fn data_mut(&mut self) -> &mut PluginData {
        &mut self.data
    }
}

impl Default for DragSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DragSessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSessionManager")
            .field("selection", &self.selection)
            .field("handlers", &self.handlers)
            .field("data", &self.data)
            .field("drop_result", &self.drop_result)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_data_round_trip() {
        let element = ElementId::new(0, 1);
        let mut data = PluginData::new();

        data.set(element, "a", 7_i32);
        data.set(element, "b", 1.5_f64);
        assert_eq!(data.get::<i32>(element, "a"), Some(&7));
        assert_eq!(data.get::<f64>(element, "b"), Some(&1.5));
        assert!(data.contains(element, "a"));
        assert_eq!(data.get::<i32>(element, "missing"), None);

        assert_eq!(data.take::<i32>(element, "a"), Some(7));
        assert!(!data.contains(element, "a"));
    }

    #[test]
    fn plugin_data_set_replaces() {
        let element = ElementId::new(0, 1);
        let mut data = PluginData::new();
        data.set(element, "k", 1_i32);
        data.set(element, "k", 2_i32);
        assert_eq!(data.take::<i32>(element, "k"), Some(2));
    }

    #[test]
    fn builtin_registration_order() {
        let manager = DragSessionManager::new();
        let names: Vec<&str> = manager.plugins.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            [
                "opacity",
                "scroll",
                "cursor",
                "z-index",
                "stack",
                "snap",
                "group-position"
            ]
        );
    }

    #[test]
    fn register_plugin_replaces_in_place() {
        struct Replacement;
        impl DraggablePlugin for Replacement {
            fn name(&self) -> &'static str {
                "snap"
            }
            fn should_run(&self, _options: &DraggableOptions) -> bool {
                false
            }
        }

        let mut manager = DragSessionManager::new();
        let before: Vec<&str> = manager.plugins.iter().map(|p| p.name()).collect();
        manager.register_plugin(Box::new(Replacement));
        let after: Vec<&str> = manager.plugins.iter().map(|p| p.name()).collect();
        assert_eq!(before, after);
        assert_eq!(manager.plugins.len(), 7);
    }

    #[test]
    fn options_accessors_return_absence_for_unknown_elements() {
        let mut manager = DragSessionManager::new();
        let unknown = ElementId::new(9, 9);
        assert!(manager.options(unknown).is_none());
        assert!(!manager.set_options(unknown, DraggableOptions::default()));
    }
}
