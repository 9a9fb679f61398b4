// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag interaction controller: pointer capture, multi-selection, plugin
//! dispatch, and deferred work.
//!
//! [`Draggable`] is a state machine driven by the host's pointer events:
//!
//! ```text
//! idle ──pointer_down──▶ candidate ──move past threshold──▶ dragging
//!   ▲                        │                                  │
//!   └───────pointer_up───────┴──────────pointer_up──────────────┘
//! ```
//!
//! Every call receives the [`Host`] bundle (element tree, drop-target
//! manager, structured listener) and the shared
//! [`DragSessionManager`]. The controller holds only interaction state, so
//! several controllers can share one session manager and agree on the
//! selection.
//!
//! Two kinds of work are deferred to [`Draggable::pump`], which the host
//! calls once per tick: the first post-start drag dispatch (so every
//! selected element finishes its start phase before any of them reports
//! movement) and the stop notification (so drop handlers observe final state
//! before stop handlers fire). Revert animations are also advanced there.

use alloc::vec::Vec;
use core::fmt;
use core::mem;

use towpath_dom::{Dom, ElementId, Offset};

use crate::drop::DropTargetManager;
use crate::events::{DragContext, DragListener, Outcome, PointerEvent};
use crate::session::DragSessionManager;

/// The collaborators a controller call runs against: the element tree, the
/// drop-target manager, and the structured event listener.
pub struct Host<'a> {
    /// The element tree.
    pub dom: &'a mut dyn Dom,
    /// Drop-target awareness; pass [`NoDropManager`](crate::NoDropManager)
    /// when drop targets are not in play.
    pub drops: &'a mut dyn DropTargetManager,
    /// Structured notification sink; pass `&mut ()` for none.
    pub listener: &'a mut dyn DragListener,
}

impl fmt::Debug for Host<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum MachineState {
    Idle,
    Candidate {
        element: ElementId,
        origin: Offset,
        at_ms: u64,
    },
    Dragging {
        leader: ElementId,
    },
}

#[derive(Debug)]
enum Deferred {
    /// First drag dispatch after start, once all peers are initialized.
    InitialPlace { ctx: DragContext, event: PointerEvent },
    /// Deferred stop notification.
    FireStop { ctx: DragContext },
}

#[derive(Debug)]
struct RevertAnimation {
    ctx: DragContext,
    from: Offset,
    to: Offset,
    start_ms: u64,
    duration_ms: u64,
    event: PointerEvent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PluginPhase {
    Start,
    Drag,
    Stop,
}

/// The drag interaction state machine.
#[derive(Debug, Default)]
pub struct Draggable {
    state: MachineState,
    drag_started: bool,
    deferred: Vec<Deferred>,
    reverts: Vec<RevertAnimation>,
}

impl Default for MachineState {
    fn default() -> Self {
        Self::Idle
    }
}

impl Draggable {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The leader of the active drag session, if one is in progress.
    #[must_use]
    pub fn dragging_leader(&self) -> Option<ElementId> {
        match self.state {
            MachineState::Dragging { leader } => Some(leader),
            _ => None,
        }
    }

    /// Returns `true` while a drag session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, MachineState::Dragging { .. })
    }

    /// Handles a pointer press on `element`.
    ///
    /// Runs the capture guard and the selection-state transition, then arms
    /// the drag threshold. Returns `false` when the press was not captured
    /// (element not draggable, disabled, helper already active, or outside
    /// the configured handle).
    pub fn pointer_down(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        element: ElementId,
        event: &PointerEvent,
    ) -> bool {
        if !Self::mouse_capture(host, session, element, event) {
            return false;
        }

        let multiple = session
            .options(element)
            .is_some_and(|options| options.multiple_selection);

        if !multiple {
            Self::unselect_all(host, session);
        } else if event.modifiers.toggles_selection() {
            if session.selection.contains(&element) {
                Self::unselect(host, session, element);
            } else if Self::can_be_selected(session, element) {
                Self::select(host, session, element);
            }
        } else if !session.selection.contains(&element) {
            // Plain press on an unselected element collapses the selection
            // onto it, so a fresh multi-drag can begin in one gesture.
            Self::unselect_all(host, session);
            Self::select(host, session, element);
        }

        self.drag_started = false;
        self.state = MachineState::Candidate {
            element,
            origin: event.page,
            at_ms: event.time_ms,
        };
        !event.modifiers.toggles_selection()
    }

    /// Handles a pointer move.
    ///
    /// Crossing the distance/delay threshold transitions `candidate →
    /// dragging`; while dragging, every move re-runs the geometry engine for
    /// each selected element. Returns `true` if the move was consumed by an
    /// active or newly started session.
    pub fn pointer_move(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        event: &PointerEvent,
    ) -> bool {
        match self.state {
            MachineState::Idle => false,
            MachineState::Candidate {
                element,
                origin,
                at_ms,
            } => {
                if session.handlers.get(&element).is_none() {
                    self.state = MachineState::Idle;
                    return false;
                }
                if !Self::threshold_met(session, element, origin, at_ms, event) {
                    return false;
                }
                let started = self.start_drag(host, session, element, event);
                self.state = if started {
                    MachineState::Dragging { leader: element }
                } else {
                    MachineState::Idle
                };
                started
            }
            MachineState::Dragging { leader } => {
                self.continue_drag(host, session, leader, event);
                true
            }
        }
    }

    /// Handles a pointer release.
    ///
    /// Stops an active session, or — when the threshold was never crossed —
    /// applies the click behavior: a plain click while several elements are
    /// selected collapses the selection to the clicked element.
    pub fn pointer_up(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        event: &PointerEvent,
    ) -> bool {
        match self.state {
            MachineState::Idle => false,
            MachineState::Candidate { element, .. } => {
                self.state = MachineState::Idle;
                if !event.modifiers.toggles_selection()
                    && !self.drag_started
                    && session.selection.len() > 1
                {
                    Self::unselect_all(host, session);
                    Self::select(host, session, element);
                }
                self.drag_started = false;
                !event.modifiers.toggles_selection()
            }
            MachineState::Dragging { leader } => {
                self.state = MachineState::Idle;
                self.stop_drag(host, session, leader, event);
                self.drag_started = false;
                true
            }
        }
    }

    /// Drains deferred work and advances revert animations.
    ///
    /// The host calls this once per tick (or microtask-equivalent) with its
    /// monotonic clock. Deferred first-drag dispatches become no-ops if the
    /// session has already stopped.
    pub fn pump(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        now_ms: u64,
    ) {
        let pending = mem::take(&mut self.deferred);
        for item in pending {
            match item {
                Deferred::InitialPlace { ctx, event } => {
                    let still_active = matches!(
                        self.state,
                        MachineState::Dragging { leader } if leader == ctx.initial_draggable
                    );
                    if still_active {
                        self.drag_element(host, session, &ctx, &event, true);
                    }
                }
                Deferred::FireStop { ctx } => {
                    Self::notify_stop(host, session, &ctx);
                }
            }
        }

        let reverts = mem::take(&mut self.reverts);
        for revert in reverts {
            let elapsed = now_ms.saturating_sub(revert.start_ms);
            let t = if revert.duration_ms == 0 {
                1.0
            } else {
                (elapsed as f64 / revert.duration_ms as f64).min(1.0)
            };
            let position = Offset::new(
                revert.from.left + (revert.to.left - revert.from.left) * t,
                revert.from.top + (revert.to.top - revert.from.top) * t,
            );
            if let Some(helper) = session
                .handlers
                .get(&revert.ctx.draggable)
                .and_then(|h| h.helper())
            {
                host.dom.set_left(helper, position.left);
                host.dom.set_top(helper, position.top);
            }

            if t >= 1.0 {
                Self::call_plugins(host, session, PluginPhase::Stop, &revert.ctx, &revert.event);
                self.deferred.push(Deferred::FireStop {
                    ctx: revert.ctx.clone(),
                });
                if let Some(handler) = session.handlers.get_mut(&revert.ctx.draggable) {
                    handler.clear(host.dom);
                }
            } else {
                self.reverts.push(revert);
            }
        }
    }

    /// Returns `true` while deferred work or revert animations are pending.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.deferred.is_empty() || !self.reverts.is_empty()
    }

    /// Adds `element` to the shared selection, firing selected
    /// notifications. No-op if already selected.
    pub fn select_element(
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        element: ElementId,
    ) {
        Self::select(host, session, element);
    }

    /// Removes `element` from the shared selection, firing unselected
    /// notifications. No-op if not selected.
    pub fn unselect_element(
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        element: ElementId,
    ) {
        Self::unselect(host, session, element);
    }

    /// Empties the shared selection, firing one unselected notification per
    /// previously selected element.
    pub fn unselect_all_elements(host: &mut Host<'_>, session: &mut DragSessionManager) {
        Self::unselect_all(host, session);
    }

    fn mouse_capture(
        host: &mut Host<'_>,
        session: &DragSessionManager,
        element: ElementId,
        event: &PointerEvent,
    ) -> bool {
        let Some(handler) = session.handlers.get(&element) else {
            return false;
        };
        if handler.helper().is_some() || handler.options().disabled {
            return false;
        }
        let Some(handle_selector) = &handler.options().handle else {
            return true;
        };
        let handles = host.dom.query_within(element, handle_selector);
        if handles.is_empty() {
            return true;
        }
        match event.target {
            Some(target) => handles
                .iter()
                .any(|handle| *handle == target || host.dom.contains(*handle, target)),
            None => false,
        }
    }

    fn threshold_met(
        session: &DragSessionManager,
        element: ElementId,
        origin: Offset,
        at_ms: u64,
        event: &PointerEvent,
    ) -> bool {
        let Some(options) = session.options(element) else {
            return false;
        };
        let dx = event.page.left - origin.left;
        let dy = event.page.top - origin.top;
        dx * dx + dy * dy >= options.distance * options.distance
            && event.time_ms.saturating_sub(at_ms) >= options.delay_ms
    }

    fn start_drag(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        leader: ElementId,
        event: &PointerEvent,
    ) -> bool {
        #[cfg(feature = "tracing")]
        tracing::debug!(?leader, "drag start");

        self.drag_started = true;

        let multiple = session
            .options(leader)
            .is_some_and(|options| options.multiple_selection);

        // Reconcile the selection around the leader.
        if !Self::can_be_selected(session, leader) || !multiple {
            Self::unselect_all(host, session);
        }
        if multiple
            && !session.selection.contains(&leader)
            && Self::can_be_selected(session, leader)
        {
            Self::select(host, session, leader);
        }

        // Auto-select configured followers.
        for follower in Self::call_select_fn(host, session, leader) {
            if session.handlers.contains_key(&follower) {
                Self::select(host, session, follower);
            }
        }

        let selected: Vec<ElementId> = session.selection.items().to_vec();
        let mut any_started = false;
        for element in Self::session_order(session, leader) {
            let ctx = DragContext::new(element, leader, selected.clone());
            any_started |= self.start_element(host, session, ctx, event);
        }
        any_started
    }

    fn start_element(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        ctx: DragContext,
        event: &PointerEvent,
    ) -> bool {
        if !session.handlers.contains_key(&ctx.draggable) {
            return false;
        }
        if Self::notify_before_start(host, session, &ctx) == Outcome::Stop {
            return false;
        }

        {
            let Some(handler) = session.handlers.get_mut(&ctx.draggable) else {
                return false;
            };
            handler.create_helper(host.dom, ctx.draggable);
            handler.cache_helper_size(host.dom);
            handler.initialize(host.dom, ctx.draggable, event);
        }

        Self::call_plugins(host, session, PluginPhase::Start, &ctx, event);

        if Self::notify_start(host, session, &ctx) == Outcome::Stop {
            // A started element that cancels gets a synthetic stop, as if
            // the pointer had been released on it.
            self.stop_element(host, session, ctx, event);
            return false;
        }

        // Plugins and listeners may have resized the helper.
        if let Some(handler) = session.handlers.get_mut(&ctx.draggable) {
            handler.cache_helper_size(host.dom);
        }

        if host.drops.is_handle_droppable(&ctx) {
            host.drops.initialize(host.dom, &ctx, event);
        }

        if let Some(helper) = session
            .handlers
            .get(&ctx.draggable)
            .and_then(|h| h.helper())
        {
            host.dom.add_class(helper, crate::css_class::DRAGGING);
        }

        // The first placement is deferred so all selected elements finish
        // their start phase before any of them reports movement.
        self.deferred.push(Deferred::InitialPlace {
            ctx,
            event: *event,
        });
        true
    }

    fn continue_drag(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        leader: ElementId,
        event: &PointerEvent,
    ) {
        self.drag_started = true;
        let selected: Vec<ElementId> = session.selection.items().to_vec();
        for element in Self::session_order(session, leader) {
            let ctx = DragContext::new(element, leader, selected.clone());
            self.drag_element(host, session, &ctx, event, false);
        }
    }

    fn drag_element(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        ctx: &DragContext,
        event: &PointerEvent,
        initial_place: bool,
    ) {
        {
            let Some(handler) = session.handlers.get_mut(&ctx.draggable) else {
                return;
            };
            if handler.helper().is_none() {
                return;
            }
            handler.regenerate_positions(host.dom, event);
        }

        if !initial_place {
            Self::call_plugins(host, session, PluginPhase::Drag, ctx, event);
            if Self::notify_drag(host, session, ctx) == Outcome::Stop {
                self.stop_element(host, session, ctx.clone(), event);
                return;
            }
        }

        if let Some(handler) = session.handlers.get(&ctx.draggable) {
            handler.move_helper(host.dom, initial_place);
        }

        if host.drops.is_handle_droppable(ctx) {
            host.drops.drag(host.dom, ctx, event);
        }
    }

    fn stop_drag(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        leader: ElementId,
        event: &PointerEvent,
    ) {
        #[cfg(feature = "tracing")]
        tracing::debug!(?leader, "drag stop");

        let selected: Vec<ElementId> = session.selection.items().to_vec();
        for element in Self::session_order(session, leader) {
            let ctx = DragContext::new(element, leader, selected.clone());
            self.stop_element(host, session, ctx, event);
        }

        // Followers the select function pulled in are released again;
        // user-selected elements stay selected.
        for follower in Self::call_select_fn(host, session, leader) {
            Self::unselect(host, session, follower);
        }

        session.drop_result = None;
    }

    fn stop_element(
        &mut self,
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        ctx: DragContext,
        event: &PointerEvent,
    ) {
        let has_helper = session
            .handlers
            .get(&ctx.draggable)
            .is_some_and(|h| h.helper().is_some());
        if !has_helper {
            return;
        }

        let dropped = Self::resolve_drop(host, session, &ctx, event);

        let Some(handler) = session.handlers.get(&ctx.draggable) else {
            return;
        };

        if handler.options().revert.applies(dropped) {
            self.reverts.push(RevertAnimation {
                from: handler.position(),
                to: handler.original_position(),
                start_ms: event.time_ms,
                duration_ms: handler.options().revert_duration_ms,
                event: *event,
                ctx,
            });
            return;
        }

        Self::call_plugins(host, session, PluginPhase::Stop, &ctx, event);
        self.deferred.push(Deferred::FireStop { ctx: ctx.clone() });
        if let Some(handler) = session.handlers.get_mut(&ctx.draggable) {
            handler.clear(host.dom);
        }
    }

    // The drop is resolved once, for the leader; co-dragged elements reuse
    // the cached result.
    fn resolve_drop(
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        ctx: &DragContext,
        event: &PointerEvent,
    ) -> bool {
        if ctx.is_initial() {
            let dropped = host.drops.is_handle_droppable(ctx)
                && host.drops.perform_drop(host.dom, ctx, event);
            session.drop_result = Some(dropped);
            dropped
        } else {
            session.drop_result.unwrap_or(false)
        }
    }

    fn session_order(session: &DragSessionManager, leader: ElementId) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(session.selection.len() + 1);
        order.push(leader);
        for element in session.selection.iter() {
            if *element != leader {
                order.push(*element);
            }
        }
        order
    }

    fn call_plugins(
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        phase: PluginPhase,
        ctx: &DragContext,
        event: &PointerEvent,
    ) {
        let DragSessionManager {
            plugins,
            handlers,
            data,
            ..
        } = session;

        for plugin in plugins.iter() {
            let active = handlers
                .get(&ctx.draggable)
                .is_some_and(|handler| plugin.should_run(handler.options()));
            if !active {
                continue;
            }
            match phase {
                PluginPhase::Start => plugin.on_start(host, handlers, data, ctx, event),
                PluginPhase::Drag => plugin.on_drag(host, handlers, data, ctx, event),
                PluginPhase::Stop => plugin.on_stop(host, handlers, data, ctx, event),
            }
        }
    }

    fn call_select_fn(
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        leader: ElementId,
    ) -> Vec<ElementId> {
        let Some(handler) = session.handlers.get_mut(&leader) else {
            return Vec::new();
        };
        match handler.options_mut().select.as_mut() {
            Some(select) => select(host.dom),
            None => Vec::new(),
        }
    }

    fn can_be_selected(session: &DragSessionManager, element: ElementId) -> bool {
        let Some(first) = session.selection.first() else {
            return true;
        };
        match (
            session.handlers.get(first),
            session.handlers.get(&element),
        ) {
            (Some(selected), Some(candidate)) => {
                selected.options().scope == candidate.options().scope
            }
            _ => false,
        }
    }

    fn select(host: &mut Host<'_>, session: &mut DragSessionManager, element: ElementId) {
        if !session.selection.insert(element) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(?element, "draggable selected");

        let class = session
            .handlers
            .get(&element)
            .and_then(|h| h.options().selected_class_name.clone());
        if let Some(class) = class {
            host.dom.add_class(element, &class);
        }
        host.listener.on_selected(element);
        if let Some(handler) = session.handlers.get_mut(&element)
            && let Some(callback) = handler.options_mut().on_selected.as_mut()
        {
            callback(element);
        }
    }

    fn unselect(host: &mut Host<'_>, session: &mut DragSessionManager, element: ElementId) {
        if !session.selection.remove(&element) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(?element, "draggable unselected");

        let class = session
            .handlers
            .get(&element)
            .and_then(|h| h.options().selected_class_name.clone());
        if let Some(class) = class {
            host.dom.remove_class(element, &class);
        }
        host.listener.on_unselected(element);
        if let Some(handler) = session.handlers.get_mut(&element)
            && let Some(callback) = handler.options_mut().on_unselected.as_mut()
        {
            callback(element);
        }
    }

    fn unselect_all(host: &mut Host<'_>, session: &mut DragSessionManager) {
        while let Some(element) = session.selection.first().copied() {
            Self::unselect(host, session, element);
        }
    }

    fn notify_before_start(
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        ctx: &DragContext,
    ) -> Outcome {
        let mut outcome = host.listener.on_before_drag_start(ctx);
        if let Some(handler) = session.handlers.get_mut(&ctx.draggable)
            && let Some(callback) = handler.options_mut().on_before_drag_start.as_mut()
        {
            outcome = outcome.and(callback(ctx));
        }
        outcome
    }

    fn notify_start(
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        ctx: &DragContext,
    ) -> Outcome {
        let mut outcome = host.listener.on_drag_start(ctx);
        if let Some(handler) = session.handlers.get_mut(&ctx.draggable)
            && let Some(callback) = handler.options_mut().on_drag_start.as_mut()
        {
            outcome = outcome.and(callback(ctx));
        }
        outcome
    }

    fn notify_drag(
        host: &mut Host<'_>,
        session: &mut DragSessionManager,
        ctx: &DragContext,
    ) -> Outcome {
        let mut outcome = host.listener.on_drag(ctx);
        if let Some(handler) = session.handlers.get_mut(&ctx.draggable)
            && let Some(callback) = handler.options_mut().on_drag.as_mut()
        {
            outcome = outcome.and(callback(ctx));
        }
        outcome
    }

    fn notify_stop(host: &mut Host<'_>, session: &mut DragSessionManager, ctx: &DragContext) {
        host.listener.on_drag_stop(ctx);
        if let Some(handler) = session.handlers.get_mut(&ctx.draggable)
            && let Some(callback) = handler.options_mut().on_drag_stop.as_mut()
        {
            callback(ctx);
        }
    }
}
