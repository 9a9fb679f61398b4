// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Towpath DOM: the host boundary for drag behaviors.
//!
//! Towpath does not own an element tree. The host — a browser binding, a
//! retained-mode UI, or a test harness — owns it, and exposes it to the drag
//! core through the [`Dom`] trait defined here. The trait models the small
//! slice of a CSS box model that dragging needs: page-space positions,
//! margins and borders, scroll and offset parents, and writable `left`/`top`
//! style offsets.
//!
//! ## Contents
//!
//! - [`Offset`], [`Size`], [`Edges`]: pixel geometry used throughout the
//!   drag core, with conversions to and from Kurbo types.
//! - [`CssPosition`]: the positioning scheme of an element's box.
//! - [`ElementId`]: a small generational handle minted by the host.
//! - [`Dom`]: the host trait. All coordinates are page pixels.
//! - [`MemoryDom`]: an in-memory implementation for tests and headless
//!   hosts, with authored (not laid-out) geometry and a minimal selector
//!   subset (`#id`, `.class`, tag name).
//!
//! ## Minimal example
//!
//! ```
//! use towpath_dom::{Dom, MemoryDom, Offset, Size};
//!
//! let mut dom = MemoryDom::new(Size::new(800.0, 600.0));
//! let body = dom.body();
//! let item = dom
//!     .build("div")
//!     .class("card")
//!     .at(Offset::new(100.0, 100.0))
//!     .size(Size::new(50.0, 50.0))
//!     .child_of(body);
//!
//! assert_eq!(dom.absolute_position(item), Offset::new(100.0, 100.0));
//! assert_eq!(dom.query(".card"), vec![item]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dom;
mod geometry;
mod memory;

pub use dom::{Dom, ElementId};
pub use geometry::{CssPosition, Edges, Offset, Size};
pub use memory::{ElementBuilder, MemoryDom};
