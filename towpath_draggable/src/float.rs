// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers that resolve through the `std`/`libm` feature pair.

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("towpath_draggable requires either the `std` or `libm` feature");

/// Rounds half away from zero, matching CSS pixel rounding.
#[cfg(feature = "std")]
#[inline]
pub(crate) fn round(x: f64) -> f64 {
    x.round()
}

/// Rounds half away from zero, matching CSS pixel rounding.
#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn round(x: f64) -> f64 {
    libm::round(x)
}

/// Absolute value.
#[cfg(feature = "std")]
#[inline]
pub(crate) fn abs(x: f64) -> f64 {
    x.abs()
}

/// Absolute value.
#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn abs(x: f64) -> f64 {
    libm::fabs(x)
}
