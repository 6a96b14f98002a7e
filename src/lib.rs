//! countrysel: a country-name autocomplete state machine.
//!
//! This root crate re-exports [`countrysel_core`] so the demos under `demos/`
//! can `use countrysel::prelude::*`. Library users should depend on
//! `countrysel-core` directly.

pub use countrysel_core::*;
