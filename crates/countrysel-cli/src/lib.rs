//! countrysel-cli
//! ==============
//!
//! Command-line front-end for the `countrysel-core` autocomplete engine.
//!
//! The binary (`countrysel`) is the primary deliverable. The library target
//! holds the pieces worth testing on their own: scripted event replay and
//! terminal rendering.
//!
//! Quick start
//! -----------
//!
//! ```text
//! countrysel search unite
//! countrysel highlight "United States" unite
//! countrysel select AR
//! countrysel last
//! countrysel replay type:unite wait:300 key:ArrowDown key:Enter
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod render;
pub mod replay;
