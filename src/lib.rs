//! Airlock interlock controller library.
//!
//! Groups tagged doors and vents into airlock units and, once per host
//! tick, keeps each unit's interior and exterior doors from being usable
//! at the same time.  All host interaction goes through the port traits
//! in [`app::ports`]; the [`adapters`] module carries a log sink, a JSON
//! config loader and an in-memory simulated station.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod classify;
pub mod config;
pub mod device;
pub mod diagnostics;
pub mod error;
pub mod interlock;
pub mod registry;
pub mod tags;
