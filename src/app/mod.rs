//! Application core: pure domain logic, zero I/O.
//!
//! The controller loop lives in [`service`].  All interaction with the
//! host happens through **port traits** defined in [`ports`], keeping
//! this layer testable without a real station.

pub mod events;
pub mod ports;
pub mod service;
