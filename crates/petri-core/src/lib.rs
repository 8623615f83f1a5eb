//! Tick clock, rule engine, and orchestration for the Petri simulation.
//!
//! This crate owns the generation cycle that drives the shared board:
//! seed injection, full-pass rule evaluation, atomic apply, and the
//! changed-cells diff that fans out to every viewer.
//!
//! # Modules
//!
//! - [`clock`] -- Monotonic tick counter with checked advance.
//! - [`config`] -- Configuration loading from `petri-config.yaml` into
//!   strongly-typed structs, with derived grid geometry.
//! - [`rule`] -- Neighbor counting with the inert border, color averaging,
//!   and the Life transition table.
//! - [`tick`] -- [`SimulationState`] and the 5-phase [`run_tick`] cycle.
//! - [`runner`] -- The process-lifetime loop and the [`Broadcast`]
//!   capability that decouples the core from the transport.
//!
//! [`run_tick`]: tick::run_tick
//! [`SimulationState`]: tick::SimulationState
//! [`Broadcast`]: runner::Broadcast

pub mod clock;
pub mod config;
pub mod rule;
pub mod runner;
pub mod tick;
