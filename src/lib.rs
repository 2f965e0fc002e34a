//! Cognitive load estimation and impulse gating for ADHD-oriented productivity tools.
//!
//! The [`engine`] turns counts of open work into load scores, a discrete
//! status, per-character states, a drift reading and a project orbit
//! hierarchy. The [`api`] exposes it over HTTP and [`client`] talks to it.

pub mod api;
pub mod client;
pub mod config;
pub mod engine;
pub mod models;
pub mod render;
