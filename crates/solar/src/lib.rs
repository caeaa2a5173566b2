//! Two-dimensional gravitational N-body engine.
//!
//! Load a [`state::SystemState`] with [`codec::load`], step it with
//! [`engine::Engine::advance`] (or the bare [`integrator::advance`]), and
//! write it out with [`codec::save`].

pub mod body;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod state;

pub use error::{Error, Result};

#[cfg(test)]
mod state_test;
