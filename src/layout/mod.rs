//! Multi-photo layout sessions and the grid compositor.

pub(crate) mod compositor;
pub(crate) mod config;
pub(crate) mod controller;
pub(crate) mod state;
