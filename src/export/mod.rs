//! Upload sinks for finished layouts.

pub(crate) mod sink;
