//! Common code used by the poolcheck binary

pub mod logging;
pub mod profiler;
