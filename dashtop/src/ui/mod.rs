//! UI module root: exposes drawing functions for individual panels.

pub mod charts;
pub mod details;
pub mod disks;
pub mod header;
pub mod metrics;
pub mod processes;
pub mod theme;
pub mod util;
