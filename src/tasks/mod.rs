//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the REPL.
//!
//! # Tasks
//! - Cache reaper: Removes entries older than the cache interval

mod reaper;

pub use reaper::{spawn_reaper_task, ReaperState, ReaperStatus};
