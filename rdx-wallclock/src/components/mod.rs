//! Contains the building blocks the engine assembles into a running clock.
//!
//! `console` owns the output streams, `task` owns the periodic loop and the
//! handles used to observe and cancel it.

pub mod console;
pub mod task;
