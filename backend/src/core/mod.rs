//! Scheduling primitives shared by the worker loop

pub mod time;
