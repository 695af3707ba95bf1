//! Convert a piston gap pressure text file (one `%PHI` block per angle) into
//! legacy VTK grid files plus a ParaView `.pvd` time series.

pub mod config;
pub mod data;
pub mod export;
pub mod pipeline;
