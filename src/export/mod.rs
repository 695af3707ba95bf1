//! Output writers: one legacy VTK grid per section, one `.pvd` collection
//! tying them together as a time series.

pub mod pvd;
pub mod vtk;
