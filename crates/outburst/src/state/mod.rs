//! Disk state: grid, torque profile, time cursor and derived observables.
//!
//! Observables (temperatures, surface density, luminosities, magnitudes) are
//! computed on first access and memoised until the next committed step.

mod cache;
mod disk_state;
pub(crate) mod initial;


pub use cache::{Memo, ObservableCache};
pub(crate) use disk_state::Commit;
pub use disk_state::{DiskState, RadialProfile, StepSummary};
