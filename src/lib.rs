//! Estimation of Fekete points on the unit sphere.
//!
//! Starting from a random (or supplied) configuration, points are repeatedly
//! pushed along the tangential part of an inverse-square repulsion, with a
//! step proportional to the current minimum separation, until the smoothed
//! maximum disequilibrium settles inside a tolerance band or the iteration
//! budget runs out.
//!
//! Method: E. Bendito, A. Carmona, A. M. Encinas, J. M. Gesto,
//! "Estimation of Fekete points", J. Comput. Phys. 225 (2007) 2354–2376.

pub mod config;
pub mod convergence;
pub mod error;
pub mod force;
pub mod history;
pub mod measure;
pub mod progress;
pub mod relax;
pub mod sampler;

pub use config::RelaxConfig;
pub use error::{FeketeError, Result};
pub use force::disequilibrium;
pub use history::ErrorHistory;
pub use progress::{IterationReport, LogProgress, Progress, Silent};
pub use relax::{Outcome, Relaxation, Status, relax, relax_with};
pub use sampler::{random_points_on_sphere, random_unit_points};
