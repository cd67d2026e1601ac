pub mod fixed_point;
pub mod pole;
pub mod rate_curve;

pub use fixed_point::*;
pub use pole::PoleController;
pub use rate_curve::*;
