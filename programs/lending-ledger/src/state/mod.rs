pub mod config;
pub mod pool;
pub mod position;
pub mod wrapper;

pub use config::*;
pub use pool::*;
pub use position::*;
pub use wrapper::*;
