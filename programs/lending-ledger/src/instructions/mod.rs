pub mod admin;
pub mod borrow;
pub mod collateral;
pub mod isolation;
pub mod liquidate;
pub mod loader;
pub mod pool_action;
pub mod position;
pub mod supply;
pub mod token_flow;
pub mod wrapped;

pub use admin::*;
pub use isolation::*;
pub use liquidate::*;
pub use pool_action::*;
pub use position::*;
pub use wrapped::*;
