//! Command implementations.

mod check;
mod info;
mod validate;

pub use check::run_check;
pub use info::run_info;
pub use validate::run_validate;
