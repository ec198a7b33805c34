//! Environment helpers.
//!
//! - [`expand`] replaces `${name}` tokens in a string through a lookup function.
//! - [`set_env_vars`] and [`split_env_var`] work on `key=value` lists such as
//!   the environment handed to a child process.

mod expand;
mod vars;

pub use expand::expand;
pub use vars::{set_env_vars, split_env_var};
