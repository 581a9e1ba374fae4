pub mod config;
mod install;
mod list;
pub mod select;

pub use config::{Config, Options};
pub use install::{Outcome, finish, install, print_banner, report};
pub use list::list;
