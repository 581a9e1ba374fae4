pub mod commands;
pub mod driver;
pub mod inventory;
pub mod registry;
pub mod runtime;
