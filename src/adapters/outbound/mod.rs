pub mod console;
pub mod formatters;
pub mod host;
pub mod memory;
