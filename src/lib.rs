pub mod aggregate;
pub mod charts;
pub mod cleaner;
pub mod error;
pub mod loader;
pub mod output;
pub mod page;
pub mod record;
pub mod server;
pub mod utility;
