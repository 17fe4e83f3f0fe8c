pub mod memory;
pub mod realtime;
pub mod store;
