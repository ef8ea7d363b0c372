//! Store adapters implementing the application's `StateStore` port.

pub mod json_file;
pub mod memory;
pub mod session;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use session::SessionStore;
