//! Ledger store adapters.

mod document;
mod json;
mod memory;

pub use document::LedgerDocument;
pub use json::JsonStore;
pub use memory::MemoryStore;
