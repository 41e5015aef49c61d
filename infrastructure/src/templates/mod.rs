//! Prompt template storage

mod file_store;

pub use file_store::FileTemplateStore;
