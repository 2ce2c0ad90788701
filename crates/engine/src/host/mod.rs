mod dir_store;
mod file_provider;
mod memory_store;

pub use dir_store::DirReportStore;
pub use file_provider::JsonFileProvider;
pub use memory_store::MemoryReportStore;
