mod loader;

pub use loader::{FileLoader, LocalFileLoader};
