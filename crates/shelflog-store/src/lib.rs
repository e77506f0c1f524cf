pub mod paths;
pub mod store;

pub use paths::ShelfPaths;
pub use store::{JsonStore, StoreError};
