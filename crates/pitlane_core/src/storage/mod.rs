use crate::error::AppError;

mod file_store;
pub mod json_store;
mod memory_store;

pub use file_store::{FileStore, store_dir};
pub use json_store::JsonStore;
pub use memory_store::MemoryStore;

pub const TASKS_KEY: &str = "fanTasks";
pub const ACTIVITY_KEY: &str = "fanActivity";
pub const DARK_MODE_KEY: &str = "darkMode";

/// String-keyed backing store holding whole serialized values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;

    fn remove(&mut self, key: &str) -> Result<(), AppError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        (**self).remove(key)
    }
}
