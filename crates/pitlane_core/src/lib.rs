pub mod activity;
pub mod command;
pub mod config;
pub mod error;
pub mod fallback;
pub mod forms;
pub mod model;
pub mod race;
pub mod repository;
pub mod storage;
pub mod view;
