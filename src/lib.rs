pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod state;
pub mod storage;
#[cfg(test)]
mod test_utils;
pub mod users;
