pub mod activity;
pub mod saved;
