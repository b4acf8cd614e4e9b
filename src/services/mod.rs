// Service module exports

pub mod backup;
pub mod database;
pub mod overlay;
pub mod preferences;
pub mod profile;
pub mod schedule;
pub mod themes;
