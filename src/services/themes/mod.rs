// Themes screen controller
// Wires preferences, overlays, backups and the schedule together

mod controller;

pub use controller::{RestoreFlowGuard, ThemesController};
