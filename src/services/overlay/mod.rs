// Overlay service module
// Reads and changes overlay state through the platform seam

mod manager;
mod resolver;

pub use manager::{InMemoryOverlayManager, OverlayManager};
pub use resolver::{
    apply_list_value, apply_overlay, apply_theme_switch, current_dark_variant,
    current_theme_switch, enabled_overlay, overlay_position,
};

#[cfg(test)]
pub use manager::MockOverlayManager;
