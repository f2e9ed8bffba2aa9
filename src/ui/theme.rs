// Sidelog - ui/theme.rs
//
// Severity colour mapping and layout constants.
// No dependencies on viewer state or FFI.

use crate::core::model::Severity;
use egui::Color32;

/// Colour for a given severity level.
pub fn severity_colour(severity: &Severity) -> Color32 {
    match severity {
        Severity::Critical => Color32::from_rgb(220, 38, 38), // Red 600
        Severity::Error => Color32::from_rgb(239, 68, 68),    // Red 500
        Severity::Warning => Color32::from_rgb(217, 119, 6),  // Amber 600
        Severity::Info => Color32::from_rgb(209, 213, 219),   // Gray 300
        Severity::Debug => Color32::from_rgb(107, 114, 128),  // Gray 500
        Severity::Unknown => Color32::from_rgb(156, 163, 175), // Gray 400
    }
}

/// Layout constants.
pub const ROW_HEIGHT: f32 = 20.0;
