// Sidelog - ui/panels/entries.rs
//
// Virtual-scrolling three-column entry table: Time | Level | Message.
//
// Uses egui's `ScrollArea::show_rows`, which renders only the rows visible
// in the viewport, so rendering cost stays flat at the retention cap.
// Time and Level have fixed widths; Message takes whatever width remains,
// so it always fills the window however the user resizes it.
// `stick_to_bottom` keeps the newest entry in view as entries arrive.

use crate::core::model::LogEntry;
use crate::ui::theme;
use crate::util::constants;

/// Render the entry table (central area).
pub fn render(ui: &mut egui::Ui, entries: &[LogEntry]) {
    if entries.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No log entries yet.");
        });
        return;
    }

    let row_height = theme::ROW_HEIGHT;

    // Column header
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        header_cell(ui, "Time", constants::TIME_COLUMN_WIDTH, row_height);
        header_cell(ui, "Level", constants::LEVEL_COLUMN_WIDTH, row_height);
        ui.strong("Message");
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show_rows(ui, row_height, entries.len(), |ui, row_range| {
            for entry in entries
                .iter()
                .skip(row_range.start)
                .take(row_range.len())
            {
                let level_colour = theme::severity_colour(&entry.severity);
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 8.0;
                    cell(
                        ui,
                        egui::RichText::new(entry.time.as_str()).monospace(),
                        constants::TIME_COLUMN_WIDTH,
                        row_height,
                    );
                    cell(
                        ui,
                        egui::RichText::new(entry.level.as_str())
                            .monospace()
                            .color(level_colour),
                        constants::LEVEL_COLUMN_WIDTH,
                        row_height,
                    );
                    // Message fills the remaining width; overlong text is
                    // truncated with the full text on hover.
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(entry.message.as_str()).monospace(),
                        )
                        .truncate(),
                    )
                    .on_hover_text(entry.message.as_str());
                });
            }
        });
}

/// Fixed-width header cell, left-aligned.
fn header_cell(ui: &mut egui::Ui, text: &str, width: f32, height: f32) {
    ui.allocate_ui_with_layout(
        egui::vec2(width, height),
        egui::Layout::left_to_right(egui::Align::Center),
        |ui| {
            ui.strong(text);
        },
    );
}

/// Fixed-width body cell, truncated, left-aligned.
fn cell(ui: &mut egui::Ui, text: egui::RichText, width: f32, height: f32) {
    ui.allocate_ui_with_layout(
        egui::vec2(width, height),
        egui::Layout::left_to_right(egui::Align::Center),
        |ui| {
            ui.add(egui::Label::new(text).truncate());
        },
    );
}
