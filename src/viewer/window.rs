// Sidelog - viewer/window.rs
//
// The viewer window: shared cross-thread state and the eframe::App that
// renders it.
//
// The host appends entries and queues commands from its own threads; the
// window thread drains both each frame. The widget never owns log state --
// it renders a snapshot of the buffer, so the logical log and the display
// stay separate.

use crate::core::buffer::LogBuffer;
use crate::core::export;
use crate::core::model::LogEntry;
use crate::ui;
use crate::util::constants;
use crate::util::error::LifecycleError;
use std::sync::{mpsc, Arc, Mutex, MutexGuard};

// =============================================================================
// Options
// =============================================================================

/// Construction-time options for one viewer window.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Window title.
    pub title: String,

    /// Initial window size in logical pixels.
    pub width: f32,
    pub height: f32,

    /// Entry retention cap for the backing buffer.
    pub max_entries: usize,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: constants::APP_NAME.to_string(),
            width: constants::DEFAULT_WINDOW_WIDTH,
            height: constants::DEFAULT_WINDOW_HEIGHT,
            max_entries: constants::DEFAULT_MAX_ENTRIES,
        }
    }
}

// =============================================================================
// Shared state
// =============================================================================

/// Commands queued by the host for the window thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    /// Centre the window on screen, make it visible, and focus it.
    Show,

    /// Destroy the window (terminate path).
    Close,
}

/// State shared between the host-facing lifecycle and the window thread.
///
/// Created fresh on every `initialize`, dropped on `terminate`; nothing is
/// retained across a teardown/recreate cycle.
pub struct SharedState {
    buffer: Mutex<LogBuffer>,
    commands: Mutex<Vec<WindowCommand>>,
    /// Set by the window thread once the egui context exists, so host-side
    /// appends can request a repaint.
    repaint: Mutex<Option<egui::Context>>,
}

/// A poisoned mutex still holds usable state; the viewer must never take the
/// host process down over it.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl SharedState {
    /// Create shared state with an empty buffer of the given cap.
    pub fn new(max_entries: usize) -> Self {
        Self {
            buffer: Mutex::new(LogBuffer::new(max_entries)),
            commands: Mutex::new(Vec::new()),
            repaint: Mutex::new(None),
        }
    }

    /// Append an entry and request a repaint. Returns the assigned seq.
    pub fn append(&self, time: &str, level: &str, message: &str) -> u64 {
        let seq = lock(&self.buffer).push(
            time.to_string(),
            level.to_string(),
            message.to_string(),
        );
        self.request_repaint();
        seq
    }

    /// Number of retained entries.
    pub fn entry_count(&self) -> usize {
        lock(&self.buffer).len()
    }

    /// Entries evicted by the retention cap so far.
    pub fn dropped(&self) -> u64 {
        lock(&self.buffer).dropped()
    }

    /// Read-only projection of the buffer, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        lock(&self.buffer).snapshot()
    }

    /// Queue a command for the window thread and wake it.
    pub fn send(&self, cmd: WindowCommand) {
        lock(&self.commands).push(cmd);
        self.request_repaint();
    }

    /// Drain all queued commands, in send order.
    pub fn drain_commands(&self) -> Vec<WindowCommand> {
        std::mem::take(&mut *lock(&self.commands))
    }

    /// Attach the window's egui context for repaint requests.
    pub fn attach_context(&self, ctx: egui::Context) {
        *lock(&self.repaint) = Some(ctx);
    }

    /// Ask the window to repaint, if it exists yet.
    pub fn request_repaint(&self) {
        if let Some(ctx) = lock(&self.repaint).as_ref() {
            ctx.request_repaint();
        }
    }
}

// =============================================================================
// The window
// =============================================================================

/// eframe application for one viewer window lifetime.
pub struct ViewerApp {
    shared: Arc<SharedState>,

    /// Status-bar message (export results, etc.).
    status: String,

    /// Set once a Close command arrives; lets the close actually proceed
    /// instead of being downgraded to hide.
    closing: bool,
}

impl ViewerApp {
    pub fn new(shared: Arc<SharedState>) -> Self {
        Self {
            shared,
            status: String::new(),
            closing: false,
        }
    }

    /// Export the current snapshot via a save dialog. Returns a status-bar
    /// message either way.
    fn export_entries(&self, format: ExportFormat) -> String {
        let (filter_name, exts, default_name): (&str, &[&str], &str) = match format {
            ExportFormat::Csv => ("CSV", &["csv"], "log-export.csv"),
            ExportFormat::Json => ("JSON", &["json"], "log-export.json"),
        };
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(filter_name, exts)
            .set_file_name(default_name)
            .save_file()
        else {
            return String::new();
        };

        let entries = self.shared.snapshot();
        let file = match std::fs::File::create(&dest) {
            Ok(f) => f,
            Err(e) => return format!("Cannot create file: {e}"),
        };
        let result = match format {
            ExportFormat::Csv => export::export_csv(&entries, file, &dest),
            ExportFormat::Json => export::export_json(&entries, file, &dest),
        };
        match result {
            Ok(n) => format!("Exported {n} entries to {filter_name}."),
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                format!("Export failed: {e}")
            }
        }
    }
}

#[derive(Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Host commands first, so a Show queued before this frame takes
        // effect within it.
        for cmd in self.shared.drain_commands() {
            match cmd {
                WindowCommand::Show => {
                    if let Some(center) = egui::ViewportCommand::center_on_screen(ctx) {
                        ctx.send_viewport_cmd(center);
                    }
                    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
                    ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
                }
                WindowCommand::Close => {
                    self.closing = true;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }

        // The close box hides the companion window rather than destroying
        // it; only a Close command from terminate ends the window lifetime.
        if !self.closing && ctx.input(|i| i.viewport().close_requested()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
        }

        let entries = self.shared.snapshot();

        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_entries = !entries.is_empty();
                    ui.add_enabled_ui(has_entries, |ui| {
                        if ui.button("Export CSV\u{2026}").clicked() {
                            self.status = self.export_entries(ExportFormat::Csv);
                            ui.close_menu();
                        }
                        if ui.button("Export JSON\u{2026}").clicked() {
                            self.status = self.export_entries(ExportFormat::Json);
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Hide").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let dropped = self.shared.dropped();
                    if dropped > 0 {
                        ui.label(format!(
                            "{} entries ({dropped} oldest dropped)",
                            entries.len()
                        ));
                    } else {
                        ui.label(format!("{} entries", entries.len()));
                    }
                });
            });
        });

        // Entry table
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::entries::render(ui, &entries);
        });
    }
}

// =============================================================================
// Event loop
// =============================================================================

/// Run the viewer window until it closes. Blocks the calling thread for the
/// whole window lifetime.
///
/// The preview binary calls this directly on the main thread, as must macOS
/// embedders (AppKit requires the event loop on the main thread); the eframe
/// backend calls it from a dedicated window thread on Windows and Linux.
pub fn run_blocking(shared: Arc<SharedState>, options: &ViewerOptions) -> Result<(), LifecycleError> {
    run_event_loop(shared, options, None)
}

/// As [`run_blocking`], with a startup handshake: once the event loop is up
/// and the app has been created, `Ok(())` is sent on `on_ready`. If the loop
/// fails before that point the error is returned without anything sent, so
/// the launching side can tell "running" from "dead on arrival".
pub(crate) fn run_event_loop(
    shared: Arc<SharedState>,
    options: &ViewerOptions,
    on_ready: Option<mpsc::Sender<Result<(), LifecycleError>>>,
) -> Result<(), LifecycleError> {
    let viewport = egui::ViewportBuilder::default()
        .with_title(options.title.clone())
        .with_inner_size([options.width, options.height])
        .with_min_inner_size([constants::MIN_WINDOW_WIDTH, constants::MIN_WINDOW_HEIGHT])
        // Created hidden; `show` makes it visible.
        .with_visible(false);

    #[cfg_attr(
        not(any(target_os = "windows", target_os = "linux")),
        allow(unused_mut)
    )]
    let mut native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    // On Windows and Linux the event loop may be created off the main
    // thread, which is how the backend runs the window without blocking the
    // host. macOS has no equivalent; see `run_blocking`.
    #[cfg(any(target_os = "windows", target_os = "linux"))]
    {
        native_options.event_loop_builder = Some(Box::new(|builder| {
            #[cfg(target_os = "windows")]
            {
                use winit::platform::windows::EventLoopBuilderExtWindows;
                builder.with_any_thread(true);
            }
            #[cfg(target_os = "linux")]
            {
                // Both backends carry their own extension trait; qualified
                // calls keep the two `with_any_thread`s apart.
                use winit::platform::wayland::EventLoopBuilderExtWayland;
                use winit::platform::x11::EventLoopBuilderExtX11;
                EventLoopBuilderExtWayland::with_any_thread(builder, true);
                EventLoopBuilderExtX11::with_any_thread(builder, true);
            }
        }));
    }

    let app_shared = Arc::clone(&shared);
    eframe::run_native(
        constants::APP_ID,
        native_options,
        Box::new(move |cc| {
            app_shared.attach_context(cc.egui_ctx.clone());
            if let Some(ready) = on_ready {
                let _ = ready.send(Ok(()));
            }
            Ok(Box::new(ViewerApp::new(app_shared)))
        }),
    )
    .map_err(|e| LifecycleError::BackendLaunch {
        reason: e.to_string(),
    })
}
