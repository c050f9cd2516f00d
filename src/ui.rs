use egui::{Color32, Event, Key, RichText};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::color::ColorState;
use crate::controller::AxisSnapshot;

// The window's frame state: RUNNING while ticking, CLOSING once a shutdown
// was requested. CLOSING is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameState {
    Running,
    Closing,
}

pub struct JoytintUI {
    // Latest snapshot from the collector task
    axis_receiver: watch::Receiver<AxisSnapshot>,

    // Color derived from the snapshot this frame
    color: ColorState,

    // Last title pushed to the window, to skip redundant viewport commands
    title: String,

    state: FrameState,

    repaint_interval: Duration,
}

impl JoytintUI {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        axis_receiver: watch::Receiver<AxisSnapshot>,
        repaint_interval_ms: u64,
    ) -> Self {
        info!("Creating UI with {}ms repaint pacing", repaint_interval_ms);
        Self {
            axis_receiver,
            color: ColorState::default(),
            title: String::new(),
            state: FrameState::Running,
            repaint_interval: Duration::from_millis(repaint_interval_ms),
        }
    }

    // Escape is acted on at release, not press
    fn escape_released(ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            i.events.iter().any(|event| {
                matches!(
                    event,
                    Event::Key {
                        key: Key::Escape,
                        pressed: false,
                        ..
                    }
                )
            })
        })
    }
}

impl eframe::App for JoytintUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state == FrameState::Running && Self::escape_released(ctx) {
            info!("Escape released, requesting window close");
            self.state = FrameState::Closing;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // Full snapshot read every frame, no partial updates
        let snapshot = self.axis_receiver.borrow().clone();
        self.color = ColorState::from_axes(&snapshot.axes);
        debug!("Frame color: {}", self.color);

        let title = self.color.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        // A transparent panel lets the clear color show through; the label is
        // a readable copy of what the title bar reports.
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui.ctx().request_repaint_after(self.repaint_interval);
                ui.label(
                    RichText::new(self.color.to_string())
                        .monospace()
                        .color(Color32::WHITE),
                );
            });
    }

    // The derived color is pushed as the frame clear color
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        self.color.to_clear_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_key(key: Key, pressed: bool) -> egui::Context {
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.events.push(Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers: egui::Modifiers::default(),
        });
        ctx.begin_pass(input);
        ctx
    }

    #[test]
    fn escape_press_alone_does_not_request_close() {
        let ctx = context_with_key(Key::Escape, true);
        assert!(!JoytintUI::escape_released(&ctx));
    }

    #[test]
    fn escape_release_requests_close() {
        let ctx = context_with_key(Key::Escape, false);
        assert!(JoytintUI::escape_released(&ctx));
    }

    #[test]
    fn other_key_releases_are_ignored() {
        let ctx = context_with_key(Key::A, false);
        assert!(!JoytintUI::escape_released(&ctx));
    }

    #[test]
    fn frame_without_input_stays_running() {
        let ctx = egui::Context::default();
        ctx.begin_pass(egui::RawInput::default());
        assert!(!JoytintUI::escape_released(&ctx));
    }
}
