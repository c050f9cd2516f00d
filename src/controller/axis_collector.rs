use chrono::{DateTime, Local};
use gilrs::{Axis, Event, EventType, Gamepad, GamepadId, Gilrs};
use statum::{machine, state};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::color::AXIS_COUNT;
use crate::controller::ControllerSettings;

// Snapshot of the six tracked axes, overwritten in full as events arrive
#[derive(Clone, Debug)]
pub struct AxisSnapshot {
    pub axes: [f32; AXIS_COUNT],
    pub timestamp: DateTime<Local>,
}

impl Default for AxisSnapshot {
    fn default() -> Self {
        Self {
            axes: [0.0; AXIS_COUNT],
            timestamp: Local::now(),
        }
    }
}

// Collector errors
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("Failed to initialize collector: {0}")]
    InitializationError(String),

    #[error("Failed to publish snapshot: {0}")]
    SnapshotSendError(String),
}

// Define collector states using statum's state macro
#[state]
#[derive(Debug, Clone)]
pub enum CollectionState {
    Initializing,
    Collecting,
}

#[machine]
#[derive(Debug)]
pub struct AxisCollector<S: CollectionState> {
    // Gilrs context
    gilrs: Gilrs,

    // Active gamepad, lowest responding index at startup
    active_gamepad: Option<GamepadId>,

    // Collector settings
    settings: ControllerSettings,

    // Current axis snapshot
    snapshot: AxisSnapshot,

    // Watch channel for publishing snapshots to the UI
    snapshot_sender: watch::Sender<AxisSnapshot>,
}

impl AxisCollector<Initializing> {
    pub fn create(
        settings: Option<ControllerSettings>,
        snapshot_sender: watch::Sender<AxisSnapshot>,
    ) -> Result<Self, CollectorError> {
        let settings = settings.unwrap_or_default();
        debug!("Creating Axis Collector with settings: {:?}", settings);

        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(CollectorError::InitializationError(e.to_string()));
            }
        };

        Ok(Self::new(
            gilrs,
            None,
            settings,
            AxisSnapshot::default(),
            snapshot_sender,
        ))
    }

    // Enumerate gamepads, pick the first responding one, and transition to
    // Collecting. A missing gamepad is not fatal; the snapshot stays neutral.
    pub fn initialize(mut self) -> Result<AxisCollector<Collecting>, CollectorError> {
        let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self.gilrs.gamepads().collect();

        if gamepads.is_empty() {
            warn!("No gamepad connected, axes stay neutral until one appears");
        } else {
            info!("Found {} gamepads:", gamepads.len());
            for (idx, (id, gamepad)) in gamepads.iter().enumerate() {
                info!(
                    "  [{}] ID: {}, Name: {}, UUID: {:?}",
                    idx,
                    id,
                    gamepad.name(),
                    gamepad.uuid()
                );
            }
            let (id, gamepad) = &gamepads[0];
            self.active_gamepad = Some(*id);
            info!("Selected gamepad: {} ({})", gamepad.name(), id);
        }

        info!("Axis Collector initialized, transitioning to Collecting state");
        Ok(self.transition())
    }
}

impl AxisCollector<Collecting> {
    // Drain all pending gilrs events, folding axis changes into the snapshot.
    // Publishes once per drained batch that touched an axis.
    pub fn pump_events(&mut self) -> Result<(), CollectorError> {
        let mut dirty = false;

        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    if self.active_gamepad.is_none() {
                        info!("Gamepad connected, selecting it: {:?}", id);
                        self.active_gamepad = Some(id);
                    } else {
                        debug!("Additional gamepad connected, ignoring: {:?}", id);
                    }
                    continue;
                }
                EventType::Disconnected => {
                    if self.active_gamepad == Some(id) {
                        warn!("Active gamepad disconnected, holding last snapshot");
                        self.active_gamepad = None;
                    }
                    continue;
                }
                _ => {}
            }

            // Only the tracked gamepad feeds the snapshot
            if self.active_gamepad != Some(id) {
                debug!("Skipping event from non-active gamepad: {:?}", id);
                continue;
            }

            if let EventType::AxisChanged(axis, value, _) = event {
                if let Some(slot) = axis_slot(axis) {
                    debug!("Axis changed: {:?} = {:.4} (slot {})", axis, value, slot);
                    self.snapshot.axes[slot] = value;
                    dirty = true;
                } else {
                    debug!("Ignoring unsupported axis: {:?}", axis);
                }
            }
        }

        if dirty {
            self.snapshot.timestamp = Local::now();
            self.snapshot_sender
                .send(self.snapshot.clone())
                .map_err(|e| CollectorError::SnapshotSendError(e.to_string()))?;
        }

        Ok(())
    }

    // Run the collector in a loop
    pub fn run_collection_loop(&mut self) -> Result<(), CollectorError> {
        info!("Starting Axis Collector loop");

        let poll_interval = std::time::Duration::from_micros(self.settings.poll_interval_us);

        loop {
            if let Err(e) = self.pump_events() {
                // A closed channel means the window is gone; stop cleanly.
                info!("Snapshot channel closed, stopping collector: {}", e);
                return Ok(());
            }

            // Small sleep to prevent 100% CPU usage
            std::thread::sleep(poll_interval);
        }
    }
}

// Map a gilrs axis to its slot in the snapshot. The layout mirrors the
// conventional gamepad axis order: sticks first, then triggers.
fn axis_slot(axis: Axis) -> Option<usize> {
    match axis {
        Axis::LeftStickX => Some(0),
        Axis::LeftStickY => Some(1),
        Axis::RightStickX => Some(2),
        Axis::RightStickY => Some(3),
        Axis::LeftZ => Some(4),
        Axis::RightZ => Some(5),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_defaults_to_neutral() {
        let snapshot = AxisSnapshot::default();
        assert_eq!(snapshot.axes, [0.0; AXIS_COUNT]);
    }

    #[test]
    fn stick_axes_fill_slots_zero_through_three() {
        assert_eq!(axis_slot(Axis::LeftStickX), Some(0));
        assert_eq!(axis_slot(Axis::LeftStickY), Some(1));
        assert_eq!(axis_slot(Axis::RightStickX), Some(2));
        assert_eq!(axis_slot(Axis::RightStickY), Some(3));
    }

    #[test]
    fn triggers_fill_slots_four_and_five() {
        assert_eq!(axis_slot(Axis::LeftZ), Some(4));
        assert_eq!(axis_slot(Axis::RightZ), Some(5));
    }

    #[test]
    fn unsupported_axes_are_dropped() {
        assert_eq!(axis_slot(Axis::DPadX), None);
        assert_eq!(axis_slot(Axis::DPadY), None);
        assert_eq!(axis_slot(Axis::Unknown), None);
    }
}
