//! Controller subsystem for gamepad axis polling
//!
//! A single [`axis_collector`] task pumps gilrs events and publishes the
//! latest six-axis snapshot through a watch channel.
//!
//! # Architecture
//!
//! ```text
//! Gamepad ──► Collector ──► AxisSnapshot (watch channel) ──► UI
//! ```

pub mod axis_collector;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::controller::axis_collector::AxisCollector;
pub use crate::controller::axis_collector::{AxisSnapshot, CollectorError};

// Controller settings, overridable from the config file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControllerSettings {
    pub poll_interval_us: u64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            poll_interval_us: 100,
        }
    }
}

// Controller errors
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Collector error: {0}")]
    CollectorError(#[from] CollectorError),
}

// Public handle for the axis collection task
pub struct ControllerHandle {
    snapshot_receiver: watch::Receiver<AxisSnapshot>,
}

impl ControllerHandle {
    // Create the collector and spawn it as a tokio task
    pub fn spawn(settings: Option<ControllerSettings>) -> Result<Self, ControllerError> {
        info!("Initializing controller system with settings: {:?}", settings);

        // Watch channel carrying the latest snapshot to the UI
        let (snapshot_sender, snapshot_receiver) = watch::channel(AxisSnapshot::default());
        debug!("Created snapshot watch channel");

        // Gilrs failing to come up is fatal; a missing gamepad is not
        let collector = AxisCollector::create(settings, snapshot_sender)?;
        info!("Successfully created AxisCollector instance");

        let task_handle = tokio::spawn(async move {
            match collector.initialize() {
                Ok(mut collecting_state) => {
                    info!("Axis Collector initialization successful, starting collection loop");
                    if let Err(e) = collecting_state.run_collection_loop() {
                        error!("Collector task terminated with error: {}", e);
                    } else {
                        info!("Axis Collector task finished");
                    }
                }
                Err(e) => {
                    error!("Failed to initialize Axis Collector: {}", e);
                }
            }
        });

        debug!("Tokio task spawned with handle: {:?}", task_handle);
        info!("Controller system initialized successfully");

        Ok(Self { snapshot_receiver })
    }

    // Get a receiver for the axis snapshots
    pub fn subscribe(&self) -> watch::Receiver<AxisSnapshot> {
        debug!("New subscriber to axis snapshots");
        self.snapshot_receiver.clone()
    }
}
