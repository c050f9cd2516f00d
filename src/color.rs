use std::fmt;

/// Number of analog axes sampled from the active gamepad.
pub const AXIS_COUNT: usize = 6;

/// Magnitudes below this are suppressed to exact zero on the red channel.
pub const RED_DEADZONE: f32 = 0.02;

/// Magnitudes below this are suppressed to exact zero on the blue channel.
/// The threshold differs from the red channel on purpose; the green channel
/// has none at all.
pub const BLUE_DEADZONE: f32 = 0.04;

/// Background color derived from the current axis snapshot. Always computed
/// fresh, never mutated in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorState {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl ColorState {
    /// Derive the three channels from an axis snapshot.
    ///
    /// Axis layout follows the conventional gamepad order: slot 1 is left
    /// stick Y (red), slot 3 is right stick Y (blue), slots 4 and 5 are the
    /// left and right triggers (green takes their difference).
    pub fn from_axes(axes: &[f32; AXIS_COUNT]) -> Self {
        Self {
            red: suppress(axes[1].abs(), RED_DEADZONE),
            green: (axes[4] - axes[5]).abs(),
            blue: suppress(axes[3].abs(), BLUE_DEADZONE),
        }
    }

    /// RGBA tuple for the frame clear. Alpha stays at 0.0; values above 1.0
    /// are left for the output API to clamp.
    pub fn to_clear_color(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, 0.0]
    }

    /// Title string showing the current channel values.
    pub fn window_title(&self) -> String {
        format!("TestGame - {}", self)
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            red: 0.0,
            green: 0.0,
            blue: 0.0,
        }
    }
}

impl fmt::Display for ColorState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Debug formatting keeps the trailing ".0" on whole values, so an
        // idle controller reads "Red:0.0" rather than "Red:0".
        write!(
            f,
            "Red:{:?} Green:{:?} Blue:{:?}",
            self.red, self.green, self.blue
        )
    }
}

// Dead-zone suppression: thresholds are exclusive, a magnitude exactly at the
// threshold passes through unchanged.
fn suppress(magnitude: f32, deadzone: f32) -> f32 {
    if magnitude < deadzone {
        0.0
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_axes_yield_black() {
        let color = ColorState::from_axes(&[0.0; AXIS_COUNT]);
        assert_eq!(color.red, 0.0);
        assert_eq!(color.green, 0.0);
        assert_eq!(color.blue, 0.0);
        assert_eq!(
            color.window_title(),
            "TestGame - Red:0.0 Green:0.0 Blue:0.0"
        );
    }

    #[test]
    fn red_deadzone_is_exclusive() {
        let at_threshold = ColorState::from_axes(&[0.0, 0.02, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(at_threshold.red, 0.02);

        let below_threshold = ColorState::from_axes(&[0.0, 0.019999, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(below_threshold.red, 0.0);
    }

    #[test]
    fn blue_deadzone_uses_its_own_threshold() {
        // 0.03 clears the red threshold but not the blue one.
        let color = ColorState::from_axes(&[0.0, 0.5, 0.0, 0.03, 0.0, 0.0]);
        assert_eq!(color.red, 0.5);
        assert_eq!(color.blue, 0.0);
        assert_eq!(color.green, 0.0);

        let at_threshold = ColorState::from_axes(&[0.0, 0.0, 0.0, 0.04, 0.0, 0.0]);
        assert_eq!(at_threshold.blue, 0.04);
    }

    #[test]
    fn negative_deflections_take_absolute_value() {
        let color = ColorState::from_axes(&[0.0, -0.5, 0.0, -0.25, 0.0, 0.0]);
        assert_eq!(color.red, 0.5);
        assert_eq!(color.blue, 0.25);
    }

    #[test]
    fn green_is_trigger_difference_without_deadzone() {
        let color = ColorState::from_axes(&[0.0, 0.0, 0.0, 0.0, 0.2, 0.9]);
        assert_eq!(color.green, (0.2f32 - 0.9f32).abs());
        assert!(color.green >= 0.0);

        // No suppression even for tiny differences.
        let tiny = ColorState::from_axes(&[0.0, 0.0, 0.0, 0.0, 0.001, 0.0]);
        assert_eq!(tiny.green, 0.001);
    }

    #[test]
    fn derivation_is_idempotent() {
        let snapshot = [0.1, -0.3, 0.0, 0.7, 0.4, -0.2];
        assert_eq!(ColorState::from_axes(&snapshot), ColorState::from_axes(&snapshot));
    }

    #[test]
    fn clear_color_keeps_alpha_zero() {
        let color = ColorState::from_axes(&[0.0, 1.0, 0.0, 1.0, 1.0, -1.0]);
        assert_eq!(color.to_clear_color(), [1.0, 2.0, 1.0, 0.0]);
    }
}
