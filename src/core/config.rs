//! User-facing view options.
//!
//! Options arrive from the page as a JSON object; every field is optional and
//! falls back to the canonical configuration (draw input, seven-segment
//! outputs, gamma 2.2).

use super::constants::{DEFAULT_DRAW_INCREMENT, DEFAULT_GAMMA, GAMMA_MAX, GAMMA_MIN};
use super::error::{Result, TwinError};
use serde::Deserialize;

/// How pointer input edits the input layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionPolicy {
    /// A click flips a cell between 0 and 1.
    Toggle,
    /// Dragging over cells accumulates brightness.
    #[default]
    Draw,
}

/// How output probabilities are presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputEncoding {
    Intensity,
    #[default]
    SevenSegment,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TwinOptions {
    pub policy: InteractionPolicy,
    pub output: OutputEncoding,
    pub gamma: f32,
    pub draw_increment: f32,
    /// Report every accepted input mutation through the `on_input` callback.
    pub report_input: bool,
    pub gamma_control_id: Option<String>,
    pub reset_control_id: Option<String>,
}

impl Default for TwinOptions {
    fn default() -> Self {
        Self {
            policy: InteractionPolicy::default(),
            output: OutputEncoding::default(),
            gamma: DEFAULT_GAMMA,
            draw_increment: DEFAULT_DRAW_INCREMENT,
            report_input: false,
            gamma_control_id: Some("gamma-control".to_string()),
            reset_control_id: Some("reset-input".to_string()),
        }
    }
}

impl TwinOptions {
    /// Parse options from JSON. `null` and an empty string yield defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Self::default());
        }
        let mut options: TwinOptions = serde_json::from_str(trimmed)?;
        options.validate()?;
        options.gamma = clamp_gamma(options.gamma);
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        if !self.gamma.is_finite() {
            return Err(TwinError::InvalidOption {
                name: "gamma",
                reason: format!("{} is not finite", self.gamma),
            });
        }
        if !(self.draw_increment.is_finite() && self.draw_increment > 0.0) {
            return Err(TwinError::InvalidOption {
                name: "draw_increment",
                reason: format!("{} must be a positive number", self.draw_increment),
            });
        }
        Ok(())
    }
}

/// Clamp a gamma value into the supported control range.
#[inline]
pub fn clamp_gamma(gamma: f32) -> f32 {
    if gamma.is_finite() {
        gamma.clamp(GAMMA_MIN, GAMMA_MAX)
    } else {
        DEFAULT_GAMMA
    }
}

/// Text shown by a gamma range input for `gamma`, after clamping.
pub fn gamma_label(gamma: f32) -> String {
    format!("{:.1}", clamp_gamma(gamma))
}
