//! Line classification and telemetry frame decoding
//!
//! Each line from the vehicle is exactly one of:
//! - a telemetry frame: a JSON object with `quats` and `servo` arrays
//! - console text: any non-empty line not starting with `{`
//! - noise: empty lines, truncated or malformed JSON, frames with missing
//!   keys or wrongly sized arrays
//!
//! Noise is dropped without a sample. Truncated frames are routine since a
//! read can stop mid-line, so [`IgnoreReason`] exists only for debug logging.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;
use serde_json::error::Category;
use serde_json::Value;

use crate::telemetry::{TelemetrySample, WireQuaternion, SERVO_CHANNELS};

/// First character of every telemetry frame
pub const FRAME_START: char = '{';

/// Key of the scalar-first attitude quaternion
pub const KEY_QUATS: &str = "quats";

/// Key of the servo deflection array
pub const KEY_SERVO: &str = "servo";

/// Number of quaternion components
const QUAT_COMPONENTS: usize = 4;

/// Free-form console text from the vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// Line content, surrounding whitespace removed
    pub text: String,
}

/// Why a line produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Blank line
    Empty,
    /// JSON ended early (frame cut by a read boundary)
    Truncated,
    /// Not valid JSON
    Malformed,
    /// A required key is absent or null
    MissingKey(&'static str),
    /// A required key is not an array of exactly 4 finite numbers
    BadShape(&'static str),
}

/// Result of classifying one line
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Valid telemetry frame
    Sample(TelemetrySample),
    /// Console text to surface to the operator
    Diagnostic(DiagnosticEvent),
    /// Nothing to report
    Ignored(IgnoreReason),
}

impl Decoded {
    /// Check if this line produced a sample
    pub fn is_sample(&self) -> bool {
        matches!(self, Decoded::Sample(_))
    }

    /// Check if this line produced nothing
    pub fn is_ignored(&self) -> bool {
        matches!(self, Decoded::Ignored(_))
    }
}

/// Raw frame as deserialized; unknown keys are skipped
#[derive(Deserialize)]
struct WireFrame {
    quats: Option<Value>,
    servo: Option<Value>,
}

/// Classify and decode one line
///
/// The line should already have its terminator stripped; surrounding
/// whitespace is trimmed here. Decoding holds no state between calls.
pub fn decode_line(line: &str) -> Decoded {
    let line = line.trim();

    if line.is_empty() {
        return Decoded::Ignored(IgnoreReason::Empty);
    }

    if !line.starts_with(FRAME_START) {
        return Decoded::Diagnostic(DiagnosticEvent {
            text: String::from(line),
        });
    }

    let frame: WireFrame = match serde_json::from_str(line) {
        Ok(frame) => frame,
        Err(e) => {
            let reason = match e.classify() {
                Category::Eof => IgnoreReason::Truncated,
                _ => IgnoreReason::Malformed,
            };
            return Decoded::Ignored(reason);
        }
    };

    match sample_from_frame(frame) {
        Ok(sample) => Decoded::Sample(sample),
        Err(reason) => Decoded::Ignored(reason),
    }
}

fn sample_from_frame(frame: WireFrame) -> Result<TelemetrySample, IgnoreReason> {
    let quats = fixed_array::<QUAT_COMPONENTS>(frame.quats, KEY_QUATS)?;
    let servo = fixed_array::<SERVO_CHANNELS>(frame.servo, KEY_SERVO)?;

    Ok(TelemetrySample {
        quaternion: WireQuaternion::from_scalar_first(quats),
        servo_deflections: servo,
    })
}

/// Extract an array of exactly `N` finite numbers
fn fixed_array<const N: usize>(
    value: Option<Value>,
    key: &'static str,
) -> Result<[f64; N], IgnoreReason> {
    let value = value.ok_or(IgnoreReason::MissingKey(key))?;
    let Value::Array(items) = value else {
        return Err(IgnoreReason::BadShape(key));
    };
    if items.len() != N {
        return Err(IgnoreReason::BadShape(key));
    }

    let numbers: Vec<f64> = items
        .iter()
        .map(|item| item.as_f64().filter(|n| n.is_finite()))
        .collect::<Option<Vec<f64>>>()
        .ok_or(IgnoreReason::BadShape(key))?;

    let mut out = [0.0; N];
    out.copy_from_slice(&numbers);
    Ok(out)
}
