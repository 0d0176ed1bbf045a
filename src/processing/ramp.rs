// src/processing/ramp.rs
//! Piecewise-linear color ramp over `[0, 1]`.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RampError;
use crate::utils::Color;

/// A control point: position in `[0, 1]` mapped to a color.
///
/// Serialized as a `[position, color]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, Color)", into = "(f32, Color)")]
pub struct ColorStop {
    pub position: f32,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }

    pub const fn packed(position: f32, packed: u32) -> Self {
        Self::new(position, Color::from_packed(packed))
    }
}

impl From<(f32, Color)> for ColorStop {
    fn from((position, color): (f32, Color)) -> Self {
        Self::new(position, color)
    }
}

impl From<ColorStop> for (f32, Color) {
    fn from(stop: ColorStop) -> Self {
        (stop.position, stop.color)
    }
}

/// Dark purple -> magenta -> orange -> yellow, used for burn-scar rendering.
pub const BURN_SCAR_STOPS: [ColorStop; 4] = [
    ColorStop::packed(0.0, 0x140b34),
    ColorStop::packed(0.25, 0x84206b),
    ColorStop::packed(0.75, 0xe55c30),
    ColorStop::packed(1.0, 0xf6d746),
];

/// Immutable color ramp. Control points are validated once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct ColorRamp {
    stops: Box<[ColorStop]>,
}

impl ColorRamp {
    pub fn new(stops: impl Into<Vec<ColorStop>>) -> Result<Self, RampError> {
        let stops = stops.into();
        if let Err(err) = validate(&stops) {
            warn!("Rejected color ramp: {}", err);
            return Err(err);
        }

        debug!(stops = stops.len(), "Color ramp constructed");
        Ok(Self {
            stops: stops.into_boxed_slice(),
        })
    }

    pub fn burn_scar() -> Self {
        Self {
            stops: BURN_SCAR_STOPS.to_vec().into_boxed_slice(),
        }
    }

    /// Parse a ramp from its JSON form, e.g. `[[0, "#140b34"], [1, 16177990]]`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Map `value` to a color.
    ///
    /// Callers are expected to keep `value` inside `[0, 1]`. Anything below the
    /// first stop (including NaN) yields the first color and anything above the
    /// last stop yields the last color.
    pub fn process(&self, value: f32) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::BLACK,
        };

        if value.is_nan() || value <= first.position {
            return first.color;
        }
        if value >= last.position {
            return last.color;
        }

        self.stops
            .iter()
            .tuple_windows()
            .find(|(_, upper)| value <= upper.position)
            .map_or(last.color, |(lower, upper)| interpolate(lower, upper, value))
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::burn_scar()
    }
}

impl TryFrom<Vec<ColorStop>> for ColorRamp {
    type Error = RampError;

    fn try_from(stops: Vec<ColorStop>) -> Result<Self, Self::Error> {
        Self::new(stops)
    }
}

impl From<ColorRamp> for Vec<ColorStop> {
    fn from(ramp: ColorRamp) -> Self {
        ramp.stops.into_vec()
    }
}

fn interpolate(lower: &ColorStop, upper: &ColorStop, value: f32) -> Color {
    if value == upper.position {
        return upper.color;
    }
    let span = upper.position - lower.position;
    if value == lower.position || span <= 0.0 {
        return lower.color;
    }

    let t = (value - lower.position) / span;
    lower.color.lerp(upper.color, t)
}

fn validate(stops: &[ColorStop]) -> Result<(), RampError> {
    if stops.len() < 2 {
        return Err(RampError::TooFewStops(stops.len()));
    }

    if let Some((index, stop)) = stops.iter().find_position(|s| !s.position.is_finite()) {
        return Err(RampError::NonFinitePosition {
            index,
            position: stop.position,
        });
    }

    let (first, last) = (stops[0].position, stops[stops.len() - 1].position);
    if first != 0.0 {
        return Err(RampError::StartNotZero(first));
    }
    if last != 1.0 {
        return Err(RampError::EndNotOne(last));
    }

    if let Some((index, (previous, next))) = stops
        .iter()
        .tuple_windows()
        .find_position(|(previous, next)| next.position <= previous.position)
    {
        return Err(RampError::NotAscending {
            index: index + 1,
            previous: previous.position,
            next: next.position,
        });
    }

    Ok(())
}
