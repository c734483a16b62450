//! Colour scales shared by every view.
//!
//! A value is normalised over the observed `[min, max]` of its dataset, then
//! interpolated piecewise-linearly between gradient stops. Missing values,
//! non-finite values and degenerate ranges (`min == max`) get the gradient's
//! placeholder colour.

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Observed bounds of a metric over the current dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Bounds over the present, finite values; `None` if there are none.
    pub fn observe<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    /// Position of `value` in the range, clamped to `[0, 1]`.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() || self.is_degenerate() {
            return None;
        }
        Some(((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    /// Normalised position in `[0, 1]`, stops sorted ascending.
    pub at: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    stops: &'static [Stop],
    placeholder: Rgb,
}

/// Red → yellow → green, for "higher is better" metrics (APL).
pub const APL_SCALE: Gradient = Gradient::new(APL_STOPS, Rgb::new(238, 238, 238));

const APL_STOPS: &[Stop] = &[
    Stop { at: 0.0, color: Rgb::new(255, 55, 100) },
    Stop { at: 0.5, color: Rgb::new(255, 200, 100) },
    Stop { at: 1.0, color: Rgb::new(0, 200, 100) },
];

/// Light blue → dark blue, for pressure ratios (visits per doctor).
pub const PRESSURE_SCALE: Gradient = Gradient::new(PRESSURE_STOPS, Rgb::new(224, 231, 239));

const PRESSURE_STOPS: &[Stop] = &[
    Stop { at: 0.0, color: Rgb::new(224, 242, 254) },
    Stop { at: 1.0, color: Rgb::new(14, 41, 84) },
];

impl Gradient {
    pub const fn new(stops: &'static [Stop], placeholder: Rgb) -> Self {
        Self { stops, placeholder }
    }

    pub fn placeholder(&self) -> Rgb {
        self.placeholder
    }

    /// Colour at normalised position `t`.
    pub fn color_at(&self, t: f64) -> Rgb {
        if !t.is_finite() {
            return self.placeholder;
        }
        let t = t.clamp(0.0, 1.0);

        let Some(first) = self.stops.first() else {
            return self.placeholder;
        };
        if t <= first.at {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if t <= to.at {
                let span = to.at - from.at;
                let local = if span > 0.0 { (t - from.at) / span } else { 1.0 };
                return lerp(from.color, to.color, local);
            }
        }

        self.stops.last().map_or(self.placeholder, |s| s.color)
    }

    /// Colour of `value` relative to `range`.
    pub fn color_for(&self, value: Option<f64>, range: Option<ValueRange>) -> Rgb {
        match (value, range) {
            (Some(v), Some(r)) => r.normalize(v).map_or(self.placeholder, |t| self.color_at(t)),
            _ => self.placeholder,
        }
    }

    /// CSS `linear-gradient` for legends.
    pub fn css_linear_gradient(&self) -> String {
        let stops: Vec<String> = self
            .stops
            .iter()
            .map(|s| format!("{} {}%", s.color, (s.at * 100.0).round()))
            .collect();
        format!("linear-gradient(to right, {})", stops.join(", "))
    }
}

fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp_channel(from.r, to.r, t),
        lerp_channel(from.g, to.g, t),
        lerp_channel(from.b, to.b, t),
    )
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let (from, to) = (f64::from(from), f64::from(to));
    (from + (to - from) * t).round().clamp(0.0, 255.0) as u8
}
