//! Unit-circle geometry and the serializable chart view descriptor
//!
//! Positions are in screen space: `x` grows right, `y` grows down. The preview
//! and the full-screen diagram share [`UnitCircle::point`] and differ only in
//! size.

use reqwest::Url;
use std::f64::consts::PI;
use thiserror::Error;

/// Origin used when a descriptor is given as a bare query string
const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

/// Value of the `mode` parameter that selects the diagram view
pub const CHART_MODE: &str = "chart";

/// A square drawing area with a circle centred in it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCircle {
    pub size: f64,
    pub radius: f64,
}

/// Inline preview next to a result
pub const PREVIEW: UnitCircle = UnitCircle {
    size: 160.0,
    radius: 60.0,
};

/// Full-screen diagram
pub const FULL: UnitCircle = UnitCircle {
    size: 800.0,
    radius: 300.0,
};

/// Radius of the angle arc drawn in the full diagram
pub const ARC_RADIUS: f64 = 50.0;

impl UnitCircle {
    pub fn center(&self) -> f64 {
        self.size / 2.0
    }

    /// Terminal point of `angle_deg` on the circle.
    ///
    /// `y` uses `sin(-θ)` because screen space grows downward.
    pub fn point(&self, angle_deg: f64) -> (f64, f64) {
        self.point_at(angle_deg, self.radius)
    }

    /// Points along the arc from 0° to `angle_deg` at `radius`
    pub fn arc(&self, angle_deg: f64, radius: f64, steps: usize) -> Vec<(f64, f64)> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| self.point_at(angle_deg * i as f64 / steps as f64, radius))
            .collect()
    }

    fn point_at(&self, angle_deg: f64, radius: f64) -> (f64, f64) {
        let rad = angle_deg * PI / 180.0;
        let center = self.center();
        (center + radius * rad.cos(), center + radius * (-rad).sin())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("invalid chart URL: {0}")]
    InvalidUrl(String),

    #[error("not a chart view (mode={0:?})")]
    NotAChart(Option<String>),
}

/// Everything needed to redraw a diagram in another context
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDescriptor {
    /// Angle in degrees
    pub angle: f64,
    /// Pre-rendered coordinate label (LaTeX)
    pub coords: Option<String>,
}

impl ViewDescriptor {
    pub fn new(angle: f64, coords: Option<String>) -> Self {
        ViewDescriptor {
            angle,
            coords: coords.filter(|c| !c.is_empty()),
        }
    }

    /// Encode as `origin?mode=chart&angle=..&coords=..`
    pub fn to_url(&self, origin: &str) -> Result<Url, ViewError> {
        let angle = self.angle.to_string();
        let coords = self.coords.as_deref().unwrap_or("");
        Url::parse_with_params(
            origin,
            &[("mode", CHART_MODE), ("angle", angle.as_str()), ("coords", coords)],
        )
        .map_err(|e| ViewError::InvalidUrl(e.to_string()))
    }

    /// Decode a full URL, `?query` or bare `query`.
    ///
    /// `angle` is read up to the first character that cannot continue a
    /// number, so `30deg` is 30. One with no numeric prefix reads as 0; an
    /// empty `coords` reads as none.
    pub fn from_url(input: &str) -> Result<Self, ViewError> {
        let url = match Url::parse(input) {
            Ok(url) => url,
            Err(_) => {
                let query = input.trim_start_matches('?');
                Url::parse(&format!("{}?{}", PLACEHOLDER_ORIGIN, query))
                    .map_err(|e| ViewError::InvalidUrl(e.to_string()))?
            }
        };

        let mut mode = None;
        let mut angle = None;
        let mut coords = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "mode" => mode = Some(value.into_owned()),
                "angle" => angle = Some(value.into_owned()),
                "coords" => coords = Some(value.into_owned()),
                _ => {}
            }
        }

        if mode.as_deref() != Some(CHART_MODE) {
            return Err(ViewError::NotAChart(mode));
        }

        let angle = angle
            .as_deref()
            .and_then(leading_number)
            .filter(|a| a.is_finite())
            .unwrap_or(0.0);

        Ok(ViewDescriptor::new(angle, coords))
    }

    /// Caption shown under the diagram
    pub fn caption(&self) -> Option<&str> {
        self.coords.as_deref()
    }
}

/// Parse the longest prefix of `text` (after leading whitespace) that forms a
/// decimal number with optional sign, fraction and exponent
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    text[..end].parse().ok()
}
