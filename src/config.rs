//! Lattice configuration and lenient parsing of host inputs.
//!
//! Hosts hand over loosely typed values (numbers as strings, toggles as
//! integers). [`LatticeConfig::from_host_inputs`] accepts all of them and
//! falls back to each field's default when a value cannot be read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Which structure the pipeline builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Swept bars along the grid curves.
    #[default]
    Bar,
    /// Planar panels tiling the grid cells.
    Panel,
}

impl Style {
    fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Bar),
            1 => Some(Self::Panel),
            _ => None,
        }
    }
}

/// Cross-section of bar members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarProfileKind {
    /// Circular tube, diameter taken from `thickness`.
    #[default]
    Round,
    /// Rectangular bar, `bar_width` by `bar_height`.
    Rect,
}

impl BarProfileKind {
    fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Round),
            1 => Some(Self::Rect),
            _ => None,
        }
    }
}

/// All parameters of a lattice run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Uniform scale factor applied about the batch centroid.
    pub scale: f64,
    /// Bar network or panel tiling.
    pub style: Style,
    /// Grid divisions along u.
    pub u_divisions: usize,
    /// Grid divisions along v.
    pub v_divisions: usize,
    /// Round bar diameter.
    pub thickness: f64,
    /// Use cell diagonals instead of grid rows and columns.
    pub diagonal: bool,
    /// Bar cross-section.
    pub bar_profile: BarProfileKind,
    /// Rectangular bar width, along the member frame normal.
    pub bar_width: f64,
    /// Rectangular bar height, along the member frame binormal.
    pub bar_height: f64,
    /// Panel inset toward the cell centroid, in `[0, 0.45]`.
    pub inset: f64,
    /// Split each panel cell into two triangles.
    pub triangulate: bool,
    /// Write results to the host document.
    pub bake: bool,
    /// Destination layer name for baking.
    pub layer: String,
    /// Sweep stations for round bars along curved members.
    pub round_stations: usize,
    /// Sweep stations for rectangular bars.
    pub rect_stations: usize,
    /// Polygon sides approximating a round profile.
    pub radial_segments: usize,
    /// Maximum out-of-plane deviation of a panel.
    pub tolerance: f64,
}

/// Upper bound of the panel inset fraction.
pub const MAX_INSET: f64 = 0.45;
/// Smallest allowed grid division count.
pub const MIN_DIVISIONS: usize = 2;
/// Largest allowed grid division count.
pub const MAX_DIVISIONS: usize = 1000;
/// Largest allowed station or side count of a single sweep.
pub const MAX_SWEEP_SAMPLES: usize = 256;
/// Smallest allowed station count for rectangular sweeps.
pub const MIN_RECT_STATIONS: usize = 12;
/// Smallest allowed side count for round profiles.
pub const MIN_RADIAL_SEGMENTS: usize = 3;

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            scale: 6.0,
            style: Style::Bar,
            u_divisions: 20,
            v_divisions: 12,
            thickness: 0.5,
            diagonal: false,
            bar_profile: BarProfileKind::Round,
            bar_width: 0.5,
            bar_height: 0.3,
            inset: 0.10,
            triangulate: false,
            bake: false,
            layer: "fabrication".into(),
            round_stations: 16,
            rect_stations: 12,
            radial_segments: 12,
            tolerance: 1e-3,
        }
    }
}

impl LatticeConfig {
    /// Reads a config from host input values keyed by port name.
    ///
    /// Missing or unreadable values take their defaults; numeric values are
    /// then floored and clamped into range.
    #[must_use]
    pub fn from_host_inputs(inputs: &Map<String, Value>) -> Self {
        let d = Self::default();
        let num = |key: &str, default: f64| read_field(inputs, key, as_f64).unwrap_or(default);
        let int = |key: &str, default: usize| {
            read_field(inputs, key, as_i64)
                .map_or(default, |n| usize::try_from(n).unwrap_or(0))
        };
        let flag = |key: &str, default: bool| read_field(inputs, key, as_bool).unwrap_or(default);

        Self {
            scale: num("scale", d.scale),
            style: read_field(inputs, "style", as_i64)
                .and_then(Style::from_index)
                .unwrap_or(d.style),
            u_divisions: int("u_div", d.u_divisions),
            v_divisions: int("v_div", d.v_divisions),
            thickness: num("thickness", d.thickness),
            diagonal: flag("diagonal", d.diagonal),
            bar_profile: read_field(inputs, "bar_profile", as_i64)
                .and_then(BarProfileKind::from_index)
                .unwrap_or(d.bar_profile),
            bar_width: num("bar_w", d.bar_width),
            bar_height: num("bar_h", d.bar_height),
            inset: num("inset", d.inset),
            triangulate: flag("triangulate", d.triangulate),
            bake: flag("bake", d.bake),
            layer: read_field(inputs, "layer", as_text).unwrap_or(d.layer),
            round_stations: int("round_stations", d.round_stations),
            rect_stations: int("rect_stations", d.rect_stations),
            radial_segments: int("radial_segments", d.radial_segments),
            tolerance: num("tolerance", d.tolerance),
        }
        .sanitized()
    }

    /// Reads a config from a JSON object of host inputs.
    ///
    /// Text that is not a JSON object yields the default config.
    #[must_use]
    pub fn from_json_str(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => Self::from_host_inputs(&map),
            Ok(other) => {
                warn!(kind = json_kind(&other), "config is not a JSON object; using defaults");
                Self::default()
            }
            Err(err) => {
                warn!(%err, "config is not valid JSON; using defaults");
                Self::default()
            }
        }
    }

    /// Replaces out-of-range values with defaults, floors and clamps.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let positive = |value: f64, default: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                default
            }
        };
        Self {
            scale: positive(self.scale, d.scale),
            thickness: positive(self.thickness, d.thickness),
            bar_width: positive(self.bar_width, d.bar_width),
            bar_height: positive(self.bar_height, d.bar_height),
            tolerance: positive(self.tolerance, d.tolerance),
            inset: if self.inset.is_finite() {
                self.inset.clamp(0.0, MAX_INSET)
            } else {
                d.inset
            },
            u_divisions: self.u_divisions.clamp(MIN_DIVISIONS, MAX_DIVISIONS),
            v_divisions: self.v_divisions.clamp(MIN_DIVISIONS, MAX_DIVISIONS),
            round_stations: self.round_stations.clamp(2, MAX_SWEEP_SAMPLES),
            rect_stations: self.rect_stations.clamp(MIN_RECT_STATIONS, MAX_SWEEP_SAMPLES),
            radial_segments: self.radial_segments.clamp(MIN_RADIAL_SEGMENTS, MAX_SWEEP_SAMPLES),
            ..self
        }
    }

    /// Sets the scale factor.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the structure style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sets the grid divisions.
    #[must_use]
    pub fn with_divisions(mut self, u: usize, v: usize) -> Self {
        self.u_divisions = u;
        self.v_divisions = v;
        self
    }

    /// Sets the round bar diameter.
    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Enables or disables diagonal members.
    #[must_use]
    pub fn with_diagonal(mut self, diagonal: bool) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Sets the bar profile.
    #[must_use]
    pub fn with_bar_profile(mut self, profile: BarProfileKind) -> Self {
        self.bar_profile = profile;
        self
    }

    /// Sets the rectangular bar section.
    #[must_use]
    pub fn with_bar_size(mut self, width: f64, height: f64) -> Self {
        self.bar_width = width;
        self.bar_height = height;
        self
    }

    /// Sets the panel inset fraction.
    #[must_use]
    pub fn with_inset(mut self, inset: f64) -> Self {
        self.inset = inset;
        self
    }

    /// Enables or disables panel triangulation.
    #[must_use]
    pub fn with_triangulate(mut self, triangulate: bool) -> Self {
        self.triangulate = triangulate;
        self
    }

    /// Enables baking to the named layer.
    #[must_use]
    pub fn with_bake(mut self, layer: impl Into<String>) -> Self {
        self.bake = true;
        self.layer = layer.into();
        self
    }
}

/// Looks up `key` and converts it, logging values that do not convert.
fn read_field<T>(inputs: &Map<String, Value>, key: &str, convert: fn(&Value) -> Option<T>) -> Option<T> {
    let value = inputs.get(key)?;
    let converted = convert(value);
    if converted.is_none() {
        warn!(key, %value, "unreadable host input; using default");
    }
    converted
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < 9.0e15)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.abs() < 9.0e15)
                    .map(|f| f.trunc() as i64)
            })
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The control a host should present for a parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterKind {
    /// A numeric slider.
    Slider {
        default: f64,
        min: f64,
        max: f64,
        decimals: u32,
    },
    /// A true/false toggle.
    Toggle { default: bool },
    /// An indexed value list.
    Choice {
        default: usize,
        options: &'static [&'static str],
    },
    /// A free text panel.
    Text { default: &'static str },
}

/// A host-facing input of the lattice component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    /// Input name, matching the key read by [`LatticeConfig::from_host_inputs`].
    pub name: &'static str,
    /// Short description for tooltips.
    pub description: &'static str,
    /// Control kind with its default and range.
    #[serde(flatten)]
    pub kind: ParameterKind,
}

/// The host-facing inputs, in port order after the geometry input.
#[must_use]
pub fn parameter_descriptors() -> Vec<ParameterDescriptor> {
    let slider = |name, description, default, min, max, decimals| ParameterDescriptor {
        name,
        description,
        kind: ParameterKind::Slider {
            default,
            min,
            max,
            decimals,
        },
    };
    let toggle = |name, description| ParameterDescriptor {
        name,
        description,
        kind: ParameterKind::Toggle { default: false },
    };
    vec![
        slider("scale", "Uniform scale about the batch centroid", 6.0, 1.0, 10.0, 0),
        ParameterDescriptor {
            name: "style",
            description: "Bar network or panel tiling",
            kind: ParameterKind::Choice {
                default: 0,
                options: &["bar", "panel"],
            },
        },
        slider("u_div", "Grid divisions along u", 20.0, 2.0, 100.0, 0),
        slider("v_div", "Grid divisions along v", 12.0, 2.0, 100.0, 0),
        slider("thickness", "Round bar diameter", 0.5, 0.01, 5.0, 2),
        toggle("diagonal", "Use cell diagonals as members"),
        ParameterDescriptor {
            name: "bar_profile",
            description: "Bar cross-section",
            kind: ParameterKind::Choice {
                default: 0,
                options: &["round", "rect"],
            },
        },
        slider("bar_w", "Rectangular bar width", 0.5, 0.01, 5.0, 2),
        slider("bar_h", "Rectangular bar height", 0.3, 0.01, 5.0, 2),
        slider("inset", "Panel inset toward the cell centroid", 0.10, 0.0, MAX_INSET, 2),
        toggle("triangulate", "Split panels into triangles"),
        toggle("bake", "Write results to the document"),
        ParameterDescriptor {
            name: "layer",
            description: "Destination layer for baking",
            kind: ParameterKind::Text { default: "fabrication" },
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> LatticeConfig {
        match value {
            Value::Object(map) => LatticeConfig::from_host_inputs(&map),
            _ => panic!("test inputs are objects"),
        }
    }

    #[test]
    fn empty_inputs_give_defaults() {
        assert_eq!(parse(json!({})), LatticeConfig::default());
    }

    #[test]
    fn numbers_accept_strings_and_fall_back() {
        let config = parse(json!({
            "scale": "2.5",
            "u_div": 7.9,
            "v_div": "abc",
            "thickness": -1.0,
            "bar_w": "0.8",
        }));
        assert!((config.scale - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.u_divisions, 7);
        assert_eq!(config.v_divisions, 12);
        assert!((config.thickness - 0.5).abs() < f64::EPSILON);
        assert!((config.bar_width - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn bools_accept_many_spellings() {
        let config = parse(json!({"diagonal": 1, "triangulate": "yes", "bake": "False"}));
        assert!(config.diagonal);
        assert!(config.triangulate);
        assert!(!config.bake);
        let config = parse(json!({"diagonal": "maybe"}));
        assert!(!config.diagonal);
    }

    #[test]
    fn ranges_are_floored_and_clamped() {
        let config = parse(json!({
            "u_div": 0,
            "v_div": -4,
            "inset": 0.9,
            "rect_stations": 3,
            "radial_segments": 1,
        }));
        assert_eq!(config.u_divisions, MIN_DIVISIONS);
        assert_eq!(config.v_divisions, MIN_DIVISIONS);
        assert!((config.inset - MAX_INSET).abs() < f64::EPSILON);
        assert_eq!(config.rect_stations, MIN_RECT_STATIONS);
        assert_eq!(config.radial_segments, MIN_RADIAL_SEGMENTS);
        assert!(parse(json!({"inset": -0.2})).inset.abs() < f64::EPSILON);
    }

    #[test]
    fn huge_counts_are_capped() {
        let config = LatticeConfig::from_json_str(r#"{"u_div": "1e13", "v_div": 12, "style": 1}"#);
        assert_eq!(config.u_divisions, MAX_DIVISIONS);
        assert_eq!(config.v_divisions, 12);
        assert_eq!(config.style, Style::Panel);

        let config = parse(json!({"v_div": 5000, "round_stations": 1e9, "radial_segments": 100_000}));
        assert_eq!(config.v_divisions, MAX_DIVISIONS);
        assert_eq!(config.round_stations, MAX_SWEEP_SAMPLES);
        assert_eq!(config.radial_segments, MAX_SWEEP_SAMPLES);

        let config = LatticeConfig::default().with_divisions(usize::MAX, 3).sanitized();
        assert_eq!(config.u_divisions, MAX_DIVISIONS);
    }

    #[test]
    fn style_and_profile_indices() {
        let config = parse(json!({"style": 1, "bar_profile": "1"}));
        assert_eq!(config.style, Style::Panel);
        assert_eq!(config.bar_profile, BarProfileKind::Rect);
        let config = parse(json!({"style": 5}));
        assert_eq!(config.style, Style::Bar);
    }

    #[test]
    fn invalid_json_gives_defaults() {
        assert_eq!(LatticeConfig::from_json_str("{not json"), LatticeConfig::default());
        assert_eq!(LatticeConfig::from_json_str("[1, 2]"), LatticeConfig::default());
        let config = LatticeConfig::from_json_str(r#"{"layer": "panels", "scale": 3}"#);
        assert_eq!(config.layer, "panels");
        assert!((config.scale - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn typed_config_round_trips_with_defaults() {
        let config: LatticeConfig = serde_json::from_str(r#"{"style": "panel"}"#).unwrap();
        assert_eq!(config.style, Style::Panel);
        assert_eq!(config.u_divisions, 20);
    }

    #[test]
    fn descriptors_cover_host_keys() {
        let descriptors = parameter_descriptors();
        let names: Vec<_> = descriptors.iter().map(|d| d.name).collect();
        for key in ["scale", "style", "u_div", "v_div", "inset", "bake", "layer"] {
            assert!(names.contains(&key), "missing {key}");
        }
        let scale = &descriptors[0];
        assert_eq!(
            scale.kind,
            ParameterKind::Slider {
                default: 6.0,
                min: 1.0,
                max: 10.0,
                decimals: 0
            }
        );
    }
}
