use crate::params::bundle::ProjectionKind;

/// Fixed geometry freezes skip/symmetry at generation; evolving re-derives them over time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Fixed,
    Evolving,
}

/// Orthogonal render-engine switches. Configuration, not digest-derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineFeatures {
    pub parallax: bool,
    pub tilt_3d: bool,
    pub fold_4d: bool,
    pub lissajous: bool,
    pub style: Style,
    /// Replace the digest-selected projection.
    pub projection_override: Option<ProjectionKind>,
}

impl Default for EngineFeatures {
    fn default() -> Self {
        Self {
            parallax: true,
            tilt_3d: false,
            fold_4d: false,
            lissajous: true,
            style: Style::Fixed,
            projection_override: None,
        }
    }
}

impl EngineFeatures {
    /// Every optional layer switched on: parallax, 3D tilt, 4D fold, evolving geometry.
    pub fn cosmic() -> Self {
        Self {
            parallax: true,
            tilt_3d: true,
            fold_4d: true,
            lissajous: true,
            style: Style::Evolving,
            projection_override: None,
        }
    }

    /// Flat rendering: no parallax, no depth rotation, fixed geometry.
    pub fn flat() -> Self {
        Self {
            parallax: false,
            tilt_3d: false,
            fold_4d: false,
            lissajous: false,
            style: Style::Fixed,
            projection_override: None,
        }
    }
}
