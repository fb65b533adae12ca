//! Scene-wide display defaults, loaded from JSON
//!
//! ```json
//! {
//!     "pointscolor": [0.1, 0.1, 0.1, 1.0],
//!     "linescolor": [0.2, 0.2, 0.2, 1.0],
//!     "facescolor": [0.9, 0.9, 0.9, 1.0],
//!     "show_points": false,
//!     "show_lines": true,
//!     "show_faces": true,
//!     "lineswidth": 1.0,
//!     "pointssize": 6.0,
//!     "opacity": 1.0,
//!     "hide_coplanaredges": false
//! }
//! ```
//!
//! The three colors become the `_default` entries of every object's color
//! maps, so they are required.

use meshview_core::{Color, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default appearance of scene objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub pointscolor: Color,
    pub linescolor: Color,
    pub facescolor: Color,
    pub show_points: bool,
    pub show_lines: bool,
    pub show_faces: bool,
    pub lineswidth: f32,
    pub pointssize: f32,
    pub opacity: f32,
    pub hide_coplanaredges: bool,
    #[serde(default)]
    pub use_vertexcolors: bool,
}

impl SceneConfig {
    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SceneConfig =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Reject values no renderer can honor
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::Config(format!("opacity {} outside [0, 1]", self.opacity)));
        }
        if self.pointssize <= 0.0 {
            return Err(Error::Config(format!("pointssize {} must be positive", self.pointssize)));
        }
        if self.lineswidth <= 0.0 {
            return Err(Error::Config(format!("lineswidth {} must be positive", self.lineswidth)));
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            pointscolor: Color::new(0.1, 0.1, 0.1),
            linescolor: Color::new(0.2, 0.2, 0.2),
            facescolor: Color::new(0.9, 0.9, 0.9),
            show_points: false,
            show_lines: true,
            show_faces: true,
            lineswidth: 1.0,
            pointssize: 6.0,
            opacity: 1.0,
            hide_coplanaredges: false,
            use_vertexcolors: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE_JSON: &str = r#"{
        "pointscolor": [0.1, 0.1, 0.1, 1.0],
        "linescolor": [0.2, 0.2, 0.2],
        "facescolor": [0.9, 0.9, 0.9, 1.0],
        "show_points": true,
        "show_lines": true,
        "show_faces": false,
        "lineswidth": 2.0,
        "pointssize": 4.0,
        "opacity": 0.5,
        "hide_coplanaredges": true
    }"#;

    #[test]
    fn test_parse_scene_config() {
        let config = SceneConfig::from_json_str(SCENE_JSON).unwrap();
        assert_eq!(config.linescolor, Color::new(0.2, 0.2, 0.2));
        assert!(config.show_points);
        assert!(!config.show_faces);
        assert!(config.hide_coplanaredges);
        assert!(!config.use_vertexcolors);
        assert_eq!(config.opacity, 0.5);
    }

    #[test]
    fn test_missing_default_color_is_rejected() {
        let json = SCENE_JSON.replace(r#""facescolor": [0.9, 0.9, 0.9, 1.0],"#, "");
        assert!(matches!(SceneConfig::from_json_str(&json), Err(Error::Config(_))));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let json = SCENE_JSON.replace(r#""opacity": 0.5"#, r#""opacity": 1.5"#);
        assert!(SceneConfig::from_json_str(&json).is_err());

        let json = SCENE_JSON.replace(r#""pointssize": 4.0"#, r#""pointssize": 0.0"#);
        assert!(SceneConfig::from_json_str(&json).is_err());
    }

    #[test]
    fn test_default_survives_json() {
        let config = SceneConfig::default();
        let json = config.to_json_string().unwrap();
        assert_eq!(SceneConfig::from_json_str(&json).unwrap(), config);
    }
}
