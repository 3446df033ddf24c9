use serde::{Deserialize, Serialize};

use crate::core::body::BodyParams;

/// Body manifest describing every orbiting body of a scene.
/// Loaded from a JSON file at startup; validated by `BodyTable`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyManifest {
    pub bodies: Vec<BodyParams>,
}

impl BodyManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "bodies": [
                { "name": "Earth", "radius": 1.2, "texture": "textures/earth.jpg",
                  "a": 16.0, "b": 15.98, "period": 365.0 }
            ]
        }"#;
        let manifest = BodyManifest::from_json(json).unwrap();
        assert_eq!(manifest.bodies.len(), 1);
        assert_eq!(manifest.bodies[0].inclination, 0.0);
        assert!(manifest.bodies[0].ring.is_none());
    }

    #[test]
    fn missing_axis_is_an_error() {
        let json = r#"{ "bodies": [ { "name": "Earth", "radius": 1.2, "texture": "", "b": 1.0, "period": 1.0 } ] }"#;
        assert!(BodyManifest::from_json(json).is_err());
    }
}
