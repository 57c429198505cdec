//! Static pose library
//!
//! Named waypoints taught on the physical arm. The store is a flat JSON
//! object keyed by pose name; it is loaded once at startup and immutable for
//! the life of the process. The translator and executor only ever refer to
//! poses by name, so this library is the single source of robot geometry.

use crate::core::error::{ArmError, Result};
use crate::core::types::MotionSpace;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// A named 6-dimensional target, either joint-space or Cartesian.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub name: String,
    pub kind: MotionSpace,
    pub values: [f64; 6],
}

/// On-disk entry shape: `{"kind": "joint"|"cartesian", "values": [6 floats]}`.
#[derive(Debug, Deserialize)]
struct PoseEntry {
    kind: MotionSpace,
    values: Vec<f64>,
}

/// Lookup table from pose name to taught pose.
#[derive(Debug, Default)]
pub struct PoseLibrary {
    poses: HashMap<String, Pose>,
}

impl PoseLibrary {
    /// Load the pose store from a JSON file.
    ///
    /// A missing file, malformed JSON, or an entry with the wrong vector
    /// length all fail with `ArmError::Config`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ArmError::Config(format!("cannot read pose store {}: {}", path.display(), e))
        })?;
        Self::from_json(&content).map_err(|e| match e {
            ArmError::Config(msg) => ArmError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse a pose store from its JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: HashMap<String, PoseEntry> = serde_json::from_str(content)
            .map_err(|e| ArmError::Config(format!("malformed pose store: {}", e)))?;

        let mut poses = HashMap::with_capacity(raw.len());
        for (name, entry) in raw {
            let values: [f64; 6] = entry.values.as_slice().try_into().map_err(|_| {
                ArmError::Config(format!(
                    "pose '{}' has {} values, expected 6",
                    name,
                    entry.values.len()
                ))
            })?;
            poses.insert(
                name.clone(),
                Pose {
                    name,
                    kind: entry.kind,
                    values,
                },
            );
        }

        Ok(Self { poses })
    }

    /// Look up a pose by name.
    pub fn resolve(&self, name: &str) -> Result<&Pose> {
        self.poses
            .get(name)
            .ok_or_else(|| ArmError::UnknownPose(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.poses.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Pose names in sorted order, for diagnostics.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.poses.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE: &str = r#"{
        "home_j": {"kind": "joint", "values": [0.0, -1.57, 1.57, 0.0, 1.57, 0.0]},
        "box_approach_l": {"kind": "cartesian", "values": [0.35, -0.2, 0.25, 2.22, -2.22, 0.0]}
    }"#;

    #[test]
    fn test_from_json_and_resolve() {
        let library = PoseLibrary::from_json(STORE).unwrap();
        assert_eq!(library.len(), 2);

        let home = library.resolve("home_j").unwrap();
        assert_eq!(home.kind, MotionSpace::Joint);
        assert_eq!(home.values[1], -1.57);

        let approach = library.resolve("box_approach_l").unwrap();
        assert_eq!(approach.kind, MotionSpace::Cartesian);
    }

    #[test]
    fn test_resolve_unknown_pose() {
        let library = PoseLibrary::from_json(STORE).unwrap();
        let err = library.resolve("bin_b_drop_l").unwrap_err();
        assert!(matches!(err, ArmError::UnknownPose(name) if name == "bin_b_drop_l"));
    }

    #[test]
    fn test_wrong_vector_length_rejected() {
        let bad = r#"{"home_j": {"kind": "joint", "values": [0.0, 1.0, 2.0]}}"#;
        let err = PoseLibrary::from_json(bad).unwrap_err();
        assert!(matches!(err, ArmError::Config(msg) if msg.contains("expected 6")));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let bad = r#"{"home_j": {"kind": "spherical", "values": [0,0,0,0,0,0]}}"#;
        assert!(PoseLibrary::from_json(bad).is_err());
    }

    #[test]
    fn test_non_json_rejected() {
        assert!(PoseLibrary::from_json("not json at all").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = PoseLibrary::load(Path::new("/nonexistent/poses.json")).unwrap_err();
        assert!(matches!(err, ArmError::Config(_)));
    }

    #[test]
    fn test_load_shipped_store() {
        let path = Path::new("data/poses.json");
        if path.exists() {
            let library = PoseLibrary::load(path).unwrap();
            assert!(library.contains("home_j"));
            assert!(library.contains("box_pick_l"));
            assert!(library.contains("bin_a_drop_l"));
        }
    }
}
