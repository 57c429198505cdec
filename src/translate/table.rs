//! Symbolic-to-executable step translation
//!
//! The vocabulary on both sides is closed and finite, so translation is a
//! plain table lookup: each known object registers the pose triplet used to
//! pick it, each destination the triplet used to place into it. No
//! inference call is involved and the mapping is deterministic by
//! construction.

use crate::core::config::MotionDefaults;
use crate::core::error::{ArmError, Result};
use crate::core::types::{Action, MotionSpace};
use crate::llm::planner::TaskStep;
use std::collections::HashMap;

/// Approach / contact / retreat pose names for one pick or place target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseTriplet {
    pub approach: String,
    pub contact: String,
    pub retreat: String,
}

impl PoseTriplet {
    /// Common case: retreat through the approach pose.
    pub fn via_approach(approach: &str, contact: &str) -> Self {
        Self {
            approach: approach.to_string(),
            contact: contact.to_string(),
            retreat: approach.to_string(),
        }
    }
}

/// Deterministic mapping from task steps to low-level actions.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    pick_triplets: HashMap<String, PoseTriplet>,
    place_triplets: HashMap<String, PoseTriplet>,
    home_target: String,
    defaults: MotionDefaults,
}

impl TranslationTable {
    pub fn new(defaults: MotionDefaults) -> Self {
        Self {
            pick_triplets: HashMap::new(),
            place_triplets: HashMap::new(),
            home_target: "home_j".to_string(),
            defaults,
        }
    }

    /// The canonical workspace: one box on a table, one bin, a home pose.
    pub fn default_workspace(defaults: MotionDefaults) -> Self {
        let mut table = Self::new(defaults);
        table.register_pick("box", PoseTriplet::via_approach("box_approach_l", "box_pick_l"));
        table.register_place(
            "bin_a",
            PoseTriplet::via_approach("bin_a_approach_l", "bin_a_drop_l"),
        );
        table
    }

    pub fn register_pick(&mut self, object: &str, triplet: PoseTriplet) {
        self.pick_triplets.insert(object.to_string(), triplet);
    }

    pub fn register_place(&mut self, destination: &str, triplet: PoseTriplet) {
        self.place_triplets.insert(destination.to_string(), triplet);
    }

    /// Translate one symbolic step into its low-level action.
    pub fn translate(&self, step: &TaskStep) -> Result<Action> {
        let MotionDefaults { speed, acc } = self.defaults;

        let action = match step {
            TaskStep::Pick { object, .. } => {
                let triplet = self.pick_triplets.get(object).ok_or_else(|| {
                    ArmError::UnknownEntity(format!("no pick triplet registered for '{}'", object))
                })?;
                Action::Pick {
                    approach: triplet.approach.clone(),
                    pick: triplet.contact.clone(),
                    retreat: triplet.retreat.clone(),
                    speed,
                    acc,
                }
            }
            TaskStep::Place { to, .. } => {
                let triplet = self.place_triplets.get(to).ok_or_else(|| {
                    ArmError::UnknownEntity(format!("no place triplet registered for '{}'", to))
                })?;
                Action::Place {
                    approach: triplet.approach.clone(),
                    drop: triplet.contact.clone(),
                    retreat: triplet.retreat.clone(),
                    speed,
                    acc,
                }
            }
            TaskStep::GoHome => Action::GoHome {
                target: self.home_target.clone(),
                space: MotionSpace::Joint,
                speed,
                acc,
            },
        };

        Ok(action)
    }
}
