//! Direct single-action commander
//!
//! Bypass path for jog-style commands ("move left", "go above the box"):
//! one inference call maps the text straight to a single low-level action
//! instead of a multi-step plan. This is the only path that produces
//! `go_pose` and `joint_move` actions.

use crate::core::error::{ArmError, Result};
use crate::core::types::Action;
use crate::llm::client::LlmClient;
use crate::llm::extract_json;

/// Map a short natural-language command to one low-level action.
pub async fn direct_command(client: &LlmClient, command: &str) -> Result<Action> {
    tracing::info!(command, "calling direct commander");
    let response = client.complete(COMMANDER_SYSTEM_PROMPT, command).await?;
    parse_action_response(&response)
}

/// Parse and validate a commander response. Pure; exercised directly in tests.
pub fn parse_action_response(response: &str) -> Result<Action> {
    let json_str = extract_json(response)?;

    let action: Action = serde_json::from_str(json_str).map_err(|e| {
        ArmError::Translation(format!(
            "commander output is not a valid action: {} - response: {}",
            e, response
        ))
    })?;

    action.ensure_valid()?;
    Ok(action)
}

/// System prompt for the direct commander
const COMMANDER_SYSTEM_PROMPT: &str = r#"You translate human commands into robot action JSON.

Schema options:
- {"action":"go_home","target":"home_j","space":"joint","speed":0.2,"acc":0.5}
- {"action":"go_pose","target":"<pose_name>","speed":0.2,"acc":0.5}
- {"action":"joint_move","joint":<index>,"delta":<float>,"speed":0.2,"acc":0.5}

Available named poses:
"home_j",
"box_approach_l",
"box_pick_l",
"bin_a_approach_l",
"bin_a_drop_l"

Mappings:
- "go home" -> action go_home
- "go above the box" -> go_pose box_approach_l
- "move to pick position" -> go_pose box_pick_l
- "go above bin A" -> go_pose bin_a_approach_l
- "drop inside bin A" -> go_pose bin_a_drop_l
- "move left" -> {"action":"joint_move","joint":1,"delta":-0.1,"speed":0.2,"acc":0.5}
- "move right" -> {"action":"joint_move","joint":1,"delta":0.1,"speed":0.2,"acc":0.5}
- "move up" -> {"action":"joint_move","joint":2,"delta":-0.1,"speed":0.2,"acc":0.5}
- "move down" -> {"action":"joint_move","joint":2,"delta":0.1,"speed":0.2,"acc":0.5}

Rules:
- Output ONLY minified JSON (no markdown).
- speed=0.2 acc=0.5 unless the user provides different values.
- joint index must be 0-5.
- Never invent new pose names.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MotionSpace;

    #[test]
    fn test_parse_go_pose() {
        let action =
            parse_action_response(r#"{"action":"go_pose","target":"box_approach_l","speed":0.2,"acc":0.5}"#)
                .unwrap();
        assert_eq!(
            action,
            Action::GoPose {
                target: "box_approach_l".into(),
                speed: 0.2,
                acc: 0.5
            }
        );
    }

    #[test]
    fn test_parse_joint_move() {
        let action =
            parse_action_response(r#"{"action":"joint_move","joint":1,"delta":-0.1,"speed":0.2,"acc":0.5}"#)
                .unwrap();
        assert_eq!(
            action,
            Action::JointMove {
                joint: 1,
                delta: -0.1,
                speed: 0.2,
                acc: 0.5
            }
        );
    }

    #[test]
    fn test_parse_go_home() {
        let action = parse_action_response(
            r#"{"action":"go_home","target":"home_j","space":"joint","speed":0.2,"acc":0.5}"#,
        )
        .unwrap();
        assert!(matches!(
            action,
            Action::GoHome { space: MotionSpace::Joint, .. }
        ));
    }

    #[test]
    fn test_jog_mappings_match_prompt_examples() {
        // The jog convention: left/right jog joint 1, up/down jog joint 2,
        // and "up" is the negative delta. Each case is the exact JSON the
        // prompt documents, so prompt and Action schema cannot drift apart.
        let cases = [
            (
                r#"{"action":"joint_move","joint":1,"delta":-0.1,"speed":0.2,"acc":0.5}"#,
                1,
                -0.1,
            ),
            (
                r#"{"action":"joint_move","joint":1,"delta":0.1,"speed":0.2,"acc":0.5}"#,
                1,
                0.1,
            ),
            (
                r#"{"action":"joint_move","joint":2,"delta":-0.1,"speed":0.2,"acc":0.5}"#,
                2,
                -0.1,
            ),
            (
                r#"{"action":"joint_move","joint":2,"delta":0.1,"speed":0.2,"acc":0.5}"#,
                2,
                0.1,
            ),
        ];

        for (json, joint, delta) in cases {
            assert!(
                COMMANDER_SYSTEM_PROMPT.contains(json),
                "prompt no longer documents {}",
                json
            );
            let action = parse_action_response(json).unwrap();
            assert_eq!(
                action,
                Action::JointMove {
                    joint,
                    delta,
                    speed: 0.2,
                    acc: 0.5,
                }
            );
        }
    }

    #[test]
    fn test_malformed_response_is_translation_error() {
        let err = parse_action_response("beep boop").unwrap_err();
        assert!(matches!(err, ArmError::Translation(_)));
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let err = parse_action_response(
            r#"{"action":"go_pose","target":"box_approach_l","speed":0.0,"acc":0.5}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ArmError::Translation(_)));
    }
}
