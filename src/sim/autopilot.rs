//! Idle/demo mode - a simple AI that plays the game
//!
//! Dodges bad drops that are about to land on the catcher; otherwise chases
//! whichever good drop or power-up will reach the catcher's row first.

use super::field::RainField;
use super::player::{MoveInput, Player};
use super::rect::Rect;
use crate::consts::SCREEN_WIDTH;

/// How far above the catcher a bad drop counts as a threat (px)
const THREAT_HEIGHT: f32 = 160.0;
/// Extra horizontal clearance kept from threats (px)
const THREAT_MARGIN: f32 = 12.0;
/// Close enough to the target to stop moving (px)
const DEADZONE: f32 = 4.0;

fn center_x(rect: &Rect) -> f32 {
    rect.x() + rect.width() / 2.0
}

/// Pick movement keys for this tick
pub fn autopilot_input(player: &Player, field: &RainField) -> MoveInput {
    let me = player.rect;
    let my_center = center_x(&me);

    // Bad drops closing in from above with horizontal overlap (plus margin)
    let threat = field
        .bad_drops
        .iter()
        .map(|d| d.rect)
        .filter(|r| {
            r.y() < me.top() + THREAT_HEIGHT
                && r.top() > me.y()
                && r.x() < me.x() + me.width() + THREAT_MARGIN
                && r.x() + r.width() > me.x() - THREAT_MARGIN
        })
        .min_by(|a, b| a.y().total_cmp(&b.y()));

    if let Some(threat) = threat {
        // Step toward whichever side has more room
        let threat_center = center_x(&threat);
        let go_left = if (threat_center - SCREEN_WIDTH / 2.0).abs() < 1.0 {
            my_center < threat_center
        } else {
            threat_center > SCREEN_WIDTH / 2.0
        };
        return MoveInput {
            left: go_left,
            right: !go_left,
        };
    }

    // Lowest collectible that has not already fallen past the catcher
    let target = field
        .good_drops
        .iter()
        .map(|d| d.rect)
        .chain(field.power_ups.iter().map(|p| p.rect))
        .filter(|r| r.top() > me.y())
        .min_by(|a, b| a.y().total_cmp(&b.y()));

    match target {
        Some(target) => {
            let delta = center_x(&target) - my_center;
            MoveInput {
                left: delta < -DEADZONE,
                right: delta > DEADZONE,
            }
        }
        None => MoveInput::default(),
    }
}
