//! Read-only view of one frame
//!
//! Everything a presenter needs to draw the current screen, with no access
//! back into the simulation. Serializable so a host can ship it across a
//! process or language boundary as JSON.

use serde::{Deserialize, Serialize};

use crate::screen::{Screen, ScreenMachine};
use crate::sim::{EntityKind, Rect, TutorialPhase, VisualHint};

/// Catcher as it should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    /// False on the hidden half of the invulnerability blink
    pub visible: bool,
}

/// Any falling entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub rect: Rect,
    pub hint: Option<VisualHint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub player: PlayerView,
    /// Good drops, bad drops, then power-ups
    pub entities: Vec<EntityView>,
    pub score: u32,
    pub lives: u8,
    pub difficulty: String,
    pub difficulty_description: String,
    pub best_score: u32,
    /// Only set while the tutorial is showing
    pub tutorial_phase: Option<TutorialPhase>,
}

impl Snapshot {
    pub fn capture(machine: &ScreenMachine) -> Self {
        let player = machine.player();
        let field = machine.field();
        let profile = machine.profile();

        let drops = field
            .good_drops
            .iter()
            .chain(field.bad_drops.iter())
            .map(|drop| EntityView {
                id: drop.id,
                kind: drop.kind.entity_kind(),
                rect: drop.rect,
                hint: None,
            });
        let power_ups = field.power_ups.iter().map(|power_up| EntityView {
            id: power_up.id,
            kind: power_up.kind.entity_kind(),
            rect: power_up.rect,
            hint: Some(power_up.kind.visual_hint()),
        });

        let tutorial_phase =
            (machine.screen() == Screen::Tutorial).then(|| machine.tutorial().phase);

        Self {
            screen: machine.screen(),
            player: PlayerView {
                rect: player.rect,
                visible: player.is_visible_this_frame(),
            },
            entities: drops.chain(power_ups).collect(),
            score: player.score,
            lives: player.lives,
            difficulty: profile.name.to_string(),
            difficulty_description: profile.description.to_string(),
            best_score: machine.session().best_score,
            tutorial_phase,
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ScreenMachine {
    /// Capture the current frame for drawing
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
