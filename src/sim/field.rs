//! The rain field: spawns drops and power-ups, moves them, and resolves
//! catches against the player
//!
//! One `update` is one pass over everything in a fixed order:
//! 1. drop spawn check
//! 2. good drops (move, prune, collide)
//! 3. bad drops
//! 4. power-up spawn check
//! 5. power-ups
//!
//! Collections are walked back to front so removal never skips an entry,
//! and removal keeps the survivors' order for deterministic replays.

use serde::Serialize;

use super::difficulty::DifficultyProfile;
use super::entity::{DropKind, GameEvent, PowerUp, PowerUpKind, Raindrop};
use super::movement::Movement;
use super::player::Player;
use super::rng::RandomSource;
use crate::consts::*;
use crate::error::{GameError, Result};

/// Check that a box of `width` spawned at `x` stays on screen
pub fn validate_spawn_x(x: f32, width: f32) -> Result<f32> {
    let max = (SCREEN_WIDTH - width).max(0.0);
    if x.is_finite() && (0.0..=max).contains(&x) {
        Ok(x)
    } else {
        Err(GameError::EntityBounds { x, max })
    }
}

/// Clamp an out-of-range spawn instead of failing
fn spawn_x_or_clamp(x: f32, width: f32) -> f32 {
    validate_spawn_x(x, width).unwrap_or_else(|err| {
        log::warn!("{err}, clamping");
        if x.is_nan() {
            0.0
        } else {
            crate::clamp_to_screen(x, width)
        }
    })
}

/// Active drops and power-ups plus the spawn clocks
#[derive(Debug, Clone, Serialize)]
pub struct RainField {
    profile: DifficultyProfile,
    good_movement: Movement,
    bad_movement: Movement,
    /// Active good drops (spawn order)
    pub good_drops: Vec<Raindrop>,
    /// Active bad drops (spawn order)
    pub bad_drops: Vec<Raindrop>,
    /// Active power-ups (spawn order)
    pub power_ups: Vec<PowerUp>,
    /// Simulation clock (seconds since the field was created)
    elapsed: f64,
    last_drop_spawn: f64,
    last_power_up_spawn: f64,
    /// Events produced since the last drain
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl RainField {
    /// Empty field with both spawn clocks at zero
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            profile: profile.clone(),
            good_movement: Movement::normal(profile.good_drop_speed),
            bad_movement: Movement::normal(profile.bad_drop_speed),
            good_drops: Vec::new(),
            bad_drops: Vec::new(),
            power_ups: Vec::new(),
            elapsed: 0.0,
            last_drop_spawn: 0.0,
            last_power_up_spawn: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Override the fall strategy used for newly spawned drops of `kind`
    pub fn set_movement(&mut self, kind: DropKind, movement: Movement) {
        match kind {
            DropKind::Good => self.good_movement = movement,
            DropKind::Bad => self.bad_movement = movement,
        }
    }

    /// Kick off a match: one good and one bad drop right away
    pub fn start(&mut self, rng: &mut dyn RandomSource) {
        self.spawn_random_drop(DropKind::Good, rng);
        self.last_drop_spawn = self.elapsed;
        self.spawn_random_drop(DropKind::Bad, rng);
        self.last_power_up_spawn = self.elapsed;
        log::debug!("Rain field started ({})", self.profile.name);
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn last_drop_spawn(&self) -> f64 {
        self.last_drop_spawn
    }

    #[inline]
    pub fn last_power_up_spawn(&self) -> f64 {
        self.last_power_up_spawn
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a drop at the top of the screen. Leaves the spawn clocks alone.
    pub fn spawn_drop(&mut self, kind: DropKind, x: f32) -> u32 {
        let x = spawn_x_or_clamp(x, DROP_SIZE);
        let id = self.next_entity_id();
        let movement = match kind {
            DropKind::Good => self.good_movement,
            DropKind::Bad => self.bad_movement,
        };
        let drop = Raindrop::new(id, kind, x, movement);
        match kind {
            DropKind::Good => self.good_drops.push(drop),
            DropKind::Bad => self.bad_drops.push(drop),
        }
        log::debug!("Spawned {:?} drop #{} at x={:.1}", kind, id, x);
        id
    }

    /// Spawn a power-up at the top of the screen
    pub fn spawn_power_up(&mut self, kind: PowerUpKind, x: f32) -> u32 {
        let x = spawn_x_or_clamp(x, POWER_UP_SIZE);
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp::new(id, kind, x));
        log::debug!("Spawned {:?} power-up #{} at x={:.1}", kind, id, x);
        id
    }

    fn spawn_random_drop(&mut self, kind: DropKind, rng: &mut dyn RandomSource) {
        let x = rng.uniform(0.0, SCREEN_WIDTH - DROP_SIZE);
        self.spawn_drop(kind, x);
    }

    /// Drop spawn check against the clock value `now`
    pub fn spawn_tick(&mut self, now: f64, rng: &mut dyn RandomSource) {
        let interval = f64::from(self.profile.drop_spawn_interval);
        if now - self.last_drop_spawn > interval {
            let kind = if rng.bernoulli(self.profile.good_drop_probability) {
                DropKind::Good
            } else {
                DropKind::Bad
            };
            self.spawn_random_drop(kind, rng);
            // Only good drops restart the drop clock
            if kind == DropKind::Good {
                self.last_drop_spawn = now;
            }
        }
    }

    /// Power-up spawn check against the clock value `now`
    pub fn power_up_spawn_tick(&mut self, now: f64, rng: &mut dyn RandomSource) {
        let interval = f64::from(self.profile.power_up_spawn_interval);
        if now - self.last_power_up_spawn > interval {
            let x = rng.uniform(0.0, SCREEN_WIDTH - POWER_UP_SIZE);
            let kind = if rng.bernoulli(0.5) {
                PowerUpKind::Life
            } else {
                PowerUpKind::Points
            };
            self.spawn_power_up(kind, x);
            self.last_power_up_spawn = now;
        }
    }

    /// Advance the field by `dt` seconds and resolve catches against `player`
    pub fn update(&mut self, dt: f32, player: &mut Player, rng: &mut dyn RandomSource) {
        // A zero-length step leaves the field untouched, overdue spawns included
        if dt <= 0.0 {
            return;
        }
        self.elapsed += f64::from(dt);
        let now = self.elapsed;

        self.spawn_tick(now, rng);
        update_drops(&mut self.good_drops, dt, player, &mut self.events);
        update_drops(&mut self.bad_drops, dt, player, &mut self.events);

        self.power_up_spawn_tick(now, rng);
        update_power_ups(&mut self.power_ups, dt, player, &mut self.events);
    }
}

fn update_drops(
    drops: &mut Vec<Raindrop>,
    dt: f32,
    player: &mut Player,
    events: &mut Vec<GameEvent>,
) {
    for i in (0..drops.len()).rev() {
        let (kind, rect, id) = {
            let drop = &mut drops[i];
            drop.movement.advance(&mut drop.rect, dt);
            (drop.kind, drop.rect, drop.id)
        };

        if rect.below_screen() {
            drops.remove(i);
            continue;
        }

        if rect.overlaps(&player.rect) {
            match kind {
                DropKind::Good => {
                    player.add_score(1);
                    events.push(GameEvent::DropCaught);
                    log::debug!("Caught drop #{} (score {})", id, player.score);
                }
                DropKind::Bad => {
                    if player.take_damage() {
                        events.push(GameEvent::PlayerHurt);
                        log::debug!("Hit by drop #{} ({} lives left)", id, player.lives);
                    }
                }
            }
            drops.remove(i);
        }
    }
}

fn update_power_ups(
    power_ups: &mut Vec<PowerUp>,
    dt: f32,
    player: &mut Player,
    events: &mut Vec<GameEvent>,
) {
    for i in (0..power_ups.len()).rev() {
        {
            let power_up = &mut power_ups[i];
            power_up.movement.advance(&mut power_up.rect, dt);
        }
        let power_up = &power_ups[i];

        if power_up.rect.below_screen() {
            power_ups.remove(i);
            continue;
        }

        if power_up.rect.overlaps(&player.rect) {
            power_up.activate(player);
            events.push(GameEvent::PowerUpCollected(power_up.kind));
            log::debug!("Collected {:?} power-up #{}", power_up.kind, power_up.id);
            power_ups.remove(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::{Difficulty, MEDIUM};
    use crate::sim::rect::Rect;
    use crate::sim::rng::SeededRng;
    use crate::sim::rng::testing::FixedRandom;
    use proptest::prelude::*;

    fn profile(interval: f32, p_good: f32) -> DifficultyProfile {
        DifficultyProfile {
            drop_spawn_interval: interval,
            good_drop_probability: p_good,
            ..MEDIUM.clone()
        }
    }

    /// Place the catcher's box directly under a drop at the player's row
    fn drop_on_player(field: &mut RainField, kind: DropKind, player: &Player) -> u32 {
        let id = field.spawn_drop(kind, player.x());
        let drops = match kind {
            DropKind::Good => &mut field.good_drops,
            DropKind::Bad => &mut field.bad_drops,
        };
        let drop = drops.iter_mut().find(|d| d.id == id).unwrap();
        drop.rect.pos.y = player.rect.y() + 10.0;
        id
    }

    #[test]
    fn test_start_spawns_one_of_each() {
        let mut field = RainField::new(Difficulty::Medium.profile());
        let mut rng = FixedRandom::new(true, 100.0);
        field.start(&mut rng);

        assert_eq!(field.good_drops.len(), 1);
        assert_eq!(field.bad_drops.len(), 1);
        assert!(field.power_ups.is_empty());
        assert_eq!(field.good_drops[0].rect, Rect::new(100.0, 480.0, 64.0, 64.0));
    }

    #[test]
    fn test_spawn_timer_with_certain_good_drops() {
        let mut field = RainField::new(&profile(1.0, 1.0));
        let mut rng = FixedRandom::new(false, 0.0);
        let mut player = Player::new(3);
        field.start(&mut rng);
        assert_eq!(field.last_drop_spawn(), 0.0);

        // 1.0s in 0.25s steps: interval not yet exceeded
        for _ in 0..4 {
            field.update(0.25, &mut player, &mut rng);
        }
        assert_eq!(field.good_drops.len(), 1);
        assert_eq!(field.last_drop_spawn(), 0.0);

        // Past the interval: a good drop spawns and resets the clock
        field.update(0.25, &mut player, &mut rng);
        assert_eq!(field.good_drops.len(), 2);
        assert_eq!(field.bad_drops.len(), 1);
        assert_eq!(field.last_drop_spawn(), 1.25);

        field.update(0.25, &mut player, &mut rng);
        assert_eq!(field.good_drops.len(), 2);
    }

    #[test]
    fn test_bad_drops_do_not_reset_timer() {
        let mut field = RainField::new(&profile(1.0, 0.0));
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(3);

        for _ in 0..4 {
            field.update(0.25, &mut player, &mut rng);
        }
        assert!(field.bad_drops.is_empty());

        // Every tick past the interval spawns another bad drop
        field.update(0.25, &mut player, &mut rng);
        assert_eq!(field.bad_drops.len(), 1);
        field.update(0.25, &mut player, &mut rng);
        assert_eq!(field.bad_drops.len(), 2);
        field.update(0.25, &mut player, &mut rng);
        assert_eq!(field.bad_drops.len(), 3);
        assert_eq!(field.last_drop_spawn(), 0.0);
        assert!(field.good_drops.is_empty());
    }

    #[test]
    fn test_spawn_tick_resets_clock_to_now() {
        let mut field = RainField::new(&profile(1.0, 1.0));
        let mut rng = FixedRandom::new(true, 0.0);

        field.spawn_tick(5.0, &mut rng);
        assert_eq!(field.good_drops.len(), 1);
        assert_eq!(field.last_drop_spawn(), 5.0);

        // Same instant again: the interval has not elapsed since the reset
        field.spawn_tick(5.0, &mut rng);
        assert_eq!(field.good_drops.len(), 1);

        field.spawn_tick(6.5, &mut rng);
        assert_eq!(field.good_drops.len(), 2);
        assert_eq!(field.last_drop_spawn(), 6.5);
    }

    #[test]
    fn test_nan_probability_spawns_bad_drops() {
        let mut field = RainField::new(&profile(1.0, f32::NAN));
        let mut rng = SeededRng::new(11);
        field.spawn_tick(2.0, &mut rng);
        assert!(field.good_drops.is_empty());
        assert_eq!(field.bad_drops.len(), 1);
    }

    #[test]
    fn test_manual_spawns_leave_clock_alone() {
        let mut field = RainField::new(Difficulty::Medium.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(3);
        field.update(0.5, &mut player, &mut rng);

        field.spawn_drop(DropKind::Good, 300.0);
        assert_eq!(field.last_drop_spawn(), 0.0);
    }

    #[test]
    fn test_zero_dt_is_idempotent() {
        let mut field = RainField::new(Difficulty::Hard.profile());
        let mut rng = SeededRng::new(5);
        let mut player = Player::new(2);
        field.start(&mut rng);
        for _ in 0..30 {
            field.update(0.1, &mut player, &mut rng);
        }
        field.drain_events();

        let before_field = field.clone();
        let before_player = player.clone();
        for _ in 0..100 {
            field.update(0.0, &mut player, &mut rng);
        }

        assert_eq!(field.good_drops, before_field.good_drops);
        assert_eq!(field.bad_drops, before_field.bad_drops);
        assert_eq!(field.power_ups, before_field.power_ups);
        assert_eq!(field.elapsed(), before_field.elapsed());
        assert_eq!(field.last_drop_spawn(), before_field.last_drop_spawn());
        assert_eq!(player, before_player);
        assert!(field.drain_events().is_empty());
    }

    #[test]
    fn test_good_drop_scores() {
        let mut field = RainField::new(Difficulty::Easy.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(5);
        drop_on_player(&mut field, DropKind::Good, &player);

        field.update(0.01, &mut player, &mut rng);
        assert_eq!(player.score, 1);
        assert!(field.good_drops.is_empty());
        assert_eq!(field.drain_events(), vec![GameEvent::DropCaught]);
    }

    #[test]
    fn test_bad_drop_hurts_once() {
        let mut field = RainField::new(Difficulty::Easy.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(5);
        drop_on_player(&mut field, DropKind::Bad, &player);
        drop_on_player(&mut field, DropKind::Bad, &player);

        field.update(0.01, &mut player, &mut rng);
        // Second hit lands inside the invulnerability window
        assert_eq!(player.lives, 4);
        assert!(player.invulnerable);
        assert!(field.bad_drops.is_empty());
        assert_eq!(field.drain_events(), vec![GameEvent::PlayerHurt]);
    }

    #[test]
    fn test_bad_drop_while_invulnerable() {
        let mut field = RainField::new(Difficulty::Easy.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(3);
        player.take_damage();
        drop_on_player(&mut field, DropKind::Bad, &player);

        field.update(0.01, &mut player, &mut rng);
        assert_eq!(player.lives, 2);
        assert!(field.bad_drops.is_empty());
        assert!(field.drain_events().is_empty());
    }

    #[test]
    fn test_off_screen_drop_removed_before_collision() {
        let mut field = RainField::new(Difficulty::Easy.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(3);
        // Drag the catcher down so it would overlap the departing drop
        player.rect.pos.y = -DROP_SIZE - 10.0;

        let id = field.spawn_drop(DropKind::Good, player.x());
        field.good_drops[0].rect.pos.y = -DROP_SIZE;
        assert_eq!(field.good_drops[0].id, id);

        field.update(0.01, &mut player, &mut rng);
        assert!(field.good_drops.is_empty());
        assert_eq!(player.score, 0);
        assert!(field.drain_events().is_empty());
    }

    #[test]
    fn test_off_screen_power_up_removed_before_collision() {
        let mut field = RainField::new(Difficulty::Easy.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(3);
        player.rect.pos.y = -POWER_UP_SIZE - 10.0;

        field.spawn_power_up(PowerUpKind::Points, player.x());
        field.power_ups[0].rect.pos.y = -POWER_UP_SIZE;
        assert!(field.power_ups[0].rect.overlaps(&player.rect));

        field.update(0.01, &mut player, &mut rng);
        assert!(field.power_ups.is_empty());
        assert_eq!(player.score, 0);
        assert_eq!(player.lives, 3);
        assert!(field.drain_events().is_empty());
    }

    #[test]
    fn test_removal_keeps_other_drops() {
        let mut field = RainField::new(Difficulty::Easy.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(3);

        field.spawn_drop(DropKind::Good, 0.0);
        let caught = drop_on_player(&mut field, DropKind::Good, &player);
        field.spawn_drop(DropKind::Good, 700.0);

        field.update(0.01, &mut player, &mut rng);
        let ids: Vec<u32> = field.good_drops.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![caught - 1, caught + 1]);
        assert_eq!(player.score, 1);
    }

    #[test]
    fn test_power_up_spawn_interval() {
        // Easy: power-up every 4 s; coin true -> life
        let mut field = RainField::new(Difficulty::Easy.profile());
        let mut rng = FixedRandom::new(true, 300.0);
        let mut player = Player::new(5);
        field.start(&mut rng);

        for _ in 0..8 {
            field.update(0.5, &mut player, &mut rng);
        }
        assert!(field.power_ups.is_empty());

        field.update(0.5, &mut player, &mut rng);
        assert_eq!(field.power_ups.len(), 1);
        assert_eq!(field.power_ups[0].kind, PowerUpKind::Life);
        assert_eq!(field.last_power_up_spawn(), 4.5);
    }

    #[test]
    fn test_power_up_effects() {
        let mut field = RainField::new(Difficulty::Easy.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(5);

        field.spawn_power_up(PowerUpKind::Points, player.x());
        field.spawn_power_up(PowerUpKind::Life, player.x());
        for power_up in &mut field.power_ups {
            power_up.rect.pos.y = player.rect.y() + 5.0;
        }

        field.update(0.01, &mut player, &mut rng);
        assert_eq!(player.score, 5);
        assert_eq!(player.lives, 5);
        assert!(field.power_ups.is_empty());
        // Back to front
        assert_eq!(
            field.drain_events(),
            vec![
                GameEvent::PowerUpCollected(PowerUpKind::Life),
                GameEvent::PowerUpCollected(PowerUpKind::Points),
            ]
        );
    }

    #[test]
    fn test_drops_resolve_before_power_ups() {
        let mut field = RainField::new(Difficulty::Easy.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(3);

        field.spawn_power_up(PowerUpKind::Points, player.x());
        field.power_ups[0].rect.pos.y = player.rect.y();
        drop_on_player(&mut field, DropKind::Good, &player);

        field.update(0.01, &mut player, &mut rng);
        assert_eq!(player.score, 6);
        assert_eq!(
            field.drain_events(),
            vec![
                GameEvent::DropCaught,
                GameEvent::PowerUpCollected(PowerUpKind::Points),
            ]
        );
    }

    #[test]
    fn test_spawn_bounds_are_clamped() {
        assert!(validate_spawn_x(736.0, DROP_SIZE).is_ok());
        assert!(matches!(
            validate_spawn_x(900.0, DROP_SIZE),
            Err(GameError::EntityBounds { .. })
        ));
        assert!(validate_spawn_x(f32::NAN, DROP_SIZE).is_err());

        let mut field = RainField::new(Difficulty::Medium.profile());
        field.spawn_drop(DropKind::Bad, 900.0);
        field.spawn_drop(DropKind::Bad, -50.0);
        field.spawn_power_up(PowerUpKind::Life, 1000.0);
        assert_eq!(field.bad_drops[0].rect.x(), SCREEN_WIDTH - DROP_SIZE);
        assert_eq!(field.bad_drops[1].rect.x(), 0.0);
        assert_eq!(field.power_ups[0].rect.x(), SCREEN_WIDTH - POWER_UP_SIZE);
    }

    #[test]
    fn test_drops_fall_at_profile_speed() {
        let mut field = RainField::new(Difficulty::Hard.profile());
        let mut rng = FixedRandom::new(true, 0.0);
        let mut player = Player::new(2);
        field.start(&mut rng);

        field.update(0.5, &mut player, &mut rng);
        assert_eq!(field.good_drops[0].rect.y(), 480.0 - 140.0);
        assert_eq!(field.bad_drops[0].rect.y(), 480.0 - 130.0);

        field.set_movement(DropKind::Good, Movement::fast(280.0));
        field.spawn_drop(DropKind::Good, 400.0);
        assert_eq!(field.good_drops[1].movement.speed, 420.0);
    }

    proptest! {
        #[test]
        fn prop_lives_and_score_stay_in_bounds(
            seed in any::<u64>(),
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..0.1), 1..400),
        ) {
            let mut field = RainField::new(Difficulty::Hard.profile());
            let mut rng = SeededRng::new(seed);
            let mut player = Player::new(Difficulty::Hard.profile().starting_lives);
            field.start(&mut rng);

            let mut last_score = 0;
            for (left, right, dt) in inputs {
                player.update(dt, crate::sim::MoveInput { left, right });
                field.update(dt, &mut player, &mut rng);

                prop_assert!(player.lives <= MAX_LIVES);
                prop_assert!(player.score >= last_score);
                prop_assert!(player.x() >= 0.0 && player.x() <= SCREEN_WIDTH - PLAYER_WIDTH);
                last_score = player.score;
            }
        }
    }
}
