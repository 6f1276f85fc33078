//! Screen state machine
//!
//! Top-level controller. Owns the current screen, the match (player + rain
//! field), the tutorial, the audio manager and the session record, and
//! advances whichever one the current screen calls for once per tick.
//!
//! Menus are built by the host; their buttons arrive here as `ScreenEvent`s
//! through `handle`. Keyboard shortcuts are read in `tick` and routed through
//! the same `handle`, so both paths share one transition table.

use serde::{Deserialize, Serialize};

use crate::audio::AudioManager;
use crate::error::{GameError, Result};
use crate::platform::{InputState, Key};
use crate::session::MatchSession;
use crate::sim::tutorial::TutorialInput;
use crate::sim::{Difficulty, DifficultyProfile, MoveInput, Player, RainField, RandomSource, Tutorial};

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    DifficultySelect,
    Options,
    Tutorial,
    Playing,
    Paused,
    GameOver,
}

/// Discrete requests from the UI layer (button clicks) or key shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScreenEvent {
    /// Menu: go pick a difficulty
    Play,
    OpenTutorial,
    /// Menu or pause menu
    OpenOptions,
    /// Menu or game over: leave the game
    Quit,
    PickDifficulty(Difficulty),
    Back,
    /// Tutorial finished, start playing
    TutorialComplete,
    Pause,
    Resume,
    /// Pause menu: new match, same difficulty
    Restart,
    /// Game over: new match, same difficulty
    Retry,
    /// Options: new master volume
    SetVolume(f32),
}

/// What the host should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

pub struct ScreenMachine {
    screen: Screen,
    session: MatchSession,
    player: Player,
    field: RainField,
    tutorial: Tutorial,
    audio: AudioManager,
    rng: Box<dyn RandomSource>,
    quit_requested: bool,
}

impl std::fmt::Debug for ScreenMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenMachine")
            .field("screen", &self.screen)
            .field("session", &self.session)
            .field("player", &self.player)
            .field("audio", &self.audio)
            .finish_non_exhaustive()
    }
}

impl ScreenMachine {
    /// Start on the menu with `difficulty` preselected
    pub fn new(difficulty: Difficulty, rng: Box<dyn RandomSource>, audio: AudioManager) -> Self {
        let profile = difficulty.profile();
        Self {
            screen: Screen::Menu,
            session: MatchSession::new(difficulty),
            player: Player::new(profile.starting_lives),
            field: RainField::new(profile),
            tutorial: Tutorial::new(),
            audio,
            rng,
            quit_requested: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &MatchSession {
        &self.session
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        self.session.difficulty.profile()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn field(&self) -> &RainField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut RainField {
        &mut self.field
    }

    pub fn tutorial(&self) -> &Tutorial {
        &self.tutorial
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn set_screen(&mut self, next: Screen) {
        if next != self.screen {
            log::info!("Screen: {:?} -> {:?}", self.screen, next);
            self.screen = next;
        }
    }

    /// Fresh player and field for the session's difficulty
    fn start_match(&mut self) {
        let profile = self.session.difficulty.profile();
        self.player = Player::new(profile.starting_lives);
        self.field = RainField::new(profile);
        self.field.start(self.rng.as_mut());
        self.audio.apply_music_volume();
        log::info!(
            "Match started: {} ({} lives)",
            profile.name,
            profile.starting_lives
        );
    }

    fn finish_match(&mut self) {
        let score = self.player.score;
        let new_best = self.session.record_result(score);
        log::info!(
            "Game over on {}: score {}, best {}{}",
            self.profile().name,
            score,
            self.session.best_score,
            if new_best { " (new best)" } else { "" }
        );
        self.set_screen(Screen::GameOver);
    }

    /// Apply a UI event. Events the current screen does not accept are
    /// rejected with `InvalidTransition` and change nothing.
    pub fn handle(&mut self, event: ScreenEvent) -> Result<Screen> {
        use ScreenEvent as E;

        match (self.screen, event) {
            (Screen::Menu, E::Play) => self.set_screen(Screen::DifficultySelect),
            (Screen::Menu, E::OpenTutorial) => {
                self.tutorial.reset();
                self.set_screen(Screen::Tutorial);
            }
            (Screen::Menu | Screen::Paused, E::OpenOptions) => self.set_screen(Screen::Options),
            (Screen::Menu | Screen::GameOver, E::Quit) => {
                log::info!("Quit requested");
                self.quit_requested = true;
            }

            (Screen::DifficultySelect, E::PickDifficulty(difficulty)) => {
                self.session.difficulty = difficulty;
                self.start_match();
                self.set_screen(Screen::Playing);
            }

            (Screen::Options, E::SetVolume(volume)) => {
                self.audio.set_master_volume(volume);
                log::debug!("Master volume {:.2}", self.audio.master_volume());
            }

            (Screen::Tutorial, E::TutorialComplete) => {
                self.start_match();
                self.set_screen(Screen::Playing);
            }

            (Screen::Playing, E::Pause) => self.set_screen(Screen::Paused),
            (Screen::Paused, E::Resume) => self.set_screen(Screen::Playing),
            (Screen::Paused, E::Restart) | (Screen::GameOver, E::Retry) => {
                self.start_match();
                self.set_screen(Screen::Playing);
            }

            (
                Screen::DifficultySelect
                | Screen::Options
                | Screen::Tutorial
                | Screen::Paused
                | Screen::GameOver,
                E::Back,
            ) => self.set_screen(Screen::Menu),

            (screen, event) => return Err(GameError::InvalidTransition { screen, event }),
        }
        Ok(self.screen)
    }

    /// Key shortcuts go through `handle`; rejections are expected and ignored
    fn fire(&mut self, event: ScreenEvent) {
        if let Err(err) = self.handle(event) {
            log::debug!("{err}");
        }
    }

    /// Advance one frame. `dt` below zero is treated as zero.
    pub fn tick(&mut self, dt: f32, input: &dyn InputState) -> TickOutcome {
        let dt = dt.max(0.0);

        match self.screen {
            Screen::Menu => {
                if input.is_just_pressed(Key::J) {
                    self.fire(ScreenEvent::Play);
                } else if input.is_just_pressed(Key::T) {
                    self.fire(ScreenEvent::OpenTutorial);
                } else if input.is_just_pressed(Key::O) {
                    self.fire(ScreenEvent::OpenOptions);
                } else if input.is_just_pressed(Key::Escape) {
                    self.fire(ScreenEvent::Quit);
                }
            }
            Screen::DifficultySelect => {
                if input.is_just_pressed(Key::Escape) {
                    self.fire(ScreenEvent::Back);
                } else if input.is_just_pressed(Key::Num1) {
                    self.fire(ScreenEvent::PickDifficulty(Difficulty::Easy));
                } else if input.is_just_pressed(Key::Num2) {
                    self.fire(ScreenEvent::PickDifficulty(Difficulty::Medium));
                } else if input.is_just_pressed(Key::Num3) {
                    self.fire(ScreenEvent::PickDifficulty(Difficulty::Hard));
                }
            }
            Screen::Options => {
                if input.is_just_pressed(Key::Escape) {
                    self.fire(ScreenEvent::Back);
                }
            }
            Screen::Tutorial => {
                let tutorial_input = TutorialInput {
                    left: input.left_held(),
                    right: input.right_held(),
                    back: input.is_just_pressed(Key::Escape),
                    confirm: input.is_just_pressed(Key::Space)
                        || input.is_just_pressed(Key::Enter),
                };
                self.tutorial.update(dt, tutorial_input, self.rng.as_mut());
                if self.tutorial.requests_menu() {
                    self.fire(ScreenEvent::Back);
                } else if self.tutorial.requests_play() {
                    self.fire(ScreenEvent::TutorialComplete);
                }
            }
            Screen::Playing => self.tick_playing(dt, input),
            Screen::Paused => {
                if input.is_just_pressed(Key::Escape) || input.is_just_pressed(Key::P) {
                    self.fire(ScreenEvent::Resume);
                }
            }
            // Game over is driven by UI events only
            Screen::GameOver => {}
        }

        if self.quit_requested {
            TickOutcome::Quit
        } else {
            TickOutcome::Continue
        }
    }

    fn tick_playing(&mut self, dt: f32, input: &dyn InputState) {
        let moves = MoveInput {
            left: input.left_held(),
            right: input.right_held(),
        };
        self.player.update(dt, moves);
        self.field.update(dt, &mut self.player, self.rng.as_mut());

        let events = self.field.drain_events();
        self.audio.play_events(&events);

        if !self.player.is_alive() {
            self.finish_match();
        } else if input.is_just_pressed(Key::Escape) || input.is_just_pressed(Key::P) {
            self.fire(ScreenEvent::Pause);
        }
    }
}
