//! Game engine, the Menu/Play/GameOver state machine driver.
//!
//! `GameEngine` owns the configuration, input state, score system and the
//! current scene. The embedding loop feeds it key events and calls
//! `tick(dt)` once per frame; each tick returns a `FrameSnapshot`.
//! Completely headless, enabling deterministic testing.

use tracing::info;

use barrage_core::config::GameConfig;
use barrage_core::enums::SceneKind;
use barrage_core::error::ConfigError;
use barrage_core::input::InputState;
use barrage_core::state::FrameSnapshot;
use barrage_core::types::SimTime;

use crate::persistence::ScoreStore;
use crate::scenes::{MenuScene, Scene, SceneContext, Transition};
use crate::systems;
use crate::systems::score::ScoreSystem;

pub struct GameEngine {
    config: GameConfig,
    input: InputState,
    score: ScoreSystem,
    scene: Scene,
    time: SimTime,
}

impl GameEngine {
    /// Start a session in the menu scene. Rejects a config that fails
    /// `GameConfig::validate`.
    pub fn new(
        config: GameConfig,
        store: Box<dyn ScoreStore + Send>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let input = InputState::new(config.keys.clone());
        let score = ScoreSystem::new(&config, store);
        let mut engine = Self {
            config,
            input,
            score,
            scene: Scene::Menu(MenuScene::default()),
            time: SimTime::default(),
        };
        let mut ctx = SceneContext {
            config: &engine.config,
            input: &engine.input,
            score: &mut engine.score,
        };
        engine.scene.enter(&mut ctx);
        info!(
            canvas_width = engine.config.canvas.width,
            canvas_height = engine.config.canvas.height,
            seed = engine.config.play.seed,
            "session started"
        );
        Ok(engine)
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Release every held key, e.g. when the window loses focus.
    pub fn release_all_keys(&mut self) {
        self.input.reset();
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.score.set_player_name(name);
    }

    /// Advance one frame. `dt` is seconds, clamped to
    /// `[0, play.max_frame_delta]`; a non-finite delta counts as zero.
    pub fn tick(&mut self, dt: f32) -> FrameSnapshot {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.play.max_frame_delta)
        } else {
            0.0
        };

        let mut ctx = SceneContext {
            config: &self.config,
            input: &self.input,
            score: &mut self.score,
        };
        let transition = self.scene.update(&mut ctx, dt);
        let mut events = self.scene.take_events();
        if let Some(transition) = transition {
            self.apply_transition(transition);
            events.extend(self.scene.take_events());
        }

        self.time.advance(dt);
        let snapshot =
            systems::snapshot::build_snapshot(&self.time, &self.scene, &self.score, events);
        self.input.advance();
        snapshot
    }

    fn apply_transition(&mut self, transition: Transition) {
        let mut ctx = SceneContext {
            config: &self.config,
            input: &self.input,
            score: &mut self.score,
        };
        self.scene.exit(&mut ctx);
        self.scene = Scene::from_transition(transition, &self.config);
        self.scene.enter(&mut ctx);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_kind(&self) -> SceneKind {
        self.scene.kind()
    }

    pub fn score(&self) -> &ScoreSystem {
        &self.score
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Mutable access to the running play scene (for tests).
    #[cfg(test)]
    pub(crate) fn play_mut(&mut self) -> Option<&mut crate::play::PlayState> {
        self.scene.play_mut()
    }

    #[cfg(test)]
    pub(crate) fn score_mut(&mut self) -> &mut ScoreSystem {
        &mut self.score
    }
}
