//! The closed set of top-level scenes and the interface every scene
//! implements. `GameEngine` is the only driver.

use barrage_core::config::GameConfig;
use barrage_core::enums::{Action, SceneKind};
use barrage_core::events::GameEvent;
use barrage_core::input::InputState;
use barrage_core::state::{GameOverView, ScoreEntry};
use tracing::debug;

use crate::play::PlayState;
use crate::systems::score::ScoreSystem;

/// Everything a scene may touch during one call.
pub struct SceneContext<'a> {
    pub config: &'a GameConfig,
    pub input: &'a InputState,
    pub score: &'a mut ScoreSystem,
}

/// Requested change of scene, applied by the driver after `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    ToMenu,
    ToPlay,
    ToGameOver(GameOverView),
}

pub trait SceneState {
    fn kind(&self) -> SceneKind;
    fn enter(&mut self, ctx: &mut SceneContext<'_>);
    fn update(&mut self, ctx: &mut SceneContext<'_>, dt: f32) -> Option<Transition>;
    fn exit(&mut self, ctx: &mut SceneContext<'_>);
}

/// Title screen. Shoot starts a run.
#[derive(Debug, Clone, Default)]
pub struct MenuScene {
    pub scoreboard: Vec<ScoreEntry>,
}

impl SceneState for MenuScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Menu
    }

    fn enter(&mut self, ctx: &mut SceneContext<'_>) {
        self.scoreboard = ctx.score.scoreboard();
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, _dt: f32) -> Option<Transition> {
        ctx.input
            .just_activated(Action::Shoot)
            .then_some(Transition::ToPlay)
    }

    fn exit(&mut self, _ctx: &mut SceneContext<'_>) {}
}

/// Result screen for a finished run. Shoot returns to the menu.
#[derive(Debug, Clone)]
pub struct GameOverScene {
    pub result: GameOverView,
    pub scoreboard: Vec<ScoreEntry>,
}

impl GameOverScene {
    pub fn new(result: GameOverView) -> Self {
        Self {
            result,
            scoreboard: Vec::new(),
        }
    }
}

impl SceneState for GameOverScene {
    fn kind(&self) -> SceneKind {
        SceneKind::GameOver
    }

    fn enter(&mut self, ctx: &mut SceneContext<'_>) {
        self.scoreboard = ctx.score.scoreboard();
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, _dt: f32) -> Option<Transition> {
        ctx.input
            .just_activated(Action::Shoot)
            .then_some(Transition::ToMenu)
    }

    fn exit(&mut self, _ctx: &mut SceneContext<'_>) {}
}

pub enum Scene {
    Menu(MenuScene),
    Play(Box<PlayState>),
    GameOver(GameOverScene),
}

impl Scene {
    /// Build the scene a transition points at. Every run gets a new
    /// `PlayState` seeded from `play.seed`. The caller runs `enter`.
    pub fn from_transition(transition: Transition, config: &GameConfig) -> Self {
        match transition {
            Transition::ToMenu => Scene::Menu(MenuScene::default()),
            Transition::ToPlay => Scene::Play(Box::new(PlayState::new(config))),
            Transition::ToGameOver(result) => Scene::GameOver(GameOverScene::new(result)),
        }
    }

    fn state_mut(&mut self) -> &mut dyn SceneState {
        match self {
            Scene::Menu(s) => s,
            Scene::Play(s) => s.as_mut(),
            Scene::GameOver(s) => s,
        }
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Menu(_) => SceneKind::Menu,
            Scene::Play(_) => SceneKind::Play,
            Scene::GameOver(_) => SceneKind::GameOver,
        }
    }

    pub fn enter(&mut self, ctx: &mut SceneContext<'_>) {
        debug!(scene = ?self.kind(), "enter scene");
        self.state_mut().enter(ctx);
    }

    pub fn update(&mut self, ctx: &mut SceneContext<'_>, dt: f32) -> Option<Transition> {
        self.state_mut().update(ctx, dt)
    }

    pub fn exit(&mut self, ctx: &mut SceneContext<'_>) {
        debug!(scene = ?self.kind(), "exit scene");
        self.state_mut().exit(ctx);
    }

    /// Drain the events the scene produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        match self {
            Scene::Play(play) => play.take_events(),
            _ => Vec::new(),
        }
    }

    pub fn play(&self) -> Option<&PlayState> {
        match self {
            Scene::Play(play) => Some(play.as_ref()),
            _ => None,
        }
    }

    pub fn play_mut(&mut self) -> Option<&mut PlayState> {
        match self {
            Scene::Play(play) => Some(play.as_mut()),
            _ => None,
        }
    }
}
