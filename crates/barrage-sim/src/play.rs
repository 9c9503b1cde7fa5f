//! The play scene: one authoritative simulation tick per frame.
//!
//! Per tick, outside a wave transition:
//! player → bullets → enemies + formation → boss → power attack →
//! powerups → collisions (bullets/enemies, bullets/boss, power/enemies,
//! power/boss, bottom line, powerups) → wave-complete → game-over.
//! Collision order is observable through event order and the
//! first-match-wins bullet rule, so it must not change.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use barrage_core::config::GameConfig;
use barrage_core::enums::{Action, PowerupKind, SceneKind};
use barrage_core::events::{CollisionEvent, GameEvent};
use barrage_core::state::GameOverView;

use crate::entities::{to_ms, Boss, Bullet, Enemy, Player, PowerAttack, Powerup};
use crate::scenes::{SceneContext, SceneState, Transition};
use crate::systems::collision::CollisionSystem;
use crate::systems::formation::FormationController;
use crate::systems::spawn::SpawnSystem;

/// Damage a single player bullet deals to a boss.
pub const BULLET_BOSS_DAMAGE: u32 = 1;

#[derive(Debug, Clone)]
pub struct PlayState {
    pub(crate) player: Player,
    pub(crate) bullets: Vec<Bullet>,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) boss: Option<Boss>,
    pub(crate) boss_wave: bool,
    pub(crate) power_attack: Option<PowerAttack>,
    pub(crate) powerups: Vec<Powerup>,
    pub(crate) formation: FormationController,
    pub(crate) spawn: SpawnSystem,
    pub(crate) collision: CollisionSystem,
    rng: ChaCha8Rng,
    wave_transition: bool,
    transition_timer_ms: f32,
    events: Vec<GameEvent>,
}

impl PlayState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config),
            bullets: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            boss_wave: false,
            power_attack: None,
            powerups: Vec::new(),
            formation: FormationController::new(config),
            spawn: SpawnSystem::new(),
            collision: CollisionSystem::new(),
            rng: ChaCha8Rng::seed_from_u64(config.play.seed),
            wave_transition: false,
            transition_timer_ms: 0.0,
            events: Vec::new(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn power_attack(&self) -> Option<&PowerAttack> {
        self.power_attack.as_ref()
    }

    pub fn powerups(&self) -> &[Powerup] {
        &self.powerups
    }

    pub fn formation(&self) -> &FormationController {
        &self.formation
    }

    pub fn wave(&self) -> u32 {
        self.spawn.current_wave()
    }

    pub fn is_boss_wave(&self) -> bool {
        self.boss_wave
    }

    pub fn in_wave_transition(&self) -> bool {
        self.wave_transition
    }

    pub fn transition_remaining_ms(&self) -> f32 {
        if self.wave_transition {
            self.transition_timer_ms.max(0.0)
        } else {
            0.0
        }
    }

    /// Collision events recorded during the last tick.
    pub fn collision_events(&self) -> &[CollisionEvent] {
        self.collision.events()
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn `wave` from a clean field: a boss on boss waves, otherwise a
    /// fresh grid with the formation reset to that wave's speed.
    fn start_wave(&mut self, wave: u32, config: &GameConfig) {
        self.bullets.clear();
        self.powerups.clear();
        self.power_attack = None;

        let speed = self.spawn.speed_for_wave(wave, config);
        self.formation.reset(speed);
        self.boss_wave = self.spawn.should_spawn_boss(wave, config);
        if self.boss_wave {
            self.enemies.clear();
            self.boss = Some(self.spawn.create_boss(config, &mut self.rng));
        } else {
            self.enemies = self
                .spawn
                .create_wave(config.enemy.rows, config.enemy.cols, config);
            self.boss = None;
        }

        info!(wave, boss = self.boss_wave, speed, "wave started");
        self.events.push(GameEvent::WaveStarted {
            wave,
            boss: self.boss_wave,
        });
    }

    fn is_wave_complete(&self) -> bool {
        if self.boss_wave {
            self.boss.as_ref().map_or(true, |b| !b.is_active())
        } else {
            self.enemies.is_empty()
        }
    }

    /// Roll for an item drop where an enemy died.
    fn maybe_drop(&mut self, position: Vec2, config: &GameConfig) {
        if self.rng.gen::<f64>() >= config.powerups.drop_chance {
            return;
        }
        let kind = PowerupKind::ALL[self.rng.gen_range(0..PowerupKind::ALL.len())];
        self.powerups.push(Powerup::new(position, kind, config));
    }

    fn update_player(&mut self, ctx: &mut SceneContext<'_>, dt: f32) {
        let config = ctx.config;
        self.player.update(dt, ctx.input, config.canvas.width);

        if ctx.input.is_action_active(Action::Shoot) {
            if self.player.spread_active() {
                let volley = self.player.shoot_spread(config.player.spread_count, config);
                self.bullets.extend(volley);
            } else if let Some(bullet) = self.player.shoot(config) {
                self.bullets.push(bullet);
            }
        }

        if ctx.input.just_activated(Action::Power)
            && self.power_attack.is_none()
            && ctx.score.consume_power()
        {
            let origin = self.player.position;
            self.power_attack = Some(PowerAttack::new(origin, config));
            debug!(?origin, "power attack fired");
            self.events.push(GameEvent::PowerAttackFired { origin });
        }
    }

    fn update_entities(&mut self, config: &GameConfig, dt: f32) {
        let canvas = Vec2::new(config.canvas.width, config.canvas.height);

        for bullet in &mut self.bullets {
            bullet.update(dt, canvas);
        }
        self.bullets.retain(|b| b.active);

        for enemy in &mut self.enemies {
            enemy.update(dt);
        }
        self.enemies.retain(|e| !e.is_removed());
        self.formation.update(dt, &self.enemies);

        if let Some(boss) = self.boss.as_mut() {
            boss.update(dt);
        }

        if let Some(attack) = self.power_attack.as_mut() {
            attack.update(dt, canvas);
            if !attack.is_active() {
                self.power_attack = None;
            }
        }

        for powerup in &mut self.powerups {
            powerup.update(dt, config.canvas.height);
        }
        self.powerups.retain(|p| p.active);
    }

    /// Run every collision pass in order and apply the results. Returns
    /// after a bottom-line breach, which ends the wave attempt.
    fn resolve_collisions(&mut self, ctx: &mut SceneContext<'_>) {
        let config = ctx.config;
        let offset = self.formation.offset();

        let hits = self
            .collision
            .bullets_vs_enemies(&mut self.bullets, &mut self.enemies, offset);
        self.record(&hits);
        for hit in &hits {
            if let CollisionEvent::BulletEnemy { position, .. } = *hit {
                ctx.score.add_kill();
                self.maybe_drop(position, config);
            }
        }

        let hits = self
            .collision
            .bullets_vs_boss(&mut self.bullets, self.boss.as_ref(), BULLET_BOSS_DAMAGE);
        self.record(&hits);
        for hit in &hits {
            if let CollisionEvent::BulletBoss { damage, .. } = *hit {
                self.damage_boss(damage, ctx);
            }
        }

        let hits = self.collision.power_attack_vs_enemies(
            self.power_attack.as_mut(),
            &mut self.enemies,
            offset,
        );
        self.record(&hits);
        for hit in &hits {
            if let CollisionEvent::PowerEnemy { position, .. } = *hit {
                ctx.score.add_kill();
                self.maybe_drop(position, config);
            }
        }

        let hits = self.collision.power_attack_vs_boss(
            self.power_attack.as_mut(),
            self.boss.as_ref(),
            config.power.boss_damage,
        );
        self.record(&hits);
        for hit in &hits {
            if let CollisionEvent::PowerBoss { damage, .. } = *hit {
                self.damage_boss(damage, ctx);
            }
        }

        self.bullets.retain(|b| b.active);

        if self
            .collision
            .enemy_reaches_bottom(&self.enemies, offset, config.play.bottom_line_y)
        {
            let breach: Vec<CollisionEvent> =
                self.collision.events().last().cloned().into_iter().collect();
            self.record(&breach);
            let lives = ctx.score.lose_life();
            debug!(lives, "formation reached the bottom line");
            self.events.push(GameEvent::LifeLost { lives });
            if !ctx.score.is_game_over() {
                self.player.reset(config);
                self.start_wave(self.spawn.current_wave(), config);
            }
            return;
        }

        let pickups = self
            .collision
            .player_vs_powerups(&self.player, &mut self.powerups);
        self.record(&pickups);
        for pickup in &pickups {
            if let CollisionEvent::PlayerPowerup { kind, .. } = *pickup {
                self.apply_powerup(kind, ctx);
            }
        }
        self.powerups.retain(|p| p.active);
    }

    fn record(&mut self, hits: &[CollisionEvent]) {
        self.events
            .extend(hits.iter().cloned().map(GameEvent::Collision));
    }

    fn damage_boss(&mut self, damage: u32, ctx: &mut SceneContext<'_>) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        if boss.take_damage(damage) {
            let wave = self.spawn.current_wave();
            ctx.score.add_boss_kill();
            info!(wave, "boss defeated");
            self.events.push(GameEvent::BossDefeated { wave });
        }
    }

    fn apply_powerup(&mut self, kind: PowerupKind, ctx: &mut SceneContext<'_>) {
        match kind {
            PowerupKind::SpreadShot => {
                self.player.spread_remaining_ms = ctx.config.powerups.spread_duration_ms;
            }
            PowerupKind::ExtraLife => {
                ctx.score.add_life();
            }
            PowerupKind::PowerCharge => ctx.score.fill_power(),
        }
        debug!(?kind, "powerup collected");
        self.events.push(GameEvent::PowerupCollected { kind });
    }

    fn finish_run(&mut self, ctx: &mut SceneContext<'_>) -> Transition {
        let wave = self.spawn.current_wave();
        let score = ctx.score.score();
        let saved = ctx.score.save_score();
        let rank = if saved { ctx.score.current_rank() } else { None };
        info!(score, wave, saved, "game over");
        self.events.push(GameEvent::GameOver { score, wave });
        Transition::ToGameOver(GameOverView {
            score,
            wave,
            player_name: ctx.score.player_name().to_string(),
            saved,
            rank,
        })
    }
}

impl SceneState for PlayState {
    fn kind(&self) -> SceneKind {
        SceneKind::Play
    }

    /// Start a run on a freshly built state: score reset and wave 1 on
    /// the field.
    fn enter(&mut self, ctx: &mut SceneContext<'_>) {
        let config = ctx.config;
        ctx.score.reset();
        info!(player = %ctx.score.player_name(), seed = config.play.seed, "run started");
        let wave = self.spawn.next_wave();
        self.start_wave(wave, config);
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, dt: f32) -> Option<Transition> {
        self.collision.clear();

        if self.wave_transition {
            self.transition_timer_ms -= to_ms(dt);
            if self.transition_timer_ms <= 0.0 {
                self.wave_transition = false;
                self.transition_timer_ms = 0.0;
                let wave = self.spawn.next_wave();
                self.start_wave(wave, ctx.config);
            }
            return None;
        }

        self.update_player(ctx, dt);
        self.update_entities(ctx.config, dt);
        self.resolve_collisions(ctx);

        if !ctx.score.is_game_over() && self.is_wave_complete() {
            let wave = self.spawn.current_wave();
            self.boss = None;
            self.wave_transition = true;
            self.transition_timer_ms = ctx.config.play.wave_transition_ms;
            debug!(wave, "wave cleared");
            self.events.push(GameEvent::WaveCleared { wave });
        }

        if ctx.score.is_game_over() {
            return Some(self.finish_run(ctx));
        }
        None
    }

    fn exit(&mut self, _ctx: &mut SceneContext<'_>) {
        self.bullets.clear();
        self.power_attack = None;
    }
}
