//! Game state and core simulation types
//!
//! One [`GameState`] owns every entity collection for a run. The tick
//! function mutates it in place; hosts read it back for rendering and drain
//! the buffered [`GameEvent`]s to update their UI.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Collectible, Enemy, Platform};
use super::level::LevelLayout;
use super::particles::ParticleSystem;
use super::player::Player;
use super::projectile::{ProjectileManager, ViewWindow};
use crate::consts::*;
use crate::persistence::Storage;
use crate::score::ScoreManager;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted; waits for a restart
    GameOver,
    /// Goal reached; waits for the next level
    LevelComplete,
}

/// Notifications for the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ScoreChanged { score: u64, high_score: u64 },
    LivesChanged { lives: u8 },
    NewHighScore { score: u64 },
    GameOver { final_score: u64 },
    LevelComplete { final_score: u64 },
}

/// Horizontal scroll offset that eases toward the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Ease toward keeping `player_x` a third of the way into the view.
    /// Never scrolls left of the world origin.
    pub fn follow(&mut self, player_x: f32, viewport_width: f32, smoothness: f32) {
        let target = player_x - viewport_width / 3.0;
        self.x += (target - self.x) * smoothness;
        self.x = self.x.max(0.0);
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    /// Seed for the effect RNG
    pub seed: u64,
    /// 1-based level number
    pub level: u32,
    pub lives: u8,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub tuning: Tuning,
    pub camera: Camera,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    /// Living enemies (dead ones are purged at the end of each tick)
    pub enemies: Vec<Enemy>,
    pub particles: ParticleSystem,
    pub projectiles: ProjectileManager,
    pub score: ScoreManager,
    /// Celebrate new high scores with confetti
    pub confetti_enabled: bool,
    start: Vec2,
    goal_x: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default balance and settings
    pub fn new(seed: u64, store: Box<dyn Storage>) -> Self {
        Self::with_config(seed, store, Tuning::default(), &Settings::default())
    }

    pub fn with_config(
        seed: u64,
        store: Box<dyn Storage>,
        tuning: Tuning,
        settings: &Settings,
    ) -> Self {
        let mut particles =
            ParticleSystem::new(settings.max_particles(), tuning.particles.clone(), seed);
        particles.set_trails_enabled(settings.trails);
        let projectiles = ProjectileManager::new(MAX_PROJECTILES, tuning.fireball.clone());
        let player = Player::new(Vec2::ZERO, &tuning.player);

        let mut state = Self {
            seed,
            level: 1,
            lives: START_LIVES,
            phase: GamePhase::Playing,
            time_ticks: 0,
            tuning,
            camera: Camera::default(),
            player,
            platforms: Vec::new(),
            collectibles: Vec::new(),
            enemies: Vec::new(),
            particles,
            projectiles,
            score: ScoreManager::new(store),
            confetti_enabled: settings.confetti_enabled(),
            start: Vec2::ZERO,
            goal_x: f32::INFINITY,
            events: Vec::new(),
        };
        state.load_level();
        state
    }

    /// Populate entities for the current level number.
    ///
    /// Particles and fireballs already in flight are left alone.
    pub fn load_level(&mut self) {
        let layout = LevelLayout::for_level(self.level);

        self.start = layout.start;
        self.goal_x = layout.goal_x;
        self.player = Player::new(layout.start, &self.tuning.player);
        self.collectibles = layout
            .collectibles
            .iter()
            .map(|&pos| Collectible::new(pos, &self.tuning.collectible))
            .collect();
        self.enemies = layout
            .enemies
            .iter()
            .map(|&(pos, kind)| Enemy::new(pos, kind, &self.tuning.enemy))
            .collect();
        self.platforms = layout.platforms;
        self.camera.reset();

        log::info!(
            "Level {} loaded: {} platforms, {} collectibles, {} enemies",
            self.level,
            self.platforms.len(),
            self.collectibles.len(),
            self.enemies.len()
        );
    }

    /// Start over from level 1 with a fresh score and full lives
    pub fn restart(&mut self) {
        self.score.reset_current();
        self.lives = START_LIVES;
        self.level = 1;
        self.phase = GamePhase::Playing;
        self.load_level();

        self.emit(GameEvent::ScoreChanged {
            score: self.score.current(),
            high_score: self.score.high_score(),
        });
        self.emit(GameEvent::LivesChanged { lives: self.lives });
        log::info!("Game restarted");
    }

    /// Advance to the next level, keeping score and lives
    pub fn next_level(&mut self) {
        self.level += 1;
        self.phase = GamePhase::Playing;
        self.load_level();
    }

    pub fn start_position(&self) -> Vec2 {
        self.start
    }

    pub fn goal_x(&self) -> f32 {
        self.goal_x
    }

    /// The horizontal slice of the world on screen
    pub fn view_window(&self) -> ViewWindow {
        ViewWindow {
            left: self.camera.x,
            width: VIEWPORT_WIDTH,
        }
    }

    /// Take all events buffered since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Add points; celebrates a new best score
    pub(crate) fn award(&mut self, points: u64) {
        self.score.add(points);
        self.emit(GameEvent::ScoreChanged {
            score: self.score.current(),
            high_score: self.score.high_score(),
        });

        if self.score.is_new_high_score() {
            if self.confetti_enabled {
                self.particles.spawn_confetti(self.camera.x, VIEWPORT_WIDTH);
            }
            self.score.clear_new_high_score_flag();
            log::info!("New high score: {}", self.score.high_score());
            self.emit(GameEvent::NewHighScore {
                score: self.score.high_score(),
            });
        }
    }

    /// Lose a life: respawn at the level start, or end the run
    pub(crate) fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.emit(GameEvent::LivesChanged { lives: self.lives });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", self.score.current());
            self.emit(GameEvent::GameOver {
                final_score: self.score.current(),
            });
        } else {
            self.player.respawn(self.start);
            self.camera.reset();
        }
    }

    pub(crate) fn complete_level(&mut self) {
        self.phase = GamePhase::LevelComplete;
        log::info!(
            "Level {} complete with score {}",
            self.level,
            self.score.current()
        );
        self.emit(GameEvent::LevelComplete {
            final_score: self.score.current(),
        });
    }
}
