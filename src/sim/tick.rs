//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump (only takes effect while grounded)
    pub jump: bool,
    /// Launch a fireball this tick
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    if input.fire {
        state.player.fire(&mut state.projectiles);
    }

    state
        .player
        .update(input, &state.platforms, &state.tuning.player, &mut state.particles);

    state.particles.update();

    let view = state.view_window();
    state
        .projectiles
        .update(&state.platforms, view, &mut state.particles);

    // Pickups
    for i in 0..state.collectibles.len() {
        let collectible = &mut state.collectibles[i];
        collectible.update(&state.tuning.collectible);
        if collectible.try_collect(&state.player.bounds) {
            let center = collectible.bounds.center();
            state.particles.spawn_sparkles(center);
            state.award(COLLECTIBLE_POINTS);
        }
    }

    // Enemy patrol and contact damage
    for i in 0..state.enemies.len() {
        state.enemies[i].update();
        if state.enemies[i].hits(&state.player.bounds) {
            let center = state.enemies[i].bounds.center();
            state.particles.spawn_explosion(center);
            state.lose_life();
            if state.phase != GamePhase::Playing {
                return;
            }
        }
    }

    // Fireballs vs enemies; a fireball is spent on the first enemy it hits.
    // Hits are recorded in order and their effects replayed right after, so
    // each kill is scored before the next hit's burst.
    let mut hits = Vec::new();
    for projectile in state.projectiles.iter_mut() {
        if !projectile.active {
            continue;
        }
        if let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.hits(&projectile.bounds))
        {
            enemy.take_damage();
            projectile.deactivate();
            hits.push((enemy.bounds.center(), !enemy.alive));
        }
    }
    for (center, killed) in hits {
        state.particles.spawn_explosion(center);
        if killed {
            state.award(ENEMY_POINTS);
        }
    }
    state.enemies.retain(|e| e.alive);

    state.camera.follow(
        state.player.bounds.pos.x,
        VIEWPORT_WIDTH,
        state.tuning.camera.smoothness,
    );

    if state.player.bounds.pos.y > VIEWPORT_HEIGHT {
        log::debug!("Player fell off the world at x={}", state.player.bounds.pos.x);
        state.lose_life();
        if state.phase != GamePhase::Playing {
            return;
        }
    }

    if state.player.bounds.pos.x > state.goal_x() {
        state.complete_level();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::sim::entities::{Enemy, EnemyKind, Facing};
    use crate::sim::particles::ParticleKind;
    use crate::sim::state::GameEvent;

    fn new_state() -> GameState {
        let mut state = GameState::new(12345, Box::new(MemoryStorage::new()));
        state.enemies.clear();
        state
    }

    fn place_enemy(state: &mut GameState, x: f32, y: f32) {
        let enemy = Enemy::new(Vec2::new(x, y), EnemyKind::Crawler, &state.tuning.enemy);
        state.enemies.push(enemy);
    }

    #[test]
    fn test_collectible_scores_once() {
        let mut state = new_state();
        // Overlapping the first coin while standing on its platform
        state.player.bounds.pos = Vec2::new(240.0, 410.0);

        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());

        assert_eq!(state.score.current(), 100);
        assert!(state.collectibles[0].collected);
        let scores = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ScoreChanged { .. }))
            .count();
        assert_eq!(scores, 1);
    }

    #[test]
    fn test_one_kill_from_two_fireballs() {
        let mut state = new_state();
        place_enemy(&mut state, 400.0, 100.0);
        state.projectiles.spawn(Vec2::new(400.0, 110.0), Facing::Right);
        state.projectiles.spawn(Vec2::new(400.0, 110.0), Facing::Right);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score.current(), 500);
        assert!(state.enemies.is_empty());
        assert_eq!(state.projectiles.iter().filter(|p| p.active).count(), 1);

        // The spent fireball is culled on the next tick
        tick(&mut state, &TickInput::default());
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_each_kill_scores_before_the_next_burst() {
        let mut state = new_state();
        place_enemy(&mut state, 400.0, 100.0);
        place_enemy(&mut state, 600.0, 100.0);
        state.projectiles.spawn(Vec2::new(400.0, 110.0), Facing::Right);
        state.projectiles.spawn(Vec2::new(600.0, 110.0), Facing::Right);
        state.drain_events();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score.current(), 1000);
        assert!(state.enemies.is_empty());

        // Burst, celebration, burst, celebration
        let mut runs: Vec<(ParticleKind, usize)> = Vec::new();
        for kind in state
            .particles
            .iter()
            .map(|p| p.kind)
            .filter(|k| *k != ParticleKind::Trail)
        {
            match runs.last_mut() {
                Some((last, n)) if *last == kind => *n += 1,
                _ => runs.push((kind, 1)),
            }
        }
        assert_eq!(
            runs,
            vec![
                (ParticleKind::Explosion, 10),
                (ParticleKind::Confetti, 60),
                (ParticleKind::Explosion, 10),
                (ParticleKind::Confetti, 60),
            ]
        );

        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::ScoreChanged {
                    score: 500,
                    high_score: 500
                },
                GameEvent::NewHighScore { score: 500 },
                GameEvent::ScoreChanged {
                    score: 1000,
                    high_score: 1000
                },
                GameEvent::NewHighScore { score: 1000 },
            ]
        );
    }

    #[test]
    fn test_tough_enemy_takes_two_hits() {
        let mut state = new_state();
        state.tuning.enemy.health = 2;
        place_enemy(&mut state, 400.0, 100.0);
        state.projectiles.spawn(Vec2::new(400.0, 110.0), Facing::Right);
        state.projectiles.spawn(Vec2::new(400.0, 110.0), Facing::Right);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score.current(), 0);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.projectiles.iter().filter(|p| p.active).count(), 1);
    }

    #[test]
    fn test_enemy_contact_costs_a_life() {
        let mut state = new_state();
        state.player.bounds.pos = Vec2::new(600.0, 200.0);
        place_enemy(&mut state, 600.0, 200.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.bounds.pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.particles.len(), 10);
        assert!(state.drain_events().contains(&GameEvent::LivesChanged { lives: 2 }));
    }

    #[test]
    fn test_last_life_ends_the_run() {
        let mut state = new_state();
        state.lives = 1;
        state.player.bounds.pos = Vec2::new(600.0, 200.0);
        place_enemy(&mut state, 600.0, 200.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state
            .drain_events()
            .contains(&GameEvent::GameOver { final_score: 0 }));

        // Frozen until restart
        let ticks = state.time_ticks;
        let pos = state.player.bounds.pos;
        tick(&mut state, &TickInput { right: true, ..Default::default() });
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.bounds.pos, pos);
    }

    #[test]
    fn test_falling_off_respawns() {
        let mut state = new_state();
        state.player.bounds.pos = Vec2::new(100.0, 700.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.bounds.pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.camera.x, 0.0);
    }

    #[test]
    fn test_passing_goal_completes_level() {
        let mut state = new_state();
        state.player.bounds.pos = Vec2::new(2810.0, 400.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state
            .drain_events()
            .contains(&GameEvent::LevelComplete { final_score: 0 }));

        state.next_level();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.bounds.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_fire_spawns_fireball() {
        let mut state = new_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        tick(&mut state, &fire);
        assert_eq!(state.projectiles.len(), 2);
        assert!(state.projectiles.iter().all(|p| p.vel.x > 0.0));
    }

    #[test]
    fn test_camera_follows_player() {
        let mut state = new_state();
        state.player.bounds.pos = Vec2::new(1000.0, 100.0);
        tick(&mut state, &TickInput::default());
        assert!(state.camera.x > 0.0);
        assert!(state.camera.x < 1000.0 - VIEWPORT_WIDTH / 3.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(777, Box::new(MemoryStorage::new()));
        let mut b = GameState::new(777, Box::new(MemoryStorage::new()));

        for i in 0..300 {
            let input = TickInput {
                right: i % 50 < 40,
                jump: i % 37 == 0,
                fire: i % 25 == 0,
                ..Default::default()
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.player.bounds.pos, b.player.bounds.pos);
        assert_eq!(a.score.current(), b.score.current());
        assert_eq!(a.particles.len(), b.particles.len());
        for (pa, pb) in a.particles.iter().zip(b.particles.iter()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.color, pb.color);
        }
    }
}
