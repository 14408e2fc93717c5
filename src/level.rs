/// Level progression: enemy counts, spawning, the exit zone and the healing
/// pickup.

use rand::Rng;

use crate::combat::footprint_size;
use crate::config::GameConfig;
use crate::entities::{Enemy, EnemyKind, GameEvent, GameState, Pickup};
use crate::placement::place;

// ── Scaling tables ────────────────────────────────────────────────────────────

/// Zombies spawned on `level`: the base count plus a fixed step per level.
pub fn zombie_count(level: u32, cfg: &GameConfig) -> usize {
    (cfg.base_zombie_count + cfg.zombies_per_level * level.saturating_sub(1)) as usize
}

/// One boss per full `boss_level_interval` levels.
pub fn boss_count(level: u32, cfg: &GameConfig) -> usize {
    (level / cfg.boss_level_interval) as usize
}

pub fn pickup_eligible(level: u32, cfg: &GameConfig) -> bool {
    level % cfg.pickup_level_interval == 0
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Place `count` same-kind enemies without overlap.  Returns the enemies and
/// how many placements fell back to an unchecked position.
fn spawn_kind(
    rng: &mut impl Rng,
    kind: EnemyKind,
    count: usize,
    width: f32,
    height: f32,
    cfg: &GameConfig,
) -> (Vec<Enemy>, usize) {
    let size = footprint_size(kind, cfg);
    let max_health = match kind {
        EnemyKind::Zombie => 1.0,
        EnemyKind::Boss => cfg.boss_max_health,
    };
    let mut taken: Vec<(f32, f32)> = Vec::with_capacity(count);
    let mut enemies = Vec::with_capacity(count);
    let mut fallbacks = 0;

    for _ in 0..count {
        let spot = place(rng, width, height, size, &taken, cfg.placement_max_attempts);
        if !spot.checked {
            fallbacks += 1;
        }
        taken.push((spot.x, spot.y));
        enemies.push(Enemy {
            x: spot.x,
            y: spot.y,
            health: max_health,
            max_health,
            kind,
        });
    }
    (enemies, fallbacks)
}

fn note_fallbacks(state: &mut GameState, kind: EnemyKind, fallbacks: usize) {
    for _ in 0..fallbacks {
        state.events.push(GameEvent::PlacementFallback { kind });
    }
}

/// Replace the zombie list with a fresh wave for the current level.
pub fn spawn_zombies(state: &GameState, cfg: &GameConfig, rng: &mut impl Rng) -> GameState {
    let count = zombie_count(state.level, cfg);
    let (enemies, fallbacks) =
        spawn_kind(rng, EnemyKind::Zombie, count, state.width, state.height, cfg);
    let mut next = GameState { enemies, ..state.clone() };
    note_fallbacks(&mut next, EnemyKind::Zombie, fallbacks);
    next
}

/// Replace the boss list for the current level.
pub fn spawn_bosses(state: &GameState, cfg: &GameConfig, rng: &mut impl Rng) -> GameState {
    let count = boss_count(state.level, cfg);
    let (bosses, fallbacks) =
        spawn_kind(rng, EnemyKind::Boss, count, state.width, state.height, cfg);
    let mut next = GameState { bosses, ..state.clone() };
    note_fallbacks(&mut next, EnemyKind::Boss, fallbacks);
    next
}

// ── Exit zone ─────────────────────────────────────────────────────────────────

/// Exit rectangle `(left, top, width, height)`, pinned to the right edge and
/// vertically centred.
pub fn exit_rect(width: f32, height: f32, cfg: &GameConfig) -> (f32, f32, f32, f32) {
    (
        width - cfg.exit_width - cfg.exit_margin,
        height / 2.0 - cfg.exit_height / 2.0,
        cfg.exit_width,
        cfg.exit_height,
    )
}

/// Player 1's right edge is past the exit's left side and its centre lies
/// strictly inside the exit's vertical extent.
pub fn exit_reached(state: &GameState, cfg: &GameConfig) -> bool {
    let (left, top, _, h) = exit_rect(state.width, state.height, cfg);
    let p = &state.player1;
    p.x + cfg.player_radius > left && p.y > top && p.y < top + h
}

/// Move to the next level: reposition player 1 on the left, re-seed enemies
/// and bosses, drop any uncollected pickup and allow a new one.  Health
/// carries over.
pub fn advance_level(state: &GameState, cfg: &GameConfig, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.level += 1;
    next.player1.x = cfg.player_spawn_x;
    next.pickup = None;
    next.pickup_spawned = false;
    next.events.push(GameEvent::LevelAdvanced { level: next.level });
    log::info!(
        "level {} reached, player health {}/{}",
        next.level,
        next.player1.health,
        next.player1.max_health
    );

    let next = spawn_zombies(&next, cfg, rng);
    spawn_bosses(&next, cfg, rng)
}

/// Advance the level if player 1 stands in the exit zone.
pub fn check_exit(state: &GameState, cfg: &GameConfig, rng: &mut impl Rng) -> GameState {
    if exit_reached(state, cfg) {
        advance_level(state, cfg, rng)
    } else {
        state.clone()
    }
}

// ── Pickup ────────────────────────────────────────────────────────────────────

/// Place this level's pickup, once, on eligible levels.
pub fn spawn_pickup(state: &GameState, cfg: &GameConfig, rng: &mut impl Rng) -> GameState {
    if !pickup_eligible(state.level, cfg) || state.pickup_spawned {
        return state.clone();
    }
    let spot = place(
        rng,
        state.width,
        state.height,
        cfg.pickup_size,
        &[],
        cfg.placement_max_attempts,
    );
    let mut next = state.clone();
    next.pickup = Some(Pickup { x: spot.x, y: spot.y });
    next.pickup_spawned = true;
    next.events.push(GameEvent::PickupSpawned);
    log::debug!("pickup spawned at ({:.0}, {:.0})", spot.x, spot.y);
    next
}
