/// Collision detection and its consequences: enemy contact damage, bullet
/// hits, shooting and pickup collection.
///
/// Every function takes the current `GameState` and returns a new one.
/// Entity removal is done by marking survivors during the scan and rebuilding
/// the list afterwards, never by removing while iterating.

use crate::config::GameConfig;
use crate::entities::{
    Bullet, DamageState, Enemy, EnemyKind, GameEvent, GameState, GameStatus, PlayerSlot,
};
use crate::input::Pointer;
use crate::movement::{aim_angle, pursue};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Circle-circle test: true when the centres are closer than the radii sum.
pub fn circle_overlap(ax: f32, ay: f32, ar: f32, bx: f32, by: f32, br: f32) -> bool {
    (ax - bx).hypot(ay - by) < ar + br
}

pub fn footprint_size(kind: EnemyKind, cfg: &GameConfig) -> f32 {
    match kind {
        EnemyKind::Zombie => cfg.zombie_size,
        EnemyKind::Boss => cfg.boss_size,
    }
}

/// Centre of an enemy's square footprint.
pub fn enemy_center(enemy: &Enemy, cfg: &GameConfig) -> (f32, f32) {
    let half = footprint_size(enemy.kind, cfg) / 2.0;
    (enemy.x + half, enemy.y + half)
}

fn in_bounds(x: f32, y: f32, width: f32, height: f32) -> bool {
    x >= 0.0 && x <= width && y >= 0.0 && y <= height
}

// ── Player damage ─────────────────────────────────────────────────────────────

/// Take one point of health from player 1 and open the shared damage
/// cooldown.  Callers must check `damage_state` first.
pub fn apply_player_damage(state: &mut GameState, now_ms: u64, cfg: &GameConfig) {
    state.player1.health = state.player1.health.saturating_sub(1);
    state.damage_cooldown_until = Some(now_ms + cfg.hit_cooldown_ms);
    state.events.push(GameEvent::PlayerDamaged {
        health: state.player1.health,
    });
    if state.player1.health == 0 {
        state.status = GameStatus::GameOver;
        state.events.push(GameEvent::Defeated);
        log::info!(
            "player defeated on level {} after {}s",
            state.level,
            state.elapsed_secs
        );
    }
}

// ── Enemy step ────────────────────────────────────────────────────────────────

/// Move every enemy of one list toward player 1, apply contact damage, then
/// drop enemies that left the surface.
fn step_enemies(
    state: &GameState,
    enemies: &[Enemy],
    now_ms: u64,
    cfg: &GameConfig,
) -> (GameState, Vec<Enemy>) {
    let mut next = state.clone();
    let mut moved = Vec::with_capacity(enemies.len());

    for enemy in enemies {
        if next.player1.health == 0 {
            moved.push(enemy.clone());
            continue;
        }
        let enemy = pursue(enemy, next.player1.x, next.player1.y, cfg.zombie_speed);

        let (cx, cy) = enemy_center(&enemy, cfg);
        let radius = footprint_size(enemy.kind, cfg) / 2.0;
        let touching = circle_overlap(
            next.player1.x,
            next.player1.y,
            cfg.player_radius,
            cx,
            cy,
            radius,
        );
        if touching && next.damage_state(now_ms) == DamageState::Vulnerable {
            apply_player_damage(&mut next, now_ms, cfg);
        }
        moved.push(enemy);
    }

    let kept = moved
        .into_iter()
        .filter(|e| in_bounds(e.x, e.y, next.width, next.height))
        .collect();
    (next, kept)
}

/// Zombie pursuit, contact damage and out-of-bounds despawn.
pub fn update_enemies(state: &GameState, now_ms: u64, cfg: &GameConfig) -> GameState {
    let (next, enemies) = step_enemies(state, &state.enemies, now_ms, cfg);
    GameState { enemies, ..next }
}

/// Same as `update_enemies`, for bosses.
pub fn update_bosses(state: &GameState, now_ms: u64, cfg: &GameConfig) -> GameState {
    let (next, bosses) = step_enemies(state, &state.bosses, now_ms, cfg);
    GameState { bosses, ..next }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Advance bullets and resolve their hits.  A bullet is consumed by the first
/// zombie it touches, otherwise by the first boss, otherwise by leaving the
/// surface.  Ends with pickup collection.
pub fn update_bullets(state: &GameState, cfg: &GameConfig) -> GameState {
    let mut next = state.clone();
    let mut zombie_alive = vec![true; next.enemies.len()];
    let mut boss_alive = vec![true; next.bosses.len()];
    let mut bullets: Vec<Bullet> = Vec::with_capacity(next.bullets.len());

    for bullet in &state.bullets {
        let bullet = Bullet {
            x: bullet.x + bullet.dx,
            y: bullet.y + bullet.dy,
            ..bullet.clone()
        };

        let zombie_hit = next.enemies.iter().enumerate().position(|(i, z)| {
            let (cx, cy) = enemy_center(z, cfg);
            zombie_alive[i]
                && circle_overlap(bullet.x, bullet.y, cfg.bullet_radius, cx, cy, cfg.zombie_size / 2.0)
        });
        if let Some(i) = zombie_hit {
            zombie_alive[i] = false;
            next.enemies[i].health = 0.0;
            next.events.push(GameEvent::ZombieKilled);
            continue;
        }

        let boss_hit = next.bosses.iter().enumerate().position(|(i, b)| {
            let (cx, cy) = enemy_center(b, cfg);
            boss_alive[i]
                && circle_overlap(bullet.x, bullet.y, cfg.bullet_radius, cx, cy, cfg.boss_size / 2.0)
        });
        if let Some(i) = boss_hit {
            let boss = &mut next.bosses[i];
            let damage = boss.max_health * cfg.boss_damage_fraction;
            boss.health = (boss.health - damage).max(0.0);
            // Tolerate float drift from fractional damage.
            if boss.health <= f32::EPSILON * boss.max_health {
                boss.health = 0.0;
                boss_alive[i] = false;
                next.events.push(GameEvent::BossKilled);
                log::info!("boss destroyed on level {}", next.level);
            } else {
                next.events.push(GameEvent::BossHit {
                    remaining: boss.health,
                });
                log::debug!("boss hit, {} health left", boss.health);
            }
            continue;
        }

        if in_bounds(bullet.x, bullet.y, next.width, next.height) {
            bullets.push(bullet);
        }
    }

    next.enemies = compact(&next.enemies, &zombie_alive);
    next.bosses = compact(&next.bosses, &boss_alive);
    next.bullets = bullets;

    collect_pickup(&next, cfg)
}

fn compact(list: &[Enemy], alive: &[bool]) -> Vec<Enemy> {
    list.iter()
        .zip(alive)
        .filter(|(_, alive)| **alive)
        .map(|(e, _)| e.clone())
        .collect()
}

// ── Shooting ──────────────────────────────────────────────────────────────────

/// Fire from `slot` toward the pointer if the shared shot delay has passed.
/// Returns the state unchanged when the shot is rejected or the slot has no
/// player.
pub fn try_shoot(
    state: &GameState,
    slot: PlayerSlot,
    pointer: Pointer,
    now_ms: u64,
    cfg: &GameConfig,
) -> GameState {
    let ready = match state.last_shot_at {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= cfg.shoot_delay_ms,
    };
    if !ready {
        return state.clone();
    }
    let shooter = match slot {
        PlayerSlot::One => &state.player1,
        PlayerSlot::Two => match &state.player2 {
            Some(p) => p,
            None => return state.clone(),
        },
    };

    let angle = aim_angle(shooter.x, shooter.y, pointer);
    let (sin, cos) = angle.sin_cos();
    let bullet = Bullet {
        x: shooter.x + cos * cfg.player_radius,
        y: shooter.y + sin * cfg.player_radius,
        dx: cos * cfg.bullet_speed,
        dy: sin * cfg.bullet_speed,
    };

    let mut next = state.clone();
    next.bullets.push(bullet);
    next.last_shot_at = Some(now_ms);
    next.events.push(GameEvent::ShotFired { player: slot });
    next
}

// ── Pickup ────────────────────────────────────────────────────────────────────

/// Player 1 touching the pickup restores player 1 to full health.
pub fn collect_pickup(state: &GameState, cfg: &GameConfig) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    let Some(pickup) = &state.pickup else {
        return state.clone();
    };
    let p1 = &state.player1;
    if !circle_overlap(p1.x, p1.y, cfg.player_radius, pickup.x, pickup.y, cfg.pickup_size) {
        return state.clone();
    }

    let mut next = state.clone();
    next.player1.health = next.player1.max_health;
    next.pickup = None;
    next.events.push(GameEvent::PickupCollected);
    log::debug!("pickup collected on level {}", next.level);
    next
}
