/// Per-tick position updates: input-driven players and pursuing enemies.

use crate::config::GameConfig;
use crate::entities::{Enemy, Player};
use crate::input::{InputSnapshot, PlayerControls, Pointer};

// ── Players ───────────────────────────────────────────────────────────────────

/// Apply one tick of held directional keys.  Axes are independent, so a
/// diagonal moves at full speed on both.
pub fn move_player(
    player: &Player,
    controls: &PlayerControls,
    input: &InputSnapshot,
    cfg: &GameConfig,
) -> Player {
    let mut x = player.x;
    let mut y = player.y;
    if input.is_pressed(controls.up) {
        y -= cfg.player_speed;
    }
    if input.is_pressed(controls.down) {
        y += cfg.player_speed;
    }
    if input.is_pressed(controls.left) {
        x -= cfg.player_speed;
    }
    if input.is_pressed(controls.right) {
        x += cfg.player_speed;
    }
    Player { x, y, ..player.clone() }
}

/// Keep the whole circular footprint inside the surface.
pub fn clamp_player(player: &Player, width: f32, height: f32, radius: f32) -> Player {
    // Not f32::clamp: it panics when the surface is narrower than the footprint.
    Player {
        x: player.x.min(width - radius).max(radius),
        y: player.y.min(height - radius).max(radius),
        ..player.clone()
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Greedy pursuit: step `speed` toward the target on each axis that differs.
pub fn pursue(enemy: &Enemy, target_x: f32, target_y: f32, speed: f32) -> Enemy {
    let mut x = enemy.x;
    let mut y = enemy.y;
    if x < target_x {
        x += speed;
    } else if x > target_x {
        x -= speed;
    }
    if y < target_y {
        y += speed;
    } else if y > target_y {
        y -= speed;
    }
    Enemy { x, y, ..enemy.clone() }
}

// ── Aiming ────────────────────────────────────────────────────────────────────

/// Angle (radians) from `(x, y)` to the pointer.
pub fn aim_angle(x: f32, y: f32, pointer: Pointer) -> f32 {
    (pointer.y - y).atan2(pointer.x - x)
}
