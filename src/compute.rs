/// Session setup and the per-frame tick.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a brand-new one.  Randomness comes in through an
/// injected RNG and time through a millisecond session clock, so callers
/// control determinism (tests use a seeded RNG and hand-picked clock values).

use rand::Rng;

use crate::combat::{try_shoot, update_bosses, update_bullets, update_enemies};
use crate::config::GameConfig;
use crate::entities::{GameMode, GameState, GameStatus, Player, PlayerSlot};
use crate::input::{InputSnapshot, PlayerControls};
use crate::level::{check_exit, spawn_bosses, spawn_pickup, spawn_zombies};
use crate::movement::{clamp_player, move_player};

// ── Constructors ─────────────────────────────────────────────────────────────

fn spawn_player(height: f32, cfg: &GameConfig) -> Player {
    Player {
        x: cfg.player_spawn_x,
        y: height / 2.0,
        health: cfg.player_max_health,
        max_health: cfg.player_max_health,
    }
}

/// Start a fresh session on level 1 with the first wave already placed.
pub fn init_state(
    mode: GameMode,
    width: f32,
    height: f32,
    cfg: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    let state = GameState {
        mode,
        status: GameStatus::Playing,
        player1: spawn_player(height, cfg),
        player2: match mode {
            GameMode::SinglePlayer => None,
            GameMode::TwoPlayer => Some(spawn_player(height, cfg)),
        },
        enemies: Vec::new(),
        bosses: Vec::new(),
        bullets: Vec::new(),
        pickup: None,
        pickup_spawned: false,
        level: 1,
        elapsed_secs: 0,
        last_shot_at: None,
        damage_cooldown_until: None,
        frame: 0,
        width,
        height,
        events: Vec::new(),
    };
    log::info!("starting {:?} session on a {}x{} surface", mode, width, height);

    let state = spawn_zombies(&state, cfg, rng);
    spawn_bosses(&state, cfg, rng)
}

/// Adopt the surface's current size.  Takes effect from the next tick.
pub fn resize(state: &GameState, width: f32, height: f32) -> GameState {
    if state.width == width && state.height == height {
        return state.clone();
    }
    log::debug!("surface resized to {}x{}", width, height);
    GameState {
        width,
        height,
        ..state.clone()
    }
}

/// Whether enemies, bullets and pickups are simulated in this session.
pub fn runs_survival(mode: GameMode, cfg: &GameConfig) -> bool {
    match mode {
        GameMode::SinglePlayer => true,
        GameMode::TwoPlayer => cfg.two_player_survival,
    }
}

// ── One-second timer ─────────────────────────────────────────────────────────

/// Advance the survival timer by one second.  Driven by the caller's own
/// one-second clock, not by the frame loop.
pub fn tick_second(state: &GameState) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    GameState {
        elapsed_secs: state.elapsed_secs + 1,
        ..state.clone()
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Move every player from the held keys, clamp to the surface, then handle
/// fire keys (player 1 first; both share one shot timer).  Fire keys are
/// ignored when bullets are not simulated, so none pile up.
fn handle_players(
    state: &GameState,
    input: &InputSnapshot,
    now_ms: u64,
    cfg: &GameConfig,
) -> GameState {
    let steer = |p: &Player, slot: PlayerSlot| {
        let moved = move_player(p, &PlayerControls::for_slot(slot), input, cfg);
        clamp_player(&moved, state.width, state.height, cfg.player_radius)
    };
    let mut next = GameState {
        player1: steer(&state.player1, PlayerSlot::One),
        player2: state.player2.as_ref().map(|p| steer(p, PlayerSlot::Two)),
        ..state.clone()
    };

    if !runs_survival(state.mode, cfg) {
        return next;
    }
    for (slot, _) in state.players() {
        if input.is_pressed(PlayerControls::for_slot(slot).fire) {
            next = try_shoot(&next, slot, input.pointer, now_ms, cfg);
        }
    }
    next
}

/// Advance the simulation by one frame.
///
/// Order: players → zombies (pursuit, contact damage) → exit check → bosses →
/// bullets (hits, pickup collection) → pickup spawn.  A session that is no
/// longer running is returned unchanged, and a defeat stops the tick at the
/// pass that caused it.
pub fn tick(
    state: &GameState,
    input: &InputSnapshot,
    now_ms: u64,
    cfg: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    if !state.is_running() {
        return state.clone();
    }

    let state = GameState {
        frame: state.frame + 1,
        events: Vec::new(),
        ..state.clone()
    };
    let mut state = handle_players(&state, input, now_ms, cfg);

    if !runs_survival(state.mode, cfg) {
        return state;
    }

    state = update_enemies(&state, now_ms, cfg);
    if !state.is_running() {
        return state;
    }
    state = check_exit(&state, cfg, rng);
    state = update_bosses(&state, now_ms, cfg);
    if !state.is_running() {
        return state;
    }
    state = update_bullets(&state, cfg);
    spawn_pickup(&state, cfg, rng)
}
