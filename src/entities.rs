/// All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    SinglePlayer,
    TwoPlayer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Zombie,
    Boss,
}

/// Whether contact with an enemy currently costs player 1 health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageState {
    Vulnerable,
    Cooldown,
}

/// Which player slot an action belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerSlot {
    One,
    Two,
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// Circular footprint; `(x, y)` is the centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub health: u32,
    pub max_health: u32,
}

/// Square footprint; `(x, y)` is the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub health: f32,
    pub max_health: f32,
    pub kind: EnemyKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Displacement applied every tick.
    pub dx: f32,
    pub dy: f32,
}

/// Healing item; `(x, y)` is the centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub x: f32,
    pub y: f32,
}

// ── Per-tick events ───────────────────────────────────────────────────────────

/// Something notable that happened during the last tick.  Cleared at the start
/// of every tick; the front end uses them for logging.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ShotFired { player: PlayerSlot },
    ZombieKilled,
    BossHit { remaining: f32 },
    BossKilled,
    PlayerDamaged { health: u32 },
    Defeated,
    PickupSpawned,
    PickupCollected,
    LevelAdvanced { level: u32 },
    /// Placement ran out of attempts and dropped the overlap check.
    PlacementFallback { kind: EnemyKind },
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One session, from "start" until defeat or restart.  Cloneable so the update
/// functions can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub mode: GameMode,
    pub status: GameStatus,
    pub player1: Player,
    /// Present only in two-player sessions.
    pub player2: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub bosses: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// At most one healing item is live at a time.
    pub pickup: Option<Pickup>,
    /// Set once the current level's pickup has appeared.
    pub pickup_spawned: bool,
    pub level: u32,
    /// Whole seconds survived, advanced by an independent one-second timer.
    pub elapsed_secs: u64,
    /// Session clock reading (ms) of the last accepted shot, shared by both
    /// players.
    pub last_shot_at: Option<u64>,
    /// Session clock reading (ms) at which player 1 becomes vulnerable again.
    pub damage_cooldown_until: Option<u64>,
    pub frame: u64,
    /// Play-surface size in world units.
    pub width: f32,
    pub height: f32,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// True while the loop should keep scheduling ticks.
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn damage_state(&self, now_ms: u64) -> DamageState {
        match self.damage_cooldown_until {
            Some(until) if now_ms < until => DamageState::Cooldown,
            _ => DamageState::Vulnerable,
        }
    }

    /// Active players paired with their slot, player 1 first.
    pub fn players(&self) -> Vec<(PlayerSlot, &Player)> {
        let mut out = vec![(PlayerSlot::One, &self.player1)];
        if let Some(p2) = &self.player2 {
            out.push((PlayerSlot::Two, p2));
        }
        out
    }
}
