use zombie_shooter::compute::*;
use zombie_shooter::config::GameConfig;
use zombie_shooter::entities::*;
use zombie_shooter::input::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Milliseconds per frame used when driving several ticks.
const FRAME_MS: u64 = 33;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn zombie(x: f32, y: f32) -> Enemy {
    Enemy { x, y, health: 1.0, max_health: 1.0, kind: EnemyKind::Zombie }
}

/// 800×400 surface, player 1 at (100, 200), nothing else.
fn make_state() -> GameState {
    GameState {
        mode: GameMode::SinglePlayer,
        status: GameStatus::Playing,
        player1: Player { x: 100.0, y: 200.0, health: 8, max_health: 8 },
        player2: None,
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
        width: 800.0,
        height: 400.0,
        events: Vec::new(),
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_single_player_session() {
    let cfg = GameConfig::default();
    let s = init_state(GameMode::SinglePlayer, 800.0, 400.0, &cfg, &mut seeded_rng());

    assert_eq!(s.level, 1);
    assert_eq!(s.elapsed_secs, 0);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!((s.player1.x, s.player1.y), (100.0, 200.0));
    assert_eq!(s.player1.health, 8);
    assert!(s.player2.is_none());
    assert_eq!(s.enemies.len(), 6);
    assert!(s.bosses.is_empty());
    assert!(s.bullets.is_empty());
    assert!(s.pickup.is_none());
}

#[test]
fn init_two_player_session() {
    let cfg = GameConfig::default();
    let s = init_state(GameMode::TwoPlayer, 800.0, 400.0, &cfg, &mut seeded_rng());
    let p2 = s.player2.expect("two-player session needs player 2");
    assert_eq!((p2.x, p2.y), (100.0, 200.0));
    assert_eq!(p2.health, 8);
    assert_eq!(s.mode, GameMode::TwoPlayer);
}

// ── resize / tick_second ──────────────────────────────────────────────────────

#[test]
fn resize_updates_bounds() {
    let s = resize(&make_state(), 1000.0, 500.0);
    assert_eq!((s.width, s.height), (1000.0, 500.0));
}

#[test]
fn resized_bounds_apply_to_next_clamp() {
    let cfg = GameConfig::default();
    let mut s = make_state();
    s.player1.x = 700.0;
    s.player1.y = 100.0; // clear of the exit band
    let s = resize(&s, 400.0, 400.0);
    let s = tick(&s, &InputSnapshot::new(), 0, &cfg, &mut seeded_rng());
    assert_eq!(s.player1.x, 380.0);
}

#[test]
fn tick_second_counts_up_while_running() {
    let s = tick_second(&tick_second(&make_state()));
    assert_eq!(s.elapsed_secs, 2);
}

#[test]
fn tick_second_stops_after_defeat() {
    let mut s = make_state();
    s.elapsed_secs = 9;
    s.status = GameStatus::GameOver;
    assert_eq!(tick_second(&s).elapsed_secs, 9);
}

// ── tick — bookkeeping ────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame_and_clears_events() {
    let cfg = GameConfig::default();
    let mut s = make_state();
    s.frame = 5;
    s.events.push(GameEvent::ZombieKilled);
    let s2 = tick(&s, &InputSnapshot::new(), 0, &cfg, &mut seeded_rng());
    assert_eq!(s2.frame, 6);
    assert!(s2.events.is_empty());
}

#[test]
fn tick_is_inert_after_game_over() {
    let cfg = GameConfig::default();
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.frame = 10;
    let s2 = tick(&s, &InputSnapshot::with_keys(&[Key::D]), 0, &cfg, &mut seeded_rng());
    assert_eq!(s2.frame, 10);
    assert_eq!(s2.player1.x, 100.0);
}

#[test]
fn tick_does_not_mutate_original() {
    let cfg = GameConfig::default();
    let s = make_state();
    let _ = tick(&s, &InputSnapshot::with_keys(&[Key::D, Key::Space]), 0, &cfg, &mut seeded_rng());
    assert_eq!(s.player1.x, 100.0);
    assert!(s.bullets.is_empty());
}

// ── tick — movement ───────────────────────────────────────────────────────────

#[test]
fn held_keys_move_both_players() {
    let cfg = GameConfig::default();
    let mut s = make_state();
    s.mode = GameMode::TwoPlayer;
    s.player2 = Some(Player { x: 300.0, y: 300.0, health: 8, max_health: 8 });

    let input = InputSnapshot::with_keys(&[Key::D, Key::Up]);
    let s = tick(&s, &input, 0, &cfg, &mut seeded_rng());
    assert_eq!(s.player1.x, 107.0);
    assert_eq!(s.player2.as_ref().map(|p| p.y), Some(293.0));
}

#[test]
fn player_never_leaves_surface_at_edges() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.player1.x = 22.0;
    s.player1.y = 22.0;

    let input = InputSnapshot::with_keys(&[Key::W, Key::A]);
    for i in 0..10 {
        s = tick(&s, &input, i * FRAME_MS, &cfg, &mut rng);
        assert_eq!((s.player1.x, s.player1.y), (20.0, 20.0));
    }

    s.player1.x = 778.0;
    s.player1.y = 378.0;
    let input = InputSnapshot::with_keys(&[Key::S, Key::D]);
    s = tick(&s, &input, 0, &cfg, &mut rng);
    assert_eq!((s.player1.x, s.player1.y), (780.0, 380.0));
}

// ── tick — scenarios ──────────────────────────────────────────────────────────

#[test]
fn single_shot_kills_targeted_zombie() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies = vec![
        zombie(300.0, 185.0), // target, centre level with the player
        zombie(700.0, 10.0),
        zombie(700.0, 350.0),
        zombie(500.0, 10.0),
        zombie(500.0, 350.0),
        zombie(50.0, 10.0),
    ];

    let mut fire = InputSnapshot::with_keys(&[Key::Space]);
    fire.set_pointer(315.0, 200.0);
    s = tick(&s, &fire, 0, &cfg, &mut rng);
    assert_eq!(s.bullets.len(), 1);

    let idle = InputSnapshot::new();
    for i in 1..60 {
        if s.enemies.len() == 5 {
            break;
        }
        s = tick(&s, &idle, i * FRAME_MS, &cfg, &mut rng);
    }

    assert_eq!(s.enemies.len(), 5);
    assert!(s.enemies.iter().all(|z| z.x > 400.0 || z.y < 100.0 || z.y > 300.0));
    assert!(s.bullets.is_empty());
    assert_eq!(s.player1.health, 8);
}

#[test]
fn continuous_contact_hits_once_per_cooldown() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(zombie(85.0, 185.0));
    let idle = InputSnapshot::new();

    s = tick(&s, &idle, 0, &cfg, &mut rng);
    assert_eq!(s.player1.health, 7);

    for now in [100, 500, 900, 999] {
        s = tick(&s, &idle, now, &cfg, &mut rng);
        assert_eq!(s.player1.health, 7, "extra hit at {} ms", now);
    }

    s = tick(&s, &idle, 1000, &cfg, &mut rng);
    assert_eq!(s.player1.health, 6);
}

#[test]
fn running_out_of_health_halts_the_loop() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.player1.health = 1;
    s.enemies.push(zombie(85.0, 185.0));

    s = tick(&s, &InputSnapshot::new(), 0, &cfg, &mut rng);
    assert_eq!(s.status, GameStatus::GameOver);
    assert!(!s.is_running());

    let frame = s.frame;
    s = tick(&s, &InputSnapshot::new(), 5000, &cfg, &mut rng);
    assert_eq!(s.frame, frame);
    assert_eq!(s.player1.health, 0);
}

#[test]
fn defeat_by_zombie_ends_the_tick_before_pickup_collection() {
    let cfg = GameConfig::default();
    let mut s = make_state();
    s.player1.health = 1;
    s.enemies.push(zombie(85.0, 185.0));
    s.pickup = Some(Pickup { x: 100.0, y: 200.0 });
    s.pickup_spawned = true;

    let s = tick(&s, &InputSnapshot::new(), 5000, &cfg, &mut seeded_rng());
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.player1.health, 0);
    assert!(s.pickup.is_some());
    assert_eq!(
        s.events,
        vec![GameEvent::PlayerDamaged { health: 0 }, GameEvent::Defeated]
    );
}

#[test]
fn defeat_by_boss_leaves_bullets_untouched() {
    let cfg = GameConfig::default();
    let mut s = make_state();
    s.player1.health = 1;
    s.bosses.push(Enemy { x: 70.0, y: 170.0, health: 4.0, max_health: 4.0, kind: EnemyKind::Boss });
    s.bullets.push(Bullet { x: 400.0, y: 50.0, dx: 10.0, dy: 0.0 });

    let s = tick(&s, &InputSnapshot::new(), 0, &cfg, &mut seeded_rng());
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].x, 400.0);
}

#[test]
fn walking_into_exit_advances_one_level() {
    let cfg = GameConfig::default();
    let mut s = make_state();
    s.player1.x = 660.0;
    s.player1.health = 5;

    let s = tick(&s, &InputSnapshot::with_keys(&[Key::D]), 0, &cfg, &mut seeded_rng());
    assert_eq!(s.level, 2);
    assert_eq!(s.player1.x, 100.0);
    assert_eq!(s.player1.y, 200.0);
    assert_eq!(s.player1.health, 5);
    assert_eq!(s.enemies.len(), 8);
    assert_eq!(s.mode, GameMode::SinglePlayer);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn pickup_appears_on_fifth_level() {
    let cfg = GameConfig::default();
    let mut s = make_state();
    s.level = 5;
    let s = tick(&s, &InputSnapshot::new(), 0, &cfg, &mut seeded_rng());
    assert!(s.pickup.is_some());
    assert!(s.events.contains(&GameEvent::PickupSpawned));
}

#[test]
fn shot_delay_applies_across_ticks() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = make_state();
    let mut fire = InputSnapshot::with_keys(&[Key::Space]);
    fire.set_pointer(100.0, 50.0); // straight up, away from everything

    s = tick(&s, &fire, 0, &cfg, &mut rng);
    s = tick(&s, &fire, 200, &cfg, &mut rng);
    assert_eq!(s.bullets.len(), 1);
    s = tick(&s, &fire, 350, &cfg, &mut rng);
    assert_eq!(s.bullets.len(), 2);
}

// ── Two-player survival toggle ────────────────────────────────────────────────

#[test]
fn two_player_without_survival_freezes_enemies() {
    let cfg = GameConfig {
        two_player_survival: false,
        ..GameConfig::default()
    };
    let mut s = make_state();
    s.mode = GameMode::TwoPlayer;
    s.player2 = Some(Player { x: 300.0, y: 300.0, health: 8, max_health: 8 });
    s.enemies.push(zombie(500.0, 100.0));

    let s = tick(&s, &InputSnapshot::new(), 0, &cfg, &mut seeded_rng());
    assert_eq!((s.enemies[0].x, s.enemies[0].y), (500.0, 100.0));
    assert!(!runs_survival(GameMode::TwoPlayer, &cfg));
    assert!(runs_survival(GameMode::SinglePlayer, &cfg));
}

#[test]
fn two_player_survival_runs_by_default() {
    let cfg = GameConfig::default();
    let mut s = make_state();
    s.mode = GameMode::TwoPlayer;
    s.player2 = Some(Player { x: 300.0, y: 300.0, health: 8, max_health: 8 });
    s.enemies.push(zombie(500.0, 100.0));

    let s = tick(&s, &InputSnapshot::new(), 0, &cfg, &mut seeded_rng());
    assert_eq!((s.enemies[0].x, s.enemies[0].y), (498.5, 101.5));
}

#[test]
fn two_player_without_survival_ignores_fire_keys() {
    let cfg = GameConfig {
        two_player_survival: false,
        ..GameConfig::default()
    };
    let mut s = make_state();
    s.mode = GameMode::TwoPlayer;
    s.player2 = Some(Player { x: 300.0, y: 300.0, health: 8, max_health: 8 });

    let fire = InputSnapshot::with_keys(&[Key::Space, Key::L]);
    for i in 0..20 {
        s = tick(&s, &fire, i * 1000, &cfg, &mut seeded_rng());
    }
    assert!(s.bullets.is_empty());
    assert_eq!(s.last_shot_at, None);
}
