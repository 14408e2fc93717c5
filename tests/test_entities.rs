use zombie_shooter::entities::*;

fn player(x: f32, y: f32) -> Player {
    Player { x, y, health: 8, max_health: 8 }
}

fn make_state() -> GameState {
    GameState {
        mode: GameMode::SinglePlayer,
        status: GameStatus::Playing,
        player1: player(100.0, 200.0),
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

#[test]
fn entity_clone_and_eq() {
    assert_eq!(EnemyKind::Zombie, EnemyKind::Zombie);
    assert_ne!(EnemyKind::Zombie, EnemyKind::Boss);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(GameMode::SinglePlayer, GameMode::TwoPlayer);

    let p = player(1.0, 2.0);
    assert_eq!(p.clone(), p);
}

#[test]
fn game_state_clone_is_independent() {
    let original = make_state();
    let mut cloned = original.clone();

    cloned.player1.x = 99.0;
    cloned.level = 7;
    cloned.enemies.push(Enemy {
        x: 5.0,
        y: 5.0,
        health: 1.0,
        max_health: 1.0,
        kind: EnemyKind::Zombie,
    });

    assert_eq!(original.player1.x, 100.0);
    assert_eq!(original.level, 1);
    assert!(original.enemies.is_empty());
}

// ── Damage cooldown state ─────────────────────────────────────────────────────

#[test]
fn damage_state_vulnerable_without_cooldown() {
    let s = make_state();
    assert_eq!(s.damage_state(0), DamageState::Vulnerable);
    assert_eq!(s.damage_state(123_456), DamageState::Vulnerable);
}

#[test]
fn damage_state_cooldown_until_deadline() {
    let mut s = make_state();
    s.damage_cooldown_until = Some(1000);
    assert_eq!(s.damage_state(0), DamageState::Cooldown);
    assert_eq!(s.damage_state(999), DamageState::Cooldown);
    assert_eq!(s.damage_state(1000), DamageState::Vulnerable);
}

// ── Session flags & players ───────────────────────────────────────────────────

#[test]
fn game_over_stops_running() {
    let mut s = make_state();
    assert!(s.is_running());
    s.status = GameStatus::GameOver;
    assert!(!s.is_running());
}

#[test]
fn players_lists_active_slots() {
    let mut s = make_state();
    let slots: Vec<_> = s.players().into_iter().map(|(slot, _)| slot).collect();
    assert_eq!(slots, vec![PlayerSlot::One]);

    s.player2 = Some(player(50.0, 50.0));
    let slots: Vec<_> = s.players().into_iter().map(|(slot, _)| slot).collect();
    assert_eq!(slots, vec![PlayerSlot::One, PlayerSlot::Two]);
}
