mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use zombie_shooter::compute::{init_state, resize, tick, tick_second};
use zombie_shooter::config::GameConfig;
use zombie_shooter::entities::{GameEvent, GameMode, GameState, GameStatus};
use zombie_shooter::error::GameError;
use zombie_shooter::input::{InputSnapshot, Key, Pointer};

use display::Viewport;

const SECOND: Duration = Duration::from_secs(1);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms at
/// 30 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Frames player 1 stays tinted after losing health.
const HURT_FLASH_FRAMES: u32 = 6;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<Key, u64>, key: Key, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Terminal key → simulation key.
fn map_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::W),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::A),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::D),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(Key::L),
        _ => None,
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(GameMode),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "ZOMBIE  SHOOTER";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select mode:"))?;

    let options: &[(&str, &str, &str)] = &[
        ("1", "Single player", "Survive the horde, reach the exit"),
        ("2", "Two players  ", "P1 takes the hits, P2 backs them up"),
    ];
    for (i, (key, label, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(*label))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("  {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Reach the EXIT on the right to advance.  Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let ev = match rx.recv() {
            Ok(ev) => ev,
            // Input thread is gone; nothing can answer the menu any more.
            Err(_) => return Ok(MenuResult::Quit),
        };
        if let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(GameMode::SinglePlayer)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(GameMode::TwoPlayer)),
                _ if is_quit(&code, modifiers) => return Ok(MenuResult::Quit),
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the fresh keys become one
/// `InputSnapshot`, so simultaneous keys (move + shoot, two players) all
/// apply.  Keyboard-enhanced terminals also send releases, which drop a key
/// immediately; elsewhere keys expire after `HOLD_WINDOW` silent frames.
fn game_loop<W: Write>(
    out: &mut W,
    mode: GameMode,
    rx: &mpsc::Receiver<Event>,
    cfg: &GameConfig,
) -> Result<bool, GameError> {
    let mut rng = thread_rng();
    let frame_budget = Duration::from_millis(cfg.frame_ms);

    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, cfg);
    let (width, height) = view.world_size();
    let mut state: GameState = init_state(mode, width, height, cfg, &mut rng);

    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut pointer = Pointer::default();
    let mut hurt_frames: u32 = 0;
    let mut frame: u64 = 0;

    let session_start = Instant::now();
    let mut next_second = session_start + SECOND;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        if is_quit(&code, modifiers) {
                            return Ok(true);
                        }
                        if matches!(code, KeyCode::Char('r') | KeyCode::Char('R'))
                            && state.status == GameStatus::GameOver
                        {
                            return Ok(false);
                        }
                        if let Some(key) = map_key(&code) {
                            key_frame.insert(key, frame);
                        }
                    }
                    KeyEventKind::Repeat => {
                        if let Some(key) = map_key(&code) {
                            key_frame.insert(key, frame);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(key) = map_key(&code) {
                            key_frame.remove(&key);
                        }
                    }
                },
                Event::Mouse(MouseEvent { column, row, .. }) => {
                    pointer = view.to_world(column, row);
                }
                _ => {}
            }
        }

        // ── Surface size is re-read every frame ───────────────────────────────
        let (cols, rows) = terminal::size()?;
        view = Viewport::new(cols, rows, cfg);
        let (width, height) = view.world_size();
        state = resize(&state, width, height);

        // ── One simulation step from a full key-state snapshot ────────────────
        let mut input = InputSnapshot::new();
        for &key in key_frame.keys() {
            if is_held(&key_frame, key, frame) {
                input.press(key);
            }
        }
        input.pointer = pointer;

        let now_ms = session_start.elapsed().as_millis() as u64;
        state = tick(&state, &input, now_ms, cfg, &mut rng);

        for ev in &state.events {
            log::trace!("frame {}: {:?}", state.frame, ev);
            if matches!(ev, GameEvent::PlayerDamaged { .. }) {
                hurt_frames = HURT_FLASH_FRAMES;
            }
        }
        hurt_frames = hurt_frames.saturating_sub(1);

        // ── Independent one-second timer ──────────────────────────────────────
        while Instant::now() >= next_second {
            state = tick_second(&state);
            next_second += SECOND;
        }

        display::render(out, &state, &view, input.pointer, hurt_frames > 0, cfg)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logger(cfg: &GameConfig) -> Result<(), GameError> {
    // The game owns the terminal, so log lines go to a file.
    let file = File::create(&cfg.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| GameError::Logger(e.to_string()))
}

fn main() -> Result<(), GameError> {
    let cfg = GameConfig::load(&GameConfig::default_path())?;
    init_logger(&cfg)?;
    log::info!("zombie shooter starting, frame budget {} ms", cfg.frame_ms);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    log::debug!("keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::error!("event read failed: {}", e);
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &cfg);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("exiting with error: {}", e);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cfg: &GameConfig,
) -> Result<(), GameError> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start(mode) => {
                if game_loop(out, mode, rx, cfg)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    log::info!("bye");
    Ok(())
}
