/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// world coordinates into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use zombie_shooter::config::GameConfig;
use zombie_shooter::entities::{Enemy, GameState, GameStatus, Player};
use zombie_shooter::input::Pointer;
use zombie_shooter::level::exit_rect;
use zombie_shooter::movement::aim_angle;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkGreen;
const C_HUD_LEVEL: Color = Color::White;
const C_HUD_TIME: Color = Color::Yellow;
const C_HEALTH_FULL: Color = Color::Green;
const C_HEALTH_EMPTY: Color = Color::DarkGrey;
const C_PLAYER1: Color = Color::White;
const C_PLAYER2: Color = Color::Cyan;
const C_PLAYER_HURT: Color = Color::Red;
const C_AIM: Color = Color::Grey;
const C_ZOMBIE: Color = Color::Green;
const C_BOSS: Color = Color::DarkYellow;
const C_BULLET: Color = Color::Grey;
const C_PICKUP: Color = Color::Yellow;
const C_EXIT: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world units onto the terminal grid.  Row 0 holds the HUD, rows 1 and
/// `rows - 2` the border, the last row the controls hint; column 0 and
/// `cols - 1` are the side walls.  Everything in between is play surface.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    cell_w: f32,
    cell_h: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, cfg: &GameConfig) -> Self {
        Viewport {
            cols,
            rows,
            cell_w: cfg.cell_width,
            cell_h: cfg.cell_height,
        }
    }

    /// Play-surface size in world units.
    pub fn world_size(&self) -> (f32, f32) {
        (
            self.cols.saturating_sub(2) as f32 * self.cell_w,
            self.rows.saturating_sub(4) as f32 * self.cell_h,
        )
    }

    /// Terminal cell holding world point `(x, y)`, kept inside the walls.
    pub fn to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let max_col = self.cols.saturating_sub(2).max(1);
        let max_row = self.rows.saturating_sub(3).max(2);
        let col = (1.0 + (x / self.cell_w).floor()).max(1.0) as u16;
        let row = (2.0 + (y / self.cell_h).floor()).max(2.0) as u16;
        (col.min(max_col), row.min(max_row))
    }

    /// World point at the centre of terminal cell `(col, row)`.
    pub fn to_world(&self, col: u16, row: u16) -> Pointer {
        Pointer {
            x: (col.saturating_sub(1) as f32 + 0.5) * self.cell_w,
            y: (row.saturating_sub(2) as f32 + 0.5) * self.cell_h,
        }
    }

    /// Cells covered by a world-space rectangle, as (col, row, width, height).
    fn cell_rect(&self, x: f32, y: f32, w: f32, h: f32) -> (u16, u16, u16, u16) {
        let (c0, r0) = self.to_cell(x, y);
        let (c1, r1) = self.to_cell(x + w - 0.01, y + h - 0.01);
        (c0, r0, c1 - c0 + 1, r1 - r0 + 1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `hurt` tints player 1 after a hit.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    pointer: Pointer,
    hurt: bool,
    cfg: &GameConfig,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, view)?;
    } else {
        draw_exit(out, state, view, cfg)?;
        for zombie in &state.enemies {
            draw_enemy(out, zombie, view, cfg.zombie_size, '▓', C_ZOMBIE)?;
        }
        for boss in &state.bosses {
            draw_enemy(out, boss, view, cfg.boss_size, '█', C_BOSS)?;
            draw_boss_health(out, boss, view)?;
        }
        for bullet in &state.bullets {
            let (col, row) = view.to_cell(bullet.x, bullet.y);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_BULLET))?;
            out.queue(Print("•"))?;
        }
        if let Some(pickup) = &state.pickup {
            let (col, row) = view.to_cell(pickup.x, pickup.y);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_PICKUP))?;
            out.queue(Print("✚"))?;
        }

        let p1_color = if hurt { C_PLAYER_HURT } else { C_PLAYER1 };
        draw_player(out, &state.player1, view, pointer, '@', p1_color, cfg)?;
        if let Some(p2) = &state.player2 {
            draw_player(out, p2, view, pointer, '&', C_PLAYER2, cfg)?;
        }
    }

    draw_controls_hint(out, state, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn health_bar(player: &Player) -> (String, String) {
    let full = player.health.min(player.max_health) as usize;
    let empty = player.max_health as usize - full;
    ("♥".repeat(full), "·".repeat(empty))
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Health bars — left
    out.queue(cursor::MoveTo(1, 0))?;
    for (label, player) in [("P1 ", Some(&state.player1)), (" P2 ", state.player2.as_ref())] {
        let Some(player) = player else { continue };
        let (full, empty) = health_bar(player);
        out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
        out.queue(Print(label))?;
        out.queue(style::SetForegroundColor(C_HEALTH_FULL))?;
        out.queue(Print(full))?;
        out.queue(style::SetForegroundColor(C_HEALTH_EMPTY))?;
        out.queue(Print(empty))?;
    }

    // Level — centre
    let level_str = format!("Level: {}", state.level);
    let lx = (view.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Timer — right
    let time_str = format!("Time: {}s", state.elapsed_secs);
    let tx = view.cols.saturating_sub(time_str.len() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(
    out: &mut W,
    (col, row, w, h): (u16, u16, u16, u16),
    glyph: char,
) -> std::io::Result<()> {
    let line: String = std::iter::repeat(glyph).take(w as usize).collect();
    for r in row..row + h {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_exit<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    cfg: &GameConfig,
) -> std::io::Result<()> {
    let (x, y, w, h) = exit_rect(state.width, state.height, cfg);
    let rect = view.cell_rect(x, y, w, h);
    out.queue(style::SetForegroundColor(C_EXIT))?;
    fill_rect(out, rect, '▒')?;

    let label = "EXIT";
    let (col, row, width, _) = rect;
    let lx = col + (width / 2).saturating_sub(label.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(label))?;
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    view: &Viewport,
    size: f32,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    fill_rect(out, view.cell_rect(enemy.x, enemy.y, size, size), glyph)
}

/// Four-segment bar one row above the boss.
fn draw_boss_health<W: Write>(out: &mut W, boss: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let (col, row) = view.to_cell(boss.x, boss.y);
    if row <= 2 {
        return Ok(());
    }
    let filled = ((boss.health / boss.max_health) * 4.0).ceil() as usize;
    out.queue(cursor::MoveTo(col, row - 1))?;
    out.queue(style::SetForegroundColor(C_HEALTH_FULL))?;
    out.queue(Print("■".repeat(filled.min(4))))?;
    out.queue(style::SetForegroundColor(C_HEALTH_EMPTY))?;
    out.queue(Print("□".repeat(4 - filled.min(4))))?;
    Ok(())
}

/// Arrow for the eighth of the circle `angle` falls in.  Terminal rows grow
/// downward, so positive angles point down.
fn aim_glyph(angle: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];
    let octant = (angle / std::f32::consts::FRAC_PI_4).round() as i32;
    ARROWS[octant.rem_euclid(8) as usize]
}

fn draw_player<W: Write>(
    out: &mut W,
    player: &Player,
    view: &Viewport,
    pointer: Pointer,
    glyph: char,
    color: Color,
    cfg: &GameConfig,
) -> std::io::Result<()> {
    let angle = aim_angle(player.x, player.y, pointer);
    let (gx, gy) = (
        player.x + angle.cos() * cfg.gun_length,
        player.y + angle.sin() * cfg.gun_length,
    );
    let (col, row) = view.to_cell(player.x, player.y);
    let (gcol, grow) = view.to_cell(gx, gy);
    if (gcol, grow) != (col, row) {
        out.queue(cursor::MoveTo(gcol, grow))?;
        out.queue(style::SetForegroundColor(C_AIM))?;
        out.queue(Print(aim_glyph(angle)))?;
    }

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let hint = if state.player2.is_some() {
        "P1: WASD + SPACE   P2: ARROWS + L   MOUSE: Aim   Q: Quit"
    } else {
        "WASD: Move   SPACE: Shoot   MOUSE: Aim   Q: Quit"
    };
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let summary = format!("Reached level {} in {}s", state.level, state.elapsed_secs);
    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", Color::Red),
        ("║     YOU  DIED!     ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (summary.as_str(), Color::Yellow),
        ("R - Menu   Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
