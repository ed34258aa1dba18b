use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{GlyphSet, HUD_HEIGHT, Theme};
use crate::session::{SessionState, SimulationSnapshot};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{
    render_intro_overlay, render_lost_overlay, render_pause_overlay, render_settings_overlay,
};

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &SimulationSnapshot, theme: &Theme, glyphs: &GlyphSet) {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(frame.area());

    let board_area = board_rect(play_area, snapshot);
    let block = Block::bordered().border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, snapshot, theme, glyphs);
    render_snake(frame, inner, snapshot, theme, glyphs);
    render_hud(frame, hud_area, snapshot, theme);

    match snapshot.state {
        SessionState::Intro => {
            render_intro_overlay(frame, board_area, snapshot.intro_ticks_left, theme);
        }
        SessionState::Paused => render_pause_overlay(frame, board_area, theme),
        SessionState::Settings => {
            render_settings_overlay(frame, board_area, &snapshot.settings, theme);
        }
        SessionState::Lost => render_lost_overlay(
            frame,
            board_area,
            snapshot.score,
            snapshot.elapsed_play,
            snapshot.death_reason,
            theme,
        ),
        SessionState::Playing => {}
    }
}

fn board_rect(area: Rect, snapshot: &SimulationSnapshot) -> Rect {
    Rect {
        x: area.x,
        y: area.y,
        width: snapshot.board.width().min(area.width),
        height: snapshot.board.height().min(area.height),
    }
}

fn render_food(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &SimulationSnapshot,
    theme: &Theme,
    glyphs: &GlyphSet,
) {
    let buffer = frame.buffer_mut();
    for block in &snapshot.foods {
        let Some((x, y)) = logical_to_terminal(inner, *block) else {
            continue;
        };
        buffer.set_string(x, y, glyphs.food, Style::new().fg(theme.food));
    }
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &SimulationSnapshot,
    theme: &Theme,
    glyphs: &GlyphSet,
) {
    let buffer = frame.buffer_mut();
    for segment in &snapshot.body {
        let Some((x, y)) = logical_to_terminal(inner, *segment) else {
            continue;
        };

        if *segment == snapshot.head {
            buffer.set_string(
                x,
                y,
                glyphs.snake_head,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else if *segment == snapshot.tail {
            buffer.set_string(x, y, glyphs.snake_tail, Style::new().fg(theme.snake_tail));
        } else {
            buffer.set_string(x, y, glyphs.snake_body, Style::new().fg(theme.snake_body));
        }
    }
}

/// Maps an interior board cell to a terminal cell inside `inner`.
///
/// The block border already covers the board's frame cells, so interior
/// coordinates shift by one on both axes.
fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x.checked_sub(1)?).ok()?;
    let y_offset = u16::try_from(position.y.checked_sub(1)?).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
