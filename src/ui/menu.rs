use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{INTRO_TICKS, Theme};
use crate::engine::DeathReason;
use crate::session::SettingsView;
use crate::ui::hud::format_elapsed;

/// Draws the intro card shown before the first round.
pub fn render_intro_overlay(frame: &mut Frame<'_>, area: Rect, ticks_left: u32, theme: &Theme) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("E N E R G Y   S N A K E"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.overlay_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from("Eat energy blocks before your charge runs out."),
        Line::from(""),
        Line::from(intro_progress(ticks_left)),
        Line::from(""),
        Line::from("[Q] Skip"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" intro ")),
        body_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_overlay(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[M] Settings"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.hud_text))
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the settings overlay with the single editable entry.
pub fn render_settings_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    settings: &SettingsView,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let marker = if settings.cursor == 0 { ">" } else { " " };
    let lines = vec![
        Line::from("SETTINGS"),
        Line::from(""),
        Line::from(format!(
            "{marker} Max energy blocks   < {} >   (1..{})",
            settings.max_food_blocks, settings.limit
        )),
        Line::from(""),
        Line::styled(
            "arrows or < > adjust",
            Style::default().fg(theme.overlay_footer),
        ),
        Line::styled(
            "[M] close and restart round",
            Style::default().fg(theme.overlay_footer),
        ),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.hud_text))
            .block(Block::bordered().title(" settings ")),
        popup,
    );
}

/// Draws the end-of-round screen.
pub fn render_lost_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    elapsed: Duration,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 45);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::styled(
            "GAME OVER",
            Style::default()
                .fg(theme.overlay_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("Time: {}", format_elapsed(elapsed))),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Cause: hit the wall",
            Some(DeathReason::SelfCollision) => "Cause: bit yourself",
            Some(DeathReason::EnergyDepleted) => "Cause: ran out of energy",
            None => "",
        }),
        Line::from(""),
        Line::from("[R]/[Enter] Play Again"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.hud_text))
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn intro_progress(ticks_left: u32) -> String {
    // Dots march as the intro counts down.
    let lit = (INTRO_TICKS.saturating_sub(ticks_left) * 8 / INTRO_TICKS.max(1)) as usize;
    let mut dots = String::new();
    for index in 0..8 {
        dots.push(if index < lit { '•' } else { '·' });
    }
    dots
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
