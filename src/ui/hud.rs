use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::session::SimulationSnapshot;

/// Cells in the energy gauge bar.
const ENERGY_BAR_WIDTH: u16 = 16;

/// Energy fraction under which the gauge switches to the warning color.
const ENERGY_LOW_NUMERATOR: u16 = 1;
const ENERGY_LOW_DENOMINATOR: u16 = 4;

/// Renders the two HUD rows below the playfield.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &SimulationSnapshot, theme: &Theme) {
    let [stats_row, help_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(Paragraph::new(stats_line(snapshot, theme)), stats_row);
    frame.render_widget(Paragraph::new(help_line(snapshot, theme)), help_row);
}

fn stats_line<'a>(snapshot: &SimulationSnapshot, theme: &Theme) -> Line<'a> {
    let low = snapshot.energy
        < snapshot.energy_cap * ENERGY_LOW_NUMERATOR / ENERGY_LOW_DENOMINATOR;
    let gauge_color = if low { theme.energy_low } else { theme.energy_ok };

    let label = Style::new().fg(theme.hud_muted);
    let value = Style::new().fg(theme.hud_text).add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled(" Score ", label),
        Span::styled(snapshot.score.to_string(), value),
        Span::styled("  Energy ", label),
        Span::styled(energy_bar(snapshot.energy, snapshot.energy_cap), Style::new().fg(gauge_color)),
        Span::styled(
            format!(" {}/{}", snapshot.energy, snapshot.energy_cap),
            Style::new().fg(gauge_color),
        ),
        Span::styled("  Length ", label),
        Span::styled(snapshot.body.len().to_string(), value),
    ])
}

fn help_line<'a>(snapshot: &SimulationSnapshot, theme: &Theme) -> Line<'a> {
    let muted = Style::new().fg(theme.hud_muted);
    Line::from(vec![Span::styled(
        format!(
            " Time {}  Speed {}ms  Blocks {}/{}  [p]ause [m]enu [+/-] speed [q]uit",
            format_elapsed(snapshot.elapsed_play),
            snapshot.tick_interval.as_millis(),
            snapshot.foods.len(),
            snapshot.food_capacity,
        ),
        muted,
    )])
}

fn energy_bar(energy: u16, cap: u16) -> String {
    let filled = if cap == 0 {
        0
    } else {
        usize::from(energy.min(cap)) * usize::from(ENERGY_BAR_WIDTH) / usize::from(cap)
    };

    let mut bar = String::with_capacity(usize::from(ENERGY_BAR_WIDTH));
    for index in 0..usize::from(ENERGY_BAR_WIDTH) {
        bar.push(if index < filled { '#' } else { '-' });
    }
    bar
}

/// Formats a play duration as `mm:ss`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{energy_bar, format_elapsed};

    #[test]
    fn elapsed_formats_as_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(59)), "00:59");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "01:01");
        assert_eq!(format_elapsed(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn energy_bar_scales_with_the_cap() {
        assert_eq!(energy_bar(0, 32), "----------------");
        assert_eq!(energy_bar(16, 32), "########--------");
        assert_eq!(energy_bar(32, 32), "################");
    }
}
