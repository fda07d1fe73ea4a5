use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::sync::OnceLock;

use crate::app::{App, Popup, Section};
use crate::theme::Palette;

static PALETTE: OnceLock<Palette> = OnceLock::new();

fn palette() -> &'static Palette {
    PALETTE.get_or_init(Palette::default)
}

// Helper functions to get chrome colors
fn accent() -> Color { palette().accent }
fn danger() -> Color { palette().danger }
fn success() -> Color { palette().success }
fn warning() -> Color { palette().warning }
fn text() -> Color { palette().text }
fn text_dim() -> Color { palette().text_dim }
fn bg_selected() -> Color { palette().bg_selected }
fn inactive() -> Color { palette().inactive }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(4), // Themed header
            Constraint::Length(3), // Name input
            Constraint::Min(4),    // Roster list
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_header(f, app, chunks[1]);
    draw_input_box(f, app, chunks[2]);
    draw_roster_box(f, app, chunks[3]);
    draw_footer(f, app, chunks[4]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Confirm => draw_confirm_popup(f, app),
        Popup::Help => draw_help_popup(f),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(warning())))
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(text_dim())))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.current_theme();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  {} Standup", theme.emoji, theme.label),
            Style::default().fg(text()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("👥 Team size: {}", app.roster.len()),
            Style::default().fg(text_dim()),
        )),
    ];

    let header = Paragraph::new(lines)
        .style(Style::default().bg(theme.bg))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn draw_input_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Input;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let cursor = if is_active { "_" } else { "" };
    let content = if app.input_buffer.is_empty() && !is_active {
        Span::styled("Enter team member's name", Style::default().fg(text_dim()))
    } else {
        Span::styled(
            format!("{}{}", app.input_buffer, cursor),
            Style::default().fg(text()),
        )
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title(Span::styled(" Add Team Member ", title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(input, area);
}

fn draw_roster_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::List;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let block = Block::default()
        .title(Span::styled(" Presentation Order ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let lines: Vec<Line> = if app.roster.is_empty() {
        vec![Line::from(Span::styled(
            "  No team members yet. Type a name above and press Enter.",
            Style::default().fg(text_dim()),
        ))]
    } else {
        // Keep the selection visible when the roster outgrows the box
        let visible = area.height.saturating_sub(2) as usize;
        let offset = if is_active {
            app.selected.saturating_sub(visible.saturating_sub(1))
        } else {
            0
        };

        app.roster
            .names()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible.max(1))
            .map(|(i, name)| {
                let row_style = if i == app.selected && is_active {
                    Style::default().bg(bg_selected()).fg(text())
                } else {
                    Style::default().fg(text())
                };
                Line::from(vec![
                    Span::styled(format!(" {:>3}. ", i + 1), Style::default().fg(text_dim())),
                    Span::styled(name.clone(), row_style),
                ])
            })
            .collect()
    };

    let roster = Paragraph::new(lines).block(block);
    f.render_widget(roster, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.section {
        Section::Input => vec![
            Span::styled("Enter", Style::default().fg(accent())),
            Span::styled(" add │ ", Style::default().fg(text_dim())),
            Span::styled("Tab", Style::default().fg(accent())),
            Span::styled(" list │ ", Style::default().fg(text_dim())),
            Span::styled("Ctrl+C", Style::default().fg(accent())),
            Span::styled(" quit", Style::default().fg(text_dim())),
        ],
        Section::List => vec![
            Span::styled("s", Style::default().fg(accent())),
            Span::styled(" shuffle │ ", Style::default().fg(text_dim())),
            Span::styled("d", Style::default().fg(danger())),
            Span::styled(" delete │ ", Style::default().fg(text_dim())),
            Span::styled("c", Style::default().fg(danger())),
            Span::styled(" clear │ ", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled(" help │ ", Style::default().fg(text_dim())),
            Span::styled("q", Style::default().fg(accent())),
            Span::styled(" quit", Style::default().fg(text_dim())),
        ],
    };

    let footer = Paragraph::new(Line::from(hints)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_confirm_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(40, 20, f.area());

    f.render_widget(Clear, popup_area);

    let message = app.status_message.as_deref().unwrap_or("Confirm?");

    let confirm = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(warning()))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", Style::default().fg(success()).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes   "),
            Span::styled("n", Style::default().fg(danger()).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Confirm ", Style::default().fg(warning())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(warning())),
    )
    .alignment(Alignment::Center);

    f.render_widget(confirm, popup_area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 70 { 95 } else { 60 },
        if area.height < 30 { 90 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "═══ Adding Names ═══",
            Style::default().fg(warning()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  type      ", Style::default().fg(accent())),
            Span::raw("Fill the name field"),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", Style::default().fg(accent())),
            Span::raw("Add the name to the roster"),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", Style::default().fg(accent())),
            Span::raw("Switch between input and list"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Roster Actions ═══",
            Style::default().fg(warning()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  ↑/↓ j/k   ", Style::default().fg(accent())),
            Span::raw("Move through the list"),
        ]),
        Line::from(vec![
            Span::styled("  s/Space   ", Style::default().fg(accent())),
            Span::raw("Shuffle the presentation order"),
        ]),
        Line::from(vec![
            Span::styled("  d         ", Style::default().fg(accent())),
            Span::raw("Remove the selected name"),
        ]),
        Line::from(vec![
            Span::styled("  c         ", Style::default().fg(accent())),
            Span::raw("Clear the whole roster (asks first)"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Quick Start ═══",
            Style::default().fg(warning()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  standup            ", Style::default().fg(accent())),
            Span::raw("Launch this TUI"),
        ]),
        Line::from(vec![
            Span::styled("  standup --shuffle  ", Style::default().fg(accent())),
            Span::raw("Shuffle and print the order"),
        ]),
        Line::from(vec![
            Span::styled("  standup --list     ", Style::default().fg(accent())),
            Span::raw("Get the roster as JSON for scripts"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("h", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" standup Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
