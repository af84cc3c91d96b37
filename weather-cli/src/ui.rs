//! Rendering of the interactive screen.
//!
//! Every element is driven by one field of [`ViewState`]; none of them hide
//! each other, so a stale card can sit under a fresh error banner.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use weather_core::{
    ViewState, WeatherResult,
    view::{INPUT_LABEL, INPUT_PLACEHOLDER, card_lines},
};

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];
pub const SUBMIT_LABEL: &str = "Search";

const INPUT_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 10;
const CARD_HEIGHT: u16 = 5;

const BORDER: Color = Color::Rgb(80, 80, 100);

pub fn render(frame: &mut Frame, state: &ViewState, tick: u32) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER))
        .title(" Weather App ")
        .title_style(Style::default().fg(Color::Cyan).bold())
        .title_alignment(Alignment::Center);

    let area = frame.area();
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let mut constraints = vec![Constraint::Length(INPUT_HEIGHT)];
    if state.loading {
        constraints.push(Constraint::Length(1));
    }
    if state.error.is_some() {
        constraints.push(Constraint::Length(1));
    }
    if state.weather.is_some() {
        constraints.push(Constraint::Length(CARD_HEIGHT));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::vertical(constraints).split(inner);
    let mut slots = chunks.iter().copied();
    let mut next = || slots.next().unwrap_or_default();

    render_input(frame, next(), state);

    if state.loading {
        render_spinner(frame, next(), tick);
    }

    if let Some(error) = state.error.as_deref() {
        let line = Line::from(Span::styled(error, Style::default().fg(Color::Red).bold()));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), next());
    }

    if let Some(weather) = state.weather.as_ref() {
        render_card(frame, next(), weather);
    }

    let _spacer = next();
    render_help(frame, next());
}

fn render_input(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [input_area, button_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(BUTTON_WIDTH)]).areas(area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(format!(" {INPUT_LABEL} "));
    let text_area = input_block.inner(input_area);

    let text = if state.query.is_empty() {
        Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.query.as_str())
    };
    frame.render_widget(Paragraph::new(Line::from(text)).block(input_block), input_area);

    let typed = u16::try_from(state.query.chars().count()).unwrap_or(u16::MAX);
    let max_x = text_area.right().saturating_sub(1);
    frame.set_cursor_position(Position::new(
        text_area.x.saturating_add(typed).min(max_x),
        text_area.y,
    ));

    let button_style = if state.can_submit() {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(Line::from(Span::styled(SUBMIT_LABEL, button_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(button_style),
        );
    frame.render_widget(button, button_area);
}

fn render_spinner(frame: &mut Frame, area: Rect, tick: u32) {
    let spinner = SPINNERS[(tick as usize / 2) % SPINNERS.len()];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Cyan)),
        Span::styled(" Fetching weather...", Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_card(frame: &mut Frame, area: Rect, weather: &WeatherResult) {
    let [title, temperature, conditions] = card_lines(weather);
    let lines = vec![
        Line::from(Span::styled(title, Style::default().fg(Color::White).bold())),
        Line::from(temperature),
        Line::from(conditions),
    ];

    let card = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER)),
    );
    frame.render_widget(card, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).bold();
    let hint = Style::default().fg(Color::DarkGray);
    let help = Line::from(vec![
        Span::styled("Enter", key),
        Span::styled(" search  ", hint),
        Span::styled("Ctrl-U", key),
        Span::styled(" clear  ", hint),
        Span::styled("Esc", key),
        Span::styled(" quit", hint),
    ])
    .centered();
    frame.render_widget(Paragraph::new(help), area);
}
