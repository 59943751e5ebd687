use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Field};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("EMI Calculator")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let amount = Paragraph::new(format!("₹{}", app.amount))
        .style(Style::default().fg(Color::Yellow))
        .block(field_block("Loan Amount", app.focus == Field::Amount));
    f.render_widget(amount, chunks[1]);

    let rate = Paragraph::new(format!("{}%", app.rate))
        .style(Style::default().fg(Color::Yellow))
        .block(field_block(
            &format!("Interest Rate (1-30% per annum): {}", app.rate_text),
            app.focus == Field::Rate,
        ));
    f.render_widget(rate, chunks[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(chunks[3]);

    render_tenure_list(f, app, body[0]);
    render_outputs(f, app, body[1]);

    let help = Paragraph::new("Tab/Shift-Tab: switch field | ↑/↓: tenure | Esc/q: exit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title.to_string())
}

fn render_tenure_list(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .tenure
        .options
        .iter()
        .map(|o| ListItem::new(o.label.clone()))
        .collect();

    let list = List::new(items)
        .block(field_block("Loan Tenure", app.focus == Field::Tenure))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.tenure.state);
}

fn render_outputs(f: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let slots = &app.outputs;
    let text = vec![
        Line::from(vec![
            Span::styled("Monthly EMI: ", bold),
            Span::styled(slots.monthly_emi.clone(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Total Amount Payable: ", bold),
            Span::styled(slots.total_amount.clone(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Total Interest: ", bold),
            Span::styled(slots.total_interest.clone(), Style::default().fg(Color::Red)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Principal: ", bold),
            Span::raw(slots.principal_out.clone()),
        ]),
        Line::from(vec![
            Span::styled("Interest Rate: ", bold),
            Span::raw(slots.rate_out.clone()),
        ]),
        Line::from(vec![
            Span::styled("Tenure: ", bold),
            Span::raw(slots.tenure_out.clone()),
        ]),
    ];

    let title = if app.is_pending() {
        "Loan Summary (updating...)"
    } else {
        "Loan Summary"
    };
    let summary = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Left);
    f.render_widget(summary, area);
}
