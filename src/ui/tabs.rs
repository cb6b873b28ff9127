use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};
use crate::games::Game;

/// Tab title plus the session best, once there is one.
fn tab_label(app: &App, tab: Tab) -> String {
    let best = match tab {
        Tab::Home => 0,
        Tab::Flappy => app.flappy.best_score(),
        Tab::Snake => app.snake.best_score(),
    };
    if best > 0 {
        format!("{}★{} ", tab.title(), best)
    } else {
        tab.title().to_string()
    }
}

fn status_text(app: &App) -> Option<String> {
    let (state, fps) = match app.current_tab {
        Tab::Home => return None,
        Tab::Flappy => (app.flappy.state(), app.flappy.fps()),
        Tab::Snake => (app.snake.state(), app.snake.fps()),
    };
    Some(format!(" {} · {} fps ", state.label(), fps))
}

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(120, 120, 140))
            };
            Line::from(Span::styled(tab_label(app, *t), style))
        })
        .collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .border_type(BorderType::Rounded)
        .title(" 🕹 Twincade ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    if let Some(status) = status_text(app) {
        block = block.title(
            Line::from(Span::styled(status, Style::default().fg(Color::Rgb(120, 120, 140)))).right_aligned(),
        );
    }

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
