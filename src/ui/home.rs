use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::RESTART_KEYS;

const BANNER: &str = r#"
 ╔═══════════════════════════════════════════════════════════════════╗
 ║ ████████╗██╗    ██╗██╗███╗   ██╗ ██████╗ █████╗ ██████╗ ███████╗ ║
 ║ ╚══██╔══╝██║    ██║██║████╗  ██║██╔════╝██╔══██╗██╔══██╗██╔════╝ ║
 ║    ██║   ██║ █╗ ██║██║██╔██╗ ██║██║     ███████║██║  ██║█████╗   ║
 ║    ██║   ██║███╗██║██║██║╚██╗██║██║     ██╔══██║██║  ██║██╔══╝   ║
 ║    ██║   ╚███╔███╔╝██║██║ ╚████║╚██████╗██║  ██║██████╔╝███████╗ ║
 ║    ╚═╝    ╚══╝╚══╝ ╚═╝╚═╝  ╚═══╝ ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝ ║
 ╚═══════════════════════════════════════════════════════════════════╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

const GAME_TILES: [GameTile; 2] = [
    GameTile { key: "1", icon: "🐦", name: "Flappy", desc: "Flap through\nthe pipe gaps!", color: Color::Rgb(255, 220, 80), border_color: Color::Rgb(140, 120, 40) },
    GameTile { key: "2", icon: "🐍", name: "Snake", desc: "Eat apples,\ndon't bite yourself!", color: Color::Rgb(80, 220, 80), border_color: Color::Rgb(40, 120, 40) },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, best: u32, selected: bool) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let mut lines: Vec<Line> = Vec::new();

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ]));

    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(vec![
            Span::styled(desc_line, Style::default().fg(if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) })),
        ]));
    }

    // Best score this session, memory only
    let best_text = if best > 0 { format!("🏆 Best: {}", best) } else { "No score yet".to_string() };
    lines.push(Line::from(Span::styled(best_text, Style::default().fg(Color::Rgb(200, 200, 220)))));

    if selected {
        lines.push(Line::from(vec![
            Span::styled("▶ Enter to play", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn key_line(key: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<17}", key), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(what, Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

fn game_controls(game_idx: usize) -> Vec<Line<'static>> {
    match game_idx {
        0 => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  🐦 Flappy", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("  Keep the bird between the pipes!", Style::default().fg(Color::Rgb(100, 100, 120))),
            ]),
            Line::from(""),
            key_line("Space / ↑", "Flap (and start)"),
            key_line(RESTART_KEYS, "Play again"),
            key_line("P", "Pause"),
        ],
        1 => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  🐍 Snake", Style::default().fg(Color::Rgb(80, 220, 80)).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("  Every fifth apple speeds you up!", Style::default().fg(Color::Rgb(100, 100, 120))),
            ]),
            Line::from(""),
            key_line("↑ ↓ ← →", "Steer (and start)"),
            key_line(RESTART_KEYS, "Play again"),
            key_line("P", "Pause"),
        ],
        _ => vec![],
    }
}

/// `best` holds the session best per tile, in tile order.
pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize, best: [u32; 2]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(8),  // Game tiles
            Constraint::Min(10),    // Controls area
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(vec![
        Span::styled(
            "  ⚡ Two Games, One Loop ⚡  ",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games: ←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(games_inner);

    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, best[i], selected_game == i);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .split(chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  🔧 Navigation", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]),
        key_line("Tab / Shift+Tab", "Switch tabs"),
        key_line("1-2", "Launch game"),
        key_line("← →", "Select game"),
        key_line("Enter", "Play selected"),
        key_line("Esc", "Return to Home"),
        key_line("q / Ctrl+C", "Quit"),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation Control ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let selected = selected_game.min(GAME_TILES.len() - 1);
    let game_ctrl = Paragraph::new(game_controls(selected))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
                .title(format!(" 🎮 {} Control ", GAME_TILES[selected].name))
                .title_style(Style::default().fg(GAME_TILES[selected].color).add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(concat!("v", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled("Best scores reset when you quit", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);
}
