#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Grid dimensions are tiny, casts to u16 for terminal coordinates are safe
    clippy::cast_possible_truncation
)]

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::board::Board;
use crate::components::GameState;
use crate::game::{BOARD_COLS, BOARD_ROWS};
use crate::geometry::CellId;

pub fn render(f: &mut Frame, app: &mut App) {
    // Each cell is 2 characters wide and 1 tall; the grid already carries
    // its own border frame, so no extra ratatui border around it.
    let cell_width = 2u16;
    let board_width = BOARD_COLS as u16 * cell_width;
    let board_height = BOARD_ROWS as u16;
    let min_info_width = 22u16;
    let min_total_width = board_width + min_info_width;
    let min_total_height = board_height + 3;

    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Gridfall"));
        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width + 2),
            Constraint::Min(min_info_width),
        ])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Grid
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(6), // Score
            Constraint::Min(5),    // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("GRIDFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_grid(f, app, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let game_state = app.world.resource::<GameState>();
    let stats = format!(
        "Score: {}\nRows: {}",
        game_state.score, game_state.rows_cleared
    );
    let stats_widget = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_widget, info_layout[1]);

    let status = if game_state.game_over {
        Paragraph::new("GAME OVER!\nPress Enter to restart")
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Paragraph::new(
            "Controls:\n\
            ←/→: Move left/right\n\
            ↓: Move down\n\
            ↑: Rotate\n\
            Q: Quit\n\
            ",
        )
    }
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(status, info_layout[2]);
}

// Projects the board's tag state onto the terminal. The grid itself is the
// source of truth; nothing is read back from the screen.
fn render_grid(f: &mut Frame, app: &mut App, area: Rect) {
    let cell_width = 2u16;
    let board = app.world.resource::<Board>();

    for row in 0..BOARD_ROWS {
        for col in 0..BOARD_COLS {
            let cell = board.cell(CellId::new(row, col));

            let (symbol, color) = if cell.blink {
                ("█", Color::White)
            } else if cell.border {
                ("█", Color::DarkGray)
            } else if let Some(kind) = cell.falling {
                ("█", kind.color())
            } else if let Some(kind) = cell.settled {
                ("█", kind.color())
            } else {
                (" ", Color::Black)
            };

            let x = area.left() + col as u16 * cell_width;
            let y = area.top() + row as u16;
            if x + 1 >= area.right() || y >= area.bottom() {
                continue;
            }

            for dx in 0..cell_width {
                if let Some(buf_cell) = f.buffer_mut().cell_mut((x + dx, y)) {
                    buf_cell.set_symbol(symbol);
                    buf_cell.set_fg(color);
                    buf_cell.set_bg(Color::Black);
                }
            }
        }
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
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
