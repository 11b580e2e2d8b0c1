//! Client-management table.

use gavel_core::{
  api::AdminApi,
  status::format_status_text,
  workflow::{SortField, SortOrder},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use crate::app::App;

/// Render the clients view: statistics header, table, pagination line.
pub fn draw<A: AdminApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // statistics
      Constraint::Min(0),    // table
      Constraint::Length(1), // pagination
    ])
    .split(area);

  draw_statistics(f, rows[0], app);
  draw_table(f, rows[1], app);
  draw_pagination(f, rows[2], app);
}

fn draw_statistics<A: AdminApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let s = &app.page.statistics;
  let line = Line::from(vec![
    Span::raw(format!(" total {}", s.total)),
    Span::styled(
      format!("  active {}", s.active),
      Style::default().fg(Color::Green),
    ),
    Span::styled(
      format!("  blocked {}", s.blocked),
      Style::default().fg(Color::Red),
    ),
    Span::styled(
      format!("  verified {}", s.verified),
      Style::default().fg(Color::Cyan),
    ),
    Span::styled(
      format!("  unverified {}", s.unverified),
      Style::default().fg(Color::DarkGray),
    ),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

fn draw_table<A: AdminApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let filter = app.query.status.as_ref();
  let title = match &app.query.search {
    Some(search) => format!(" Clients ({filter}, search \"{search}\") "),
    None => format!(" Clients ({filter}) "),
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let header = Row::new(vec![
    header_cell(app, "Name", Some(SortField::FullName)),
    header_cell(app, "Email", Some(SortField::Email)),
    header_cell(app, "Status", Some(SortField::Status)),
    header_cell(app, "Blocked", None),
  ])
  .style(Style::default().add_modifier(Modifier::BOLD));

  let rows: Vec<Row> = app
    .page
    .clients
    .iter()
    .map(|client| {
      let blocked = if client.blocked {
        let reason = client.block_reason.as_deref().unwrap_or("no reason");
        format!("yes — {reason}")
      } else {
        "no".to_string()
      };
      let status = if client.is_verified {
        "Verified".to_string()
      } else {
        format_status_text(client.verification_status.as_deref())
      };
      Row::new(vec![
        client.full_name.clone(),
        client.email.clone(),
        status,
        blocked,
      ])
    })
    .collect();

  let mut state = TableState::default();
  state.select((!app.page.clients.is_empty()).then_some(app.client_cursor));

  let table = Table::new(
    rows,
    [
      Constraint::Percentage(25),
      Constraint::Percentage(30),
      Constraint::Percentage(20),
      Constraint::Percentage(25),
    ],
  )
  .header(header)
  .block(block)
  .row_highlight_style(
    Style::default()
      .bg(Color::Blue)
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  f.render_stateful_widget(table, area, &mut state);
}

/// Column heading, with a direction marker on the active sort field.
fn header_cell<A: AdminApi>(
  app: &App<A>,
  name: &str,
  field: Option<SortField>,
) -> String {
  match field {
    Some(field) if app.query.sort_by == field => {
      let arrow = match app.query.order {
        SortOrder::Asc => "▲",
        SortOrder::Desc => "▼",
      };
      format!("{name} {arrow}")
    }
    _ => name.to_string(),
  }
}

fn draw_pagination<A: AdminApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let line = format!(
    " page {}/{}  ·  {} items  ·  sort {} {}",
    app.query.page,
    app.page.total_pages.max(1),
    app.page.total_items,
    app.query.sort_by.as_ref(),
    app.query.order.as_ref(),
  );
  f.render_widget(
    Paragraph::new(line).style(Style::default().fg(Color::DarkGray)),
    area,
  );
}
