//! Pending-verifications queue.

use gavel_core::{
  api::AdminApi,
  status::{classify, format_status_text},
  subject::UserType,
};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::App;

/// Render the pending queue. Each row carries the classifier badge for
/// its subject, computed fresh every frame.
pub fn draw<A: AdminApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let queue = match app.queue_type {
    UserType::Client => "clients",
    UserType::Worker => "workers",
  };
  let block = Block::default()
    .title(format!(" Pending {queue} ({}) ", app.pending.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = app
    .pending
    .iter()
    .map(|subject| {
      let meta = classify(subject);
      let badge_color = match meta.icon {
        "shield-check" => Color::Green,
        "alert-triangle" | "file-x" => Color::Red,
        "clock" => Color::Yellow,
        _ => Color::DarkGray,
      };

      let head = Line::from(vec![
        Span::styled(
          format!("{} <{}>", subject.full_name, subject.email),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
          format!("  [{}]", meta.label),
          Style::default().fg(badge_color),
        ),
      ]);
      let detail = Line::from(Span::styled(
        format!(
          "    {} · raw: {} · {}",
          meta.help,
          format_status_text(subject.verification_status.as_deref()),
          subject
            .submitted_at
            .map(|t| t.format("submitted %Y-%m-%d").to_string())
            .unwrap_or_else(|| "not submitted".to_string()),
        ),
        Style::default().fg(Color::DarkGray),
      ));

      ListItem::new(vec![head, detail])
    })
    .collect();

  let mut state = ListState::default();
  state.select((!app.pending.is_empty()).then_some(app.pending_cursor));

  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    area,
    &mut state,
  );
}
