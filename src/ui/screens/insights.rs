use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;

/// The plain-text financial summary, exactly as the assistant receives it.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let report = app.report_text();
    let lines: Vec<Line> = report.lines().map(style_line).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Insights {} ", app.current_month),
            theme::title_style(),
        ));

    let scroll = u16::try_from(app.insights_scroll).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn style_line(line: &str) -> Line<'static> {
    let style = if line.ends_with("OVER BENCHMARK") {
        theme::over_budget_style()
    } else if line.ends_with(':') {
        theme::section_style()
    } else if line.starts_with("Health Score") {
        Style::default().fg(theme::ACCENT)
    } else {
        theme::normal_style()
    };
    Line::from(Span::styled(format!(" {line}"), style))
}
