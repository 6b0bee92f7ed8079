use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::config::CategoryConfig;
use crate::money::{format_amount, format_percent};
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_category_table(f, chunks[0], app);
    render_category_detail(f, chunks[1], app);
}

fn render_category_table(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Category", "Group", "Benchmark", "Spent"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .config
        .categories
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let ratio = app.config.benchmark_ratio(&cat.name);
            let spent = spent_in(app, cat);
            let style = if i == app.category_index {
                theme::selected_style()
            } else if is_over(app, cat) {
                Style::default().fg(theme::RED)
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(cat.name.as_str()),
                Cell::from(cat.group.as_str()),
                Cell::from(format_percent(ratio.saturating_mul(Decimal::ONE_HUNDRED))),
                Cell::from(format_amount(spent)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                format!(" Categories ({}) ", app.config.categories.len()),
                theme::title_style(),
            )),
    );
    f.render_widget(table, area);
}

fn render_category_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Detail ", theme::title_style()));

    let Some(cat) = app.config.categories.get(app.category_index) else {
        f.render_widget(block, area);
        return;
    };

    let ratio = app.config.benchmark_ratio(&cat.name);
    let benchmark = ratio.saturating_mul(app.income);
    let spent = spent_in(app, cat);
    let status = if is_over(app, cat) {
        Span::styled("Over benchmark (more than 10% above)", theme::over_budget_style())
    } else {
        Span::styled("Within benchmark", Style::default().fg(theme::GREEN))
    };
    let ratio_note = if cat.benchmark.is_some() {
        ""
    } else {
        " (default)"
    };

    let lines = vec![
        Line::from(Span::styled(cat.name.as_str(), theme::section_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Group       ", theme::dim_style()),
            Span::styled(cat.group.as_str(), theme::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("Benchmark   ", theme::dim_style()),
            Span::styled(
                format!(
                    "{} of income{ratio_note}",
                    format_percent(ratio.saturating_mul(Decimal::ONE_HUNDRED))
                ),
                theme::normal_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("            ", theme::dim_style()),
            Span::styled(format_amount(benchmark), theme::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("Spent       ", theme::dim_style()),
            Span::styled(format_amount(spent), theme::normal_style()),
        ]),
        Line::from(""),
        Line::from(status),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn spent_in(app: &App, cat: &CategoryConfig) -> Decimal {
    app.summary
        .by_category
        .get(&cat.name)
        .copied()
        .unwrap_or(Decimal::ZERO)
}

fn is_over(app: &App, cat: &CategoryConfig) -> bool {
    app.summary
        .category_detail
        .iter()
        .any(|d| d.category == cat.name && d.over_budget)
}
