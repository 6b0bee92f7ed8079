use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::budget::{target_amount, NEEDS_TARGET_PCT, SAVES_TARGET_PCT, WANTS_TARGET_PCT};
use crate::money::{format_amount, format_percent, format_whole_amount};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{gauge_ratio, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // KPI cards
            Constraint::Length(8), // 50/30/20
            Constraint::Min(5),    // Category breakdown
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_allocation(f, chunks[1], app);
    render_breakdown(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let s = &app.summary;
    let rating = s.rating();

    render_card(
        f,
        cards[0],
        "Income",
        format_amount(app.income),
        theme::GREEN,
        app.current_month.clone(),
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        format_amount(s.total_expenses),
        theme::RED,
        format!("{} records", app.month_expense_count()),
    );
    render_card(
        f,
        cards[2],
        "Net Savings",
        format_amount(s.net_savings),
        theme::signed_color(s.net_savings),
        format!("{} savings rate", format_percent(s.savings_rate)),
    );
    render_card(
        f,
        cards[3],
        "Health Score",
        format!("{}/100", s.health_score),
        theme::rating_color(rating),
        rating.to_string(),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: Color,
    subtitle: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_allocation(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" 50/30/20 Allocation ", theme::title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(inner);

    let s = &app.summary;
    let buckets = [
        ("Needs", s.needs, s.needs_pct, NEEDS_TARGET_PCT),
        ("Wants", s.wants, s.wants_pct, WANTS_TARGET_PCT),
        ("Saves", s.saves, s.saves_pct, SAVES_TARGET_PCT),
    ];

    for (row, (label, amount, pct, target)) in rows.iter().zip(buckets) {
        render_bucket(f, *row, label, amount, pct, target, app.income);
    }
}

fn render_bucket(
    f: &mut Frame,
    area: Rect,
    label: &str,
    amount: Decimal,
    pct: Decimal,
    target: Decimal,
    income: Decimal,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(10)])
        .split(area);

    // Saves is a floor, the other two are ceilings
    let color = if label == "Saves" {
        theme::target_color(target, pct)
    } else {
        theme::target_color(pct, target)
    };

    let caption = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{label:<6}"), theme::normal_style().add_modifier(Modifier::BOLD)),
            Span::styled(format_amount(amount), Style::default().fg(color)),
        ]),
        Line::from(Span::styled(
            format!(
                "goal {target}% ({})",
                format_whole_amount(target_amount(income, target))
            ),
            theme::dim_style(),
        )),
    ]);
    f.render_widget(caption, cols[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(theme::SURFACE))
        .ratio(gauge_ratio(pct))
        .label(format_percent(pct));
    f.render_widget(gauge, Rect { height: 1, ..cols[1] });
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Category Breakdown ({} over benchmark) ", app.summary.over_budget_count()),
            theme::title_style(),
        ));

    if app.summary.category_detail.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            empty_message(app.income),
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header = Row::new(
        ["Category", "Amount", "% Income", "Benchmark", ""]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let rows: Vec<Row> = app
        .summary
        .category_detail
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let flag = if item.over_budget {
                Span::styled("OVER", theme::over_budget_style())
            } else {
                Span::styled("ok", theme::dim_style())
            };
            let style = if item.over_budget {
                Style::default().fg(theme::RED)
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&item.category, 20)),
                Cell::from(format_amount(item.amount)),
                Cell::from(format_percent(item.percent_of_income)),
                Cell::from(format_amount(item.benchmark_amount)),
                Cell::from(flag),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(6),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn empty_message(income: Decimal) -> &'static str {
    if income <= Decimal::ZERO {
        "Set your monthly income with :income <amount>"
    } else {
        "No expenses for this month. Add one with :add or load a sheet with :load"
    }
}
