use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::money::format_amount;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let expenses = app.visible_expenses();

    if expenses.is_empty() {
        let msg = if !app.search_input.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No expenses matching '{}'", app.search_input),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to clear the search",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No expenses for {}", app.current_month),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Add one with :add <amount> <category> [name] or :load <file.csv>",
                    theme::dim_style(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Expenses (0) ", theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Name", "Category", "Type", "Amount", "Note"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(truncate(&expense.name, 32)),
                Cell::from(truncate(expense.category_key(), 18)),
                Cell::from(expense.expense_type.as_str()),
                Cell::from(format_amount(expense.amount)),
                Cell::from(truncate(&expense.note, 30)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Min(10),
    ];

    let title = if app.search_input.is_empty() {
        format!(" Expenses ({}) {} ", expenses.len(), app.current_month)
    } else {
        format!(
            " Expenses ({}) {} search: '{}' ",
            expenses.len(),
            app.current_month,
            app.search_input
        )
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(title, theme::title_style())),
    );

    f.render_widget(table, area);
}
