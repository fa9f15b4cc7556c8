use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::cards::{suit_symbol, Street, CARD_SEPARATOR};
use crate::merge::Row;
use crate::metric::MetricStrategy;
use crate::source::{SourceReport, SourceStatus};

/// Renders "2h,Kh" as colored rank+suit symbols.
pub fn pretty_cards(canonical: &str) -> String {
    if canonical.is_empty() {
        return "-".dimmed().to_string();
    }
    canonical
        .split(CARD_SEPARATOR)
        .map(|card| {
            let mut chars = card.chars();
            let (Some(rank), Some(suit)) = (chars.next(), chars.next()) else {
                return card.to_string();
            };
            let Some(symbol) = suit_symbol(suit) else {
                return card.to_string();
            };
            let text = format!("{}{}", rank.to_ascii_uppercase(), symbol);
            match suit.to_ascii_lowercase() {
                'h' => text.red().to_string(),
                'd' => text.blue().to_string(),
                'c' => text.green().to_string(),
                _ => text.white().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Aggressive actions red, passive ones green/yellow, folds dimmed.
pub fn styled_action(action: &str) -> String {
    let styled = match action.to_ascii_lowercase().as_str() {
        "raise" | "bet" | "allin" => action.red(),
        "call" => action.green(),
        "check" => action.yellow(),
        "fold" => action.dimmed(),
        _ => action.normal(),
    };
    styled.bold().to_string()
}

pub fn rows_table(street: Street, rows: &[Row], strategy: &dyn MetricStrategy) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Cards"),
        Cell::new("Board"),
        Cell::new("Action"),
        Cell::new(strategy.label()).set_alignment(CellAlignment::Right),
        Cell::new("Count").set_alignment(CellAlignment::Right),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(pretty_cards(&row.cards)),
            Cell::new(pretty_cards(&row.board)),
            Cell::new(styled_action(&row.action)),
            Cell::new(format!("{:.2}", row.average)).set_alignment(CellAlignment::Right),
            Cell::new(row.count).set_alignment(CellAlignment::Right),
        ]);
    }

    format!("  {}\n{}", street.as_str().to_uppercase().cyan().bold(), table)
}

pub fn sources_table(reports: &[SourceReport]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Source"),
        Cell::new("Status"),
        Cell::new("Lines").set_alignment(CellAlignment::Right),
        Cell::new("Actions").set_alignment(CellAlignment::Right),
        Cell::new("Settlements").set_alignment(CellAlignment::Right),
        Cell::new("Correlated").set_alignment(CellAlignment::Right),
        Cell::new("Rejected").set_alignment(CellAlignment::Right),
    ]);

    for report in reports {
        let status = match report.status {
            SourceStatus::Digested => report.status.as_str().green().to_string(),
            _ if report.pruned => format!("{} (deleted)", report.status).red().to_string(),
            _ => report.status.as_str().yellow().to_string(),
        };
        table.add_row(vec![
            Cell::new(report.path.display()),
            Cell::new(status),
            Cell::new(report.stats.lines).set_alignment(CellAlignment::Right),
            Cell::new(report.actions).set_alignment(CellAlignment::Right),
            Cell::new(report.settlements).set_alignment(CellAlignment::Right),
            Cell::new(report.contributions).set_alignment(CellAlignment::Right),
            Cell::new(report.stats.rejected).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn print_section(title: &str, content: &str) {
    eprintln!("\n{}", title.cyan().bold());
    eprintln!("{}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

pub fn print_success(msg: &str) {
    println!("{}", msg.green().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_action_keeps_label() {
        for action in ["raise", "bet", "allin", "call", "check", "fold", "showdown"] {
            assert!(styled_action(action).contains(action));
        }
    }
}
