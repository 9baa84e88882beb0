//! Text rendering for the pool board.
//!
//! Everything here reads from a [`Board`] and returns a `String`; nothing
//! holds on to projected state between renders.

use std::fmt::Write;

use poolboard_core::{Board, Outcome, SquareStatus};

const STATE_HEADER: &str = "State";
const NAME_CELL_WIDTH: usize = 12;

// ── Public API ──

/// The full board: title, draft form, table, and entry list with total.
pub fn render_screen(board: &Board) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== {} - {}{} per square ===",
        board.title(),
        board.currency(),
        board.unit_price()
    );
    out.push('\n');
    out.push_str(&render_form(board));
    out.push('\n');
    out.push_str(&render_table(board));
    out.push('\n');
    out.push_str(&render_entries(board));
    out
}

/// The "New Entry" form: draft fields, pending square, and whether submit is enabled.
pub fn render_form(board: &Board) -> String {
    let mut out = String::new();
    let draft = board.draft();
    let pending = board
        .pending_selection()
        .map(|sq| sq.to_string())
        .unwrap_or_else(|| "-".to_string());

    let _ = writeln!(out, "New Entry");
    let _ = writeln!(out, "  {:<10} {}", "name", field_or_dash(&draft.name));
    let _ = writeln!(out, "  {:<10} {}", "email", field_or_dash(&draft.email));
    let _ = writeln!(out, "  {:<10} {}", "selected", pending);
    let _ = writeln!(
        out,
        "  [Add Selection: {}]",
        if board.can_submit() { "ready" } else { "disabled" }
    );
    out
}

/// The catalog table with both squares of every entry.
pub fn render_table(board: &Board) -> String {
    let state_width = board
        .list_entries()
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(STATE_HEADER.len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<state_width$}  {:>15}  {:>9}  {:>8}  Selections",
        STATE_HEADER, "Electoral Votes", "Blue Odds", "Red Odds"
    );
    for row in board.board_rows() {
        let _ = writeln!(
            out,
            "{:<state_width$}  {:>15}  {:>9}  {:>8}  blue {:<w$} red {}",
            row.entry.name,
            row.entry.weight,
            format!("{}x", row.entry.price_blue),
            format!("{}x", row.entry.price_red),
            square_cell(row.status(Outcome::Blue)),
            square_cell(row.status(Outcome::Red)),
            w = NAME_CELL_WIDTH + 2,
        );
    }
    out
}

/// The committed entries and the pool total.
pub fn render_entries(board: &Board) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Entries");
    if board.total_count() == 0 {
        let _ = writeln!(out, "  (none)");
    }
    for claim in board.claims() {
        let _ = writeln!(
            out,
            "  {:<20} {:<24} {}{}",
            claim.name,
            format!("{} - {}", claim.entry_name, claim.outcome),
            board.currency(),
            board.unit_price()
        );
    }
    let _ = writeln!(out, "Total Pool: {}{}", board.currency(), board.pool_total());
    out
}

/// The catalog alone, one entry per line.
pub fn render_catalog(board: &Board) -> String {
    let mut out = String::new();
    for entry in board.list_entries() {
        let _ = writeln!(
            out,
            "{:<20} {:>3} votes  blue {}x  red {}x",
            entry.name, entry.weight, entry.price_blue, entry.price_red
        );
    }
    let _ = writeln!(
        out,
        "{} entries, {} squares, {} votes",
        board.catalog().len(),
        board.catalog().square_count(),
        board.catalog().total_weight()
    );
    out
}

// ── Helpers ──

fn square_cell(status: &SquareStatus) -> String {
    match status {
        SquareStatus::Claimed { name } => format!("[{}]", truncate(name, NAME_CELL_WIDTH)),
        SquareStatus::Pending => "(*)".to_string(),
        SquareStatus::Available => "( )".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

fn field_or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolboard_core::BoardConfig;

    fn board() -> Board {
        Board::new(BoardConfig::default()).unwrap()
    }

    #[test]
    fn table_marks_each_square_state() {
        let mut b = board();
        b.select_square("Nevada", Outcome::Red).unwrap();
        b.set_participant_name("Ann");
        b.set_participant_email("ann@x.com");
        b.submit().unwrap();
        b.select_square("Nevada", Outcome::Blue).unwrap();

        let table = render_table(&b);
        let nevada = table.lines().find(|l| l.starts_with("Nevada")).unwrap();
        assert!(nevada.contains("blue (*)"));
        assert!(nevada.contains("red [Ann]"));
        assert!(nevada.contains("1.5x"));

        let arizona = table.lines().find(|l| l.starts_with("Arizona")).unwrap();
        assert!(arizona.contains("blue ( )"));
        assert!(arizona.contains("red ( )"));
    }

    #[test]
    fn table_has_header_and_one_row_per_entry() {
        let table = render_table(&board());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("State"));
        assert!(lines[0].contains("Electoral Votes"));
    }

    #[test]
    fn entries_show_total() {
        let mut b = board();
        assert!(render_entries(&b).contains("(none)"));
        assert!(render_entries(&b).contains("Total Pool: $0"));

        for entry in ["Georgia", "Michigan"] {
            b.select_square(entry, Outcome::Blue).unwrap();
            b.set_participant_name("Bo");
            b.set_participant_email("bo@x.com");
            b.submit().unwrap();
        }
        let text = render_entries(&b);
        assert!(text.contains("Georgia - blue"));
        assert!(text.contains("Michigan - blue"));
        assert!(text.contains("Total Pool: $10"));
    }

    #[test]
    fn form_reports_submit_readiness() {
        let mut b = board();
        assert!(render_form(&b).contains("[Add Selection: disabled]"));
        b.select_square("Wisconsin", Outcome::Red).unwrap();
        b.set_participant_name("Cy");
        b.set_participant_email("cy@x.com");
        let form = render_form(&b);
        assert!(form.contains("Wisconsin-red"));
        assert!(form.contains("[Add Selection: ready]"));
    }

    #[test]
    fn non_ascii_names_align_by_characters() {
        let b = Board::new(BoardConfig::with_catalog(vec![
            poolboard_core::CatalogEntry::new("Québec", 10, 1.2, 1.8),
            poolboard_core::CatalogEntry::new("Ohio", 17, 1.4, 1.6),
        ]))
        .unwrap();
        let table = render_table(&b);
        let column = |prefix: &str| {
            let line = table.lines().find(|l| l.starts_with(prefix)).unwrap();
            line.chars().position(|c| c == 'x').unwrap()
        };
        assert_eq!(column("Québec"), column("Ohio"));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("Bartholomew Jones", 12), "Bartholom...");
        assert_eq!(truncate("Ann", 12), "Ann");
    }

    #[test]
    fn catalog_summary() {
        let text = render_catalog(&board());
        assert!(text.contains("Pennsylvania"));
        assert!(text.contains("6 entries, 12 squares, 79 votes"));
    }
}
