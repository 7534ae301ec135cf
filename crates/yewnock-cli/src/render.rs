use crate::theme::Theme;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};
use yewnock_core::{Action, HostLayout, Inventory, PairIndex, ValueTable};

/// Print `text` in `color`, skipping escape codes for the plain theme.
fn paint(out: &mut impl Write, color: Color, text: &str) -> io::Result<()> {
    if color == Color::Reset {
        queue!(out, Print(text))
    } else {
        queue!(out, SetForegroundColor(color), Print(text), ResetColor)
    }
}

pub fn render_table(out: &mut impl Write, theme: &Theme, table: &ValueTable) -> io::Result<()> {
    paint(out, theme.heading, "weight  discs\n")?;
    for weight in table.populated_weights() {
        paint(out, theme.weight, &format!("{:>6}  ", weight))?;
        let names: Vec<String> = table
            .tokens_of(weight)
            .iter()
            .filter_map(|&id| table.disc(id).map(|d| format!("{} {}", d, id)))
            .collect();
        paint(out, theme.disc, &names.join(" / "))?;
        if names.len() > 1 {
            paint(out, theme.info, "  (ambiguous)")?;
        }
        paint(out, theme.fg, "\n")?;
    }
    out.flush()
}

pub fn render_pairs(
    out: &mut impl Write,
    theme: &Theme,
    table: &ValueTable,
    pairs: &PairIndex,
    sum: u8,
) -> io::Result<()> {
    let candidates = pairs.candidates_for_sum(sum);
    if candidates.is_empty() {
        paint(out, theme.fallback, &format!("No disc pair sums to {}\n", sum))?;
        return out.flush();
    }

    paint(out, theme.heading, &format!("Pairs summing to {} (search order)\n", sum))?;
    for (i, candidate) in candidates.iter().enumerate() {
        paint(out, theme.info, &format!("{:>4}. ", i + 1))?;
        paint(out, theme.disc, &table.describe(&candidate.upper()))?;
        paint(out, theme.fg, " + ")?;
        paint(out, theme.disc, &table.describe(&candidate.lower()))?;
        paint(out, theme.fg, "\n")?;
    }
    out.flush()
}

pub fn render_inventory(
    out: &mut impl Write,
    theme: &Theme,
    table: &ValueTable,
    inventory: &Inventory,
) -> io::Result<()> {
    paint(out, theme.heading, "Inventory: ")?;
    let items: Vec<String> = inventory
        .items()
        .iter()
        .filter(|i| i.quantity > 0)
        .map(|i| match table.disc(i.id) {
            Some(disc) => format!("{} x{}", disc, i.quantity),
            None => format!("{} x{}", i.id, i.quantity),
        })
        .collect();
    paint(out, theme.disc, &items.join(", "))?;
    paint(
        out,
        theme.info,
        &format!("  ({} discs)\n", inventory.disc_count(table)),
    )?;
    out.flush()
}

/// One-line instruction for an action.
pub fn describe_action(table: &ValueTable, action: &Action) -> String {
    match action {
        Action::Insert { requirement, slot } => {
            format!("Insert {} into the {}", table.describe(requirement), slot)
        }
        Action::Confirm => "Click the submit button".to_string(),
        Action::NoSolution(reason) => format!("Operate the machine manually ({})", reason),
    }
}

pub fn render_action(
    out: &mut impl Write,
    theme: &Theme,
    table: &ValueTable,
    layout: &HostLayout,
    action: &Action,
) -> io::Result<()> {
    match action {
        Action::Insert { requirement, slot } => {
            paint(out, theme.fg, "Insert ")?;
            paint(out, theme.disc, &table.describe(requirement))?;
            paint(out, theme.fg, " into the ")?;
            paint(out, theme.slot, &slot.to_string())?;
        }
        Action::Confirm => paint(out, theme.confirm, &describe_action(table, action))?,
        Action::NoSolution(_) => paint(out, theme.fallback, &describe_action(table, action))?,
    }
    if let Some(widget) = action.highlight(layout) {
        paint(out, theme.info, &format!("  [{}:{}]", widget.group, widget.child))?;
    }
    paint(out, theme.fg, "\n")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yewnock_core::{DiscId, DiscRequirement, FillSlot, SolveError};

    fn plain(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_describe_action() {
        let table = ValueTable::new();
        let action = Action::Insert {
            requirement: DiscRequirement::EitherOf(DiscId(2), DiscId(9)),
            slot: FillSlot::Puzzle2Upper,
        };
        assert_eq!(
            describe_action(&table, &action),
            "Insert red triangle / yellow circle into the puzzle 2 upper slot"
        );
        assert_eq!(
            describe_action(&table, &Action::NoSolution(SolveError::MissingContainer)),
            "Operate the machine manually (disc container is not available)"
        );
    }

    #[test]
    fn test_plain_action_has_no_escapes() {
        let table = ValueTable::new();
        let layout = HostLayout::default();
        let text = plain(|out| render_action(out, &Theme::plain(), &table, &layout, &Action::Confirm));
        assert_eq!(text, "Click the submit button  [848:12]\n");
    }

    #[test]
    fn test_pairs_listing() {
        let table = ValueTable::new();
        let pairs = PairIndex::build(&table);
        let text = plain(|out| render_pairs(out, &Theme::plain(), &table, &pairs, 2));
        assert_eq!(
            text,
            "Pairs summing to 2 (search order)\n   1. red circle + red circle\n"
        );

        let text = plain(|out| render_pairs(out, &Theme::plain(), &table, &pairs, 1));
        assert_eq!(text, "No disc pair sums to 1\n");
    }

    #[test]
    fn test_table_marks_ambiguous() {
        let table = ValueTable::new();
        let text = plain(|out| render_table(out, &Theme::plain(), &table));
        assert!(text.contains("     3  red triangle #2 / yellow circle #9  (ambiguous)\n"));
        assert!(text.contains("    35  violet pentagon #28\n"));
    }
}
