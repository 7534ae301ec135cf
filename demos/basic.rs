//! Basic example of driving the disc puzzle engine

use yewnock_core::{Action, HostLayout, PuzzleGenerator, PuzzleSession, ValueTable};

fn main() {
    let table = ValueTable::new();

    // Generate a machine layout and an inventory that can solve it
    let mut generator = PuzzleGenerator::with_seed(2024);
    let Some(puzzle) = generator.generate() else {
        println!("Could not generate a puzzle");
        return;
    };

    let describe = |id| {
        table
            .disc(id)
            .map(|d| format!("{} ({})", d, d.weight()))
            .unwrap_or_else(|| id.to_string())
    };
    println!(
        "Puzzle 1 seeds: {} + {}",
        describe(puzzle.puzzle1_left),
        describe(puzzle.puzzle1_right)
    );
    println!("Puzzle 2 seed:  {}", describe(puzzle.puzzle2));
    println!("Discs held: {}\n", puzzle.inventory.disc_count(&table));

    // Play it by following the engine, one tick at a time
    let layout = HostLayout::default();
    let mut host = puzzle.host(&layout);
    let mut session = PuzzleSession::new();

    loop {
        match session.on_tick(&host) {
            Action::Insert { requirement, slot } => {
                let Some(inventory) = host.container.as_mut() else {
                    break;
                };
                let Some(disc) = inventory.holds(&requirement) else {
                    break;
                };
                inventory.take(disc);
                host.set_slot(slot, disc.0 as i32);
                println!("Insert {} into the {}", describe(disc), slot);
            }
            Action::Confirm => {
                println!("Click submit");
                break;
            }
            Action::NoSolution(reason) => {
                println!("No suggestion: {}", reason);
                break;
            }
        }
    }

    // Show which pairs could have solved puzzle 2
    let target = table.weight_of(puzzle.puzzle2).unwrap_or(0);
    println!("\nAll pairs for {}:", target);
    for candidate in session.solver().pairs().candidates_for_sum(target) {
        println!(
            "  {} + {}",
            table.describe(&candidate.upper()),
            table.describe(&candidate.lower())
        );
    }
}
