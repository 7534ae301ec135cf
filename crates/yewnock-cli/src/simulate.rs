use yewnock_core::{Action, GeneratedPuzzle, HostLayout, PuzzleSession};

/// Upper bound on ticks; a solvable machine needs four.
const MAX_TICKS: usize = 16;

/// Play a generated machine by doing exactly what the engine says.
///
/// Returns every action the engine produced, ending with `Confirm` or the
/// first `NoSolution`.
pub fn play(
    puzzle: &GeneratedPuzzle,
    session: &mut PuzzleSession,
    layout: &HostLayout,
) -> Vec<Action> {
    let mut host = puzzle.host(layout);
    let mut actions = Vec::new();

    for _ in 0..MAX_TICKS {
        let action = session.on_tick(&host);
        actions.push(action);

        let Action::Insert { requirement, slot } = action else {
            break;
        };
        let Some(inventory) = host.container.as_mut() else {
            break;
        };
        let Some(disc) = inventory.holds(&requirement) else {
            break;
        };
        inventory.take(disc);
        host.set_slot(slot, disc.0 as i32);
    }

    actions
}
