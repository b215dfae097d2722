//! Line-oriented driver wiring the menu state machine to a controller.

use crate::menu::{self, MenuState, Outcome, Request};
use log::info;
use patron_core::{PatronController, PatronRepository};
use std::io::{self, BufRead, Write};

/// Runs the menu until the operator exits or input ends.
///
/// # Errors
/// Returns I/O errors from reading `input` or writing `output`.
pub fn run<R: PatronRepository>(
    controller: &mut PatronController<R>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    info!("event=shell_start module=shell status=ok");
    let mut state = MenuState::Main;
    let mut lines = input.lines();

    while !state.is_exited() {
        write!(output, "{}", menu::prompt(&state))?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };

        let mut step = menu::step(state, &line?);
        loop {
            for text in &step.output {
                writeln!(output, "{text}")?;
            }
            match step.request.take() {
                Some(request) => step = menu::resolve(execute(controller, request)),
                None => break,
            }
        }
        state = step.state;
    }

    info!("event=shell_exit module=shell status=ok");
    Ok(())
}

fn execute<R: PatronRepository>(
    controller: &mut PatronController<R>,
    request: Request,
) -> Outcome {
    match request {
        Request::AddPatron {
            id,
            name,
            address,
            fine,
        } => Outcome::Added(controller.try_add_patron(&id, &name, &address, fine)),
        Request::RemovePatron { id } => Outcome::Removed(controller.remove_patron(&id)),
        Request::ImportFile { path } => Outcome::Imported(controller.import_from_file(path)),
        Request::ListPatrons => Outcome::Listed(controller.list_patrons()),
        Request::SearchById { id } => Outcome::FoundById(controller.search_by_id(&id)),
        Request::SearchByName { name } => Outcome::FoundByName(controller.search_by_name(&name)),
    }
}
