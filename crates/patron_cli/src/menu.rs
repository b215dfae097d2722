//! Interactive menu as a pure state machine.
//!
//! # Responsibility
//! - Map `(state, input line)` to the next state, output lines, and an
//!   optional controller request.
//! - Map controller outcomes back to the next state and output lines.
//!
//! # Invariants
//! - No I/O and no controller access; the shell driver owns both.
//! - Add input is retried field by field; names may not contain digits here
//!   even though the core entity accepts them.

use crate::render::{main_menu, patron_table};
use patron_core::{
    contains_digit, is_fine_in_range, is_valid_patron_id, parse_fine, AddPatronError, Patron,
};
use rust_decimal::Decimal;

const EXIT_KEYWORD: &str = "exit";

/// Where the operator currently is in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Main,
    AddId,
    AddName { id: String },
    AddAddress { id: String, name: String },
    AddFine { id: String, name: String, address: String },
    RemoveId,
    ImportPath,
    SearchMode,
    SearchId,
    SearchName,
    Exited,
}

impl MenuState {
    pub fn is_exited(&self) -> bool {
        matches!(self, Self::Exited)
    }
}

/// Controller call the driver must perform before continuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    AddPatron {
        id: String,
        name: String,
        address: String,
        fine: Decimal,
    },
    RemovePatron { id: String },
    ImportFile { path: String },
    ListPatrons,
    SearchById { id: String },
    SearchByName { name: String },
}

/// Controller result fed back through [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(Result<(), AddPatronError>),
    Removed(bool),
    Imported(usize),
    Listed(Vec<Patron>),
    FoundById(Option<Patron>),
    FoundByName(Vec<Patron>),
}

/// One transition of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: MenuState,
    pub output: Vec<String>,
    pub request: Option<Request>,
}

impl Step {
    fn to(state: MenuState) -> Self {
        Self {
            state,
            output: Vec::new(),
            request: None,
        }
    }

    fn say(mut self, line: impl Into<String>) -> Self {
        self.output.push(line.into());
        self
    }

    fn request(mut self, request: Request) -> Self {
        self.request = Some(request);
        self
    }
}

/// Prompt text shown before reading input in `state`.
pub fn prompt(state: &MenuState) -> String {
    match state {
        MenuState::Main => main_menu(),
        MenuState::AddId => "Enter 7-digit ID: ".to_string(),
        MenuState::AddName { .. } => "Enter name: ".to_string(),
        MenuState::AddAddress { .. } => "Enter address: ".to_string(),
        MenuState::AddFine { .. } => "Enter fine (0-250): ".to_string(),
        MenuState::RemoveId => {
            "Enter patron ID to remove (or type 'EXIT' to go back): ".to_string()
        }
        MenuState::ImportPath => "Enter filename to import: ".to_string(),
        MenuState::SearchMode => {
            "Search by ID or Name (or type 'EXIT' to go back to menu): ".to_string()
        }
        MenuState::SearchId => "Enter ID: ".to_string(),
        MenuState::SearchName => "Enter Name: ".to_string(),
        MenuState::Exited => String::new(),
    }
}

/// Advances the menu by one input line.
pub fn step(state: MenuState, input: &str) -> Step {
    let input = input.trim();

    match state {
        MenuState::Main => match input {
            "1" => Step::to(MenuState::AddId),
            "2" => Step::to(MenuState::RemoveId),
            "3" => Step::to(MenuState::ImportPath),
            "4" => Step::to(MenuState::Main).request(Request::ListPatrons),
            "5" => Step::to(MenuState::SearchMode),
            "6" => Step::to(MenuState::Exited).say("Exiting..."),
            _ => Step::to(MenuState::Main).say("Invalid choice. Try again."),
        },
        MenuState::AddId => {
            if is_valid_patron_id(input) {
                Step::to(MenuState::AddName {
                    id: input.to_string(),
                })
            } else {
                Step::to(MenuState::AddId).say("Error! Invalid ID, must be 7 digits.")
            }
        }
        MenuState::AddName { id } => {
            if !input.is_empty() && !contains_digit(input) {
                Step::to(MenuState::AddAddress {
                    id,
                    name: input.to_string(),
                })
            } else {
                Step::to(MenuState::AddName { id })
                    .say("Error! Invalid, name cannot be empty or contain numbers.")
            }
        }
        MenuState::AddAddress { id, name } => {
            if input.is_empty() {
                Step::to(MenuState::AddAddress { id, name })
                    .say("Warning! Invalid address. Cannot be empty.")
            } else {
                Step::to(MenuState::AddFine {
                    id,
                    name,
                    address: input.to_string(),
                })
            }
        }
        MenuState::AddFine { id, name, address } => match parse_fine(input) {
            Ok(fine) if is_fine_in_range(fine) => {
                Step::to(MenuState::Main).request(Request::AddPatron {
                    id,
                    name,
                    address,
                    fine,
                })
            }
            Ok(_) => Step::to(MenuState::AddFine { id, name, address })
                .say("Warning! Fine must be between $0-250."),
            Err(_) => Step::to(MenuState::AddFine { id, name, address })
                .say("Error, fine must be a number!"),
        },
        MenuState::RemoveId => {
            if input.eq_ignore_ascii_case(EXIT_KEYWORD) {
                Step::to(MenuState::Main).say("\nReturning to main menu...")
            } else {
                Step::to(MenuState::RemoveId).request(Request::RemovePatron {
                    id: input.to_string(),
                })
            }
        }
        MenuState::ImportPath => Step::to(MenuState::Main).request(Request::ImportFile {
            path: input.to_string(),
        }),
        MenuState::SearchMode => {
            if input.eq_ignore_ascii_case(EXIT_KEYWORD) {
                Step::to(MenuState::Main).say("\nReturning to main menu...")
            } else if input.eq_ignore_ascii_case("id") {
                Step::to(MenuState::SearchId)
            } else if input.eq_ignore_ascii_case("name") {
                Step::to(MenuState::SearchName)
            } else {
                Step::to(MenuState::SearchMode)
                    .say("\nInvalid choice. Type 'ID', 'Name', or 'exit'.")
            }
        }
        MenuState::SearchId => {
            if input.eq_ignore_ascii_case(EXIT_KEYWORD) {
                Step::to(MenuState::SearchMode)
            } else {
                Step::to(MenuState::SearchId).request(Request::SearchById {
                    id: input.to_string(),
                })
            }
        }
        MenuState::SearchName => {
            if input.eq_ignore_ascii_case(EXIT_KEYWORD) {
                Step::to(MenuState::SearchMode)
            } else {
                Step::to(MenuState::SearchName).request(Request::SearchByName {
                    name: input.to_string(),
                })
            }
        }
        MenuState::Exited => Step::to(MenuState::Exited),
    }
}

/// Turns a controller outcome into the next menu step.
pub fn resolve(outcome: Outcome) -> Step {
    match outcome {
        Outcome::Added(Ok(())) => Step::to(MenuState::Main).say("\nSuccess! Patron added."),
        Outcome::Added(Err(AddPatronError::DuplicateId(_))) => {
            Step::to(MenuState::Main).say("\nFailed! Duplicate ID.")
        }
        Outcome::Added(Err(err)) => Step::to(MenuState::Main).say(format!("\nFailed! {err}")),
        Outcome::Removed(true) => Step::to(MenuState::Main).say("\nPatron removed successfully!"),
        Outcome::Removed(false) => Step::to(MenuState::RemoveId)
            .say("\nError! No patron found with that ID. Please try again!"),
        Outcome::Imported(count) => {
            Step::to(MenuState::Main).say(format!("\n{count} patrons imported successfully."))
        }
        Outcome::Listed(patrons) if patrons.is_empty() => {
            Step::to(MenuState::Main).say("\nError! No patrons found. Please add.")
        }
        Outcome::Listed(patrons) => with_table(Step::to(MenuState::Main), &patrons),
        Outcome::FoundById(Some(patron)) => with_table(
            Step::to(MenuState::Main).say("\nPatron found:"),
            std::slice::from_ref(&patron),
        ),
        Outcome::FoundById(None) => Step::to(MenuState::SearchMode)
            .say("\nWarning! No patron found with that ID. Try again."),
        Outcome::FoundByName(patrons) if patrons.is_empty() => Step::to(MenuState::SearchMode)
            .say("\nWarning! No patrons found with that name. Try again."),
        Outcome::FoundByName(patrons) => with_table(
            Step::to(MenuState::Main).say("\nSearch results:"),
            &patrons,
        ),
    }
}

fn with_table(mut step: Step, patrons: &[Patron]) -> Step {
    step.output.extend(patron_table(patrons));
    step
}
