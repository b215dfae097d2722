//! Text rendering for the interactive shell.

use patron_core::Patron;

const TABLE_RULE_WIDTH: usize = 82;
const BANNER_RULE_WIDTH: usize = 50;

/// Column header matching `Patron`'s `Display` row layout.
pub fn table_header() -> String {
    format!(
        "{:<10} | {:<20} | {:<30} | {:>6}",
        "ID", "Name", "Address", "Fine"
    )
}

/// Header, rule and one row per patron.
pub fn patron_table(patrons: &[Patron]) -> Vec<String> {
    let mut lines = Vec::with_capacity(patrons.len() + 2);
    lines.push(table_header());
    lines.push("-".repeat(TABLE_RULE_WIDTH));
    lines.extend(patrons.iter().map(ToString::to_string));
    lines
}

/// Main menu text, ending with the option prompt.
pub fn main_menu() -> String {
    let rule = "-".repeat(BANNER_RULE_WIDTH);
    format!(
        "\n{rule}\n           Library Management System             \n{rule}\n\n\
         1. Add Patron\n\
         2. Remove Patron\n\
         3. Import Patrons\n\
         4. List All Patrons\n\
         5. Search Patron\n\
         6. Exit\n\n\
         >Select an option: "
    )
}
