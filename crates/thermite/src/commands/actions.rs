//! Action catalog listing.

use serde::Serialize;
use tabled::Tabled;

use thermite_core::Action;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Clone, Serialize, Tabled)]
struct ActionRow {
    #[tabled(rename = "Action")]
    name: String,
    #[tabled(rename = "Capability")]
    capability: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl ActionRow {
    fn for_action(action: Action) -> Self {
        Self {
            name: action.to_string(),
            capability: action.capability().to_owned(),
            note: if action.commonly_unimplemented() {
                "often unimplemented".to_owned()
            } else {
                String::new()
            },
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let mut rows: Vec<ActionRow> = Action::CATALOG.into_iter().map(ActionRow::for_action).collect();
    rows.push(ActionRow {
        name: Action::Logging.to_string(),
        capability: "cli".to_owned(),
        note: "composite: runs `show logging`".to_owned(),
    });

    let out = output::render_list(&global.output, &rows, Clone::clone, |row| row.name.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
