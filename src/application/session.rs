//! Interactive session: show the forest, search one name, export the graph.

use std::io::{self, Write};
use std::path::Path;

use crate::application::render::{describe, indented_lines};
use crate::application::services::{FamilyService, LoadedForest};
use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::Prompter;

/// Run one session, writing all output to `out`.
///
/// The graph is exported even when the user enters nothing.
pub fn run_session<W: Write>(
    service: &FamilyService,
    loaded: &LoadedForest,
    prompter: &dyn Prompter,
    out: &mut W,
    dot_path: &Path,
) -> ApplicationResult<()> {
    let forest = &loaded.forest;

    writeln!(out, "Family tree:").map_err(output_err)?;
    for &root in forest.roots() {
        for line in indented_lines(forest, root) {
            writeln!(out, "{}", line).map_err(output_err)?;
        }
    }
    writeln!(out).map_err(output_err)?;

    let answer = prompter
        .ask("Enter a name to search:")
        .map_err(|e| ApplicationError::OperationFailed {
            context: "read answer".to_string(),
            source: Box::new(e),
        })?;
    match answer.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => match forest.find_by_name_in_forest(name) {
            Some(idx) => {
                if let Some(person) = forest.person(idx) {
                    writeln!(out, "Found: {}", describe(person)).map_err(output_err)?;
                }
            }
            None => writeln!(out, "No person named {} found.", name).map_err(output_err)?,
        },
        _ => writeln!(out, "No name entered.").map_err(output_err)?,
    }

    let edges = service.export_dot(forest, dot_path)?;
    writeln!(
        out,
        "Graph with {} edges written to {}. Render it with Graphviz.",
        edges,
        dot_path.display()
    )
    .map_err(output_err)?;
    Ok(())
}

fn output_err(e: io::Error) -> ApplicationError {
    ApplicationError::OperationFailed {
        context: "write session output".to_string(),
        source: Box::new(e),
    }
}
