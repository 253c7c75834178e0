//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::render::{describe, indented_lines, to_termtree};
use crate::application::services::{FamilyService, LoadedForest, PersonSelector};
use crate::application::session::run_session;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::SkipReason;
use crate::infrastructure::traits::{RealFileSystem, StdinPrompter};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Config { command }) => return cmd_config(cli, command),
        _ => {}
    }

    let service = FamilyService::new(Arc::new(RealFileSystem), Arc::new(load_settings(cli)?));
    let input = cli
        .file
        .clone()
        .unwrap_or_else(|| service.settings().input_file.clone());
    let loaded = service.load(&input)?;
    report_skipped(&loaded);

    match &cli.command {
        None | Some(Commands::Tree { boxed: false }) => cmd_tree(&loaded, false),
        Some(Commands::Tree { boxed: true }) => cmd_tree(&loaded, true),
        Some(Commands::Find { name }) => cmd_find(&loaded, name),
        Some(Commands::Descendants { person }) => cmd_descendants(&service, &loaded, person),
        Some(Commands::Ancestor { a, b }) => cmd_ancestor(&service, &loaded, a, b),
        Some(Commands::Export { output }) => cmd_export(&service, &loaded, output.as_deref()),
        Some(Commands::Info) => cmd_info(&loaded),
        Some(Commands::Interactive) => cmd_interactive(&service, &loaded),
        Some(Commands::Config { .. }) | Some(Commands::Completion { .. }) => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir().ok();
    let mut settings = Settings::load(cwd.as_deref())?;
    if let Some(max) = cli.max_children {
        if max == 0 {
            return Err(CliError::InvalidArgs(
                "--max-children must be at least 1".to_string(),
            ));
        }
        settings.max_children = max;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn report_skipped(loaded: &LoadedForest) {
    for link in &loaded.skipped {
        if link.reason == SkipReason::CapacityExceeded {
            output::warning(&format!(
                "person {} has too many children, {} added as a separate tree",
                link.parent_id, link.child_id
            ));
        }
    }
}

#[instrument(skip(loaded))]
fn cmd_tree(loaded: &LoadedForest, boxed: bool) -> CliResult<()> {
    let forest = &loaded.forest;
    output::header("Family tree:");
    for &root in forest.roots() {
        if boxed {
            output::info(&to_termtree(forest, root));
        } else {
            for line in indented_lines(forest, root) {
                output::info(&line);
            }
        }
    }
    Ok(())
}

#[instrument(skip(loaded))]
fn cmd_find(loaded: &LoadedForest, name: &str) -> CliResult<()> {
    let forest = &loaded.forest;
    match forest
        .find_by_name_in_forest(name)
        .and_then(|idx| forest.person(idx))
    {
        Some(person) => output::success(&format!("Found: {}", describe(person))),
        None => output::failure(&format!("No person named {} found.", name)),
    }
    Ok(())
}

#[instrument(skip(service, loaded))]
fn cmd_descendants(
    service: &FamilyService,
    loaded: &LoadedForest,
    person: &PersonSelector,
) -> CliResult<()> {
    let idx = service.resolve(&loaded.forest, person)?;
    for line in indented_lines(&loaded.forest, idx) {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(service, loaded))]
fn cmd_ancestor(
    service: &FamilyService,
    loaded: &LoadedForest,
    a: &PersonSelector,
    b: &PersonSelector,
) -> CliResult<()> {
    let forest = &loaded.forest;
    match service
        .common_ancestor(forest, a, b)?
        .and_then(|idx| forest.person(idx))
    {
        Some(person) => output::action("Nearest common ancestor", &describe(person)),
        None => output::failure(&format!("{} and {} are not related.", a, b)),
    }
    Ok(())
}

#[instrument(skip(service, loaded))]
fn cmd_export(
    service: &FamilyService,
    loaded: &LoadedForest,
    target: Option<&Path>,
) -> CliResult<()> {
    let target: PathBuf = target
        .map(Path::to_path_buf)
        .unwrap_or_else(|| service.settings().output_file.clone());
    let edges = service.export_dot(&loaded.forest, &target)?;
    output::success(&format!(
        "{} created with {} edges. Use Graphviz to render it.",
        target.display(),
        edges
    ));
    Ok(())
}

#[instrument(skip(loaded))]
fn cmd_info(loaded: &LoadedForest) -> CliResult<()> {
    let forest = &loaded.forest;
    let tallest = forest
        .roots()
        .iter()
        .map(|&root| forest.height(root))
        .max()
        .unwrap_or(0);
    let unknown = loaded
        .skipped
        .iter()
        .filter(|l| l.reason == SkipReason::UnknownParent)
        .count();
    let over_capacity = loaded.skipped.len() - unknown;

    output::header(&loaded.source.display());
    output::detail(&format!("people:              {}", forest.len()));
    output::detail(&format!("trees:               {}", forest.roots().len()));
    output::detail(&format!("generations:         {}", tallest));
    output::detail(&format!("max children:        {}", forest.max_children()));
    output::detail(&format!("unknown parents:     {}", unknown));
    output::detail(&format!("over capacity:       {}", over_capacity));
    Ok(())
}

fn cmd_interactive(service: &FamilyService, loaded: &LoadedForest) -> CliResult<()> {
    let dot_path = service.settings().output_file.clone();
    let mut stdout = io::stdout();
    run_session(service, loaded, &StdinPrompter, &mut stdout, &dot_path)?;
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", &"<unavailable>"),
            }
            let cwd = std::env::current_dir().map_err(|e| CliError::Usage(e.to_string()))?;
            output::action("local", &local_config_path(&cwd).display());
        }
    }
    Ok(())
}
