//! Command dispatch: one function per subcommand

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{
    load_org, render_org, ApplicationError, IoResultExt, OrgEngine, OrgFormat,
};
use crate::cli::args::{Cli, Commands, ConfigCommands, Step};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{DomainError, EmployeeId};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let local_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| CliError::Usage(e.to_string()))?,
    };
    let settings = Settings::load(Some(&local_dir))?;
    debug!(?settings, "settings loaded");

    match &cli.command {
        Some(Commands::Tree) => _tree(&open_engine(cli, &settings)?, &settings),
        Some(Commands::Find { ids }) => _find(&open_engine(cli, &settings)?, ids),
        Some(Commands::Supervisor { id }) => _supervisor(&open_engine(cli, &settings)?, *id),
        Some(Commands::Apply { steps, export }) => {
            let mut engine = open_engine(cli, &settings)?;
            _apply(&mut engine, steps, *export, &settings)
        }
        Some(Commands::Config { command }) => _config(command, &settings, &local_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `orgchart --help`".to_string(),
        )),
    }
}

/// Loads the org chart from `--file` or the configured `org_file`.
fn open_engine(cli: &Cli, settings: &Settings) -> CliResult<OrgEngine> {
    let path = resolve_org_file(cli.file.as_deref(), settings)?;
    let ceo = load_org(&path)?;
    Ok(OrgEngine::new(&ceo)?)
}

pub fn resolve_org_file(file: Option<&Path>, settings: &Settings) -> Result<PathBuf, ApplicationError> {
    file.map(Path::to_path_buf)
        .or_else(|| settings.org_file.clone())
        .ok_or(ApplicationError::NoOrgFile)
}

#[instrument(skip(engine, settings))]
fn _tree(engine: &OrgEngine, settings: &Settings) -> CliResult<()> {
    output::info(&engine.to_tree_string(settings.display.show_ids));
    output::detail(&format!(
        "{} employees, depth {}, {} without reports",
        engine.headcount(),
        engine.tree().depth(),
        engine.tree().individual_contributors().len()
    ));
    Ok(())
}

#[instrument(skip(engine))]
fn _find(engine: &OrgEngine, ids: &[EmployeeId]) -> CliResult<()> {
    for (id, found) in ids.iter().zip(engine.find_by_id(ids)) {
        match found {
            Some(node) => output::success(&format!(
                "{node}: {} direct report(s)",
                node.subordinates.len()
            )),
            None => output::failure(&format!("#{id}: not found")),
        }
    }
    Ok(())
}

#[instrument(skip(engine))]
fn _supervisor(engine: &OrgEngine, id: EmployeeId) -> CliResult<()> {
    let Some(employee) = engine.find_by_id(&[id]).into_iter().flatten().next() else {
        return Err(DomainError::EmployeeNotFound(id).into());
    };
    match engine.supervisor_of(id) {
        Some(supervisor_id) => {
            let supervisor = engine.find_by_id(&[supervisor_id]).into_iter().flatten().next();
            match supervisor {
                Some(node) => output::action(&employee.to_string(), &format!("reports to {node}")),
                None => output::action(&employee.to_string(), &format!("reports to #{supervisor_id}")),
            }
        }
        None => output::action(&employee.to_string(), &"is the CEO"),
    }
    Ok(())
}

#[instrument(skip(engine, settings))]
fn _apply(
    engine: &mut OrgEngine,
    steps: &[Step],
    export: Option<OrgFormat>,
    settings: &Settings,
) -> CliResult<()> {
    for step in steps {
        match *step {
            Step::Move {
                employee,
                supervisor,
            } => {
                if let Err(e) = engine.move_employee(employee, supervisor) {
                    output::failure(step);
                    return Err(e.into());
                }
                output::success(step);
            }
            Step::Undo => {
                if engine.undo() {
                    output::success(step);
                } else {
                    output::warning("nothing to undo");
                }
            }
            Step::Redo => {
                if engine.redo() {
                    output::success(step);
                } else {
                    output::warning("nothing to redo");
                }
            }
        }
    }

    if let Some(format) = export {
        output::info(&render_org(&engine.snapshot(), format)?);
        return Ok(());
    }

    if settings.display.show_history {
        output::header("History");
        let history = engine.history();
        for (i, entry) in history.entries().iter().enumerate() {
            if i < history.cursor() {
                output::success_detail(&entry.description);
            } else {
                output::undone(&entry.description);
            }
        }
    }
    output::header("Org chart");
    output::info(&engine.to_tree_string(settings.display.show_ids));
    Ok(())
}

#[instrument(skip(settings))]
fn _config(command: &ConfigCommands, settings: &Settings, local_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            output::action("local", &local_config_path(local_dir).display());
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no global config directory on this platform".to_string())
                })?
            } else {
                local_config_path(local_dir)
            };
            if path.exists() {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_path_context("create config dir", parent)?;
            }
            std::fs::write(&path, Settings::template()).with_path_context("write config", &path)?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}
