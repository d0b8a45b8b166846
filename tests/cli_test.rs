//! Tests for CLI argument parsing

use clap::Parser;

use orgchart::application::OrgFormat;
use orgchart::cli::args::ConfigCommands;
use orgchart::cli::{Cli, Commands, Step};

#[test]
fn given_apply_steps_when_parsing_then_builds_session() {
    let cli = Cli::try_parse_from([
        "orgchart",
        "-f",
        "org.json",
        "apply",
        "move=2:4",
        "undo",
        "redo",
        "--export",
        "json",
    ])
    .unwrap();

    assert_eq!(cli.file.as_deref(), Some(std::path::Path::new("org.json")));
    match cli.command {
        Some(Commands::Apply { steps, export }) => {
            assert_eq!(
                steps,
                vec![
                    Step::Move {
                        employee: 2,
                        supervisor: 4
                    },
                    Step::Undo,
                    Step::Redo
                ]
            );
            assert_eq!(export, Some(OrgFormat::Json));
        }
        other => panic!("expected apply, got {other:?}"),
    }
}

#[test]
fn given_invalid_step_when_parsing_then_errors() {
    let result = Cli::try_parse_from(["orgchart", "apply", "move=2-4"]);
    assert!(result.is_err());
}

#[test]
fn given_find_without_ids_when_parsing_then_errors() {
    let result = Cli::try_parse_from(["orgchart", "find"]);
    assert!(result.is_err());
}

#[test]
fn given_repeated_debug_flag_when_parsing_then_counts_verbosity() {
    let cli = Cli::try_parse_from(["orgchart", "-ddd", "find", "1", "2"]).unwrap();

    assert_eq!(cli.debug, 3);
    assert!(matches!(cli.command, Some(Commands::Find { ref ids }) if ids == &vec![1, 2]));
}

#[test]
fn given_config_subcommands_when_parsing_then_template_is_available() {
    let cli = Cli::try_parse_from(["orgchart", "config", "template"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Template
        })
    ));

    let cli = Cli::try_parse_from(["orgchart", "config", "init", "--global"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Init { global: true }
        })
    ));
}
