// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process::ExitCode;

pub mod commands;

use self::commands::run::RunOptions;

fn build_cli() -> Command {
    Command::new("fuzzmatrix")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Runs a fuzzer/benchmark-type CI matrix: trigger filtering, cross-product expansion and one build-and-test job per cell.")
        .subcommand(
            Command::new("run")
                .about("Expand the matrix and run the build-and-test job for every cell")
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Number of matrix jobs to run in parallel")
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to the pipeline declaration")
                        .value_name("CONFIG")
                        .default_value("FuzzMatrix.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("project-dir")
                        .long("project-dir")
                        .help("Directory the jobs run in")
                        .value_name("PROJECT_DIR")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("changed-files")
                        .long("changed-files")
                        .help("File listing changed paths (one per line) for the trigger gate")
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set)
                        .conflicts_with("base"),
                )
                .arg(
                    Arg::new("base")
                        .long("base")
                        .help("Git ref to diff against for the trigger gate")
                        .value_name("REF")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Run the matrix even when the trigger gate does not match")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("fuzzer")
                        .long("fuzzer")
                        .help("Restrict the matrix to a single fuzzer")
                        .value_name("FUZZER")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("benchmark-type")
                        .long("benchmark-type")
                        .help("Restrict the matrix to a single benchmark type (oss-fuzz, standard, bug)")
                        .value_name("TYPE")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("total-runners")
                        .long("total-runners")
                        .help("Total number of CI runners sharing the matrix")
                        .value_name("TOTAL_RUNNERS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set)
                        .requires("runner-index"),
                )
                .arg(
                    Arg::new("runner-index")
                        .long("runner-index")
                        .help("0-based index of this runner")
                        .value_name("RUNNER_INDEX")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set)
                        .requires("total-runners"),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help("Write an HTML report to the given path")
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Write a JSON report to the given path")
                        .value_name("JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the execution plan without running any job")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("trigger")
                .about("Check whether a set of changed paths would activate the pipeline (exit 0 = yes, 1 = no)")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to the pipeline declaration")
                        .value_name("CONFIG")
                        .default_value("FuzzMatrix.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("changed-files")
                        .long("changed-files")
                        .help("File listing changed paths, one per line")
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("paths")
                        .help("Changed paths given directly on the command line")
                        .value_name("PATHS")
                        .num_args(0..)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("init")
                .about("Create a FuzzMatrix.toml pipeline declaration")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Where to write the declaration")
                        .value_name("OUTPUT")
                        .default_value("FuzzMatrix.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Overwrite an existing file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help("Write the default declaration without launching the wizard")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub async fn run() -> Result<ExitCode> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let opts = RunOptions {
                jobs: run_matches.get_one::<usize>("jobs").copied(),
                config: run_matches
                    .get_one::<PathBuf>("config")
                    .unwrap() // Has default
                    .clone(),
                project_dir: run_matches
                    .get_one::<PathBuf>("project-dir")
                    .unwrap() // Has default
                    .clone(),
                changed_files: run_matches.get_one::<PathBuf>("changed-files").cloned(),
                base: run_matches.get_one::<String>("base").cloned(),
                force: run_matches.get_flag("force"),
                fuzzer: run_matches.get_one::<String>("fuzzer").cloned(),
                benchmark_type: run_matches.get_one::<String>("benchmark-type").cloned(),
                total_runners: run_matches.get_one::<usize>("total-runners").copied(),
                runner_index: run_matches.get_one::<usize>("runner-index").copied(),
                html: run_matches.get_one::<PathBuf>("html").cloned(),
                json: run_matches.get_one::<PathBuf>("json").cloned(),
                dry_run: run_matches.get_flag("dry-run"),
            };
            commands::run::execute(opts).await
        }
        Some(("trigger", trigger_matches)) => {
            let config = trigger_matches
                .get_one::<PathBuf>("config")
                .unwrap() // Has default
                .clone();
            let changed_files = trigger_matches.get_one::<PathBuf>("changed-files").cloned();
            let paths: Vec<String> = trigger_matches
                .get_many::<String>("paths")
                .map(|v| v.cloned().collect())
                .unwrap_or_default();
            commands::trigger::execute(config, changed_files, paths)
        }
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .unwrap() // Has default
                .clone();
            let force = init_matches.get_flag("force");
            let non_interactive = init_matches.get_flag("non-interactive");
            commands::init::execute(output, force, non_interactive)?;
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            // No subcommand given; clap has already printed help info.
            Ok(ExitCode::SUCCESS)
        }
    }
}
