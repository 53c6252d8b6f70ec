use std::io::{self, IsTerminal};

use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, Command};
use turnabout_core::{init_tracing, Dialect, Engine, EngineConfig};
use turnabout_repl::repl::{parse_selection, Repl};

fn main() -> Result<()> {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let matches = Command::new("turnabout")
        .version(turnabout_core::VERSION)
        .about("Structural rewrites for JavaScript and TypeScript at a cursor position")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Source file to load")
                .index(1),
        )
        .arg(
            Arg::new("at")
                .long("at")
                .value_name("LINE:COL[-LINE:COL]")
                .help("Cursor or selection, 1-based")
                .default_value("1:1"),
        )
        .arg(
            Arg::new("apply")
                .long("apply")
                .value_name("N")
                .help("Apply action N and print the rewritten source")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print actions or the edit as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dialect")
                .long("dialect")
                .value_name("DIALECT")
                .help("Grammar to parse with (default: from the file extension)")
                .value_parser(["js", "javascript", "ts", "typescript", "tsx"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Engine configuration file (JSON)"),
        )
        .arg(
            Arg::new("interactive")
                .long("interactive")
                .short('i')
                .help("Start an interactive session")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug mode")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    // Configuration file first, command line flags on top
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let dialect = matches
        .get_one::<String>("dialect")
        .map(|name| name.parse::<Dialect>())
        .transpose()?;
    if let Some(dialect) = dialect {
        config.dialect = dialect;
    }

    let mut repl = Repl::new(Engine::new(config));
    repl.set_debug(matches.get_flag("debug"));

    let file = matches.get_one::<String>("file");
    let loaded = match file {
        Some(file) => Some(repl.load_file(file, dialect)?),
        None => None,
    };

    if matches.get_flag("interactive") || file.is_none() {
        println!("Turnabout v{}", turnabout_core::VERSION);
        match loaded {
            Some(loaded) => println!("Loaded {loaded}"),
            None => println!("No file loaded, use .load <file>"),
        }
        println!("Type .help for help, .quit to exit");
        println!();
        return run_repl(&mut repl);
    }

    let at = matches
        .get_one::<String>("at")
        .map_or("1:1", String::as_str);
    let (start, end) = parse_selection(at)?;
    repl.set_selection(start, end);
    let json = matches.get_flag("json");

    match matches.get_one::<usize>("apply") {
        Some(&index) => {
            let edit = repl
                .edit_for(index)?
                .ok_or_else(|| anyhow!("Action {index} does not apply at {at}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&edit)?);
            } else {
                print!("{}", edit.apply_to(repl.source().unwrap_or_default()));
            }
        }
        None => {
            let actions = repl.actions()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&actions)?);
            } else if actions.is_empty() {
                println!("No actions at {at}");
            } else {
                for action in actions {
                    println!("{:>2}. {}", action.index, action.title);
                }
            }
        }
    }
    Ok(())
}

fn run_repl(repl: &mut Repl) -> Result<()> {
    use rustyline::{error::ReadlineError, DefaultEditor};

    let mut rl = DefaultEditor::new()?;
    let is_interactive = io::stdin().is_terminal();

    while repl.is_running() {
        match rl.readline("turnabout> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }

                // Echo input in non-interactive mode
                if !is_interactive {
                    println!("turnabout> {line}");
                }

                repl.process_line(&line);
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use .quit to exit");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    Ok(())
}
