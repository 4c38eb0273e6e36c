mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{
    fs::File,
    io::BufReader,
    path::PathBuf,
    process::ExitCode,
    sync::{atomic::{AtomicBool, Ordering}, Arc},
};

use clap::Parser;
use cli::{print_diagnostics, print_error, print_finished, print_running, print_value};
use env_logger::{Builder, Env, Target};
use forte_core::{
    compilation::prelude::SessionState,
    parser::prelude::{SyntaxNode, SyntaxTree},
    utils::prelude::{Error, SourceText},
};
use log::{error, info};

#[derive(Parser)]
enum Command {
    /// Runs Read Eval Print Loop
    Repl {
        /// Print the parse tree of every submitted line
        #[arg(long, default_value_t = false)]
        show_tree: bool,
    },
    /// Evaluates a source file as a single fragment
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the parse tree before evaluating
        #[arg(long, default_value_t = false)]
        show_tree: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();

    let result = match Command::parse() {
        Command::Repl { show_tree } => match install_interrupt() {
            Ok(interrupt) => repl::start(interrupt, show_tree).map(|_| ExitCode::SUCCESS),
            Err(err) => {
                error!("cannot install Ctrl-C handler: {err}");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Run { path, show_tree } => run(path, show_tree),
        Command::Rlpl => rlpl::start().map(|_| ExitCode::SUCCESS),
        Command::Rppl => rppl::start().map(|_| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            print_error(&Error::from(err));
            ExitCode::FAILURE
        }
    }
}

/// Raises the returned flag on Ctrl-C so running loops stop at their next iteration.
fn install_interrupt() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let interrupt = Arc::new(AtomicBool::new(false));
    let handler_flag = interrupt.clone();

    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;

    Ok(interrupt)
}

fn run(path: PathBuf, show_tree: bool) -> std::io::Result<ExitCode> {
    let name = path.display().to_string();
    let mut reader = BufReader::new(File::open(&path)?);
    let source = SourceText::from_reader(name.as_str(), &mut reader)?;
    info!("read {} lines from {name}", source.line_count());

    let mut session = match install_interrupt() {
        Ok(interrupt) => SessionState::with_interrupt(interrupt),
        Err(err) => {
            error!("cannot install Ctrl-C handler: {err}");
            SessionState::new()
        }
    };

    print_running(&name);
    let start = std::time::Instant::now();

    let tree = SyntaxTree::parse(source);
    if show_tree {
        print!("{}", SyntaxNode::from(&tree.root));
    }

    let code = match session.submit_tree(tree) {
        Ok(result) if !result.diagnostics.is_empty() => {
            print_diagnostics(&result.diagnostics);
            ExitCode::FAILURE
        },
        Ok(result) => {
            if let Some(value) = result.value {
                print_value(&value);
            }
            ExitCode::SUCCESS
        },
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    };

    print_finished(std::time::Instant::now() - start);

    Ok(code)
}
