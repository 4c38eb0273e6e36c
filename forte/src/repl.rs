use std::{
    io::Write,
    sync::{atomic::{AtomicBool, Ordering}, Arc},
};

use forte_core::{
    compilation::prelude::SessionState,
    parser::prelude::{SyntaxNode, SyntaxTree},
    utils::prelude::SourceText,
};
use log::debug;

use crate::cli::{print_diagnostics, print_error, print_value};

const PROMPT: &str = ">> ";

/// Read Eval Print Loop over one session.
///
/// Lines starting with `.` are commands: `.exit`, `.tree` toggles tree
/// printing, `.cls` clears the screen and `.reset` forgets every variable.
pub fn start(interrupt: Arc<AtomicBool>, mut show_tree: bool) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let mut session = SessionState::with_interrupt(interrupt.clone());

    loop {
        let mut input = String::from("");

        print!("{}", PROMPT);
        std::io::stdout().flush()?;
        if stdin.read_line(&mut input)? == 0 {
            return Ok(());
        }

        if let Some('\n') = input.chars().next_back() {
            input.pop();
        }
        if let Some('\r') = input.chars().next_back() {
            input.pop();
        }

        match input.trim() {
            "" => {},
            ".exit" => return Ok(()),
            ".tree" => {
                show_tree = !show_tree;
                println!("{}", if show_tree { "Showing parse trees." } else { "Not showing parse trees." });
            },
            ".cls" => {
                print!("\x1B[2J\x1B[1;1H");
                std::io::stdout().flush()?;
            },
            ".reset" => {
                session.reset();
                println!("Session cleared.");
            },
            _ => {
                let tree = SyntaxTree::parse(SourceText::from_text(input.as_str()));

                if show_tree {
                    print!("{}", SyntaxNode::from(&tree.root));
                }

                interrupt.store(false, Ordering::SeqCst);

                match session.submit_tree(tree) {
                    Ok(result) if !result.diagnostics.is_empty() => print_diagnostics(&result.diagnostics),
                    Ok(result) => {
                        if let Some(value) = result.value {
                            print_value(&value);
                        }
                    },
                    Err(err) => print_error(&err),
                }

                debug!("{} variables in session", session.environment().len());
            }
        }
    }
}
