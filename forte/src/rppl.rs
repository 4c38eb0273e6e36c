use std::io::Write;

use forte_core::parser::prelude::{SyntaxNode, SyntaxTree};

use crate::cli::print_diagnostics;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

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

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let tree = SyntaxTree::parse_text(&input);

				print!("{}", SyntaxNode::from(&tree.root));
				println!("{}", tree.root);

				print_diagnostics(&tree.diagnostics);
			}
		}
	}
}
