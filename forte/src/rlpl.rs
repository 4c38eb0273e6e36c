use std::io::Write;

use forte_core::{
	lexer::prelude::lex_tokens,
	utils::prelude::SourceText,
};

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
				let source = SourceText::from_text(input.as_str());
				let (tokens, diagnostics) = lex_tokens(&source);

				for token in &tokens {
					println!("{token}");
				}

				print_diagnostics(&diagnostics);
			}
		}
	}
}
