use std::{
    io::{IsTerminal, Write},
    time::Duration,
};

use forte_core::{
    environment::prelude::Value,
    utils::prelude::{Diagnostic, Error},
};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Magenta, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >11}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

/// Renders every diagnostic with its source excerpt to stderr.
pub fn print_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    for diagnostic in diagnostics {
        if let Err(err) = diagnostic.pretty(&mut buffer) {
            // The span no longer fits the source; fall back to the plain form.
            log::warn!("cannot render diagnostic: {err}");
            writeln!(buffer, "{diagnostic}").expect("print_diagnostics");
        }
    }

    buffer_writer.print(&buffer).expect("print_diagnostics");
}

pub fn print_error(error: &Error) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    if error.pretty(&mut buffer).is_err() {
        writeln!(buffer, "{error}").expect("print_error");
    }

    buffer_writer.print(&buffer).expect("print_error");
}

pub fn print_value(value: &Value) {
    let buffer_writer = BufferWriter::stdout(color_choice());
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))
        .expect("print_value");
    write!(buffer, "{value}").expect("print_value");
    buffer.reset().expect("print_value");
    writeln!(buffer).expect("print_value");
    buffer_writer.print(&buffer).expect("print_value");
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
