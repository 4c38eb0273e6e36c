use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel, LabelStyle, Severity},
    files,
    term,
};
use termcolor::Buffer;

use super::{diagnostic::Diagnostic, source_text::SourceText, text_span::TextSpan};

pub enum Level {
    Error,
    Bug,
}

pub struct Label {
    pub text: Option<String>,
    pub span: TextSpan,
}

impl Label {
    pub fn to_codespan_label(&self, label_style: Option<LabelStyle>) -> CodespanLabel<()> {
        let label = CodespanLabel::new(
            label_style.unwrap_or(LabelStyle::Primary),
            (),
            self.span.range(),
        );

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub source: &'a SourceText,
    pub label: Label,
    pub extra_labels: Vec<Label>,
}

/// Renderable message: a titled block, underlined against its source when it has one.
pub struct Report<'a> {
    pub title: String,
    pub text: String,
    pub level: Level,
    pub location: Option<Location<'a>>,
}

impl<'a> Report<'a> {
    pub fn write(&self, buf: &mut Buffer) -> Result<(), files::Error> {
        use std::io::Write;

        match &self.location {
            Some(location) => self.write_span(location, buf)?,
            None => self.write_title(buf)?,
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text)?;
        }

        Ok(())
    }

    pub fn write_span(&self, location: &Location, buf: &mut Buffer) -> Result<(), files::Error> {
        let mut labels = vec![location.label.to_codespan_label(None)];

        location.extra_labels.iter()
            .for_each(|label| {
                labels.push(label.to_codespan_label(Some(LabelStyle::Secondary)))
            });

        let severity = match self.level {
            Level::Error => Severity::Error,
            Level::Bug => Severity::Bug,
        };

        let diagnostic = CodespanDiagnostic::new(severity)
            .with_message(&self.title)
            .with_labels(labels);

        let config = term::Config::default();
        term::emit(buf, &config, location.source, &diagnostic)
    }

    pub fn write_title(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;
        use termcolor::{Color, ColorSpec, WriteColor};

        let (kind, colour) = match self.level {
            Level::Error => ("error", Color::Red),
            Level::Bug => ("internal error", Color::Magenta),
        };

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))?;
        write!(buf, "{kind}")?;

        buf.set_color(ColorSpec::new().set_bold(true))?;
        write!(buf, ": {}\n\n", self.title)?;

        buf.reset()
    }
}

impl Diagnostic {
    pub fn to_report(&self) -> Report<'_> {
        let (label, extra) = self.kind.details();

        Report {
            title: self.message(),
            text: extra.join("\n"),
            level: Level::Error,
            location: Some(Location {
                source: self.source(),
                label: Label {
                    text: Some(label.to_string()),
                    span: self.span,
                },
                extra_labels: vec![],
            }),
        }
    }

    pub fn pretty(&self, buf: &mut Buffer) -> Result<(), files::Error> {
        self.to_report().write(buf)
    }

    pub fn pretty_string(&self) -> String {
        pretty_string(|buf| self.pretty(buf))
    }
}

/// Renders into an uncoloured buffer. Rendering failures are appended as plain text.
pub fn pretty_string(render: impl FnOnce(&mut Buffer) -> Result<(), files::Error>) -> String {
    let mut nocolor = Buffer::no_color();

    if let Err(err) = render(&mut nocolor) {
        use std::io::Write;
        let _ = writeln!(nocolor, "{err}");
    }

    String::from_utf8_lossy(&nocolor.into_inner()).into_owned()
}
