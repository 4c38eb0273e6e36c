use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// ```text
    /// 1 $ 2
    ///   ^ not part of the language
    /// ```
    BadCharacter { character: char },
    /// ```text
    /// 99999999999
    /// ^^^^^^^^^^^ does not fit into a 32-bit integer
    /// ```
    InvalidNumber { text: String },
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self {
            LexicalError::BadCharacter { character } => match character {
                '&' | '|' => (
                    "Unrecognized character",
                    vec![format!("Hint: logical operators are written `{character}{character}`.")]
                ),
                _ => ("Unrecognized character", vec![]),
            },
            LexicalError::InvalidNumber { .. } => (
                "Integer literal out of range",
                vec![format!("Hint: integers range from {} to {}.", i32::MIN, i32::MAX)]
            ),
        }
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexicalError::BadCharacter { character } => write!(f, "Bad character input: '{character}'."),
            LexicalError::InvalidNumber { text } => write!(f, "The number {text} isn't a valid Integer."),
        }
    }
}
