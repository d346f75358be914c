//! Terminal stand-in for the bookmark form.
//!
//! Each stdin line is the new value of the URL field. `:paste <text>` pastes
//! `<text>` over the field and `:quit` closes the form.

use std::io::Write;

use autofill_engine::NameField;

const PASTE_PREFIX: &str = ":paste ";
const QUIT: &str = ":quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input(String),
    Paste(String),
    Quit,
}

pub fn parse_line(line: &str) -> FormEvent {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line.trim() == QUIT {
        return FormEvent::Quit;
    }
    match line.strip_prefix(PASTE_PREFIX) {
        Some(text) => FormEvent::Paste(text.to_string()),
        None => FormEvent::Input(line.to_string()),
    }
}

/// Name field that prints every suggested title.
#[derive(Debug, Default)]
pub struct StdoutNameField;

impl NameField for StdoutNameField {
    fn set_name(&self, title: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "name: {title}");
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_is_field_input() {
        assert_eq!(
            parse_line("https://example.com/page\n"),
            FormEvent::Input("https://example.com/page".to_string())
        );
        assert_eq!(parse_line(""), FormEvent::Input(String::new()));
    }

    #[test]
    fn paste_prefix_carries_clipboard_text() {
        assert_eq!(
            parse_line(":paste http://other.test/x\r\n"),
            FormEvent::Paste("http://other.test/x".to_string())
        );
    }

    #[test]
    fn quit_command_closes_form() {
        assert_eq!(parse_line(":quit"), FormEvent::Quit);
        assert_eq!(parse_line("  :quit  "), FormEvent::Quit);
    }
}
