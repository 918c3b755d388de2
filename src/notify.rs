//! Operator notifications.
//!
//! A run reports its result and asks for confirmation through a
//! [`Notifier`]. The console notifier talks to a terminal; the headless one
//! logs messages and answers every question with a fixed value, which is
//! what scheduled runs and tests use.

use std::io::{self, BufRead, Write};

/// Shows messages to the operator and asks yes/no questions.
pub trait Notifier {
    /// Report an error.
    fn show_error(&mut self, title: &str, message: &str);

    /// Report an informational message.
    fn show_info(&mut self, title: &str, message: &str);

    /// Ask a yes/no question. Returns `true` for yes.
    fn ask_yes_no(&mut self, title: &str, message: &str) -> bool;
}

/// Interactive notifier reading answers from `input` and printing to
/// `output`.
#[derive(Debug)]
pub struct ConsoleNotifier<R, W> {
    input: R,
    output: W,
}

impl ConsoleNotifier<io::StdinLock<'static>, io::Stdout> {
    /// Notifier bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleNotifier<R, W> {
    /// Create a console notifier.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn print(&mut self, line: &str) {
        // A closed console must not abort the run
        if let Err(e) = writeln!(self.output, "{}", line).and_then(|_| self.output.flush()) {
            log::debug!("Console output failed: {}", e);
        }
    }
}

/// Whether a console answer means yes (`o`, `oui`, `y`, `yes`, any case).
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}

impl<R: BufRead, W: Write> Notifier for ConsoleNotifier<R, W> {
    fn show_error(&mut self, title: &str, message: &str) {
        self.print(&format!("[{}] {}", title, message));
    }

    fn show_info(&mut self, title: &str, message: &str) {
        self.print(&format!("[{}] {}", title, message));
    }

    fn ask_yes_no(&mut self, title: &str, message: &str) -> bool {
        if let Err(e) = write!(self.output, "[{}] {} (o/n) ", title, message)
            .and_then(|_| self.output.flush())
        {
            log::debug!("Console output failed: {}", e);
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                log::warn!("Could not read the answer, assuming no: {}", e);
                false
            },
        }
    }
}

/// Non-interactive notifier: messages go to the `log` facade and every
/// question gets the same answer.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessNotifier {
    answer: bool,
}

impl HeadlessNotifier {
    /// Create a headless notifier answering `answer` to every question.
    pub fn new(answer: bool) -> Self {
        Self { answer }
    }
}

impl Default for HeadlessNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Notifier for HeadlessNotifier {
    fn show_error(&mut self, title: &str, message: &str) {
        log::error!("{}: {}", title, message);
    }

    fn show_info(&mut self, title: &str, message: &str) {
        log::info!("{}: {}", title, message);
    }

    fn ask_yes_no(&mut self, title: &str, message: &str) -> bool {
        log::info!(
            "{}: {} -> {}",
            title,
            message,
            if self.answer { "oui" } else { "non" }
        );
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> ConsoleNotifier<&[u8], Vec<u8>> {
        ConsoleNotifier::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_affirmative_answers() {
        for answer in ["o", "OUI", " y\n", "Yes"] {
            assert!(is_affirmative(answer), "{answer:?}");
        }
        for answer in ["", "n", "non", "ok", "oui oui"] {
            assert!(!is_affirmative(answer), "{answer:?}");
        }
    }

    #[test]
    fn test_console_yes() {
        let mut notifier = console("oui\n");
        assert!(notifier.ask_yes_no("Fichier existant", "Remplacer ?"));
        let output = String::from_utf8(notifier.into_output()).unwrap();
        assert_eq!(output, "[Fichier existant] Remplacer ? (o/n) ");
    }

    #[test]
    fn test_console_eof_is_no() {
        let mut notifier = console("");
        assert!(!notifier.ask_yes_no("Fichier existant", "Remplacer ?"));
    }

    #[test]
    fn test_console_messages() {
        let mut notifier = console("");
        notifier.show_error("Erreur", "Le dossier est introuvable");
        notifier.show_info("Succès", "PDF généré");
        let output = String::from_utf8(notifier.into_output()).unwrap();
        assert_eq!(output, "[Erreur] Le dossier est introuvable\n[Succès] PDF généré\n");
    }

    #[test]
    fn test_headless_answer() {
        assert!(HeadlessNotifier::default().ask_yes_no("t", "m"));
        assert!(!HeadlessNotifier::new(false).ask_yes_no("t", "m"));
    }
}
