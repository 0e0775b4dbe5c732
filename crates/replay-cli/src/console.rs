//! Terminal output for replay log lines

use colored::{ColoredString, Colorize};

use replay_core::{ChangeMark, ReplayLog};

/// Prints info lines to stdout and error lines to stderr.
#[derive(Debug, Default)]
pub struct ConsoleLog {
    errors: usize,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn styled_change(mark: ChangeMark, path: &str) -> ColoredString {
    let line = format!("{}{}", mark.symbol(), path);
    match mark {
        ChangeMark::Add => line.green(),
        ChangeMark::Edit => line.yellow(),
        ChangeMark::Delete => line.red(),
    }
}

impl ReplayLog for ConsoleLog {
    fn info(&mut self, line: &str) {
        println!("{}", line);
    }

    fn change(&mut self, mark: ChangeMark, path: &str) {
        println!("{}", styled_change(mark, path));
    }

    fn error(&mut self, line: &str) {
        self.errors += 1;
        eprintln!("{}", line.red().bold());
    }

    fn had_errors(&self) -> bool {
        self.errors > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Color;

    #[test]
    fn change_colour_follows_the_mark() {
        assert_eq!(styled_change(ChangeMark::Add, "a").fgcolor(), Some(Color::Green));
        assert_eq!(styled_change(ChangeMark::Edit, "a").fgcolor(), Some(Color::Yellow));
        assert_eq!(styled_change(ChangeMark::Delete, "a").fgcolor(), Some(Color::Red));
        assert_eq!(&*styled_change(ChangeMark::Delete, "old.txt"), "-old.txt");
    }

    #[test]
    fn errors_are_counted() {
        let mut log = ConsoleLog::new();
        assert!(!log.had_errors());
        log.error("boom");
        assert!(log.had_errors());
    }
}
