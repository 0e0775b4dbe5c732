//! Check-in confirmation prompt
//!
//! Uses dialoguer on a terminal; piped input is read as a plain `Y/N` line.

use std::io::{BufRead, IsTerminal, Write};

use dialoguer::Confirm;

use crate::error::Result;

const PROMPT: &str = "Continue with check-in?";

/// Ask whether to check in. Anything but an explicit yes declines.
pub fn confirm_check_in() -> Result<bool> {
    if std::io::stdin().is_terminal() {
        let answer = Confirm::new()
            .with_prompt(PROMPT)
            .default(false)
            .interact()?;
        return Ok(answer);
    }

    print!("{} (Y/N) ", PROMPT);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
