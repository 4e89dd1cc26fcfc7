use std::io::{BufRead, Write};

use kih_db::flows::Confirm;

/// Confirmation source for destructive commands.
pub enum Confirmation {
    /// `--yes` was given.
    AssumeYes,
    /// Ask on stderr and read the answer from stdin.
    Prompt,
}

impl Confirmation {
    pub const fn from_flag(yes: bool) -> Self {
        if yes { Self::AssumeYes } else { Self::Prompt }
    }
}

impl Confirm for Confirmation {
    fn confirm(&self, prompt: &str) -> bool {
        match self {
            Self::AssumeYes => true,
            Self::Prompt => {
                eprint!("{prompt} [y/N] ");
                let _ = std::io::stderr().flush();
                let mut answer = String::new();
                std::io::stdin().lock().read_line(&mut answer).is_ok() && is_yes(&answer)
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "ya"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(is_yes("ya"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yess"));
    }

    #[test]
    fn flag_skips_prompt() {
        assert!(Confirmation::from_flag(true).confirm("Delete?"));
    }
}
