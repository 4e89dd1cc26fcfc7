use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

fn resolve(flags: &GlobalFlags, stdout_tty: bool, stderr_tty: bool, no_color: bool) -> UiPrefs {
    let table_color = match flags.color {
        ColorMode::Always => flags.format == OutputFormat::Table,
        ColorMode::Never => false,
        ColorMode::Auto => {
            stdout_tty && flags.format == OutputFormat::Table && !flags.quiet && !no_color
        }
    };

    // Spinners draw on stderr so they never mix into piped output.
    let progress = match flags.progress {
        ProgressMode::On => stderr_tty && !flags.quiet,
        ProgressMode::Off => false,
        ProgressMode::Auto => stderr_tty && !flags.quiet && flags.format != OutputFormat::Json,
    };

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color,
        progress,
        term_width,
    }
}

pub fn init(flags: &GlobalFlags) {
    let prefs = resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    );
    let _ = UI_PREFS.set(prefs);
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat, color: ColorMode, progress: ProgressMode) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            quiet: false,
            verbose: false,
            color,
            progress,
        }
    }

    #[test]
    fn color_only_for_tables() {
        let json = flags(OutputFormat::Json, ColorMode::Always, ProgressMode::Auto);
        assert!(!resolve(&json, true, true, false).table_color);

        let table = flags(OutputFormat::Table, ColorMode::Auto, ProgressMode::Auto);
        assert!(resolve(&table, true, true, false).table_color);
        assert!(!resolve(&table, true, true, true).table_color, "NO_COLOR wins");
        assert!(!resolve(&table, false, true, false).table_color);
    }

    #[test]
    fn progress_needs_a_terminal() {
        let on = flags(OutputFormat::Table, ColorMode::Never, ProgressMode::On);
        assert!(resolve(&on, false, true, false).progress);
        assert!(!resolve(&on, true, false, false).progress);

        let auto_json = flags(OutputFormat::Json, ColorMode::Never, ProgressMode::Auto);
        assert!(!resolve(&auto_json, true, true, false).progress);
    }
}
