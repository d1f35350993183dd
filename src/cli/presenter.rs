//! CLI presenter for output formatting

use colored::*;

use crate::application::{FormatDialog, ViewState};

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Draw the recorder screen
    pub fn render_view(&self, view: &ViewState) {
        eprintln!("{}", format_view(view));
    }

    /// Show the format dialog
    pub fn format_dialog(&self, dialog: &FormatDialog) {
        eprintln!("{}", format_dialog(dialog));
    }

    /// Show a yes/no question
    pub fn question(&self, question: &str) {
        eprintln!("{} {}", "?".magenta(), question);
    }

    /// Show the command list
    pub fn help(&self) {
        eprintln!("{}", HELP_TEXT);
    }
}

const HELP_TEXT: &str = "\
Commands:
  start            Start recording (aliases: s, r, record)
  stop             Stop recording or playback (alias: x)
  play             Play, pause or resume the last recording (aliases: p, pause)
  format [choice]  Choose the format: 0/mp4 or 1/3gp (alias: f)
  status           Redraw the screen
  help             Show this list
  quit             Leave (aliases: q, exit)";

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{}]", label).bold().to_string()
    } else {
        format!("[{}]", label).dimmed().to_string()
    }
}

/// Render the screen as text
pub fn format_view(view: &ViewState) -> String {
    let mut lines = vec![
        format!("{} {}", "●".cyan(), view.state),
        format!(
            "  {} {} {} {}",
            button("Start", view.buttons.start),
            button("Stop", view.buttons.stop),
            button(view.play_affordance.label(), view.buttons.play),
            button(&view.format_caption, view.buttons.format),
        ),
    ];
    if let Some(label) = &view.file_label {
        lines.push(format!("  {}", label));
    }
    lines.join("\n")
}

/// Render the format dialog as text
pub fn format_dialog(dialog: &FormatDialog) -> String {
    let mut lines = vec!["Choose the recording format:".to_string()];
    for (index, format) in dialog.choices.iter().enumerate() {
        let marker = if index == dialog.selected { "(•)" } else { "( )" };
        lines.push(format!(
            "  {} {} {} ({})",
            marker,
            index,
            format.label(),
            format.extension()
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::OutputFormat;
    use crate::domain::session::{ButtonStates, PlayAffordance, SessionState};

    fn view_for(state: SessionState, file_label: Option<&str>) -> ViewState {
        ViewState {
            state,
            buttons: ButtonStates::for_state(state),
            play_affordance: PlayAffordance::for_state(state),
            format_caption: "Audio Format (.3gp)".to_string(),
            file_label: file_label.map(str::to_string),
            progress_visible: false,
        }
    }

    #[test]
    fn view_shows_buttons_and_caption() {
        colored::control::set_override(false);
        let text = format_view(&view_for(SessionState::Idle, None));
        assert!(text.contains("idle"));
        assert!(text.contains("[Start] [Stop] [Play] [Audio Format (.3gp)]"));
    }

    #[test]
    fn view_shows_pause_while_playing() {
        colored::control::set_override(false);
        let text = format_view(&view_for(SessionState::Playing, Some("1700000000000.3gp")));
        assert!(text.contains("[Pause]"));
        assert!(text.contains("1700000000000.3gp"));
    }

    #[test]
    fn dialog_marks_selection() {
        let dialog = FormatDialog {
            choices: &OutputFormat::ALL,
            selected: 1,
        };
        let text = format_dialog(&dialog);
        assert!(text.contains("( ) 0 MPEG 4 (.mp4)"));
        assert!(text.contains("(•) 1 3GPP (.3gp)"));
    }
}
