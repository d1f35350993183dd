//! Interactive command parsing

/// One line typed at the session prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Start button
    Start,
    /// Stop button
    Stop,
    /// Play / Pause button
    Play,
    /// Format button, optionally with the answer already given
    Format(Option<String>),
    /// Redraw the screen
    Status,
    Help,
    Quit,
    /// Blank line
    Empty,
    Unknown(String),
}

/// Parse a command line
pub fn parse_command(line: &str) -> UserCommand {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return UserCommand::Empty;
    };
    let rest: Vec<&str> = words.collect();

    match first.to_lowercase().as_str() {
        "start" | "s" | "record" | "r" => UserCommand::Start,
        "stop" | "x" => UserCommand::Stop,
        "play" | "pause" | "p" => UserCommand::Play,
        "format" | "f" => {
            if rest.is_empty() {
                UserCommand::Format(None)
            } else {
                UserCommand::Format(Some(rest.join(" ")))
            }
        }
        "status" | "ls" => UserCommand::Status,
        "help" | "h" | "?" => UserCommand::Help,
        "quit" | "q" | "exit" => UserCommand::Quit,
        _ => UserCommand::Unknown(line.trim().to_string()),
    }
}

/// Parse a yes/no answer; `None` for anything else
pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" | "allow" => Some(true),
        "n" | "no" | "deny" => Some(false),
        _ => None,
    }
}
