// Slash-command parsing for the interactive chat loop.

pub const HELP: &str = "\
Commands:
  /mode [name]    switch mode (no name: list modes)
  /model [label]  switch model (no label: list models)
  /reset          start a fresh conversation
  /history        show the conversation so far
  /about          show the XO AI identity
  /help           show this help
  /quit           leave
Anything else is sent to XO AI.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Say(String),
    Mode(String),
    Modes,
    Model(String),
    Models,
    Reset,
    History,
    About,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return ReplCommand::Say(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((n, a)) => (n, a.trim()),
            None => (rest, ""),
        };
        match (name.to_lowercase().as_str(), arg.is_empty()) {
            ("mode", true) | ("modes", _) => ReplCommand::Modes,
            ("mode", false) => ReplCommand::Mode(arg.to_string()),
            ("model", true) | ("models", _) => ReplCommand::Models,
            ("model", false) => ReplCommand::Model(arg.to_string()),
            ("reset" | "clear" | "new", _) => ReplCommand::Reset,
            ("history", _) => ReplCommand::History,
            ("about", _) => ReplCommand::About,
            ("help" | "?", _) => ReplCommand::Help,
            ("quit" | "exit" | "q", _) => ReplCommand::Quit,
            _ => ReplCommand::Unknown(name.to_string()),
        }
    }
}
