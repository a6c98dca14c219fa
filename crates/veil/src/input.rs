//! Commands typed at the interactive prompt.

/// Help text for the interactive prompt.
pub const HELP: &str = "\
Commands:
  list               show the inbox
  open <n>           read message n
  summary <n>        summarize message n
  new                replace the address now
  refresh            check the inbox now
  sound on|off       toggle the new-mail bell
  address [country]  generate a fake postal address
  help               show this help
  quit               exit";

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    List,
    /// 1-based inbox position.
    Open(usize),
    /// 1-based inbox position.
    Summary(usize),
    New,
    Refresh,
    Sound(bool),
    Address(Option<String>),
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

impl Input {
    /// Parse a line; the error is the message to show.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Ok(Input::Nothing),
            "list" | "ls" => Ok(Input::List),
            "open" | "read" => parse_position(rest).map(Input::Open),
            "summary" | "sum" => parse_position(rest).map(Input::Summary),
            "new" => Ok(Input::New),
            "refresh" | "r" => Ok(Input::Refresh),
            "sound" => match rest.to_ascii_lowercase().as_str() {
                "on" => Ok(Input::Sound(true)),
                "off" => Ok(Input::Sound(false)),
                _ => Err("Usage: sound on|off".to_string()),
            },
            "address" => Ok(Input::Address(
                Some(rest.to_string()).filter(|c| !c.is_empty()),
            )),
            "help" | "?" => Ok(Input::Help),
            "quit" | "exit" | "q" => Ok(Input::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

fn parse_position(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("Expected a message number, e.g. 'open 1'.".to_string()),
    }
}
