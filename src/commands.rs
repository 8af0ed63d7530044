use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  search <username>   search a user's repositories
  page <n>            go to page n
  next | prev         move one page forward or back
  size <n>            change the page size (resets to page 1)
  help                show this help
  quit                exit";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Page(u32),
    Next,
    Prev,
    Size(u32),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().ok_or_else(|| "empty command".to_string())?;
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many arguments for '{}'", verb));
        }

        let number = |arg: Option<&str>| -> Result<u32, String> {
            let raw = arg.ok_or_else(|| format!("'{}' needs a number", verb))?;
            raw.parse::<u32>()
                .map_err(|_| format!("'{}' is not a valid number", raw))
        };

        match (verb.to_ascii_lowercase().as_str(), arg) {
            ("search" | "s", Some(username)) => Ok(Command::Search(username.to_string())),
            ("search" | "s", None) => Err("'search' needs a username".to_string()),
            ("page" | "p", arg) => number(arg).map(Command::Page),
            ("size", arg) => number(arg).map(Command::Size),
            ("next" | "n", None) => Ok(Command::Next),
            ("prev" | "previous", None) => Ok(Command::Prev),
            ("help" | "?", None) => Ok(Command::Help),
            ("quit" | "exit" | "q", None) => Ok(Command::Quit),
            (other, _) => Err(format!("unknown command '{}'; type 'help'", other)),
        }
    }
}
