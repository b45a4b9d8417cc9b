/// What the command line asks irrat to do.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Action {
    Help,
    Version,
    PrintDefaultConfig,
    Interactive,
    /// Every non-flag argument, joined with single spaces.
    Evaluate(String),
}

/// Decides on an action from the arguments after the program name.
///
/// `--help` anywhere wins outright, then `--version`, then
/// `--default-config`. Without any of those the remaining words form one
/// expression, and blank words are dropped so `irrat "" ""` still opens the
/// prompt.
pub fn parse(args: impl IntoIterator<Item = String>) -> Action {
    let mut flag = None;
    let mut words = vec![];
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" | "help" => return Action::Help,
            "-v" | "-V" | "--version" | "version" => flag = Some(Action::Version),
            "--default-config" => {
                flag.get_or_insert(Action::PrintDefaultConfig);
            }
            word if word.trim().is_empty() => (),
            word => words.push(word.to_string()),
        }
    }
    match flag {
        Some(flag) => flag,
        None if words.is_empty() => Action::Interactive,
        None => Action::Evaluate(words.join(" ")),
    }
}
