use crate::{config::Config, file_paths, helper::Helper, interrupt::CtrlC, Outcome};
use rustyline::error::ReadlineError;
use std::path::PathBuf;

type Editor = rustyline::Editor<Helper, rustyline::history::DefaultHistory>;

/// A line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    Evaluate(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    // `quit()` and `exit()` are accepted too
    let word = line.trim();
    match word.strip_suffix("()").unwrap_or(word) {
        "quit" | "exit" | ":q" | ":quit" | ":exit" | ".exit" => Command::Quit,
        "help" | "?" => Command::Help,
        _ => Command::Evaluate(line),
    }
}

/// The interactive prompt, with its history and evaluation context.
pub struct Repl {
    editor: Editor,
    context: irrat_core::Context,
    interrupt: CtrlC,
    history: Option<PathBuf>,
    prompt: String,
    // Ctrl-C only quits until something has been evaluated
    evaluated_anything: bool,
    last_failed: bool,
}

impl Repl {
    pub fn new(config: &Config) -> rustyline::Result<Self> {
        let editor_config = rustyline::config::Builder::new()
            .history_ignore_space(true)
            .auto_add_history(true)
            .max_history_size(config.max_history_size)?
            .build();
        let mut editor = Editor::with_config(editor_config)?;
        let context = config.core_context();
        editor.set_helper(Some(Helper::new(context.clone(), config.live_output)));

        let history = file_paths::create_history_file_location();
        if let Some(path) = &history {
            if let Err(e) = editor.load_history(path) {
                tracing::debug!("no history loaded from {}: {e}", path.display());
            }
        }
        Ok(Self {
            editor,
            context,
            interrupt: crate::interrupt::register_handler(),
            history,
            prompt: config.prompt.clone(),
            evaluated_anything: false,
            last_failed: false,
        })
    }

    /// Reads lines until the user quits, returning the exit code: 1 if the
    /// last evaluation failed.
    pub fn run(mut self) -> i32 {
        loop {
            match self.editor.readline(&self.prompt) {
                Ok(line) => match parse_command(&line) {
                    Command::Quit => break,
                    Command::Help => crate::print_help(true),
                    Command::Evaluate(expr) => self.evaluate(expr),
                },
                Err(ReadlineError::Interrupted) if !self.evaluated_anything => break,
                Err(ReadlineError::Interrupted) => {
                    println!("Press Ctrl-D or type `quit` to exit");
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("Error: {e}");
                    break;
                }
            }
            self.save_history();
        }
        self.save_history();
        i32::from(self.last_failed)
    }

    fn evaluate(&mut self, expr: &str) {
        self.interrupt.reset();
        let outcome = crate::print_evaluation(expr, &mut self.context, &self.interrupt);
        self.last_failed = outcome == Outcome::Failed;
        if outcome == Outcome::Printed {
            self.evaluated_anything = true;
        }
    }

    fn save_history(&mut self) {
        let Some(path) = &self.history else {
            return;
        };
        if let Err(e) = self.editor.save_history(path) {
            tracing::debug!("failed to save history: {e}");
        }
    }
}
