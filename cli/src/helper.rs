use std::time;

/// Gives up on a live hint once it has taken longer than a keystroke should.
pub struct HintInterrupt {
    start: time::Instant,
    duration: time::Duration,
}

impl irrat_core::Interrupt for HintInterrupt {
    fn should_interrupt(&self) -> bool {
        time::Instant::now().duration_since(self.start) >= self.duration
    }
}

impl Default for HintInterrupt {
    fn default() -> Self {
        Self {
            start: time::Instant::now(),
            duration: time::Duration::from_millis(20),
        }
    }
}

pub struct Hint(String);

impl rustyline::hint::Hint for Hint {
    fn display(&self) -> &str {
        self.0.as_str()
    }

    fn completion(&self) -> Option<&str> {
        None
    }
}

pub struct Helper {
    ctx: irrat_core::Context,
    live_output: bool,
}

impl Helper {
    pub fn new(ctx: irrat_core::Context, live_output: bool) -> Self {
        Self { ctx, live_output }
    }

    fn preview(&self, line: &str) -> Option<String> {
        let int = HintInterrupt::default();
        let result = irrat_core::evaluate_with_interrupt(line, &mut self.ctx.clone(), &int).ok()?;
        let res = result.get_main_result();
        if res.is_empty() || res.len() > 50 || res.trim() == line.trim() {
            return None;
        }
        Some(res.to_string())
    }
}

impl rustyline::hint::Hinter for Helper {
    type Hint = Hint;

    fn hint(&self, line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Hint> {
        if !self.live_output {
            return None;
        }
        self.preview(line).map(|res| Hint(format!("\n{res}")))
    }
}

impl rustyline::highlight::Highlighter for Helper {}

impl rustyline::validate::Validator for Helper {}

pub struct IrratCandidate {}

impl rustyline::completion::Candidate for IrratCandidate {
    fn display(&self) -> &str {
        ""
    }

    fn replacement(&self) -> &str {
        ""
    }
}

impl rustyline::completion::Completer for Helper {
    type Candidate = IrratCandidate;
}

impl rustyline::Helper for Helper {}
