use std::{process, sync};

/// Interrupts a running computation when Ctrl-C is pressed. A second
/// Ctrl-C before [`CtrlC::reset`] is called exits the program.
pub struct CtrlC {
    running: sync::Arc<sync::atomic::AtomicBool>,
}

impl irrat_core::Interrupt for CtrlC {
    fn should_interrupt(&self) -> bool {
        let running = self.running.load(sync::atomic::Ordering::Relaxed);
        !running
    }
}

impl CtrlC {
    pub fn reset(&self) {
        self.running.store(true, sync::atomic::Ordering::SeqCst);
    }
}

pub fn register_handler() -> CtrlC {
    let interrupt = CtrlC {
        running: sync::Arc::new(sync::atomic::AtomicBool::new(true)),
    };

    let r = interrupt.running.clone();
    let handler = move || {
        if !r.load(sync::atomic::Ordering::SeqCst) {
            // we already pressed Ctrl+C, so now kill the program
            process::exit(1);
        }
        r.store(false, sync::atomic::Ordering::SeqCst);
    };
    if let Err(e) = ctrlc::set_handler(handler) {
        tracing::warn!("unable to set Ctrl-C handler: {e}");
    }

    interrupt
}

#[derive(Default)]
pub struct Never {}

impl irrat_core::Interrupt for Never {
    fn should_interrupt(&self) -> bool {
        false
    }
}
