//! Threaded run loop.
//!
//! [`Runner`] moves a [`Cpu`] onto a dedicated thread and steps it in
//! batches. Between batches the loop drains the [`Mailbox`] and applies each
//! message in a fixed order. While halted it sleeps on the mailbox until a
//! message arrives or the poll period elapses. The thread hands the CPU back
//! through [`RunnerHandle::join`] when it receives `Kill` or reaches its step
//! limit.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use super::mailbox::{Mailbox, Message, Pending};
use crate::config::RunConfig;
use crate::core::Cpu;
use crate::soc::BlankSource;

/// Builder for the core thread.
#[derive(Debug)]
pub struct Runner {
    cpu: Cpu,
    mailbox: Arc<Mailbox>,
    batch_size: u64,
    halt_poll: Duration,
    max_steps: Option<u64>,
    start_halted: bool,
}

/// Handle to a running core thread.
#[derive(Debug)]
pub struct RunnerHandle {
    mailbox: Arc<Mailbox>,
    thread: JoinHandle<Cpu>,
}

impl RunnerHandle {
    /// The shared mailbox.
    pub fn mailbox(&self) -> &Arc<Mailbox> {
        &self.mailbox
    }

    /// Posts a message to the core thread.
    pub fn post(&self, msg: Message) {
        self.mailbox.post(msg);
    }

    /// True once the core thread has returned.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the core thread and returns the CPU.
    ///
    /// # Errors
    ///
    /// The panic payload if the core thread panicked.
    pub fn join(self) -> thread::Result<Cpu> {
        self.thread.join()
    }

    /// Posts `Kill` and waits for the core thread.
    ///
    /// # Errors
    ///
    /// As [`RunnerHandle::join`].
    pub fn kill(self) -> thread::Result<Cpu> {
        self.mailbox.post(Message::Kill);
        self.join()
    }
}

/// What the loop does after applying a drained set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Control {
    Continue,
    Exit,
}

impl Runner {
    /// Prepares a run of `cpu` with a fresh mailbox.
    pub fn new(cpu: Cpu, config: &RunConfig) -> Self {
        Self {
            cpu,
            mailbox: Arc::new(Mailbox::new()),
            batch_size: u64::from(config.batch_size.max(1)),
            halt_poll: Duration::from_millis(config.halt_poll_ms),
            max_steps: None,
            start_halted: false,
        }
    }

    /// Uses an existing mailbox instead of a fresh one.
    #[must_use]
    pub fn with_mailbox(mut self, mailbox: Arc<Mailbox>) -> Self {
        self.mailbox = mailbox;
        self
    }

    /// Stops by itself after `steps` steps.
    #[must_use]
    pub const fn max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Starts halted, waiting for `Resume`.
    #[must_use]
    pub const fn halted(mut self) -> Self {
        self.start_halted = true;
        self
    }

    /// Runs the loop on the calling thread and returns the CPU.
    pub fn run(self) -> Cpu {
        let Self {
            mut cpu,
            mailbox,
            batch_size,
            halt_poll,
            max_steps,
            start_halted,
        } = self;
        let mut halted = start_halted;
        let mut remaining = max_steps;

        loop {
            let pending = mailbox.drain();
            if !pending.is_empty() && apply(&mut cpu, pending, &mut halted) == Control::Exit {
                break;
            }
            if halted {
                mailbox.wait(halt_poll);
                continue;
            }
            let batch = remaining.map_or(batch_size, |r| r.min(batch_size));
            if batch == 0 {
                info!(target: "i860::run", "step limit reached");
                break;
            }
            let _ = cpu.run_steps(batch);
            if let Some(r) = remaining.as_mut() {
                *r -= batch;
            }
        }
        debug!(target: "i860::run", steps = cpu.stats.steps, "runner exiting");
        cpu
    }

    /// Spawns the loop on a thread named `i860-core`.
    ///
    /// # Errors
    ///
    /// The OS error if the thread cannot be created.
    pub fn spawn(self) -> io::Result<RunnerHandle> {
        let mailbox = Arc::clone(&self.mailbox);
        let thread = thread::Builder::new()
            .name("i860-core".into())
            .spawn(move || self.run())?;
        Ok(RunnerHandle { mailbox, thread })
    }
}

fn apply(cpu: &mut Cpu, pending: Pending, halted: &mut bool) -> Control {
    for msg in pending.iter() {
        debug!(target: "i860::run", ?msg, "mailbox");
        match msg {
            Message::Reset => cpu.reset(),
            Message::Interrupt => cpu.set_irq_line(true),
            Message::InterruptClear => cpu.set_irq_line(false),
            Message::DisplayBlankChanged => {
                cpu.bus_mut()
                    .blank_changed(BlankSource::Display, pending.display_blank);
            }
            Message::VideoBlankChanged => {
                cpu.bus_mut()
                    .blank_changed(BlankSource::Video, pending.video_blank);
            }
            Message::DebugBreak => {
                *halted = true;
                info!(target: "i860::run", "debug break\n{}", cpu.dump_state());
            }
            Message::Halt => *halted = true,
            Message::Resume => *halted = false,
            Message::Kill => return Control::Exit,
        }
    }
    Control::Continue
}
