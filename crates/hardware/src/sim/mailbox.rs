//! Control mailbox between the host and the core thread.
//!
//! The host posts messages from any thread; the runner drains them all at
//! once between batches of steps. Each message is a bit: posting an already
//! pending message has no further effect, and draining clears every bit in
//! one locked operation. Blank notifications also carry the new level.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::soc::BlankSource;

/// A control message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Message {
    /// Reset the core.
    Reset = 1 << 0,
    /// Stop the runner after the current batch and return the CPU.
    Kill = 1 << 1,
    /// Suspend stepping; state is kept.
    Halt = 1 << 2,
    /// Resume stepping after `Halt` or `DebugBreak`.
    Resume = 1 << 3,
    /// Assert the interrupt pin.
    Interrupt = 1 << 4,
    /// Deassert the interrupt pin.
    InterruptClear = 1 << 5,
    /// Halt and log a register dump.
    DebugBreak = 1 << 6,
    /// The display blanking level changed.
    DisplayBlankChanged = 1 << 7,
    /// The video blanking level changed.
    VideoBlankChanged = 1 << 8,
}

impl Message {
    /// Every message in the order the runner handles them.
    pub const ALL: [Self; 9] = [
        Self::Reset,
        Self::Interrupt,
        Self::InterruptClear,
        Self::DisplayBlankChanged,
        Self::VideoBlankChanged,
        Self::DebugBreak,
        Self::Halt,
        Self::Resume,
        Self::Kill,
    ];

    /// Bit of this message in the pending set.
    pub const fn bit(self) -> u16 {
        self as u16
    }
}

/// Messages drained in one go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pending {
    bits: u16,
    /// Display blanking level at the last `DisplayBlankChanged`.
    pub display_blank: bool,
    /// Video blanking level at the last `VideoBlankChanged`.
    pub video_blank: bool,
}

impl Pending {
    /// True if nothing was posted.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// True if `msg` was posted.
    pub const fn contains(&self, msg: Message) -> bool {
        self.bits & msg.bit() != 0
    }

    /// Posted messages in handling order.
    pub fn iter(&self) -> impl Iterator<Item = Message> + '_ {
        Message::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

/// Lock-protected message bit-set with a wake-up signal.
#[derive(Debug, Default)]
pub struct Mailbox {
    pending: Mutex<Pending>,
    wake: Condvar,
}

impl Mailbox {
    /// An empty mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Posts `msg` and wakes an idle runner.
    pub fn post(&self, msg: Message) {
        self.lock().bits |= msg.bit();
        self.wake.notify_all();
    }

    /// Posts a blanking change for `source` with its new level.
    pub fn post_blank(&self, source: BlankSource, blanked: bool) {
        let mut pending = self.lock();
        match source {
            BlankSource::Display => {
                pending.display_blank = blanked;
                pending.bits |= Message::DisplayBlankChanged.bit();
            }
            BlankSource::Video => {
                pending.video_blank = blanked;
                pending.bits |= Message::VideoBlankChanged.bit();
            }
        }
        drop(pending);
        self.wake.notify_all();
    }

    /// Takes every pending message, leaving the mailbox empty.
    pub fn drain(&self) -> Pending {
        let mut pending = self.lock();
        let taken = *pending;
        pending.bits = 0;
        taken
    }

    /// Blocks until a message is pending or `timeout` passes.
    pub fn wait(&self, timeout: Duration) {
        let guard = self.lock();
        let _ = self
            .wake
            .wait_timeout_while(guard, timeout, |p| p.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
    }
}
