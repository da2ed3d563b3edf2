//! Bounded frame inbox for `no_std` environments.
//!
//! Lets a radio interrupt handler (or a host test) hand received frames to
//! the control loop. Built on `critical-section` and `heapless::Deque`, so
//! pushing from an interrupt while the loop polls is safe.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::{Deque, Vec};

use crate::command::FRAME_SIZE;
use crate::{Radio, Received};

/// Inbox was full, the frame is handed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrySendError(pub Frame);

/// Inbox had no frame waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Received radio frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Vec<u8, FRAME_SIZE>,
    sender: u8,
}

impl Frame {
    /// Create a frame, truncating the payload to [`FRAME_SIZE`] bytes
    pub fn new(payload: &[u8], sender: u8) -> Self {
        let len = payload.len().min(FRAME_SIZE);
        Self {
            payload: Vec::from_slice(&payload[..len]).unwrap_or_default(),
            sender,
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub const fn sender(&self) -> u8 {
        self.sender
    }
}

/// Frames waiting for the control loop, oldest first
pub struct Inbox<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Frame, SIZE>>>,
}

impl<const SIZE: usize> Inbox<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for the producer side, usually the radio interrupt
    pub const fn sender(&self) -> InboxSender<'_, SIZE> {
        InboxSender { inbox: self }
    }

    /// Handle the control loop polls through [`Radio`]
    pub const fn receiver(&self) -> InboxReceiver<'_, SIZE> {
        InboxReceiver { inbox: self }
    }

    /// Queue a frame behind any already waiting
    pub fn try_send(&self, frame: Frame) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(frame).map_err(TrySendError)
        })
    }

    /// Take the oldest waiting frame
    pub fn try_receive(&self) -> Result<Frame, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of frames waiting
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for Inbox<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of an [`Inbox`]
#[derive(Clone, Copy)]
pub struct InboxSender<'a, const SIZE: usize> {
    inbox: &'a Inbox<SIZE>,
}

impl<const SIZE: usize> InboxSender<'_, SIZE> {
    pub fn try_send(&self, frame: Frame) -> Result<(), TrySendError> {
        self.inbox.try_send(frame)
    }
}

/// Consumer handle of an [`Inbox`], polled as the node's radio
#[derive(Clone, Copy)]
pub struct InboxReceiver<'a, const SIZE: usize> {
    inbox: &'a Inbox<SIZE>,
}

impl<const SIZE: usize> Radio for InboxReceiver<'_, SIZE> {
    fn try_receive(&mut self, buf: &mut [u8]) -> Option<Received> {
        let frame = self.inbox.try_receive().ok()?;
        let len = frame.payload.len().min(buf.len());
        buf[..len].copy_from_slice(&frame.payload[..len]);
        Some(Received {
            len,
            sender: frame.sender,
        })
    }
}
