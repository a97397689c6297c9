//! Form status that stays readable while a submit holds the form.
//!
//! `submit` borrows a form mutably until the request finishes, so nothing
//! else can call its getters in the meantime. A [`Published`] value is
//! backed by a `watch` channel instead: the form keeps the sender, and a UI
//! task holding a [`watch::Receiver`] sees every change as it happens.

use tokio::sync::watch;

/// A form status value with live observers.
#[derive(Debug)]
pub(crate) struct Published<T>(watch::Sender<T>);

impl<T: Copy> Published<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(watch::channel(value).0)
    }

    pub(crate) fn get(&self) -> T {
        *self.0.borrow()
    }

    pub(crate) fn set(&self, value: T) {
        self.0.send_replace(value);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<T> {
        self.0.subscribe()
    }
}

impl Published<bool> {
    /// Marks a request as in flight until the guard drops, including when
    /// the submit future itself is dropped mid-request.
    pub(crate) fn begin(&self) -> InFlight<'_> {
        self.set(true);
        InFlight(self)
    }
}

impl<T: Copy + Default> Default for Published<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A clone starts with the same value and no observers.
impl<T: Copy> Clone for Published<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Copy + PartialEq> PartialEq for Published<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Copy + Eq> Eq for Published<T> {}

/// Clears the submitting flag on drop.
pub(crate) struct InFlight<'a>(&'a Published<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
