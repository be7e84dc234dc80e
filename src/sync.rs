use core::cell::Cell;

use crate::error::LoggerError;

thread_local! {
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as delivering an event to outputs.
///
/// Only one guard can exist per thread; a log call made from inside an
/// output gets `None` and is dropped instead of recursing into the logger's
/// state lock.
pub(crate) struct DispatchGuard {
    _not_send: core::marker::PhantomData<*const ()>,
}

impl DispatchGuard {
    pub(crate) fn enter() -> Option<Self> {
        DISPATCHING.with(|flag| {
            if flag.replace(true) {
                None
            } else {
                Some(Self { _not_send: core::marker::PhantomData })
            }
        })
    }
}

/// Whether the current thread is inside an output.
pub(crate) fn dispatching() -> bool {
    DISPATCHING.with(Cell::get)
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        DISPATCHING.with(|flag| flag.set(false));
    }
}

/// Lock hook taken around every dispatch.
///
/// The logger already serialises its own state. A hook is for callers that
/// share the outputs' underlying resources with other code. A `lock` error
/// drops the event.
pub trait Lock: Send + Sync {
    fn lock(&self) -> Result<(), LoggerError>;
    fn unlock(&self);
}

/// Releases a [`Lock`] hook on drop.
pub(crate) struct HookGuard<'a> {
    hook: &'a dyn Lock,
}

impl<'a> HookGuard<'a> {
    pub(crate) fn acquire(hook: &'a dyn Lock) -> Result<Self, LoggerError> {
        hook.lock()?;
        Ok(Self { hook })
    }
}

impl Drop for HookGuard<'_> {
    fn drop(&mut self) {
        self.hook.unlock();
    }
}
