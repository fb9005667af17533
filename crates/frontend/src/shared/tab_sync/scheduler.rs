use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

pub type Task = Box<dyn FnOnce() + 'static>;

/// Runs work after the current event dispatch has unwound.
pub trait Scheduler {
    fn defer(&self, task: Task);
}

impl<T: Scheduler + ?Sized> Scheduler for Rc<T> {
    fn defer(&self, task: Task) {
        (**self).defer(task)
    }
}

/// Defers through a browser timer, so the theme's own click handler
/// finishes switching the clicked group first.
pub struct TimeoutScheduler {
    delay_ms: u32,
}

impl TimeoutScheduler {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

impl Default for TimeoutScheduler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Scheduler for TimeoutScheduler {
    fn defer(&self, task: Task) {
        let delay_ms = self.delay_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            task();
        });
    }
}

/// Queue drained by hand; stands in for the event loop in tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct ManualScheduler {
    queue: std::cell::RefCell<std::collections::VecDeque<Task>>,
}

#[cfg(test)]
impl ManualScheduler {
    pub(crate) fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs queued tasks, including ones queued while draining.
    pub(crate) fn run_pending(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn defer(&self, task: Task) {
        self.queue.borrow_mut().push_back(task);
    }
}
