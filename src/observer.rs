use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use derivative::Derivative;
use log::trace;
use crate::error::{StreamError, Terminal};

/// Records what a stream delivered, so it can be read between flushes.
///
/// Created by [crate::Stream::observe], which keeps every value, or
/// [crate::Stream::observe_latest], which only keeps the last one. Clones share the same record.
#[derive(Debug, Derivative)]
#[derivative(Clone(bound = ""))]
pub struct Observer<T>(Rc<RefCell<ObserverState<T>>>);

#[derive(Debug)]
struct ObserverState<T> {
    values: Vec<T>,
    count: usize,
    keep_history: bool,
    terminal: Option<Terminal>
}

impl<T: Clone + Debug> Observer<T> {
    pub(crate) fn new(keep_history: bool) -> Self {
        Observer(Rc::new(RefCell::new(ObserverState {
            values: Vec::new(),
            count: 0,
            keep_history,
            terminal: None
        })))
    }

    pub(crate) fn record(&self, values: &[T]) {
        let Some(last) = values.last() else {
            return;
        };
        trace!("observer: {:?}", values);
        let mut state = self.0.borrow_mut();
        state.count += values.len();
        if state.keep_history {
            state.values.extend_from_slice(values);
        } else {
            state.values.clear();
            state.values.push(last.clone());
        }
    }

    pub(crate) fn complete(&self) {
        self.0.borrow_mut().terminal = Some(Terminal::Complete);
    }

    pub(crate) fn fail(&self, error: StreamError) {
        self.0.borrow_mut().terminal = Some(Terminal::Error(error));
    }

    /// Every value delivered so far, oldest first. Only the last one if the observer doesn't
    /// keep history.
    pub fn values(&self) -> Vec<T> {
        self.0.borrow().values.clone()
    }

    /// The most recently delivered value
    pub fn latest(&self) -> Option<T> {
        self.0.borrow().values.last().cloned()
    }

    /// Number of values delivered so far, including ones no longer kept
    pub fn count(&self) -> usize {
        self.0.borrow().count
    }

    /// Remove and return the values delivered so far.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut self.0.borrow_mut().values)
    }

    /// Whether the stream completed without error
    pub fn is_complete(&self) -> bool {
        self.0.borrow().terminal == Some(Terminal::Complete)
    }

    /// The error the stream failed with, if it did
    pub fn error(&self) -> Option<StreamError> {
        self.0.borrow().terminal.as_ref().and_then(|terminal| terminal.error().cloned())
    }
}
