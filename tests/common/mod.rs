//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use std::cell::RefCell;
use std::rc::Rc;
use workflow_canvas::Outcome;

/// Records what each simulated event did.
#[derive(Default, Clone)]
pub struct OutcomeTracker {
    /// Accepted events, in order
    pub outcomes: Rc<RefCell<Vec<Outcome>>>,
    /// Display text of rejected events
    pub errors: Rc<RefCell<Vec<String>>>,
}

impl OutcomeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, result: &workflow_canvas::Result<Outcome>) {
        match result {
            Ok(outcome) => self.outcomes.borrow_mut().push(outcome.clone()),
            Err(err) => self.errors.borrow_mut().push(err.to_string()),
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn last(&self) -> Option<Outcome> {
        self.outcomes.borrow().last().cloned()
    }

    /// Clear all recorded outcomes.
    pub fn clear(&self) {
        self.outcomes.borrow_mut().clear();
        self.errors.borrow_mut().clear();
    }
}

