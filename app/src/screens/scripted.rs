//! Canned-response transport for screen tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use category_core::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Replays canned outcomes in order and records every request.
#[derive(Default)]
pub(crate) struct Scripted {
    outcomes: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    pub(crate) seen: RefCell<Vec<HttpRequest>>,
}

impl Scripted {
    pub(crate) fn reply(self, status: u16, body: &str) -> Self {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub(crate) fn fail(self) -> Self {
        self.outcomes
            .borrow_mut()
            .push_back(Err(TransportError("connection reset".to_string())));
        self
    }
}

impl HttpTransport for Scripted {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .expect("unexpected request")
    }
}
