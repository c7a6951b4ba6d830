use crate::error::{MindcareError, Result};
use crate::transport::{Request, Response, Transport};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// A network stand-in that records every request it sees.
///
/// Clones share the same log, so a test can hand one clone to an
/// `ApiClient` and inspect the other.
#[derive(Clone)]
pub struct RecordingTransport {
    requests: Rc<RefCell<Vec<Request>>>,
    reply: Rc<RefCell<Reply>>,
}

#[derive(Clone)]
enum Reply {
    Respond(u16, Value),
    Fail,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTransport {
    /// Answers everything with `200 {"ok": true}`.
    pub fn new() -> Self {
        Self {
            requests: Rc::new(RefCell::new(Vec::new())),
            reply: Rc::new(RefCell::new(Reply::Respond(200, json!({ "ok": true })))),
        }
    }

    /// Fails everything with `TransportUnavailable`.
    pub fn failing() -> Self {
        let transport = Self::new();
        *transport.reply.borrow_mut() = Reply::Fail;
        transport
    }

    pub fn respond_with(&self, status: u16, body: Value) {
        *self.reply.borrow_mut() = Reply::Respond(status, body);
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        self.requests.borrow_mut().push(request.clone());
        match &*self.reply.borrow() {
            Reply::Respond(status, body) => Ok(Response::with_status(*status, body.clone())),
            Reply::Fail => Err(MindcareError::TransportUnavailable(
                "recording transport set to fail".to_string(),
            )),
        }
    }
}
