//! Shared test helpers.

#![allow(dead_code)]

use crunchy_api::{ClientConfig, ClientError, CrunchyrollClient, Result, Transport};
use std::cell::RefCell;
use std::collections::VecDeque;

pub const USERNAME: &str = "testuser";
pub const PASSWORD: &str = "password123";

pub fn session_reply(session_id: &str) -> String {
    serde_json::json!({ "error": false, "code": "ok", "data": { "session_id": session_id } })
        .to_string()
}

pub fn login_reply(auth: &str) -> String {
    serde_json::json!({ "error": false, "code": "ok", "data": { "auth": auth, "expires": "2030-01-01T00:00:00-07:00" } })
        .to_string()
}

pub fn ok_reply() -> String {
    serde_json::json!({ "error": false, "code": "ok", "data": {} }).to_string()
}

pub fn error_reply(code: &str) -> String {
    serde_json::json!({ "error": true, "code": code, "message": "request failed" }).to_string()
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub form: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Replays queued bodies in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<String>>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: impl Into<String>) -> Self {
        self.push(body);
        self
    }

    pub fn push(&self, body: impl Into<String>) {
        self.replies.borrow_mut().push_back(Ok(body.into()));
    }

    pub fn push_error(&self, err: ClientError) {
        self.replies.borrow_mut().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.method.clone()).collect()
    }

    pub fn last(&self) -> Call {
        self.calls.borrow().last().cloned().expect("no request recorded")
    }

    pub fn pending(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<Vec<u8>> {
        let method = url
            .rsplit('/')
            .next()
            .and_then(|name| name.strip_suffix(".0.json"))
            .unwrap_or(url)
            .to_string();
        self.calls.borrow_mut().push(Call {
            method,
            form: form.to_vec(),
        });

        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {}", url));
        reply.map(String::into_bytes)
    }
}

/// A client that has gone through start_session + login.
pub fn logged_in_client() -> CrunchyrollClient<ScriptedTransport> {
    let transport = ScriptedTransport::new()
        .reply(session_reply("session-1"))
        .reply(login_reply("auth-1"));
    CrunchyrollClient::with_transport(ClientConfig::new("app-token"), transport, USERNAME, PASSWORD)
        .expect("login should succeed")
}
