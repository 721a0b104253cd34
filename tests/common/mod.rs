//! In-memory redis connections for driving the command traits
//!
//! Both fakes record every command as its list of tokens and answer with
//! canned replies in FIFO order.

#![allow(dead_code)]

use redis::{Cmd, ErrorKind, Pipeline, RedisError, RedisFuture, RedisResult, Value};
use std::collections::VecDeque;

/// Recorded commands and pending replies
#[derive(Debug, Default)]
pub struct Script {
    replies: VecDeque<Value>,
    /// Every command issued, command name first
    pub commands: Vec<Vec<String>>,
}

impl Script {
    fn respond(&mut self, tokens: Vec<String>) -> RedisResult<Value> {
        self.commands.push(tokens);
        self.replies
            .pop_front()
            .ok_or_else(|| RedisError::from((ErrorKind::ClientError, "no canned reply left")))
    }

    /// Tokens of the most recent command
    pub fn last(&self) -> Vec<&str> {
        self.commands
            .last()
            .map(|tokens| tokens.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Decode a packed `*N $len arg ...` RESP request into its tokens
fn decode_request(packed: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(packed);
    let mut lines = text.split("\r\n");
    let count: usize = lines
        .next()
        .and_then(|header| header.strip_prefix('*'))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0);

    let mut tokens = Vec::with_capacity(count);
    for _ in 0..count {
        let _length = lines.next();
        if let Some(token) = lines.next() {
            tokens.push(token.to_string());
        }
    }
    tokens
}

fn cmd_tokens(cmd: &Cmd) -> Vec<String> {
    cmd.args_iter()
        .filter_map(|arg| match arg {
            redis::Arg::Simple(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            redis::Arg::Cursor => None,
        })
        .collect()
}

/// Blocking fake connection
#[derive(Debug, Default)]
pub struct MockConnection {
    /// Recorded traffic
    pub script: Script,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next command
    pub fn with_reply(mut self, reply: Value) -> Self {
        self.script.replies.push_back(reply);
        self
    }

    pub fn last(&self) -> Vec<&str> {
        self.script.last()
    }

    pub fn command_count(&self) -> usize {
        self.script.commands.len()
    }
}

impl redis::ConnectionLike for MockConnection {
    fn req_packed_command(&mut self, cmd: &[u8]) -> RedisResult<Value> {
        self.script.respond(decode_request(cmd))
    }

    fn req_packed_commands(
        &mut self,
        _cmd: &[u8],
        _offset: usize,
        _count: usize,
    ) -> RedisResult<Vec<Value>> {
        Err(RedisError::from((
            ErrorKind::ClientError,
            "pipelines are not scripted",
        )))
    }

    fn get_db(&self) -> i64 {
        0
    }

    fn check_connection(&mut self) -> bool {
        true
    }

    fn is_open(&self) -> bool {
        true
    }
}

/// Async fake connection
#[derive(Debug, Default)]
pub struct AsyncMockConnection {
    /// Recorded traffic
    pub script: Script,
}

impl AsyncMockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next command
    pub fn with_reply(mut self, reply: Value) -> Self {
        self.script.replies.push_back(reply);
        self
    }

    pub fn last(&self) -> Vec<&str> {
        self.script.last()
    }

    pub fn command_count(&self) -> usize {
        self.script.commands.len()
    }
}

impl redis::aio::ConnectionLike for AsyncMockConnection {
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        let result = self.script.respond(cmd_tokens(cmd));
        Box::pin(std::future::ready(result))
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        _cmd: &'a Pipeline,
        _offset: usize,
        _count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        Box::pin(std::future::ready(Err(RedisError::from((
            ErrorKind::ClientError,
            "pipelines are not scripted",
        )))))
    }

    fn get_db(&self) -> i64 {
        0
    }
}

// =============================================================================
// Reply helpers
// =============================================================================

pub fn bulk(s: &str) -> Value {
    Value::BulkString(s.as_bytes().to_vec())
}

pub fn pair(ts: i64, value: &str) -> Value {
    Value::Array(vec![Value::Int(ts), bulk(value)])
}

pub fn labels(entries: &[(&str, &str)]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|(k, v)| Value::Array(vec![bulk(k), bulk(v)]))
            .collect(),
    )
}

/// Install a test subscriber so `debug!` command logs show with `--nocapture`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
