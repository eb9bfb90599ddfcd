#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use croncape::config::{OutputTarget, Request};
use croncape::exec::RunResult;
use croncape::types::TransportPolicy;

/// Builder for `Request` to simplify test setup.
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            request: Request {
                command: command.into_iter().map(Into::into).collect(),
                emails: String::new(),
                from: None,
                mail_host: None,
                timeout: None,
                transport: TransportPolicy::Auto,
                verbose: false,
                output: None,
            },
        }
    }

    /// Shorthand for `sh -c <script>`.
    pub fn shell(script: &str) -> Self {
        Self::new(["sh", "-c", script])
    }

    pub fn emails(mut self, emails: &str) -> Self {
        self.request.emails = emails.to_string();
        self
    }

    pub fn from(mut self, from: &str) -> Self {
        self.request.from = Some(from.to_string());
        self
    }

    pub fn mail_host(mut self, host: &str) -> Self {
        self.request.mail_host = Some(host.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    pub fn transport(mut self, policy: TransportPolicy) -> Self {
        self.request.transport = policy;
        self
    }

    pub fn verbose(mut self, val: bool) -> Self {
        self.request.verbose = val;
        self
    }

    pub fn write_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.request.output = Some(OutputTarget::Write(path.into()));
        self
    }

    pub fn append_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.request.output = Some(OutputTarget::Append(path.into()));
        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}

/// Builder for a `RunResult` with fixed, reproducible timestamps.
pub struct RunResultBuilder {
    result: RunResult,
}

impl RunResultBuilder {
    pub fn new(request: Request) -> Self {
        let started = UNIX_EPOCH + Duration::from_secs(1_714_532_400);
        let elapsed = Duration::from_millis(1_500);
        Self {
            result: RunResult {
                request,
                stdout: Vec::new(),
                stderr: Vec::new(),
                started,
                stopped: started + elapsed,
                elapsed,
                killed: false,
                code: 0,
            },
        }
    }

    pub fn code(mut self, code: i32) -> Self {
        self.result.code = code;
        self
    }

    pub fn killed(mut self, val: bool) -> Self {
        self.result.killed = val;
        self
    }

    pub fn stdout(mut self, out: impl Into<Vec<u8>>) -> Self {
        self.result.stdout = out.into();
        self
    }

    pub fn stderr(mut self, err: impl Into<Vec<u8>>) -> Self {
        self.result.stderr = err.into();
        self
    }

    pub fn started(mut self, at: SystemTime) -> Self {
        self.result.started = at;
        self.result.stopped = at + self.result.elapsed;
        self
    }

    pub fn elapsed(mut self, elapsed: Duration) -> Self {
        self.result.elapsed = elapsed;
        self.result.stopped = self.result.started + elapsed;
        self
    }

    pub fn build(self) -> RunResult {
        self.result
    }
}
