// src/notify/message.rs

//! Builds transport invocations without running anything.

use std::path::PathBuf;

use crate::notify::selector::Transport;
use crate::types::TransportKind;

/// One run of a transport binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Piped to the transport's standard input.
    pub stdin: Vec<u8>,
    /// Whom this invocation delivers to, for error messages.
    pub recipients: String,
    /// Forward the transport's stdout/stderr to ours (sendmail) instead of
    /// discarding them (mail).
    pub inherit_output: bool,
}

/// Everything a transport needs to deliver one report.
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    pub subject: &'a str,
    pub from: Option<&'a str>,
    pub recipients: &'a [String],
    pub body: &'a str,
}

/// Invocations for `transport`, in the order they must run.
///
/// `mail` gets one invocation per recipient; `sendmail` gets a single one
/// that reads recipients from the headers. No recipients means nothing to
/// run.
pub fn build_invocations(transport: &Transport, envelope: &Envelope<'_>) -> Vec<Invocation> {
    if envelope.recipients.is_empty() {
        return Vec::new();
    }

    match transport.kind {
        TransportKind::Mail => envelope
            .recipients
            .iter()
            .map(|to| mail_invocation(transport, envelope, to))
            .collect(),
        TransportKind::Sendmail => vec![Invocation {
            program: transport.path.clone(),
            args: vec!["-t".to_string()],
            stdin: sendmail_message(envelope).into_bytes(),
            recipients: envelope.recipients.join(", "),
            inherit_output: true,
        }],
    }
}

fn mail_invocation(transport: &Transport, envelope: &Envelope<'_>, to: &str) -> Invocation {
    let mut args = vec!["-s".to_string(), envelope.subject.to_string()];
    if let Some(from) = envelope.from {
        args.push("-a".to_string());
        args.push(from.to_string());
    }
    args.push(to.to_string());

    Invocation {
        program: transport.path.clone(),
        args,
        stdin: envelope.body.as_bytes().to_vec(),
        recipients: to.to_string(),
        inherit_output: false,
    }
}

/// RFC-822 style message for `sendmail -t`.
///
/// The first recipient goes in `To`, the rest in a comma-joined `Cc`. Header
/// lines end in CRLF and a blank line separates them from the body.
pub fn sendmail_message(envelope: &Envelope<'_>) -> String {
    let mut message = String::new();

    if let Some(from) = envelope.from {
        message.push_str(&format!("From: {from}\r\n"));
    }

    if let Some((to, cc)) = envelope.recipients.split_first() {
        message.push_str(&format!("To: {to}\r\n"));
        if !cc.is_empty() {
            message.push_str(&format!("Cc: {}\r\n", cc.join(",")));
        }
    }

    message.push_str(&format!("Subject: {}\r\n\r\n", envelope.subject));
    message.push_str(envelope.body);
    message
}
