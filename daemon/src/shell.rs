//! Line-oriented command shell over an in-memory ledger.
//!
//! Each input line is one command. Each command produces exactly one JSON
//! response line, `{"ok": ...}` or `{"error": {"kind", "message"}}`. When
//! event output is enabled, the events a command caused are written as
//! `{"event": ...}` lines before its response.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use ballot_governance::{Clock, LedgerEvent, LedgerLimits, VotingError, VotingLedger};
use ballot_types::{AccountId, AccountIdError, ProposalId};
use ballot_utils::format_duration;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

const HELP: &[&str] = &[
    "create <caller> <duration_secs> <description...>",
    "vote <caller> <proposal_id> <for|against>",
    "get <proposal_id>",
    "range <start> <count>",
    "latest <count>",
    "result <proposal_id>",
    "voted <proposal_id> <account>",
    "status <proposal_id>",
    "count",
    "help",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command {0:?} (try \"help\")")]
    UnknownCommand(String),

    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error("argument <{arg}> must be a non-negative integer, got {value:?}")]
    InvalidNumber { arg: &'static str, value: String },

    #[error("invalid account: {0}")]
    InvalidAccount(#[from] AccountIdError),

    #[error("vote must be \"for\" or \"against\", got {0:?}")]
    InvalidSupport(String),

    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),
}

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Create {
        caller: AccountId,
        duration_secs: u64,
        description: String,
    },
    Vote {
        caller: AccountId,
        proposal_id: ProposalId,
        support: bool,
    },
    Get(ProposalId),
    Range {
        start: ProposalId,
        count: u64,
    },
    Latest(u64),
    Result(ProposalId),
    Voted {
        proposal_id: ProposalId,
        account: AccountId,
    },
    Status(ProposalId),
    Count,
    Help,
}

/// Split off the next whitespace-delimited token.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

struct Args<'a> {
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn token(&mut self, name: &'static str) -> Result<&'a str, ShellError> {
        let (token, rest) = next_token(self.rest).ok_or(ShellError::MissingArgument(name))?;
        self.rest = rest;
        Ok(token)
    }

    fn number(&mut self, name: &'static str) -> Result<u64, ShellError> {
        let token = self.token(name)?;
        token.parse().map_err(|_| ShellError::InvalidNumber {
            arg: name,
            value: token.to_owned(),
        })
    }

    fn account(&mut self, name: &'static str) -> Result<AccountId, ShellError> {
        Ok(self.token(name)?.parse()?)
    }

    /// Everything left on the line, verbatim apart from surrounding whitespace.
    fn remainder(&mut self) -> &'a str {
        let rest = self.rest.trim();
        self.rest = "";
        rest
    }

    fn finish(self) -> Result<(), ShellError> {
        match self.rest.trim() {
            "" => Ok(()),
            extra => Err(ShellError::TrailingInput(extra.to_owned())),
        }
    }
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = next_token(line).ok_or(ShellError::MissingArgument("command"))?;
        let mut args = Args { rest };

        let command = match name.to_lowercase().as_str() {
            "create" => {
                let caller = args.account("caller")?;
                let duration_secs = args.number("duration_secs")?;
                // An empty description is passed through so the ledger can reject it.
                let description = args.remainder().to_owned();
                Command::Create {
                    caller,
                    duration_secs,
                    description,
                }
            }
            "vote" => {
                let caller = args.account("caller")?;
                let proposal_id = ProposalId::new(args.number("proposal_id")?);
                let support = match args.token("for|against")?.to_lowercase().as_str() {
                    "for" | "yes" | "true" => true,
                    "against" | "no" | "false" => false,
                    other => return Err(ShellError::InvalidSupport(other.to_owned())),
                };
                Command::Vote {
                    caller,
                    proposal_id,
                    support,
                }
            }
            "get" => Command::Get(ProposalId::new(args.number("proposal_id")?)),
            "range" => Command::Range {
                start: ProposalId::new(args.number("start")?),
                count: args.number("count")?,
            },
            "latest" => Command::Latest(args.number("count")?),
            "result" => Command::Result(ProposalId::new(args.number("proposal_id")?)),
            "voted" => Command::Voted {
                proposal_id: ProposalId::new(args.number("proposal_id")?),
                account: args.account("account")?,
            },
            "status" => Command::Status(ProposalId::new(args.number("proposal_id")?)),
            "count" => Command::Count,
            "help" => Command::Help,
            other => return Err(ShellError::UnknownCommand(other.to_owned())),
        };
        args.finish()?;
        Ok(command)
    }
}

fn ok(value: Value) -> Value {
    json!({ "ok": value })
}

fn error(kind: &str, message: impl ToString) -> Value {
    json!({ "error": { "kind": kind, "message": message.to_string() } })
}

fn voting_error(e: VotingError) -> Value {
    error(e.kind(), &e)
}

/// Serialize a value that cannot fail to serialize (plain data with string keys).
fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        warn!("response serialization failed: {e}");
        Value::Null
    })
}

/// Executes commands against one ledger.
pub struct Shell {
    ledger: VotingLedger,
    pending: Option<Arc<Mutex<Vec<LedgerEvent>>>>,
}

impl Shell {
    pub fn new(clock: Arc<dyn Clock>, limits: LedgerLimits, emit_events: bool) -> Self {
        let mut ledger = VotingLedger::with_limits(clock, limits);
        let pending = emit_events.then(|| {
            let pending = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&pending);
            ledger.subscribe(Box::new(move |event: &LedgerEvent| {
                sink.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(event.clone());
            }));
            pending
        });
        Self { ledger, pending }
    }

    pub fn ledger(&self) -> &VotingLedger {
        &self.ledger
    }

    /// Run one command and build its response.
    pub fn execute(&self, command: Command) -> Value {
        let ledger = &self.ledger;
        match command {
            Command::Create {
                caller,
                duration_secs,
                description,
            } => match ledger.create_proposal(&caller, &description, duration_secs) {
                Ok(id) => ok(json!({ "proposal_id": id })),
                Err(e) => voting_error(e),
            },
            Command::Vote {
                caller,
                proposal_id,
                support,
            } => match ledger.vote(&caller, proposal_id, support) {
                Ok(()) => ok(json!({
                    "proposal_id": proposal_id,
                    "voter": caller,
                    "support": support,
                })),
                Err(e) => voting_error(e),
            },
            Command::Get(id) => match ledger.get_proposal(id) {
                Ok(proposal) => {
                    let now = ledger.now();
                    let remaining = proposal.seconds_remaining(now);
                    let mut body = to_value(&proposal);
                    if let Value::Object(fields) = &mut body {
                        fields.insert("status".into(), to_value(&proposal.status_at(now)));
                        fields.insert("seconds_remaining".into(), json!(remaining));
                        fields.insert("remaining".into(), json!(format_duration(remaining)));
                    }
                    ok(body)
                }
                Err(e) => voting_error(e),
            },
            Command::Range { start, count } => match ledger.get_proposals_range(start, count) {
                Ok(range) => ok(to_value(&range)),
                Err(e) => voting_error(e),
            },
            Command::Latest(count) => match ledger.latest(count) {
                Ok(range) => ok(to_value(&range)),
                Err(e) => voting_error(e),
            },
            Command::Result(id) => match ledger.get_proposal_result(id) {
                Ok(outcome) => ok(to_value(&outcome)),
                Err(e) => voting_error(e),
            },
            Command::Voted {
                proposal_id,
                account,
            } => ok(json!({ "has_voted": ledger.has_voted(proposal_id, &account) })),
            Command::Status(id) => match ledger.status(id) {
                Ok(status) => ok(json!({ "status": status })),
                Err(e) => voting_error(e),
            },
            Command::Count => ok(json!({ "proposal_count": ledger.proposal_count() })),
            Command::Help => ok(json!({ "commands": HELP })),
        }
    }

    /// Responses for one input line, events first. Blank lines and `#`
    /// comments produce nothing.
    pub fn handle_line(&self, line: &str) -> Vec<Value> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Vec::new();
        }

        let response = match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(e) => {
                debug!(line, "unparseable command: {e}");
                error("InvalidCommand", e)
            }
        };

        let mut out: Vec<Value> = self
            .drain_events()
            .into_iter()
            .map(|event| json!({ "event": to_value(&event) }))
            .collect();
        out.push(response);
        out
    }

    /// Read commands until end of input, writing one JSON document per line.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            for value in self.handle_line(&line?) {
                writeln!(output, "{value}")?;
            }
            output.flush()?;
        }
        Ok(())
    }

    fn drain_events(&self) -> Vec<LedgerEvent> {
        match &self.pending {
            Some(pending) => {
                std::mem::take(&mut *pending.lock().unwrap_or_else(PoisonError::into_inner))
            }
            None => Vec::new(),
        }
    }
}
