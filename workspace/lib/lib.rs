//! Text front end for [`qreg_sim`]: parses one-line commands, dispatches them
//! to a [`Session`], and renders the results.
//!
//! Nothing here touches the amplitude buffer directly; all state changes go
//! through the session.

use std::{ fmt::Write, str::FromStr };
use itertools::Itertools;
use qreg_sim::{
    error::RegError,
    register::Register,
    session::Session,
};
use thiserror::Error;
use tracing::debug;

/// Printed when the interactive loop starts.
pub const INTRO: &str
    = "Quantum Emulator REPL. Type help or ? for commands. Type quit to exit.";

/// Printed before each line of input.
pub const PROMPT: &str = "> ";

pub const HELP: &str = "\
Available commands:
  add_qubit          - Add a new qubit in the |0> state to the register.
  apply GATE TARGET  - Apply a quantum gate (H, X, Y, Z, S) to a target qubit index.
  show               - Display the current quantum state of the register.
  measure            - Perform a measurement on all qubits, collapsing the state.
  bell               - (For 2 qubits) Create a standard Bell state.
  sample SHOTS       - Sample measurement outcomes without collapsing the state.
  history            - List every measurement outcome so far.
  help               - Show this help message.
  quit               - Exit the emulator.";

/// Rendering options for `show`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayOpts {
    /// Length of a full probability bar.
    pub bar_width: usize,
    /// Basis states with probability at or below this are not listed.
    pub threshold: f64,
}

impl Default for DisplayOpts {
    fn default() -> Self { Self { bar_width: 40, threshold: 1e-9 } }
}

/// A single parsed command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    AddQubit,
    Apply { gate: String, target: usize },
    Show,
    Measure,
    Bell,
    Sample { shots: usize },
    History,
    Help,
    Quit,
}

/// Errors from parsing or running a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Error: Target qubit must be an integer, got '{0}'.")]
    BadTarget(String),

    #[error("Error: Number of shots must be a positive integer, got '{0}'.")]
    BadShots(String),

    #[error("Unknown command: {0}. Type help for a list of commands.")]
    Unknown(String),

    #[error("Error: {0}")]
    Engine(#[from] RegError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        let args: Vec<&str> = words.collect();
        match head.to_ascii_lowercase().as_str() {
            "add_qubit" => Ok(Self::AddQubit),
            "apply" => {
                let [gate, target] = args[..] else {
                    return Err(CommandError::Usage(
                        "apply GATE TARGET_QUBIT (e.g., apply H 0)"));
                };
                let target: usize = target.parse()
                    .map_err(|_| CommandError::BadTarget(target.to_string()))?;
                Ok(Self::Apply { gate: gate.to_ascii_uppercase(), target })
            },
            "show" => Ok(Self::Show),
            "measure" => Ok(Self::Measure),
            "bell" => Ok(Self::Bell),
            "sample" => {
                let [shots] = args[..] else {
                    return Err(CommandError::Usage("sample SHOTS (e.g., sample 100)"));
                };
                match shots.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Self::Sample { shots: n }),
                    _ => Err(CommandError::BadShots(shots.to_string())),
                }
            },
            "history" => Ok(Self::History),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What the interactive loop should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Print the message and read the next command.
    Continue(String),
    /// Print the message and exit.
    Quit(String),
}

/// Run a single command against `session`.
pub fn execute(session: &mut Session, cmd: Command, opts: &DisplayOpts)
    -> Result<Flow, CommandError>
{
    debug!(?cmd, "executing command");
    let msg = match cmd {
        Command::AddQubit => {
            let n = session.add_qubit();
            format!("Added qubit. Total qubits: {}", n)
        },
        Command::Apply { gate, target } => {
            let gate = session.apply_named(&gate, target)?;
            format!("Applied {} to qubit {}", gate, target)
        },
        Command::Show => render_state(session.register(), opts),
        Command::Measure => {
            let outcome = session.measure_all();
            format!("Measured: |{}⟩. State has collapsed.", outcome.label())
        },
        Command::Bell => {
            session.bell_pair()?;
            "Created Bell state |Φ+⟩ = (|00⟩ + |11⟩)/√2".to_string()
        },
        Command::Sample { shots } => {
            let n = session.num_qubits();
            session.sample(shots)
                .into_iter()
                .sorted()
                .map(|(i, count)| format!("|{:0width$b}⟩: {}", i, count, width = n))
                .join("\n")
        },
        Command::History => render_history(session),
        Command::Help => HELP.to_string(),
        Command::Quit => { return Ok(Flow::Quit("Exiting Quantum REPL.".to_string())); },
    };
    Ok(Flow::Continue(msg))
}

/// List recorded measurement outcomes, oldest first, numbered from 1.
pub fn render_history(session: &Session) -> String {
    if session.outcomes().is_empty() {
        return "No measurements yet.".to_string();
    }
    session.outcomes().iter()
        .enumerate()
        .map(|(k, outcome)| {
            format!("{}: |{}⟩ (p = {:.3})", k + 1, outcome.label(), outcome.probability)
        })
        .join("\n")
}

/// Render a full-width probability bar.
pub fn prob_bar(p: f64, width: usize) -> String {
    let filled = ((p * width as f64) as usize).min(width);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(width - filled))
}

/// Render the state, its probability distribution, and (for one qubit) its
/// Bloch vector.
pub fn render_state(reg: &Register, opts: &DisplayOpts) -> String {
    let n = reg.num_qubits();
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "System state ({} qubits):", n);
    let _ = writeln!(out, "{}", reg);
    let _ = write!(out, "Probabilities:");
    for (i, p) in reg.probabilities().into_iter().enumerate() {
        if p <= opts.threshold { continue; }
        let _ = write!(
            out,
            "\n|{:0width$b}⟩: {} {:.3}",
            i, prob_bar(p, opts.bar_width), p, width = n,
        );
    }
    if let Some(bloch) = reg.bloch_vector() {
        let _ = write!(out, "\n\nBloch vector (qubit 0):\n  {}", bloch);
    }
    out
}
