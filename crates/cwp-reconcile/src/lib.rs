//! cwp-reconcile
//!
//! Alarm sweep workflow: compare the configured alarm list against the live
//! backend and delete what exists, after operator confirmation.
//!
//! Phases run strictly in order, each at most once:
//! - CHECK: existence query per alarm, in list order; failed checks are skipped
//! - GATE: no prompt when nothing exists; otherwise one line of operator input
//! - DELETE: every existing alarm is attempted; failures are collected
//! - REPORT: counts and member lists in traversal order
//!
//! No retries, no concurrency. The backend and the prompt are traits so the
//! whole workflow runs against scripted fakes in tests.

mod backend;
mod console;
mod engine;
mod prompt;
mod render;
mod types;

pub use backend::{AlarmBackend, BackendError, BackendOperation};
pub use console::Console;
pub use engine::{
    check_phase, confirmation_prompt_text, delete_phase, gate, run_check_only, run_sweep,
};
pub use prompt::{is_affirmative, ConfirmationPrompt, LinePrompt, AFFIRMATIVE_TOKENS};
pub use render::{outcome_line, render_json, render_text, RunMeta};
pub use types::*;
