//! Types for STAR method sentence classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// STAR category assigned to a single sentence of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarLabel {
    Action,
    Result,
    Situation,
    Task,
}

impl fmt::Display for StarLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StarLabel::Action => "Action",
            StarLabel::Result => "Result",
            StarLabel::Situation => "Situation",
            StarLabel::Task => "Task",
        };
        write!(f, "{}", name)
    }
}
