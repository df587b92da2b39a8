// Tripwire - Fault Injection Target
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Trigger detection.
//!
//! An input fires the trigger when its first six bytes are exactly
//! [`TRIGGER`]. Matching walks the prefix one byte at a time and stops at the
//! first mismatch, so the number of matched bytes (the depth) is the whole of
//! the detector's state: depths `0..=5` are clean, depth `6` is the fault.

use thiserror::Error;
use tracing::debug;

/// Magic prefix that fires the fault. Case-sensitive, byte-exact.
pub const TRIGGER: [u8; 6] = *b"ABCDEF";

/// Depth at which the trigger is fully matched.
pub const FAULT_DEPTH: usize = TRIGGER.len();

/// Signal raised when an input carries the full trigger prefix.
///
/// This stands in for a deliberate invalid memory write; the host decides
/// how the process terminates.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Fault triggered: input starts with the magic prefix")]
pub struct FaultTriggered;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The prefix did not match; `depth` bytes matched before the mismatch
    /// or the end of input.
    Clean { depth: usize },
    /// All six bytes matched.
    Fault,
}

impl Outcome {
    pub fn depth(&self) -> usize {
        match self {
            Outcome::Clean { depth } => *depth,
            Outcome::Fault => FAULT_DEPTH,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Fault)
    }

    /// Converts the fault into an error so callers can propagate it with `?`.
    pub fn into_result(self) -> Result<usize, FaultTriggered> {
        match self {
            Outcome::Clean { depth } => Ok(depth),
            Outcome::Fault => Err(FaultTriggered),
        }
    }
}

/// Counts how many leading bytes of `data` match the trigger.
///
/// Never reads past the end of `data`.
pub fn match_depth(data: &[u8]) -> usize {
    TRIGGER
        .iter()
        .zip(data)
        .take_while(|(expected, actual)| expected == actual)
        .count()
}

pub fn scan(data: &[u8]) -> Outcome {
    let depth = match_depth(data);
    debug!("Trigger match depth {}/{}", depth, FAULT_DEPTH);

    if depth == FAULT_DEPTH {
        Outcome::Fault
    } else {
        Outcome::Clean { depth }
    }
}
