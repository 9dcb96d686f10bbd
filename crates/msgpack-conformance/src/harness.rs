//! Pack/unpack assertions over a corpus.

use std::fmt;

use msgpack_buffers::print_octets;
use msgpack_codec::{deep_equal, CodecError, MsgPackCodec, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::corpus::Case;

/// Bytes shown per side in a byte mismatch message.
const OCTETS_IN_REPORT: usize = 32;

/// Why one direction of a case failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Mismatch {
    #[error("encoding failed: {0}")]
    EncodeFailed(CodecError),
    #[error("decoding failed: {0}")]
    DecodeFailed(CodecError),
    #[error(
        "bytes differ: expected [{}], got [{}]",
        print_octets(.expected, OCTETS_IN_REPORT),
        print_octets(.actual, OCTETS_IN_REPORT)
    )]
    Bytes { expected: Vec<u8>, actual: Vec<u8> },
    #[error("values differ: expected {expected}, got {actual}")]
    Value { expected: Value, actual: Value },
}

/// Result of checking both directions of one case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub name: String,
    pub pack: Result<(), Mismatch>,
    pub unpack: Result<(), Mismatch>,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.pack.is_ok() && self.unpack.is_ok()
    }

    /// Failed directions, labelled `pack` or `unpack`.
    pub fn mismatches(&self) -> impl Iterator<Item = (&'static str, &Mismatch)> {
        [("pack", &self.pack), ("unpack", &self.unpack)]
            .into_iter()
            .filter_map(|(dir, r)| r.as_ref().err().map(|m| (dir, m)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub outcomes: Vec<CaseOutcome>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(CaseOutcome::passed)
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in self.failures() {
            for (dir, mismatch) in outcome.mismatches() {
                writeln!(f, "FAIL {} ({dir}): {mismatch}", outcome.name)?;
            }
        }
        write!(f, "{} of {} cases passed", self.passed_count(), self.total())
    }
}

/// Runs cases through one reusable codec.
pub struct Harness {
    codec: MsgPackCodec,
    fail_fast: bool,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        Self {
            codec: MsgPackCodec::new(),
            fail_fast: false,
        }
    }

    /// Stop at the first failing case instead of checking the whole corpus.
    pub fn fail_fast(mut self, yes: bool) -> Self {
        self.fail_fast = yes;
        self
    }

    pub fn verify_case(&mut self, case: &Case) -> CaseOutcome {
        let pack = match self.codec.encode(&case.value) {
            Ok(actual) if actual == case.expected => Ok(()),
            Ok(actual) => Err(Mismatch::Bytes {
                expected: case.expected.clone(),
                actual,
            }),
            Err(err) => Err(Mismatch::EncodeFailed(err)),
        };
        let unpack = match self.codec.decode(&case.expected) {
            Ok(actual) if deep_equal(&actual, &case.value) => Ok(()),
            Ok(actual) => Err(Mismatch::Value {
                expected: case.value.clone(),
                actual,
            }),
            Err(err) => Err(Mismatch::DecodeFailed(err)),
        };
        let outcome = CaseOutcome {
            name: case.name.clone(),
            pack,
            unpack,
        };
        if outcome.passed() {
            debug!(case = %outcome.name, "pass");
        } else {
            for (dir, mismatch) in outcome.mismatches() {
                warn!(case = %outcome.name, direction = dir, "{mismatch}");
            }
        }
        outcome
    }

    pub fn verify_corpus(&mut self, cases: &[Case]) -> Report {
        let mut report = Report::default();
        for case in cases {
            let outcome = self.verify_case(case);
            let failed = !outcome.passed();
            report.outcomes.push(outcome);
            if failed && self.fail_fast {
                break;
            }
        }
        debug!(
            passed = report.passed_count(),
            total = report.total(),
            "corpus verified"
        );
        report
    }
}

pub fn verify_case(case: &Case) -> CaseOutcome {
    Harness::new().verify_case(case)
}

pub fn verify_corpus(cases: &[Case]) -> Report {
    Harness::new().verify_corpus(cases)
}
