//! Cross-implementation conformance fixtures for the MessagePack codec.
//!
//! - [`reference_corpus`] - canonical values with bytes from the Python reference
//! - [`Harness`] - pack/unpack assertions producing a [`Report`]
//! - [`render_fixture_file`] / [`render_json`] - fixture file output
//! - [`generate`] - verify the corpus, then write the configured fixture file
//!
//! # Example
//!
//! ```
//! use msgpack_conformance::{reference_corpus, render_scheme, verify_corpus};
//!
//! let corpus = reference_corpus();
//! assert!(verify_corpus(&corpus).is_success());
//! assert!(render_scheme(&corpus[2]).contains("(pack/blob 100)"));
//! ```

mod config;
mod corpus;
mod error;
mod fixture;
mod generate;
mod harness;

pub use config::{ConfigError, GeneratorConfig, DEFAULT_HEADER, DEFAULT_OUTPUT};
pub use corpus::{reference_corpus, Case};
pub use error::ConformanceError;
pub use fixture::{
    render_fixture_file, render_json, render_scheme, scheme_literal, FixtureFormat,
};
pub use generate::generate;
pub use harness::{verify_case, verify_corpus, CaseOutcome, Harness, Mismatch, Report};
