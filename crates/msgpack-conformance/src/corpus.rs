//! Reference corpus: canonical values and the bytes another implementation
//! produced for them.

use msgpack_codec::{Extension, Value};

/// One conformance fixture.
#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub value: Value,
    /// Encoding produced by the reference implementation.
    pub expected: Vec<u8>,
    /// Scheme expression for the value; derived from `value` when `None`.
    pub scheme_expr: Option<String>,
}

impl Case {
    /// A case named after the value's literal rendering.
    pub fn new(value: impl Into<Value>, expected: &[u8]) -> Self {
        let value = value.into();
        Self {
            name: value.to_string(),
            value,
            expected: expected.to_vec(),
            scheme_expr: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_scheme_expr(mut self, expr: impl Into<String>) -> Self {
        self.scheme_expr = Some(expr.into());
        self
    }
}

/// The fixture set checked against the Python `msgpack` package.
pub fn reference_corpus() -> Vec<Case> {
    vec![
        Case::new(-1, &[0xff]),
        Case::new(-100, &[0xd0, 0x9c]),
        Case::new(100, &[0x64]),
        Case::new(-16384, &[0xd1, 0xc0, 0x00]),
        Case::new(16384, &[0xcd, 0x40, 0x00]),
        Case::new(56213, &[0xcd, 0xdb, 0x95]),
        Case::new(-56213, &[0xd2, 0xff, 0xff, 0x24, 0x6b]),
        Case::new(
            100102831903u64,
            &[0xcf, 0x00, 0x00, 0x00, 0x17, 0x4e, 0x97, 0xff, 0x1f],
        ),
        Case::new(
            -100102831903i64,
            &[0xd3, 0xff, 0xff, 0xff, 0xe8, 0xb1, 0x68, 0x00, 0xe1],
        ),
        Case::new(1.3313, &[0xcb, 0x3f, 0xf5, 0x4d, 0x01, 0x3a, 0x92, 0xa3, 0x05]),
        Case::new(
            -7.8125653266e-200,
            &[0xcb, 0x96, 0x97, 0xeb, 0xa7, 0xc4, 0x8a, 0x1a, 0x05],
        ),
        Case::new(
            -7.8125653266e-231,
            &[0xcb, 0x90, 0x28, 0x42, 0x1f, 0xd1, 0xe7, 0x2b, 0xc8],
        ),
        Case::new(Value::Array(vec![]), &[0x90]).with_scheme_expr("'#()"),
        Case::new(
            Value::Array(vec![
                Value::from(10),
                Value::from(true),
                Value::Array(vec![Value::from("hi")]),
            ]),
            &[0x93, 0x0a, 0xc3, 0x91, 0xa2, 0x68, 0x69],
        )
        .named("little nested list")
        .with_scheme_expr("'#(10 #t #(\"hi\"))"),
        Case::new(Extension::new(42, "a"), &[0xd4, 0x2a, 0x61])
            .named("extension")
            .with_scheme_expr("(make-extension 42 (string->blob \"a\"))"),
    ]
}
