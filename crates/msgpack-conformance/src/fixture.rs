//! Fixture file rendering.
//!
//! The Scheme output is a sequence of `test-group` blocks, one per case, each
//! asserting both directions against the byte string as a `#u8(...)` literal.
//! The JSON output carries the same cases as `{name, bytes, value}` objects.

use clap::ValueEnum;
use msgpack_codec::{format_float, Value};
use serde::{Deserialize, Serialize};

use crate::corpus::Case;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FixtureFormat {
    #[default]
    Scheme,
    Json,
}

impl FixtureFormat {
    /// Renders a whole fixture file. The header only applies to Scheme output.
    pub fn render(self, header: &str, cases: &[Case]) -> Result<String, serde_json::Error> {
        match self {
            FixtureFormat::Scheme => Ok(render_fixture_file(header, cases)),
            FixtureFormat::Json => render_json(cases),
        }
    }
}

pub fn render_fixture_file(header: &str, cases: &[Case]) -> String {
    let mut out = String::from(header);
    for case in cases {
        out.push_str(&render_scheme(case));
    }
    out
}

pub fn render_scheme(case: &Case) -> String {
    let blob = blob_octets(&case.expected);
    let expr = match &case.scheme_expr {
        Some(expr) => expr.clone(),
        None => scheme_literal(&case.value),
    };
    format!(
        concat!(
            "\n(test-group \"{name}\"\n",
            "    (test \"unpack\" {expr}\n",
            "                   (unpack/blob (u8vector->blob/shared #u8({blob}))))\n",
            "    (test \"pack\" (u8vector->blob/shared #u8({blob}))\n",
            "                 (pack/blob {expr})))\n",
        ),
        name = escape_string(&case.name),
        expr = expr,
        blob = blob,
    )
}

/// Scheme expression evaluating to `value`.
pub fn scheme_literal(value: &Value) -> String {
    match value {
        Value::Nil => "'()".to_string(),
        Value::Array(items) => match datum(value) {
            Some(d) => format!("'{d}"),
            None => {
                let mut out = String::from("(vector");
                for item in items {
                    out.push(' ');
                    out.push_str(&scheme_literal(item));
                }
                out.push(')');
                out
            }
        },
        Value::Bin(bytes) => blob_expr(bytes),
        Value::Map(pairs) => {
            let mut out = String::from("(alist->hash-table (list");
            for (k, v) in pairs {
                out.push_str(&format!(" (cons {} {})", scheme_literal(k), scheme_literal(v)));
            }
            out.push_str("))");
            out
        }
        Value::Extension(ext) => {
            let payload = match std::str::from_utf8(&ext.data) {
                Ok(text) => format!("(string->blob {})", quote(text)),
                Err(_) => blob_expr(&ext.data),
            };
            format!("(make-extension {} {payload})", ext.tag)
        }
        // self-evaluating atoms
        _ => datum(value).unwrap_or_default(),
    }
}

/// Literal datum form, when the value has one. Containers only qualify when
/// every element does.
fn datum(value: &Value) -> Option<String> {
    Some(match value {
        Value::Nil => "()".to_string(),
        Value::Bool(true) => "#t".to_string(),
        Value::Bool(false) => "#f".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => scheme_float(*f),
        Value::Str(s) => match s.as_str() {
            Some(text) => quote(text),
            None => quote(&String::from_utf8_lossy(s.as_bytes())),
        },
        Value::Array(items) => {
            let parts = items.iter().map(datum).collect::<Option<Vec<_>>>()?;
            format!("#({})", parts.join(" "))
        }
        Value::Bin(_) | Value::Map(_) | Value::Extension(_) => return None,
    })
}

fn scheme_float(f: f64) -> String {
    if f.is_nan() {
        "+nan.0".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "+inf.0" } else { "-inf.0" }.to_string()
    } else {
        format_float(f)
    }
}

fn blob_octets(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn blob_expr(bytes: &[u8]) -> String {
    format!("(u8vector->blob/shared #u8({}))", blob_octets(bytes))
}

fn quote(text: &str) -> String {
    format!("\"{}\"", escape_string(text))
}

fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                out.push_str(&format!("\\x{:x};", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

#[derive(Serialize)]
struct JsonFixture<'a> {
    name: &'a str,
    bytes: &'a [u8],
    value: serde_json::Value,
}

/// JSON array of `{name, bytes, value}` objects, pretty-printed.
pub fn render_json(cases: &[Case]) -> Result<String, serde_json::Error> {
    let fixtures: Vec<JsonFixture<'_>> = cases
        .iter()
        .map(|case| JsonFixture {
            name: &case.name,
            bytes: &case.expected,
            value: case.value.to_json(),
        })
        .collect();
    let mut out = serde_json::to_string_pretty(&fixtures)?;
    out.push('\n');
    Ok(out)
}
