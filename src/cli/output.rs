//! output formatting utilities for scriptable CLI output
//!
//! uses JSON-RPC 2.0 format for machine-readable output:
//! - success: {"jsonrpc": "2.0", "result": {...}, "id": null}
//! - error: {"jsonrpc": "2.0", "error": {"code": N, "message": "..."}, "id": null}

use serde::Serialize;
use std::io::IsTerminal;

use crate::overrides::AttributeOverrides;
use crate::value::FormData;

/// JSON-RPC version constant
const JSONRPC_VERSION: &str = "2.0";

/// result payload for `formflow verify`
#[derive(Serialize)]
pub struct VerifyData<'a> {
    pub action: &'static str,
    pub schema: String,
    pub valid: bool,
    pub problems: &'a [String],
}

/// result payload for `formflow eval`
#[derive(Serialize)]
pub struct EvalData {
    pub action: &'static str,
    pub result: bool,
}

/// result payload for `formflow simulate`
#[derive(Serialize)]
pub struct SimulateData<'a> {
    pub action: &'static str,
    pub data: &'a FormData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<&'a AttributeOverrides>,
}

/// result payload for `formflow overrides`
#[derive(Serialize)]
pub struct OverridesData<'a> {
    pub action: &'static str,
    pub overrides: &'a AttributeOverrides,
}

/// output mode determines how results are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// human-readable text output
    Text,
    /// machine-readable JSON-RPC 2.0 output
    Json,
    /// no output on success (errors still go to stderr)
    Quiet,
}

impl OutputMode {
    /// determine output mode from CLI flags and environment
    ///
    /// priority: quiet > json > no_json > auto-detect
    pub fn from_flags(json: bool, no_json: bool, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        if json {
            return Self::Json;
        }
        if no_json {
            return Self::Text;
        }
        // auto-detect: JSON when stdout is not a TTY (piped)
        if !std::io::stdout().is_terminal() {
            Self::Json
        } else {
            Self::Text
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self, Self::Quiet)
    }
}

#[derive(Serialize)]
struct JsonRpcResponse<'a, T: Serialize> {
    jsonrpc: &'static str,
    result: &'a T,
    id: Option<()>,
}

#[derive(Serialize)]
struct JsonRpcError {
    jsonrpc: &'static str,
    error: JsonRpcErrorBody,
    id: Option<()>,
}

#[derive(Serialize)]
struct JsonRpcErrorBody {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    problems: Vec<String>,
}

/// print a JSON-RPC result to stdout
pub fn print_json<T: Serialize>(data: &T) {
    let response = JsonRpcResponse {
        jsonrpc: JSONRPC_VERSION,
        result: data,
        id: None,
    };
    if let Ok(json) = serde_json::to_string(&response) {
        println!("{}", json);
    }
}

/// print a JSON-RPC error to stdout
pub fn print_json_error(code: i32, message: &str) {
    print_json_error_with_problems(code, message, Vec::new());
}

/// print a JSON-RPC error carrying a problem list
pub fn print_json_error_with_problems(code: i32, message: &str, problems: Vec<String>) {
    let error = JsonRpcError {
        jsonrpc: JSONRPC_VERSION,
        error: JsonRpcErrorBody {
            // JSON-RPC application error space
            code: -32000 - code,
            message: message.to_string(),
            problems,
        },
        id: None,
    };
    if let Ok(json) = serde_json::to_string(&error) {
        println!("{}", json);
    }
}
