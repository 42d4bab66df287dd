#![no_main]

//! Fuzz target for JSON parsing
//!
//! This target tests that arbitrary bytes never cause panics
//! when parsed as JSON for tool arguments.

use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

use gitstandup_mcp::handlers::{AddReposInput, GenerateStandupInput, RemoveReposInput};
use gitstandup_mcp::store::RepoConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _: Result<Value, _> = serde_json::from_str(s);

        // Tool inputs
        let _: Result<GenerateStandupInput, _> = serde_json::from_str(s);
        let _: Result<AddReposInput, _> = serde_json::from_str(s);
        let _: Result<RemoveReposInput, _> = serde_json::from_str(s);

        // Repository list file contents
        let _: Result<RepoConfig, _> = serde_json::from_str(s);

        let _: Result<Map<String, Value>, _> = serde_json::from_str(s);
    }

    let _: Result<Value, _> = serde_json::from_slice(data);
});
