//! JSON test vector loader for rich-text flattening tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub node: serde_json::Value,
    pub expect_text: String,
    #[serde(default)]
    pub excerpts: Vec<ExpectExcerpt>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectExcerpt {
    pub max_len: usize,
    pub expect: Option<String>,
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}"))
        .unwrap_or_else(|e| panic!("read vector {name}: {e}"));
    serde_json::from_str(&s).expect("invalid test vector json")
}
