//! Logic Module - Classification & Explanation Engines
//!
//! ## Layout
//! - `labels/` - Label & severity registry (leaf)
//! - `keywords/` - Weighted keyword tiers and scorer
//! - `components` - Subsystem inference
//! - `model/` - Statistical classifier adapter (ONNX, tokenizer, artifacts)
//! - `explain/` - Key-indicator attribution and narrative templates
//! - `analyzer/` - Hybrid decision engine and batch aggregation

pub mod config;

pub mod labels;
pub mod keywords;
pub mod components;
pub mod model;
pub mod explain;
pub mod analyzer;
