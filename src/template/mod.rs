//! Svelte template emission
//!
//! This module turns a Document and its ColorTable into component text:
//! a `<script>` block of exported color variables followed by the SVG
//! markup with every fill replaced by a variable reference.

pub mod config;
pub mod lint;
pub mod svelte;

pub use config::{ConfigError, TemplateConfig};
pub use lint::{LintCategory, LintWarning};
pub use svelte::{render, SvelteBuilder};
