//! Chain Patcher: one-shot collapse of line-wrapped security matcher chains
//!
//! A maintenance tool for the SkillBridge backend. An editor reflow left two
//! `.requestMatchers(...)` authorization chains in `SecurityConfig.java`
//! split across lines mid-chain; this tool joins them back onto single lines
//! and rewrites the file in place.
//!
//! # Architecture
//!
//! All rewriting compiles down to a single primitive: [`RewriteRule`], a
//! compiled regular expression paired with a literal replacement, applied
//! once to the full file text. Intelligence lives in the patterns, not in
//! the application logic. The file driver ([`patch_file`]) runs the built-in
//! rules in order and persists the result.
//!
//! # Safety
//!
//! - Atomic file writes (tempfile + fsync + rename)
//! - UTF-8 validation before any rewrite
//! - Idempotent: once the chains are on single lines the patterns no longer
//!   match, and a second run leaves the file untouched
//!
//! # Example
//!
//! ```no_run
//! use chain_patcher::{patch_file, TARGET_FILE};
//!
//! match patch_file(TARGET_FILE) {
//!     Ok(outcome) => println!("{outcome:?}"),
//!     Err(e) => eprintln!("patch failed: {e}"),
//! }
//! ```

pub mod patcher;
pub mod rewrite;
pub mod rules;

// Re-exports
pub use patcher::{patch_file, PatchError, PatchOutcome};
pub use rewrite::{RewriteError, RewriteRule, RuleOutcome};
pub use rules::{builtin_rules, TARGET_FILE};
