//! Brainfuck program loading
//!
//! This module turns raw source text into an executable [`program::Program`]:
//! - [`opcode`]: the eight-symbol instruction alphabet
//! - [`program`]: source filtering, bracket matching, and the loaded program
//!
//! # Loading Pipeline
//!
//! ```text
//! source text → filter to opcodes → match brackets → Program + JumpTable
//! ```
//!
//! Filtering never fails: any character outside the alphabet is a comment and
//! is silently dropped. The only load-time error is an unbalanced bracket,
//! reported as [`program::LoadError::UnbalancedBrackets`] with the index of
//! the offending bracket in the filtered instruction sequence.

pub mod opcode;
pub mod program;
