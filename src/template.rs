//! Message template parsing
//!
//!     A message template mixes literal text with placeholders in three syntaxes:
//!
//!         {Name}  {@Name}  {$Name}  {0}  {Name:format}     property
//!         {{Name}}  {{.Name}}  {{Name:format}}             go property
//!         ${Name}  ${Name:format}                          builtin property
//!
//!     Data flows in one direction: source text → [lexing] (scanner decides literal vs
//!     placeholder) → [parsing] (reducer builds segments) → [ast] (the immutable tree).
//!     [formats] and [processor] render trees and token streams for tools; [config] and
//!     [testing] support the binary and the test suites.

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod testing;
pub mod token;

pub use parsing::parse_template;
