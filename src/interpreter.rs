/// The evaluator module computes the value of expression trees.
///
/// The evaluator walks a parsed tree against the resolved terms of a compiled
/// expression. Its operator kernels are associated functions, so the
/// accelerated engine applies exactly the same semantics row by row.
///
/// # Responsibilities
/// - Evaluates every node kind, including short-circuit logic and indexing.
/// - Broadcasts operators over arrays.
/// - Reports runtime errors such as division by zero or mismatched shapes.
pub mod evaluator;
/// The lexer module tokenizes expression text for further parsing.
///
/// The lexer reads the raw text and produces a stream of tokens, each
/// corresponding to a literal, identifier, keyword, operator or delimiter,
/// paired with its byte offset.
///
/// # Responsibilities
/// - Converts the input into tokens with their source position.
/// - Handles numeric, boolean and quoted text literals.
/// - Reports lexical errors for characters outside the language.
pub mod lexer;
/// The parser module builds the expression tree from tokens.
///
/// Parsing is grammar aware: the same tokens group and mean different things
/// under the extended and strict grammars.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and its scalar and array variants.
/// - Provides numeric views, truthiness and index conversion.
/// - Converts JSON documents into values.
pub mod value;
