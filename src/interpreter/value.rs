/// The runtime value type and its conversions.
///
/// Declares `Value`, the numeric view `Number` used by the arithmetic
/// kernels, truthiness and index conversion, and the textual rendering used
/// by the command line.
pub mod core;
/// Conversion from JSON documents.
///
/// Scalars and arrays map onto `Value` variants; `null` and objects have no
/// value representation.
pub mod json;
