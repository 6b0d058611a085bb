use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// A plain name-to-value mapping, the form every explicit namespace takes.
pub type Bindings = HashMap<String, Value>;

/// The precedence-ordered namespace chain used to resolve free identifiers.
///
/// A `Scope` is built fresh for each evaluation by a `ScopeBuilder` and never
/// changes afterwards. Lookup order, nearest first:
///
/// 1. explicit local bindings,
/// 2. the locals of the selected calling-context frame,
/// 3. explicit global bindings, else the selected frame's globals,
/// 4. the resolver chain, first resolver that knows the name wins.
pub mod core;

/// Keyed-lookup namespaces supplied by the caller.
///
/// The `Resolver` trait is the capability every resolver must have;
/// `Namespace` is what callers hand in before that capability is checked.
pub mod resolver;

/// Explicit calling-context frames.
///
/// Callers push a `Frame` per logical call level onto a `CallStack`; the
/// scope builder selects one by depth instead of inspecting the native stack.
pub mod frame;
