use std::{collections::BTreeMap, sync::Arc};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::{
    engine::{
        Engine,
        accelerated::Accelerated,
        interpreted::Interpreted,
    },
    error::{EvalError, RegistryKind},
    interpreter::parser::grammar::Grammar,
};

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::with_defaults);

/// The identifier tables for grammars and engines.
///
/// A registry is filled once, through [`RegistryBuilder`], and only read
/// afterwards, so one instance can be shared by every thread. Lookups fail
/// closed: an unknown identifier is an error, never a fallback to a default.
///
/// # Example
/// ```
/// use scopeval::{ErrorKind, registry::Registry};
///
/// let registry = Registry::global();
/// assert_eq!(registry.grammar("strict").unwrap().name(), "strict");
///
/// let err = registry.engine("numba").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Configuration);
/// assert!(err.to_string().contains("accelerated, interpreted"));
/// ```
#[derive(Debug)]
pub struct Registry {
    grammars: BTreeMap<&'static str, Grammar>,
    engines:  BTreeMap<&'static str, Arc<dyn Engine>>,
}

impl Registry {
    /// A registry holding both grammars and the two built-in engines.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut grammars = BTreeMap::new();
        for grammar in Grammar::ALL {
            grammars.insert(grammar.name(), grammar);
        }

        let mut engines: BTreeMap<&'static str, Arc<dyn Engine>> = BTreeMap::new();
        for engine in [Arc::new(Accelerated::default()) as Arc<dyn Engine>,
                       Arc::new(Interpreted)]
        {
            engines.insert(engine.name(), engine);
        }

        Self { grammars, engines }
    }

    /// The process-wide default registry, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Starts an empty registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Looks up a grammar by identifier.
    ///
    /// # Errors
    /// `EvalError::Configuration` listing the registered grammars.
    pub fn grammar(&self, id: &str) -> Result<Grammar, EvalError> {
        let grammar = self.grammars
                          .get(id)
                          .copied()
                          .ok_or_else(|| unknown(RegistryKind::Grammar, id, self.grammar_ids()))?;
        debug!(grammar = id, "grammar selected");
        Ok(grammar)
    }

    /// Looks up an engine by identifier and checks that it can run.
    ///
    /// # Errors
    /// - `EvalError::Configuration` listing the registered engines.
    /// - `EvalError::DependencyMissing` when the engine's runtime dependency
    ///   is not part of this build.
    pub fn engine(&self, id: &str) -> Result<&dyn Engine, EvalError> {
        let engine = self.engines
                         .get(id)
                         .ok_or_else(|| unknown(RegistryKind::Engine, id, self.engine_ids()))?;

        if let Some(dependency) = engine.dependency()
           && !dependency.available
        {
            return Err(EvalError::DependencyMissing { engine:     id.to_string(),
                                                      dependency: dependency.name.to_string(),
                                                      hint:       dependency.hint.to_string(), });
        }

        debug!(engine = id, "engine selected");
        Ok(engine.as_ref())
    }

    /// Registered grammar identifiers, sorted.
    pub fn grammar_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.grammars.keys().copied()
    }

    /// Registered engine identifiers, sorted.
    pub fn engine_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.engines.keys().copied()
    }
}

fn unknown<'a>(kind: RegistryKind, id: &str, valid: impl Iterator<Item = &'a str>) -> EvalError {
    EvalError::Configuration { kind,
                               name: id.to_string(),
                               valid: valid.map(str::to_string).collect() }
}

/// Fills a [`Registry`], rejecting repeated identifiers.
///
/// # Example
/// ```
/// use scopeval::{
///     engine::interpreted::Interpreted,
///     interpreter::parser::grammar::Grammar,
///     registry::Registry,
/// };
///
/// let registry = Registry::builder().grammar(Grammar::Strict)
///                                   .engine(Interpreted)
///                                   .build()
///                                   .unwrap();
///
/// assert!(registry.grammar("extended").is_err());
/// assert_eq!(registry.engine_ids().collect::<Vec<_>>(), ["interpreted"]);
///
/// let duplicate = Registry::builder().engine(Interpreted).engine(Interpreted).build();
/// assert!(duplicate.is_err());
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    grammars: Vec<Grammar>,
    engines:  Vec<Arc<dyn Engine>>,
}

impl RegistryBuilder {
    /// Adds a grammar.
    #[must_use]
    pub fn grammar(mut self, grammar: Grammar) -> Self {
        self.grammars.push(grammar);
        self
    }

    /// Adds an engine.
    #[must_use]
    pub fn engine(mut self, engine: impl Engine + 'static) -> Self {
        self.engines.push(Arc::new(engine));
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    /// `EvalError::DuplicateIdentifier` for the first identifier registered
    /// twice.
    pub fn build(self) -> Result<Registry, EvalError> {
        let mut grammars = BTreeMap::new();
        for grammar in self.grammars {
            if grammars.insert(grammar.name(), grammar).is_some() {
                return Err(duplicate(RegistryKind::Grammar, grammar.name()));
            }
        }

        let mut engines = BTreeMap::new();
        for engine in self.engines {
            let name = engine.name();
            if engines.insert(name, engine).is_some() {
                return Err(duplicate(RegistryKind::Engine, name));
            }
        }

        Ok(Registry { grammars, engines })
    }
}

fn duplicate(kind: RegistryKind, name: &str) -> EvalError {
    EvalError::DuplicateIdentifier { kind,
                                     name: name.to_string() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ErrorKind,
        compiler::CompiledExpr,
        engine::{Dependency, accelerated::ACCELERATED},
        interpreter::{evaluator::core::EvalResult, value::core::Value},
    };

    struct Unavailable;

    impl Engine for Unavailable {
        fn name(&self) -> &'static str {
            "gpu"
        }

        fn dependency(&self) -> Option<Dependency> {
            Some(Dependency { name:      "cuda",
                              available: false,
                              hint:      "install the toolkit", })
        }

        fn evaluate(&self, _: &CompiledExpr<'_>) -> EvalResult<Value> {
            Ok(Value::Integer(0))
        }
    }

    #[test]
    fn defaults_register_both_grammars_and_engines() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.grammar_ids().collect::<Vec<_>>(), ["extended", "strict"]);
        assert_eq!(registry.engine_ids().collect::<Vec<_>>(), ["accelerated", "interpreted"]);
    }

    #[test]
    fn unknown_grammar_lists_the_valid_ones() {
        let err = Registry::global().grammar("python").unwrap_err();
        assert_eq!(err.to_string(),
                   "Invalid grammar 'python' passed, valid grammars are: extended, strict.");
    }

    #[test]
    fn lookups_are_exact() {
        let registry = Registry::global();
        assert!(registry.grammar("Strict").is_err());
        assert!(registry.engine(" interpreted").is_err());
        assert!(registry.engine("").is_err());
    }

    #[test]
    fn unavailable_dependency_is_reported_before_use() {
        let registry = Registry::builder().engine(Unavailable).build().unwrap();
        let err = registry.engine("gpu").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DependencyMissing);
        assert!(err.to_string().contains("'cuda' not found"));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn accelerated_is_usable_with_rayon() {
        assert_eq!(Registry::global().engine(ACCELERATED).unwrap().name(), ACCELERATED);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn accelerated_needs_rayon() {
        let registry = Registry::global();
        assert_eq!(registry.engine_ids().collect::<Vec<_>>(), ["accelerated", "interpreted"]);

        let err = registry.engine(ACCELERATED).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DependencyMissing);
        assert_eq!(err.to_string(),
                   "'rayon' not found. Cannot use engine 'accelerated' without it (enable the \
                    `parallel` feature).");
        assert!(registry.engine("interpreted").is_ok());
    }

    #[test]
    fn duplicate_grammars_are_rejected() {
        let err = Registry::builder().grammar(Grammar::Extended)
                                     .grammar(Grammar::Extended)
                                     .build()
                                     .map(|_| ())
                                     .unwrap_err();
        assert!(matches!(err, EvalError::DuplicateIdentifier { kind: RegistryKind::Grammar, .. }));
    }
}
