use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use scopeval::{
    Bindings, EvalError, EvalOptions, Namespace, Registry, Value, evaluate_in,
    interpreter::{
        evaluator::core::{Division, Evaluator},
        parser::{core::parse_source, grammar::Grammar},
    },
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Evaluates an expression against named values, with a selectable grammar
/// and engine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat EXPR as the path of a file holding the expression.
    #[arg(short, long)]
    file: bool,

    /// Grammar identifier.
    #[arg(short, long, default_value = scopeval::DEFAULT_GRAMMAR)]
    grammar: String,

    /// Engine identifier.
    #[arg(short, long, default_value = scopeval::DEFAULT_ENGINE)]
    engine: String,

    /// Divide integers with flooring instead of producing reals.
    #[arg(long)]
    legacy_division: bool,

    /// A local binding; VALUE is itself an expression without names.
    #[arg(short, long = "local", value_name = "NAME=VALUE", value_parser = parse_binding)]
    locals: Vec<(String, Value)>,

    /// A global binding; VALUE is itself an expression without names.
    #[arg(long = "global", value_name = "NAME=VALUE", value_parser = parse_binding)]
    globals: Vec<(String, Value)>,

    /// A JSON document used as a resolver, consulted in the order given.
    #[arg(short, long = "resolver", value_name = "FILE")]
    resolvers: Vec<PathBuf>,

    /// Print the registered grammars and engines, then exit.
    #[arg(long)]
    list: bool,

    #[arg(required_unless_present = "list")]
    expr: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr))
                                  .with(EnvFilter::try_from_env("SCOPEVAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
                                  .init();

    let args = Args::parse();
    let registry = Registry::global();

    if args.list {
        println!("grammars: {}", registry.grammar_ids().collect::<Vec<_>>().join(", "));
        println!("engines:  {}", registry.engine_ids().collect::<Vec<_>>().join(", "));
        return ExitCode::SUCCESS;
    }

    let expr = match read_expression(&args) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    match run(&args, registry, &expr) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// The expression argument, or the contents of the file it names.
fn read_expression(args: &Args) -> Result<String, String> {
    let contents = args.expr.clone().unwrap_or_default();
    if !args.file {
        return Ok(contents);
    }
    fs::read_to_string(&contents).map_err(|e| format!("Failed to read the expression file '{contents}': {e}"))
}

fn run(args: &Args, registry: &Registry, expr: &str) -> Result<Value, EvalError> {
    let locals = args.locals.iter().cloned().collect::<Bindings>();
    let globals = args.globals.iter().cloned().collect::<Bindings>();
    let resolvers = args.resolvers
                        .iter()
                        .map(|path| load_namespace(path))
                        .collect::<Result<Vec<_>, _>>()?;

    let mut options = EvalOptions::default().with_grammar(&args.grammar)
                                            .with_engine(&args.engine)
                                            .with_true_division(!args.legacy_division)
                                            .with_resolvers(&resolvers);
    if !locals.is_empty() {
        options = options.with_locals(&locals);
    }
    if !globals.is_empty() {
        options = options.with_globals(&globals);
    }

    evaluate_in(registry, expr.trim(), &options)
}

/// Reads a JSON document into a namespace.
fn load_namespace(path: &Path) -> Result<Namespace, EvalError> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| EvalError::InvalidBinding { name:    name.clone(),
                                                                              details: e.to_string(), })?;
    let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| EvalError::InvalidBinding { name,
                                                                                  details: e.to_string() })?;
    Namespace::from_json(&json)
}

/// Parses `NAME=VALUE`, evaluating `VALUE` as an expression without names.
fn parse_binding(arg: &str) -> Result<(String, Value), String> {
    let (name, value) = arg.split_once('=')
                           .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;

    let tree = parse_source(value, Grammar::Extended).map_err(|e| e.to_string())?;
    let value = Evaluator::new(&Bindings::new(), Division::True).eval(&tree)
                                                                .map_err(|e| e.to_string())?;
    Ok((name.trim().to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_expression_files_are_read_errors() {
        let args = Args::parse_from(["scopeval", "-f", "/nonexistent/expr.txt"]);
        let err = read_expression(&args).unwrap_err();

        assert!(err.starts_with("Failed to read the expression file '/nonexistent/expr.txt'"));
        assert!(!err.contains("binding"));
    }

    #[test]
    fn inline_expressions_pass_through() {
        let args = Args::parse_from(["scopeval", "1 + 2"]);
        assert_eq!(read_expression(&args).unwrap(), "1 + 2");
    }

    #[test]
    fn bindings_are_evaluated_without_names() {
        assert_eq!(parse_binding("a=[1, 2]").unwrap(),
                   ("a".to_string(), Value::from(vec![Value::Integer(1), Value::Integer(2)])));
        assert!(parse_binding("a").is_err());
        assert!(parse_binding("a=b").is_err());
    }
}
