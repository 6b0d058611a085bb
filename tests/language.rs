use std::fs;

use scopeval::{EvalOptions, Value, evaluate};
use walkdir::WalkDir;

const ENGINES: [&str; 2] = ["interpreted", "accelerated"];

/// Every line of `tests/cases/<grammar>/*.txt` is an expression that must be
/// `True` under that grammar, on every engine.
#[test]
fn case_files_hold_on_every_engine() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        let path = entry.path();
        let grammar = path.parent()
                          .and_then(|dir| dir.file_name())
                          .and_then(|name| name.to_str())
                          .unwrap_or_else(|| panic!("No grammar directory for {path:?}"));
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            count += 1;

            for engine in ENGINES {
                let options = EvalOptions::default().with_grammar(grammar).with_engine(engine);
                match evaluate(line, &options) {
                    Ok(Value::Bool(true)) => {},
                    other => panic!("Case {} in {:?} failed on {engine}:\n{}\nResult: {:?}",
                                    i + 1,
                                    path,
                                    line,
                                    other),
                }
            }
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}

fn assert_success(src: &str) {
    for engine in ENGINES {
        let options = EvalOptions::default().with_engine(engine);
        if let Err(e) = evaluate(src, &options) {
            panic!("Expression failed on {engine}: {e}");
        }
    }
}

fn assert_failure(src: &str) {
    for engine in ENGINES {
        let options = EvalOptions::default().with_engine(engine);
        assert!(evaluate(src, &options).is_err(),
                "Expression succeeded on {engine} but was expected to fail");
    }
}

#[test]
fn basic_arithmetic() {
    assert_success("1 + 2");
    assert_success("7 * 9");
    assert_success("8 - 5");
    assert_success("10 / 2");
}

#[test]
fn whitespace_and_line_breaks_are_ignored() {
    assert_success("  1 +\n 2\t* 3 ");
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("1 / 0");
    assert_failure("1 % 0");
}

#[test]
fn unknown_variable_is_error() {
    assert_failure("foo == 1");
}

#[test]
fn assignments_are_errors() {
    assert_failure("x = 1");
    assert_failure("x += 1");
    assert_failure("1; 2");
}

#[test]
fn integer_overflow_is_error() {
    assert_failure("9223372036854775807 + 1");
    assert_failure("2 ** 64");
    assert_failure("99999999999999999999");
}

#[test]
fn array_shape_and_bounds_errors() {
    assert_failure("[1, 2] + [1, 2, 3]");
    assert_failure("[1, 2][2]");
}

#[test]
fn text_results_are_errors() {
    assert_failure("'text'");
    assert_success("'text' == 'text'");
}
