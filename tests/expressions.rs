use std::fs::{self};

use ternac::{
    compile,
    compiler::{evaluator::TraceStep, lexer::Token, value::Value},
    error::{Error, ParseError, RuntimeError},
    run,
};
use walkdir::WalkDir;

#[test]
fn case_files_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "expr"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (line_number, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((source, expected)) = line.rsplit_once("=>") else {
                panic!("Line {} of {path:?} has no '=>': {line}", line_number + 1);
            };
            let expected = expected.trim();

            count += 1;
            let actual = match run(source) {
                Ok(report) => report.value().to_string(),
                Err(e) => error_name(&e).to_string(),
            };
            assert_eq!(actual,
                       expected,
                       "Case {:?} on line {} of {:?}",
                       source,
                       line_number + 1,
                       path);
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}

fn error_name(error: &Error) -> &'static str {
    match error {
        Error::Parse(ParseError::InvalidCharacter { .. }) => "InvalidCharacter",
        Error::Parse(ParseError::AmbiguousExpression { .. }) => "AmbiguousExpression",
        Error::Parse(ParseError::UnexpectedToken { .. }) => "UnexpectedToken",
        Error::Parse(ParseError::MissingOperand { .. }) => "MissingOperand",
        Error::Parse(ParseError::ExpectedClosingParen { .. }) => "ExpectedClosingParen",
        Error::Parse(ParseError::EmptyExpression) => "EmptyExpression",
        Error::Runtime(RuntimeError::MalformedNumber { .. }) => "MalformedNumber",
        Error::Runtime(RuntimeError::DivisionByZero { .. }) => "DivisionByZero",
        Error::Runtime(RuntimeError::LiteralTooLarge { .. }) => "LiteralTooLarge",
        Error::Runtime(RuntimeError::Overflow) => "Overflow",
    }
}

fn assert_value(src: &str, expected: Value) {
    match run(src) {
        Ok(report) => assert_eq!(report.value(), expected, "Expression: {src}"),
        Err(e) => panic!("Expression {src:?} failed: {e}"),
    }
}

fn assert_error(src: &str, expected: &Error) {
    match run(src) {
        Ok(report) => panic!("Expression {src:?} succeeded with {}", report.value()),
        Err(e) => assert_eq!(&e, expected, "Expression: {src}"),
    }
}

fn listing<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn integer_expression_stays_integer() {
    assert_value("2+3*4", Value::Integer(14));
    assert_value("7/2", Value::Integer(3));
    assert_value("-7/2", Value::Integer(-3));
}

#[test]
fn one_float_literal_promotes_the_result() {
    assert_value("2.0+3*4", Value::Real(14.0));
    assert_value("2+3*4.0", Value::Real(14.0));
    assert_value("7.0/2", Value::Real(3.5));

    assert_eq!(run("2.0+3*4").unwrap().value().to_string(), "14.0");
    assert_eq!(run("2+3*4").unwrap().value().to_string(), "14");
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_value("(2+3)*4", Value::Integer(20));
    assert_value("2+3*4", Value::Integer(14));
    assert_value("2*3+4", Value::Integer(10));
}

#[test]
fn same_class_operators_group_to_the_left() {
    assert_value("2-3*4-5", Value::Integer(-15));
    assert_value("1-2*3+4", Value::Integer(-1));
    assert_value("2*-3*4", Value::Integer(-24));
    assert_value("8/-2*2", Value::Integer(-8));

    let compilation = compile("2-3*4-5").unwrap();
    assert_eq!(listing(compilation.program().instructions()),
               ["t[0] = 2",
                "t[1] = 3",
                "t[2] = 4",
                "t[3] = 5",
                "t[4] = t[1] * t[2]",
                "t[5] = t[0] - t[4]",
                "t[6] = t[5] - t[3]",
                "t[7] = t[6]"]);
}

#[test]
fn minus_after_an_operator_is_a_negation() {
    assert_value("1+-2", Value::Integer(-1));
    assert_value("4--2", Value::Integer(6));
    assert_value("1+-2+3", Value::Integer(2));
}

#[test]
fn leading_minus_is_a_negation() {
    assert_value("-3+5", Value::Integer(2));

    let compilation = compile("-3+5").unwrap();
    assert_eq!(listing(compilation.program().instructions()),
               ["t[0] = 3", "t[1] = 5", "t[2] = -t[0]", "t[3] = t[2] + t[1]", "t[4] = t[3]"]);
}

#[test]
fn division_by_zero_is_error() {
    assert_error("5/0", &Error::Runtime(RuntimeError::DivisionByZero { register: 1 }));

    let err = run("5/0").unwrap_err();
    assert_eq!(err.to_string(), "Error 4: Attempted to divide by zero (t[1] is 0).");
}

#[test]
fn malformed_number_is_error() {
    assert_error("3..4+1",
                 &Error::Runtime(RuntimeError::MalformedNumber { literal: "3..4".to_string() }));
}

#[test]
fn invalid_character_is_reported_with_its_position() {
    assert_error("4$2",
                 &Error::Parse(ParseError::InvalidCharacter { character: '$',
                                                              position:  1, }));

    let err = run("4$2").unwrap_err();
    assert!(err.to_string().contains('$'));
}

#[test]
fn chained_same_class_operators_are_ambiguous() {
    assert_error("1++2", &Error::Parse(ParseError::AmbiguousExpression { position: 1 }));
    assert_error("1+2+3", &Error::Parse(ParseError::AmbiguousExpression { position: 1 }));
    assert_error("1+ (2+3)+4", &Error::Parse(ParseError::AmbiguousExpression { position: 1 }));
}

#[test]
fn closing_paren_of_a_nested_group_counts_as_a_chain() {
    // The group is never chained, but the inner `)` is followed by `+`.
    assert_error("1+((2)+3)", &Error::Parse(ParseError::AmbiguousExpression { position: 1 }));
    assert_value("1+(2+(3))", Value::Integer(6));
}

#[test]
fn ambiguity_is_rejected_before_evaluation() {
    // The division by zero is never reached.
    assert_error("1+2+3/0", &Error::Parse(ParseError::AmbiguousExpression { position: 1 }));
}

#[test]
fn syntax_errors_are_reported() {
    assert_error("", &Error::Parse(ParseError::EmptyExpression));
    assert_error("   ", &Error::Parse(ParseError::EmptyExpression));
    assert_error("2+", &Error::Parse(ParseError::MissingOperand { position: 2 }));
    assert_error("()", &Error::Parse(ParseError::MissingOperand { position: 1 }));
    assert_error("(2", &Error::Parse(ParseError::ExpectedClosingParen { position: 0 }));
    assert_error("2 3",
                 &Error::Parse(ParseError::UnexpectedToken { token:    "num".to_string(),
                                                             position: 1, }));
    assert_error(")2",
                 &Error::Parse(ParseError::UnexpectedToken { token:    ")".to_string(),
                                                             position: 0, }));
}

#[test]
fn tokenized_form_replaces_literals() {
    let compilation = compile("(2+3)*4").unwrap();
    let tokenized = compilation.tokenized();

    assert_eq!(tokenized.to_string(), "( num + num ) * num");
    assert_eq!(tokenized.values, ["2", "3", "4"]);
    assert_eq!(tokenized.tokens.iter().filter(|t| **t == Token::Num).count(),
               tokenized.values.len());
}

#[test]
fn program_loads_leaves_then_reduces() {
    let compilation = compile("(2+3)*4").unwrap();
    let program = compilation.program();

    assert_eq!(listing(program.instructions()),
               ["t[0] = 2", "t[1] = 3", "t[2] = 4", "t[3] = t[0] + t[1]", "t[4] = t[3] * t[2]",
                "t[5] = t[4]"]);
    assert_eq!(program.leaf_count(), 3);
    assert_eq!(program.result_register(), Some(5));

    for (index, instruction) in program.instructions().iter().enumerate() {
        assert_eq!(instruction.target(), index);
    }
}

#[test]
fn substitution_trace_shows_conversions() {
    let report = run("2+3*4").unwrap();

    assert_eq!(listing(&report.evaluation.trace),
               ["t[0] = to_int( 2 )",
                "t[1] = to_int( 3 )",
                "t[2] = to_int( 4 )",
                "t[3] = 3 * 4",
                "t[4] = 2 + 12",
                "t[5] = to_int( 14 )"]);

    let report = run("2.0+3*4").unwrap();
    assert_eq!(report.evaluation.trace.first().unwrap().to_string(), "t[0] = to_float( 2.0 )");
    assert!(matches!(report.evaluation.trace.last(), Some(TraceStep::Result { target: 5, .. })));
}

#[test]
fn parse_tree_of_a_single_literal() {
    let compilation = compile("7").unwrap();
    let tree = compilation.tree();

    assert_eq!(tree.len(), 13);
    assert_eq!(tree.height(), 5);
    assert_eq!(tree.to_string(),
               "<E>\n  NULL\n  <T>\n    NULL\n    <U>\n      NULL\n      num\n        NULL\n        \
                7\n        NULL\n      NULL\n    NULL\n  NULL\n");
}

#[test]
fn parse_tree_records_parents() {
    let compilation = compile("2*(3+4)").unwrap();
    let parsed = compilation.parsed();
    let tree = parsed.tree();

    assert_eq!(parsed.leaves().len(), 3);
    assert_eq!(parsed.leaf_text(1), Some("3"));

    for leaf in parsed.leaves() {
        let mut depth = 0;
        let mut current = Some(*leaf);
        while let Some(node) = current {
            current = tree.node(node).parent();
            depth += 1;
        }
        assert!(depth <= tree.height());
        assert!(depth > 1);
    }
}

#[test]
fn every_node_fills_exactly_one_slot() {
    for src in ["7", "2-3*4-5", "-(2+3)*4", "1+(2+(3))", "2*-3*4"] {
        let compilation = compile(src).unwrap();
        let tree = compilation.tree();

        let mut visited = 0;
        let mut pending = vec![tree.root()];
        while let Some(node) = pending.pop() {
            visited += 1;
            for child in tree.node(node).children().into_iter().flatten() {
                assert_eq!(tree.node(child).parent(), Some(node), "Expression: {src}");
                pending.push(child);
            }
        }

        assert_eq!(visited, tree.len(), "Expression: {src}");
    }
}

#[test]
fn runs_are_independent_and_repeatable() {
    for src in ["2+3*4", "2.0+3*4", "-(2+3)*4", "(1+2)*(3+4)"] {
        let first = run(src).unwrap();
        let second = run(src).unwrap();

        assert_eq!(first.compilation, second.compilation, "Expression: {src}");
        assert_eq!(first.evaluation.trace, second.evaluation.trace, "Expression: {src}");
        assert_eq!(first.value(), second.value(), "Expression: {src}");
    }
}
