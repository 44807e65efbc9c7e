//! Parser and preprocessor behavior over the pseudocode dialect.

use bigo::{parse_program, AnalyzeError};

#[test]
fn keywords_are_case_insensitive() {
    let src = "\
procedure Foo(n)
begin
    return n
end
";
    let program = parse_program(src).expect("parse");
    assert!(program.procedure_map.contains_key("Foo"));
}

#[test]
fn identifiers_are_case_sensitive() {
    let src = "\
PROCEDURE Foo(n)
BEGIN
    RETURN n
END

PROCEDURE foo(n)
BEGIN
    RETURN n
END
";
    let program = parse_program(src).expect("parse");
    assert!(program.procedure_map.contains_key("Foo"));
    assert!(program.procedure_map.contains_key("foo"));
}

#[test]
fn arrow_glyphs_and_comments_are_normalized() {
    let src = "\
PROCEDURE F(n) ► the procedure header
BEGIN
    x ← n ► unicode arrow
    y 🡨 x
    RETURN y
END
";
    let program = parse_program(src).expect("parse");
    assert_eq!(program.root_procedures.len(), 1);
}

#[test]
fn walrus_assignment_and_semicolons_are_accepted() {
    let src = "\
PROCEDURE G(n)
BEGIN
    x := n;
    x <- x + 1;
    RETURN x;
END
";
    assert!(parse_program(src).is_ok());
}

#[test]
fn for_loops_take_an_optional_step() {
    let src = "\
PROCEDURE Countdown(n)
BEGIN
    FOR i <- n TO 1 STEP -1 DO
        CALL print(i)
    END
END
";
    assert!(parse_program(src).is_ok());
}

#[test]
fn repeat_until_parses() {
    let src = "\
PROCEDURE R(n)
BEGIN
    i <- 0
    REPEAT
        i <- i + 1
    UNTIL i >= n
END
";
    assert!(parse_program(src).is_ok());
}

#[test]
fn unmatched_begin_is_a_syntax_error() {
    let src = "\
PROCEDURE X(n)
BEGIN
    RETURN n
";
    let errors = parse_program(src).unwrap_err();
    assert!(matches!(errors[0].error, AnalyzeError::Syntax(_)));
}

#[test]
fn keywords_tolerate_extra_whitespace_before_identifiers() {
    let src = "\
PROCEDURE   Spaced(n)
BEGIN
    RETURN   n
END
";
    let program = parse_program(src).expect("parse");
    assert!(program.procedure_map.contains_key("Spaced"));
}

#[test]
fn malformed_input_is_a_syntax_error() {
    let src = "PROCEDURE Broken(n BEGIN END";
    let errors = parse_program(src).unwrap_err();
    assert!(matches!(errors[0].error, AnalyzeError::Syntax(_)));
    assert!(errors[0].error.to_string().starts_with("Syntax error"));
}

#[test]
fn input_without_procedures_is_rejected() {
    let errors = parse_program("x <- 1").unwrap_err();
    assert!(matches!(errors[0].error, AnalyzeError::Syntax(_)));
}

#[test]
fn duplicate_procedure_names_are_rejected() {
    let src = "\
PROCEDURE Twice(n)
BEGIN
    RETURN n
END

PROCEDURE Twice(n)
BEGIN
    RETURN n
END
";
    let errors = parse_program(src).unwrap_err();
    assert!(matches!(
        errors[0].error,
        AnalyzeError::DuplicateProcedure(_)
    ));
}

#[test]
fn keywords_do_not_swallow_identifier_prefixes() {
    // `forward` starts with `for` and `dot` starts with `do`; both must
    // parse as plain identifiers.
    let src = "\
PROCEDURE H(n)
BEGIN
    forward <- n
    dot <- forward + 1
    RETURN dot
END
";
    assert!(parse_program(src).is_ok());
}

#[test]
fn array_accesses_nest() {
    let src = "\
PROCEDURE M(A, n)
BEGIN
    A[1][2] <- A[A[n][1]][2]
    RETURN A[1][1]
END
";
    assert!(parse_program(src).is_ok());
}
