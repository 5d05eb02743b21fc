#![cfg(feature = "z3")]
#![forbid(unsafe_code)]

use vera_parse::parse_source;
use vera_verify::{verify_exact, verify_interval, VerifyError};

fn check(src: &str) -> Result<bool, VerifyError> {
    let program = parse_source(src).unwrap();
    verify_exact(&program)
}

#[test]
fn straight_line_arithmetic() {
    assert!(check("x = 3\ny = x + 1\nassert(y == 4)").unwrap());
    assert!(!check("x = 3\ny = x + 1\nassert(y == 5)").unwrap());
}

#[test]
fn input_symbols_flow_through_assignments() {
    let src = "x = input()\n\
               y = x + x\n\
               z = y - x\n\
               assert(z == x)";
    assert!(check(src).unwrap());
}

#[test]
fn branch_constraint_makes_the_body_safe() {
    let src = "x = input()\n\
               y = 0\n\
               if (x > 0) { y = x - 1 }\n\
               assert(y >= 0)";
    assert!(check(src).unwrap());
}

#[test]
fn false_branch_produces_the_counterexample() {
    let src = "x = input()\n\
               y = 0\n\
               if (x == 5) { y = 10 }\n\
               assert(y == 10)";
    assert!(!check(src).unwrap());
}

#[test]
fn both_branch_constraints_are_kept_across_sequential_ifs() {
    let src = "x = input()\n\
               y = 0\n\
               if (x > 2) { y = 1 }\n\
               if (x <= 2) { y = 1 }\n\
               assert(y == 1)";
    assert!(check(src).unwrap());
}

#[test]
fn infeasible_path_verifies_vacuously() {
    // x > 7 contradicts x == 3, so the poisoned body lies on no real path.
    let src = "x = 3\n\
               y = 1\n\
               if (x > 7) { y = 0 - 1 }\n\
               assert(y == 1)";
    assert!(check(src).unwrap());
}

#[test]
fn variable_times_variable_is_a_modeling_error() {
    let src = "x = input()\ny = x * x\nassert(y >= 0)";
    assert!(matches!(
        check(src),
        Err(VerifyError::NonlinearMul { .. })
    ));
}

#[test]
fn constant_scaling_is_linear_and_supported() {
    let src = "x = input()\n\
               y = 3 * x - x\n\
               assert(y == x + x)";
    assert!(check(src).unwrap());
}

#[test]
fn unbound_variable_in_the_post_is_unconstrained() {
    assert!(!check("x = 1\nassert(q == 0)").unwrap());
}

#[test]
fn disequality_conditions_and_posts() {
    assert!(check("x = 5\nassert(x != 3)").unwrap());
    assert!(!check("x = input()\nassert(x != 3)").unwrap());
    let src = "x = input()\n\
               y = 0\n\
               if (x != 0) { y = x * x }\n\
               assert(y >= 0)";
    assert!(matches!(
        check(src),
        Err(VerifyError::NonlinearMul { .. })
    ));
}

#[test]
fn var_var_guard_false_branch_is_refuted() {
    // The interval engine accepts this program: `a < b` narrows neither
    // unbounded operand, so its complement enumeration produces no false
    // branch. The exact engine explores the `a >= b` path and refutes it.
    let src = "a = input()\n\
               b = input()\n\
               y = 0\n\
               if (a < b) { y = 1 }\n\
               assert(y == 1)";
    assert!(!check(src).unwrap());
    let program = parse_source(src).unwrap();
    assert!(verify_interval(&program).unwrap());
}

#[test]
fn domains_agree_on_linear_programs() {
    // Programs whose comparisons actually narrow their operands; guards
    // between two unbounded variables diverge (see the test above).
    let programs = [
        ("x = 3\ny = x + 1\nassert(y == 4)", true),
        ("x = 3\ny = x + 1\nassert(y == 5)", false),
        (
            "x = input()\ny = 0\nif (x > 0) { y = x - 1 }\nassert(y >= 0)",
            true,
        ),
        (
            "x = input()\ny = 0\nif (x == 5) { y = 10 }\nassert(y == 10)",
            false,
        ),
        (
            "x = input()\ny = 10\nif (x < 5) { y = 5 - x }\nassert(y >= 1)",
            true,
        ),
        ("x = 1\nassert(q == 0)", false),
    ];
    for (src, expected) in programs {
        let program = parse_source(src).unwrap();
        assert_eq!(verify_exact(&program).unwrap(), expected, "exact: {src}");
        assert_eq!(verify_interval(&program).unwrap(), expected, "interval: {src}");
    }
}
