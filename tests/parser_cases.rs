//! Table-driven parser tests: precedence, statement shapes and error kinds

use rad_syntax::rad::ast::{Expression, ExpressionKind, Fixity, UnaryOp};
use rad_syntax::rad::formats::ToRadSource;
use rad_syntax::rad::parser::parse_expression;
use rad_syntax::{parse_source, ParseError};
use rstest::rstest;

/// Renders an expression with every operator application in parentheses
fn grouped(expression: &Expression) -> String {
    match &expression.kind {
        ExpressionKind::Binary { op, left, right } => {
            format!("({} {} {})", grouped(left), op, grouped(right))
        }
        ExpressionKind::Unary {
            op: UnaryOp::Not,
            operand,
            ..
        } => format!("(not {})", grouped(operand)),
        ExpressionKind::Unary {
            op,
            fixity: Fixity::Prefix,
            operand,
        } => format!("({}{})", op, grouped(operand)),
        ExpressionKind::Unary {
            op,
            fixity: Fixity::Postfix,
            operand,
        } => format!("({}{})", grouped(operand), op),
        ExpressionKind::Ternary {
            condition,
            then_branch,
            else_branch,
        } => format!(
            "({} ? {} : {})",
            grouped(condition),
            grouped(then_branch),
            grouped(else_branch)
        ),
        ExpressionKind::Parenthesized(inner) => grouped(inner),
        _ => expression.to_rad_source(),
    }
}

#[rstest]
#[case::multiplicative_over_additive("a + b * c", "(a + (b * c))")]
#[case::left_associative_subtraction("a - b - c", "((a - b) - c)")]
#[case::left_associative_modulo("a / b % c", "((a / b) % c)")]
#[case::and_over_or("a or b and c", "(a or (b and c))")]
#[case::two_conjunctions("a and b or c and d", "((a and b) or (c and d))")]
#[case::coalesce_under_comparison("a == b ?? c", "(a == (b ?? c))")]
#[case::coalesce_over_additive("a ?? b + c", "(a ?? (b + c))")]
#[case::coalesce_chain("a ?? b ?? c", "((a ?? b) ?? c)")]
#[case::comparison_chain("a < b == c", "((a < b) == c)")]
#[case::membership_over_multiplicative("a * b in c", "(a * (b in c))")]
#[case::membership_chain("a in b not in c", "((a in b) not in c)")]
#[case::prefix_not_over_membership("not a in b", "((not a) in b)")]
#[case::prefix_not_over_and("not a and b", "((not a) and b)")]
#[case::negation_over_multiplicative("-a * b", "((-a) * b)")]
#[case::postfix_over_negation("-x++", "(-(x++))")]
#[case::postfix_on_attribute("x.y++", "(x.y++)")]
#[case::nested_ternary_in_else("a ? b : c ? d : e", "(a ? b : (c ? d : e))")]
#[case::ternary_over_or("a or b ? c : d", "((a or b) ? c : d)")]
#[case::parentheses_regroup("(a + b) * c", "((a + b) * c)")]
#[case::postfix_chain("f(x).y[0]", "f(x).y[0]")]
fn test_expression_grouping(#[case] source: &str, #[case] expected: &str) {
    let expression = parse_expression(source).unwrap();
    assert_eq!(grouped(&expression), expected);
}

#[rstest]
#[case::assignment("x = 1\n", "Assignment")]
#[case::compound_assignment("x += 1\n", "Assignment")]
#[case::call("print(x)\n", "ExpressionStatement")]
#[case::bare_increment("i++\n", "ExpressionStatement")]
#[case::return_without_value("return\n", "Return")]
#[case::yield_values("yield a, b\n", "Yield")]
#[case::delete("del m[\"k\"]\n", "Delete")]
#[case::pass("pass\n", "Pass")]
#[case::if_statement("if a:\n    pass\n", "If")]
#[case::for_pair("for k, v in m:\n    pass\n", "For")]
#[case::while_loop("while a:\n    pass\n", "While")]
#[case::function("fn f():\n    pass\n", "FunctionDefinition")]
#[case::anonymous_function_statement("fn(x) x\n", "ExpressionStatement")]
#[case::args("args:\n    a int\n", "ArgsBlock")]
#[case::switch("switch x:\n    default -> 1\n", "Switch")]
#[case::defer("defer:\n    pass\n", "Defer")]
#[case::errdefer("errdefer:\n    pass\n", "ErrorDefer")]
#[case::rad("rad url:\n    fields a\n", "RadBlock")]
#[case::request("request url:\n    fields a\n", "RequestBlock")]
#[case::display("display:\n    fields a\n", "DisplayBlock")]
#[case::soft_keyword_assignment("fields = 1\n", "Assignment")]
#[case::soft_keyword_call("filter(xs)\n", "ExpressionStatement")]
fn test_statement_dispatch(#[case] source: &str, #[case] node_type: &str) {
    use rad_syntax::rad::testing::assert_ast;

    let file = parse_source(source).unwrap();
    assert_ast(&file).statement_count(1).statement(0, |s| {
        s.node_type(node_type);
    });
}

#[rstest]
#[case::inconsistent_dedent("if a:\n    if b:\n        pass\n  x = 1\n")]
#[case::mixed_tabs_and_spaces("if a:\n \tpass\n")]
#[case::unexpected_indent("x = 1\n    y = 2\n")]
fn test_indentation_errors(#[case] source: &str) {
    let err = parse_source(source).unwrap_err();
    assert!(err.is_indentation(), "expected indentation error, got {err}");
}

#[rstest]
#[case::unterminated_string("s = \"abc\n")]
#[case::invalid_escape("s = \"\\q\"\n")]
#[case::unclosed_bracket("x = [1, 2\n")]
#[case::unbalanced_interpolation("s = \"{a\"\n")]
#[case::illegal_character("x = 1 $ 2\n")]
fn test_lex_errors(#[case] source: &str) {
    let err = parse_source(source).unwrap_err();
    assert!(err.is_lex(), "expected lex error, got {err}");
}

#[rstest]
#[case::assign_to_literal("1 = x\n", "cannot assign to")]
#[case::missing_colon("while x\n    pass\n", "expected `:`")]
#[case::missing_block("fn f():\nx = 1\n", "expected an indented block")]
#[case::keyword_then_positional("f(k=1, 2)\n", "positional argument follows keyword argument")]
#[case::unknown_type("args:\n    a text\n", "unknown type 'text'")]
#[case::invalid_for_pattern("for 1 in xs:\n    pass\n", "invalid loop pattern")]
#[case::else_without_if("else:\n    pass\n", "found `else`")]
#[case::missing_ternary_colon("x = a ? b\n", "expected `:`")]
#[case::empty_switch_clause("switch x:\n    pass\n", "expected `case` or `default`")]
fn test_syntax_errors(#[case] source: &str, #[case] fragment: &str) {
    let err = parse_source(source).unwrap_err();
    assert!(
        matches!(err, ParseError::Syntax { .. }),
        "expected syntax error, got {err}"
    );
    assert!(
        err.to_string().contains(fragment),
        "`{err}` does not mention `{fragment}`"
    );
}
