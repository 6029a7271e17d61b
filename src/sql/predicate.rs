//! # WHERE Predicate
//!
//! A WHERE clause holds exactly one condition: no AND/OR, no parentheses.
//! Two shapes are recognized:
//!
//! ```text
//! <col> IS [NOT] NULL
//! <col> <op> <literal>      op ∈ { = != <> < > <= >= }
//! ```
//!
//! ## Parse Order
//!
//! Null forms are scanned first (`IS NOT NULL` before its `IS NULL`
//! prefix), then the comparison operators in the order `<=`, `>=`, `!=`,
//! `<>`, `=`, `<`, `>`, so two-character operators come before the single
//! characters they contain. `<>` normalizes to `!=`. The literal loses its
//! quotes only when both ends carry the same quote character.
//!
//! ## Evaluation
//!
//! The condition is evaluated per row against the column's declared type:
//! numeric ordering for INT/FLOAT, ASCII-case-insensitive lexicographic
//! ordering for TEXT, `false < true` for BOOL. A column missing from the
//! schema makes the predicate false, as does comparing against a NULL cell.

use std::cmp::Ordering;

use crate::schema::{Row, Table};
use crate::sql::util::{find_ci, unquote};
use crate::types::{DataType, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Test {
    /// `IS NULL` (`expect_null`) or `IS NOT NULL` (`!expect_null`).
    IsNull { expect_null: bool },
    Compare { op: CompareOp, literal: String },
}

/// One parsed WHERE condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub test: Test,
}

/// Operators in scan order; two-character forms first so `<` never
/// shadows `<=`.
const OPERATORS: [(&str, CompareOp); 7] = [
    ("<=", CompareOp::Le),
    (">=", CompareOp::Ge),
    ("!=", CompareOp::Ne),
    ("<>", CompareOp::Ne),
    ("=", CompareOp::Eq),
    ("<", CompareOp::Lt),
    (">", CompareOp::Gt),
];

/// Parses a WHERE clause body. `None` means the clause is not a
/// recognizable condition; callers then filter nothing.
pub fn parse_condition(input: &str) -> Option<Condition> {
    let input = input.trim();

    if let Some(idx) = find_ci(input, " IS NOT NULL") {
        return Some(Condition {
            column: input[..idx].trim().to_string(),
            test: Test::IsNull { expect_null: false },
        });
    }
    if let Some(idx) = find_ci(input, " IS NULL") {
        return Some(Condition {
            column: input[..idx].trim().to_string(),
            test: Test::IsNull { expect_null: true },
        });
    }

    for (symbol, op) in OPERATORS {
        if let Some(idx) = input.find(symbol) {
            let column = input[..idx].trim().to_string();
            let literal = unquote(input[idx + symbol.len()..].trim()).to_string();
            return Some(Condition {
                column,
                test: Test::Compare { op, literal },
            });
        }
    }

    None
}

impl Condition {
    /// Evaluates the condition against one row of `table`.
    pub fn matches(&self, table: &Table, row: &Row) -> bool {
        let Some(ci) = table.column_index(&self.column) else {
            return false;
        };
        let cell = &row.values[ci];

        match &self.test {
            Test::IsNull { expect_null } => cell.is_null() == *expect_null,
            Test::Compare { op, literal } => {
                if cell.is_null() {
                    return false;
                }
                let ordering = compare(cell, literal, table.columns()[ci].data_type());
                match op {
                    CompareOp::Eq => ordering == Ordering::Equal,
                    CompareOp::Ne => ordering != Ordering::Equal,
                    CompareOp::Lt => ordering == Ordering::Less,
                    CompareOp::Gt => ordering == Ordering::Greater,
                    CompareOp::Le => ordering != Ordering::Greater,
                    CompareOp::Ge => ordering != Ordering::Less,
                }
            }
        }
    }
}

/// Orders a stored cell against a textual literal parsed as the column's
/// type.
fn compare(cell: &Value, literal: &str, ty: DataType) -> Ordering {
    match (cell, Value::parse(literal, ty)) {
        (Value::Int(a), Value::Int(b)) => a.cmp(&b),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(&b),
        (Value::Text(a), Value::Text(b)) => cmp_ascii_ci(a, &b),
        // A cell that disagrees with its column's type never matches (I2
        // makes this unreachable through the public API).
        _ => Ordering::Less,
    }
}

fn cmp_ascii_ci(a: &str, b: &str) -> Ordering {
    let a = a.bytes().map(|c| c.to_ascii_lowercase());
    let b = b.bytes().map(|c| c.to_ascii_lowercase());
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    fn table() -> Table {
        Table::new(
            "t",
            vec![
                Column::new("n", DataType::Int, true, false),
                Column::new("s", DataType::Text, true, false),
                Column::new("f", DataType::Float, true, false),
                Column::new("b", DataType::Bool, true, false),
            ],
        )
    }

    fn row(values: Vec<Value>) -> Row {
        Row {
            values,
            deleted: false,
        }
    }

    fn sample_row() -> Row {
        row(vec![
            Value::Int(5),
            Value::Text("Alice".into()),
            Value::Float(1.5),
            Value::Bool(true),
        ])
    }

    #[test]
    fn parses_null_forms() {
        let c = parse_condition("age IS NULL").unwrap();
        assert_eq!(c.column, "age");
        assert_eq!(c.test, Test::IsNull { expect_null: true });

        let c = parse_condition("age is not null").unwrap();
        assert_eq!(c.test, Test::IsNull { expect_null: false });
    }

    #[test]
    fn parses_operators_longest_first() {
        let c = parse_condition("n <= 3").unwrap();
        assert_eq!(
            c.test,
            Test::Compare {
                op: CompareOp::Le,
                literal: "3".into()
            }
        );

        let c = parse_condition("n<>5").unwrap();
        assert_eq!(c.column, "n");
        assert!(matches!(c.test, Test::Compare { op: CompareOp::Ne, .. }));
    }

    #[test]
    fn strips_matching_quotes_only() {
        let c = parse_condition("s = 'Alice'").unwrap();
        assert_eq!(
            c.test,
            Test::Compare {
                op: CompareOp::Eq,
                literal: "Alice".into()
            }
        );

        let c = parse_condition("s = 'odd\"").unwrap();
        assert!(matches!(
            c.test,
            Test::Compare { ref literal, .. } if literal == "'odd\""
        ));
    }

    #[test]
    fn garbage_clause_fails_to_parse() {
        assert!(parse_condition("just words").is_none());
        assert!(parse_condition("").is_none());
    }

    #[test]
    fn numeric_comparisons() {
        let t = table();
        let r = sample_row();

        assert!(parse_condition("n = 5").unwrap().matches(&t, &r));
        assert!(parse_condition("n > 4").unwrap().matches(&t, &r));
        assert!(parse_condition("n <= 5").unwrap().matches(&t, &r));
        assert!(!parse_condition("n < 5").unwrap().matches(&t, &r));
        assert!(parse_condition("f >= 1.5").unwrap().matches(&t, &r));
        assert!(!parse_condition("f > 1.5").unwrap().matches(&t, &r));
    }

    #[test]
    fn ne_and_angle_ne_agree() {
        let t = table();
        let r = sample_row();

        for probe in ["n != 5", "n <> 5"] {
            assert!(!parse_condition(probe).unwrap().matches(&t, &r));
        }
        for probe in ["n != 6", "n <> 6"] {
            assert!(parse_condition(probe).unwrap().matches(&t, &r));
        }
    }

    #[test]
    fn text_comparison_is_case_insensitive() {
        let t = table();
        let r = sample_row();

        assert!(parse_condition("s = 'ALICE'").unwrap().matches(&t, &r));
        assert!(parse_condition("s = alice").unwrap().matches(&t, &r));
        assert!(parse_condition("s < 'bob'").unwrap().matches(&t, &r));
    }

    #[test]
    fn bool_orders_false_before_true() {
        let t = table();
        let r = sample_row();

        assert!(parse_condition("b = true").unwrap().matches(&t, &r));
        assert!(parse_condition("b = 1").unwrap().matches(&t, &r));
        assert!(parse_condition("b > false").unwrap().matches(&t, &r));
    }

    #[test]
    fn null_cell_fails_comparisons_but_answers_is_null() {
        let t = table();
        let r = row(vec![Value::Null, Value::Null, Value::Null, Value::Null]);

        assert!(!parse_condition("n = 0").unwrap().matches(&t, &r));
        assert!(!parse_condition("n != 0").unwrap().matches(&t, &r));
        assert!(parse_condition("n IS NULL").unwrap().matches(&t, &r));
        assert!(!parse_condition("n IS NOT NULL").unwrap().matches(&t, &r));
    }

    #[test]
    fn unknown_column_never_matches() {
        let t = table();
        let r = sample_row();

        assert!(!parse_condition("ghost = 5").unwrap().matches(&t, &r));
        assert!(!parse_condition("ghost IS NULL").unwrap().matches(&t, &r));
    }
}
