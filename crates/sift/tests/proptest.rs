//! Property-based tests for sift using proptest.

use proptest::prelude::*;
use sift::{
    any_of, catalog, codec, like_regex, Column, ColumnExpression, ColumnType, Data, Dialect,
    FilterEnum, FilterRange, Predicate, Scalar, SqlParams, Truth,
};

// ============================================================================
// Test helpers
// ============================================================================

fn int_accessor(n: &Option<i64>, _column: &str) -> Scalar {
    n.map_or(Scalar::Null, Scalar::Integer)
}

fn truth_strategy() -> impl Strategy<Value = Truth> {
    prop_oneof![Just(Truth::True), Just(Truth::False), Just(Truth::Unknown)]
}

fn finite_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Color {
    Red,
    Green,
    Blue,
}

impl FilterEnum for Color {
    fn variants() -> &'static [Self] {
        &[Color::Red, Color::Green, Color::Blue]
    }

    fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }
}

fn color() -> impl Strategy<Value = Color> {
    prop::sample::select(Color::variants().to_vec())
}

/// Input mappings built from a fixed set of keys, some of which no binding
/// under `name` reads.
fn loose_input(name: &'static str) -> impl Strategy<Value = Data> {
    let keys = vec![
        name.to_string(),
        format!("{}[0]", name),
        format!("{}[1]", name),
        format!("{}[x]", name),
        format!("{}.from", name),
        format!("{}.to", name),
        format!("{}.min", name),
    ];
    prop::collection::btree_map(prop::sample::select(keys), "[0-9 ]{0,3}", 0..5)
}

// ============================================================================
// Round-trip laws
// ============================================================================

proptest! {
    /// bind(unbind(v)) == v for integer equality.
    #[test]
    fn number_round_trip(v in any::<i64>()) {
        let field = catalog::number_equals(ColumnType::<i64, i64>::required());
        let echoed = field.unbind("n", &v);
        prop_assert_eq!(field.bind("n", &echoed), Ok(v));
    }

    /// bind(unbind(v)) == v for finite decimals.
    #[test]
    fn decimal_round_trip(v in finite_f64()) {
        let field = catalog::decimal_equals(ColumnType::<Option<f64>, f64>::nullable());
        let echoed = field.unbind("price", &v);
        prop_assert_eq!(field.bind("price", &echoed), Ok(v));
    }

    /// Text survives a round trip untouched, whitespace and wildcards included.
    #[test]
    fn text_round_trip(v in ".*") {
        let field = catalog::text_contains(ColumnType::<String, String>::required());
        let echoed = field.unbind("q", &v);
        prop_assert_eq!(field.bind("q", &echoed), Ok(v));
    }

    /// Sequences round-trip in order, including the empty sequence.
    #[test]
    fn sequence_round_trip(v in prop::collection::vec(any::<u32>(), 0..12)) {
        let field = catalog::one_of(codec::number::<u32>(), ColumnType::<u32, u32>::required());
        let echoed = field.unbind("ids", &v);
        prop_assert_eq!(echoed.len(), v.len());
        prop_assert_eq!(field.bind("ids", &echoed), Ok(v));
    }

    /// Ranges round-trip for every presence combination.
    #[test]
    fn range_round_trip(from in any::<Option<i32>>(), to in any::<Option<i32>>()) {
        let field = catalog::range(codec::number::<i32>(), ColumnType::<Option<i32>, i32>::nullable());
        let range = FilterRange::new(from, to);
        let echoed = field.unbind("r", &range);
        prop_assert_eq!(field.bind("r", &echoed), Ok(range));
    }

    /// Optional fields round-trip both `None` and `Some`.
    #[test]
    fn optional_round_trip(v in any::<Option<bool>>()) {
        let field = catalog::boolean_equals(ColumnType::<bool, bool>::required()).optional();
        let echoed = field.unbind("flag", &v);
        prop_assert_eq!(field.bind("flag", &echoed), Ok(v));
    }

    /// Exact text keeps every character, whitespace included.
    #[test]
    fn text_equals_round_trip(v in ".*") {
        let field = catalog::text_equals(ColumnType::<Option<String>, String>::nullable());
        let echoed = field.unbind("name", &v);
        prop_assert_eq!(field.bind("name", &echoed), Ok(v));
    }

    /// Each substring in the list survives, in order.
    #[test]
    fn text_contains_any_round_trip(v in prop::collection::vec(".*", 0..6)) {
        let field = catalog::text_contains_any(ColumnType::<String, String>::required());
        let echoed = field.unbind("q", &v);
        prop_assert_eq!(field.bind("q", &echoed), Ok(v));
    }

    /// Enums round-trip through their variant names.
    #[test]
    fn enum_equals_round_trip(v in color()) {
        let field = catalog::enum_equals(ColumnType::<Color, Color>::enumeration());
        let echoed = field.unbind("color", &v);
        prop_assert_eq!(echoed.get("color").map(String::as_str), Some(v.name()));
        prop_assert_eq!(field.bind("color", &echoed), Ok(v));
    }

    /// Enum lists round-trip, duplicates included.
    #[test]
    fn enum_one_of_round_trip(v in prop::collection::vec(color(), 0..6)) {
        let field = catalog::enum_one_of(ColumnType::<Option<Color>, Color>::nullable_enumeration());
        let echoed = field.unbind("color", &v);
        prop_assert_eq!(field.bind("color", &echoed), Ok(v));
    }

    /// Whatever an optional sequence binds, its echo binds back to the same
    /// value.
    #[test]
    fn optional_sequence_echo_is_stable(input in loose_input("ids")) {
        let field = catalog::one_of(codec::number::<u32>(), ColumnType::<u32, u32>::required()).optional();
        if let Ok(v) = field.bind("ids", &input) {
            prop_assert!(v.as_ref().map_or(true, |ids| !ids.is_empty()));
            let echoed = field.unbind("ids", &v);
            prop_assert_eq!(field.bind("ids", &echoed), Ok(v));
        }
    }

    /// Whatever an optional range binds, its echo binds back to the same value.
    #[test]
    fn optional_range_echo_is_stable(input in loose_input("age")) {
        let field = catalog::range(codec::number::<i64>(), ColumnType::<i64, i64>::required()).optional();
        if let Ok(v) = field.bind("age", &input) {
            prop_assert!(v.as_ref().map_or(true, |r| !r.is_unbounded()));
            let echoed = field.unbind("age", &v);
            prop_assert_eq!(field.bind("age", &echoed), Ok(v));
        }
    }

    /// An optional scalar only looks at its own key.
    #[test]
    fn optional_scalar_echo_is_stable(input in loose_input("q")) {
        let field = catalog::text_contains(ColumnType::<String, String>::required()).optional();
        let v = field.bind("q", &input);
        prop_assert!(v.is_ok());
        if let Ok(v) = v {
            let echoed = field.unbind("q", &v);
            prop_assert_eq!(field.bind("q", &echoed), Ok(v));
        }
    }
}

// ============================================================================
// Placeholder law
// ============================================================================

proptest! {
    /// The placeholder never binds and never echoes, whatever the input.
    #[test]
    fn placeholder_never_binds(
        entries in prop::collection::btree_map("[a-z.\\[\\]0-9]{1,8}", ".*", 0..8),
        v in any::<i64>(),
    ) {
        let field = catalog::ignored::<i64, i64>();
        let data: Data = entries;
        prop_assert_eq!(field.bind("x", &data), Err(vec![]));
        prop_assert!(field.unbind("x", &v).is_empty());
    }

    /// Malformed input never panics; it is reported as errors.
    #[test]
    fn malformed_input_is_reported(raw in ".*") {
        let field = catalog::range(codec::number::<i64>(), ColumnType::<i64, i64>::required());
        let data = sift::data([("r.from", raw.clone())]);
        match field.bind("r", &data) {
            Ok(range) => prop_assert_eq!(range.from, raw.trim().parse::<i64>().ok()),
            Err(errors) => {
                prop_assert_eq!(errors.len(), 1);
                prop_assert_eq!(errors[0].key.as_str(), "r.from");
            }
        }
    }
}

// ============================================================================
// Predicate semantics
// ============================================================================

proptest! {
    /// A range keeps exactly the non-null values between its bounds.
    #[test]
    fn range_selects_between_bounds(
        values in prop::collection::vec(any::<Option<i64>>(), 0..50),
        from in any::<Option<i64>>(),
        to in any::<Option<i64>>(),
    ) {
        let field = catalog::range(codec::number::<i64>(), ColumnType::<Option<i64>, i64>::nullable());
        let p = field.filter_on_column(&Column::<Option<i64>>::new("n"), &FilterRange::new(from, to));

        let expected = values
            .iter()
            .filter(|v| match (v, from, to) {
                (None, None, None) => true,
                (None, _, _) => false,
                (Some(v), from, to) => from.map_or(true, |f| *v >= f) && to.map_or(true, |t| *v <= t),
            })
            .count();
        prop_assert_eq!(p.count(&values, int_accessor).unwrap(), expected);
    }

    /// Membership keeps exactly the values in the candidate list; an empty
    /// list keeps everything.
    #[test]
    fn membership_selects_candidates(
        values in prop::collection::vec(-5i64..5, 0..30),
        candidates in prop::collection::vec(-5i64..5, 0..4),
    ) {
        let col: Column<i64> = Column::new("n");
        let p = any_of(&candidates, |c| col.equals(Scalar::Integer(*c)));
        let rows: Vec<Option<i64>> = values.iter().copied().map(Some).collect();

        let expected = values
            .iter()
            .filter(|v| candidates.is_empty() || candidates.contains(v))
            .count();
        prop_assert_eq!(p.count(&rows, int_accessor).unwrap(), expected);
    }

    /// Filtering never returns more rows than it was given.
    #[test]
    fn filter_never_grows(
        values in prop::collection::vec(any::<Option<i64>>(), 0..50),
        bound in any::<i64>(),
    ) {
        let col: Column<Option<i64>> = Column::new("n");
        let p = col.greater_or_equal(Scalar::Integer(bound));
        prop_assert!(p.filter(&values, int_accessor).unwrap().len() <= values.len());
    }

    /// Null rows are never selected by a comparison or by its negation.
    #[test]
    fn null_rows_are_never_selected(bound in any::<i64>()) {
        let col: Column<Option<i64>> = Column::new("n");
        let p = col.less_or_equal(Scalar::Integer(bound));
        prop_assert_eq!(p.evaluate(&None, int_accessor).unwrap(), Truth::Unknown);
        prop_assert!(!p.matches(&None, int_accessor).unwrap());
        prop_assert!(!p.clone().not().matches(&None, int_accessor).unwrap());
    }

    /// Escaped text only ever matches itself as a substring.
    #[test]
    fn escaped_pattern_matches_literal_substring(
        needle in "[a-z%_\\\\]{1,6}",
        haystack in "[a-z%_\\\\]{0,12}",
    ) {
        let re = like_regex(&sift::contains_pattern(&needle)).unwrap();
        prop_assert_eq!(re.is_match(&haystack), haystack.contains(&needle));
    }
}

// ============================================================================
// Three-valued logic
// ============================================================================

proptest! {
    /// De Morgan holds under Kleene logic.
    #[test]
    fn de_morgan(a in truth_strategy(), b in truth_strategy()) {
        prop_assert_eq!(a.and(b).not(), a.not().or(b.not()));
        prop_assert_eq!(a.or(b).not(), a.not().and(b.not()));
    }

    /// Literal folding agrees with evaluation.
    #[test]
    fn folding_preserves_meaning(v in any::<Option<i64>>(), bound in any::<i64>(), lit in any::<bool>()) {
        let col: Column<Option<i64>> = Column::new("n");
        let cmp = col.equals(Scalar::Integer(bound));
        let folded = cmp.clone().and(Predicate::Literal(lit));
        let unfolded = Predicate::And(vec![cmp, Predicate::Literal(lit)]);
        prop_assert_eq!(
            folded.evaluate(&v, int_accessor).unwrap(),
            unfolded.evaluate(&v, int_accessor).unwrap()
        );
    }
}

// ============================================================================
// SQL rendering
// ============================================================================

proptest! {
    /// Every placeholder has exactly one parameter.
    #[test]
    fn placeholders_match_params(
        candidates in prop::collection::vec(any::<i64>(), 0..8),
        from in any::<Option<i64>>(),
    ) {
        let col: Column<i64> = Column::new("n");
        let p = any_of(&candidates, |c| col.equals(Scalar::Integer(*c)))
            .and(sift::range_predicate::<i64>(&col, FilterRange::new(from.map(Scalar::Integer), None)));

        let mut params = SqlParams::new();
        let sql = p.to_sql(Dialect::Sqlite, &mut params);
        prop_assert_eq!(sql.matches('?').count(), params.len());

        let mut params = SqlParams::new();
        let sql = p.to_sql(Dialect::Postgres, &mut params);
        for i in 1..=params.len() {
            let placeholder = format!("${}", i);
            prop_assert!(sql.contains(&placeholder));
        }
    }
}
