// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! End-to-end query evaluation over in-memory tables.

use std::sync::Arc;

use tabulon_core::{
	ColumnData, ColumnDef, MemTable, TableChunk, TableSchema, TableSource,
	expression::{
		BinaryNode, BinaryOp, CallNode, DataTableNode, FilterNode, FunctionSymbol, JoinKind,
		JoinNode, LiteralNode, NameNode, NamedNode, PipeNode, ProjectNode, SummarizeNode,
		SyntaxNode, TypeSymbol,
	},
};
use tabulon_engine::{QueryContext, QueryResult};
use tabulon_type::{Error, Fragment, Type, Value};

fn init_tracing() {
	use tracing_subscriber::EnvFilter;
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}

fn frag() -> Fragment {
	Fragment::none()
}

fn lit(value: Value) -> SyntaxNode {
	SyntaxNode::Literal(LiteralNode { value, fragment: frag() })
}

fn col(name: &str, kind: Type) -> SyntaxNode {
	SyntaxNode::Name(NameNode {
		name: name.to_string(),
		result: TypeSymbol::from_kind(kind),
		fragment: frag(),
	})
}

fn tbl(name: &str, schema: &Arc<TableSchema>) -> SyntaxNode {
	SyntaxNode::Name(NameNode {
		name: name.to_string(),
		result: TypeSymbol::Tabular(schema.clone()),
		fragment: frag(),
	})
}

fn binary(op: BinaryOp, left: SyntaxNode, right: SyntaxNode) -> SyntaxNode {
	SyntaxNode::Binary(BinaryNode {
		op,
		left: Box::new(left),
		right: Box::new(right),
		fragment: frag(),
	})
}

fn call(symbol: FunctionSymbol, args: Vec<SyntaxNode>, result: TypeSymbol) -> SyntaxNode {
	SyntaxNode::Call(CallNode { symbol, args, result, fragment: frag() })
}

fn named(name: &str, expr: SyntaxNode) -> SyntaxNode {
	SyntaxNode::Named(NamedNode {
		name: name.to_string(),
		expr: Box::new(expr),
		fragment: frag(),
	})
}

fn pipe(left: SyntaxNode, right: SyntaxNode) -> SyntaxNode {
	SyntaxNode::Pipe(PipeNode {
		left: Box::new(left),
		right: Box::new(right),
		fragment: frag(),
	})
}

fn filter(predicate: SyntaxNode) -> SyntaxNode {
	SyntaxNode::Filter(FilterNode { predicate: Box::new(predicate), fragment: frag() })
}

fn project(expressions: Vec<SyntaxNode>) -> SyntaxNode {
	SyntaxNode::Project(ProjectNode { expressions, fragment: frag() })
}

fn summarize(by: Vec<SyntaxNode>, aggregates: Vec<SyntaxNode>) -> SyntaxNode {
	SyntaxNode::Summarize(SummarizeNode { by, aggregates, fragment: frag() })
}

fn join(kind: JoinKind, right: SyntaxNode, on_left: (&str, Type), on_right: (&str, Type)) -> SyntaxNode {
	SyntaxNode::Join(JoinNode {
		kind,
		right: Box::new(right),
		on_left: NameNode {
			name: on_left.0.to_string(),
			result: TypeSymbol::from_kind(on_left.1),
			fragment: frag(),
		},
		on_right: NameNode {
			name: on_right.0.to_string(),
			result: TypeSymbol::from_kind(on_right.1),
			fragment: frag(),
		},
		fragment: frag(),
	})
}

fn count_call() -> SyntaxNode {
	call(FunctionSymbol::Count, vec![], TypeSymbol::Long)
}

fn people_schema() -> Arc<TableSchema> {
	Arc::new(
		TableSchema::new(vec![
			ColumnDef::new("Name", Type::Utf8),
			ColumnDef::new("Count", Type::Long),
		])
		.unwrap(),
	)
}

fn people() -> Arc<MemTable> {
	Arc::new(
		MemTable::from_rows(
			people_schema(),
			&[
				vec![Value::utf8("apple"), Value::long(4)],
				vec![Value::utf8("banana"), Value::long(62)],
				vec![Value::utf8("cherry"), Value::long(53)],
				vec![Value::utf8("kiwi"), Value::long(8)],
			],
		)
		.unwrap(),
	)
}

fn context_with(name: &str, table: Arc<MemTable>) -> QueryContext {
	let mut ctx = QueryContext::new();
	ctx.add_table(name, table).unwrap();
	ctx
}

fn eval_table(ctx: &QueryContext, query: &SyntaxNode) -> Arc<dyn TableSource> {
	match ctx.evaluate(query).unwrap() {
		QueryResult::Table(table) => table,
		QueryResult::Scalar(value) => panic!("expected a table, got scalar {value}"),
	}
}

fn rows(table: &dyn TableSource) -> Vec<Vec<Value>> {
	table.collect_rows().unwrap()
}

#[test]
fn filter_keeps_matching_rows_in_input_order() {
	init_tracing();
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		filter(binary(
			BinaryOp::Contains,
			col("Name", Type::Utf8),
			lit(Value::utf8("an")),
		)),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(rows(out.as_ref()), vec![vec![Value::utf8("banana"), Value::long(62)]]);
}

#[test]
fn filter_numeric_comparison() {
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		filter(binary(BinaryOp::GreaterThan, col("Count", Type::Long), lit(Value::long(50)))),
	);
	let out = eval_table(&ctx, &query);
	let names: Vec<Value> = rows(out.as_ref()).into_iter().map(|mut r| r.remove(0)).collect();
	assert_eq!(names, vec![Value::utf8("banana"), Value::utf8("cherry")]);
}

fn numbers(total: i64, chunk_size: i64) -> Arc<MemTable> {
	let schema = Arc::new(TableSchema::new(vec![ColumnDef::new("N", Type::Long)]).unwrap());
	let mut chunks = Vec::new();
	let mut next = 0;
	while next < total {
		let end = (next + chunk_size).min(total);
		let chunk = TableChunk::new(schema.clone(), vec![ColumnData::long(next..end)]).unwrap();
		chunks.push(chunk);
		next = end;
	}
	Arc::new(MemTable::new(schema, chunks).unwrap())
}

#[test]
fn global_count_spans_all_chunks() {
	let ctx = context_with("Numbers", numbers(50_000, 8_192));
	let schema = Arc::new(TableSchema::new(vec![ColumnDef::new("N", Type::Long)]).unwrap());
	let query = pipe(tbl("Numbers", &schema), summarize(vec![], vec![count_call()]));
	let out = eval_table(&ctx, &query);
	assert_eq!(rows(out.as_ref()), vec![vec![Value::long(50_000)]]);
}

#[test]
fn filter_then_count() {
	let ctx = context_with("Numbers", numbers(50_000, 8_192));
	let schema = Arc::new(TableSchema::new(vec![ColumnDef::new("N", Type::Long)]).unwrap());
	let query = pipe(
		pipe(
			tbl("Numbers", &schema),
			filter(binary(BinaryOp::LessThan, col("N", Type::Long), lit(Value::long(10)))),
		),
		summarize(vec![], vec![count_call()]),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(rows(out.as_ref()), vec![vec![Value::long(10)]]);
}

#[test]
fn project_computes_and_renames() {
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		project(vec![named(
			"Doubled",
			binary(BinaryOp::Multiply, col("Count", Type::Long), lit(Value::long(2))),
		)]),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(out.schema().to_string(), "Doubled:long");
	let values: Vec<Value> = rows(out.as_ref()).into_iter().map(|mut r| r.remove(0)).collect();
	assert_eq!(
		values,
		vec![Value::long(8), Value::long(124), Value::long(106), Value::long(16)],
	);
}

#[test]
fn project_generates_names_for_computed_columns() {
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		project(vec![
			col("Name", Type::Utf8),
			binary(BinaryOp::Add, col("Count", Type::Long), lit(Value::long(1))),
		]),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(out.schema().to_string(), "Name:string; Column2:long");
}

fn fruit() -> (Arc<MemTable>, Arc<TableSchema>) {
	let schema = Arc::new(TableSchema::new(vec![ColumnDef::new("Fruit", Type::Utf8)]).unwrap());
	let table = MemTable::from_rows(
		schema.clone(),
		&[
			vec![Value::utf8("apple")],
			vec![Value::Undefined],
			vec![Value::utf8("banana")],
			vec![Value::utf8("apple")],
			vec![Value::Undefined],
		],
	)
	.unwrap();
	(Arc::new(table), schema)
}

#[test]
fn summarize_groups_in_first_seen_order_and_nulls_group_together() {
	let (table, schema) = fruit();
	let ctx = context_with("Produce", table);
	let query = pipe(
		tbl("Produce", &schema),
		summarize(vec![col("Fruit", Type::Utf8)], vec![count_call()]),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(
		rows(out.as_ref()),
		vec![
			vec![Value::utf8("apple"), Value::long(2)],
			vec![Value::Undefined, Value::long(2)],
			vec![Value::utf8("banana"), Value::long(1)],
		],
	);
}

#[test]
fn nan_keys_never_group_together() {
	let schema = Arc::new(TableSchema::new(vec![ColumnDef::new("X", Type::Real)]).unwrap());
	let table = Arc::new(
		MemTable::from_rows(
			schema.clone(),
			&[
				vec![Value::real(f64::NAN)],
				vec![Value::real(f64::NAN)],
				vec![Value::real(1.0)],
			],
		)
		.unwrap(),
	);
	let ctx = context_with("T", table);
	let query = pipe(tbl("T", &schema), summarize(vec![col("X", Type::Real)], vec![count_call()]));
	let out = eval_table(&ctx, &query);
	assert_eq!(rows(out.as_ref()).len(), 3);
}

#[test]
fn summarize_default_aggregate_names() {
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		summarize(
			vec![],
			vec![
				count_call(),
				call(
					FunctionSymbol::Sum,
					vec![col("Count", Type::Long)],
					TypeSymbol::Long,
				),
			],
		),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(out.schema().to_string(), "count_:long; sum_Count:long");
	assert_eq!(rows(out.as_ref()), vec![vec![Value::long(4), Value::long(127)]]);
}

#[test]
fn empty_input_summarize_yields_no_rows() {
	let schema = people_schema();
	let ctx = context_with("People", Arc::new(MemTable::empty(schema.clone())));
	let query = pipe(tbl("People", &schema), summarize(vec![], vec![count_call()]));
	let out = eval_table(&ctx, &query);
	assert!(rows(out.as_ref()).is_empty());
}

fn orders_schema() -> Arc<TableSchema> {
	Arc::new(
		TableSchema::new(vec![
			ColumnDef::new("Name", Type::Utf8),
			ColumnDef::new("Qty", Type::Long),
		])
		.unwrap(),
	)
}

fn orders(rows_in: &[(&str, i64)]) -> Arc<MemTable> {
	let rows: Vec<Vec<Value>> = rows_in
		.iter()
		.map(|(name, qty)| vec![Value::utf8(*name), Value::long(*qty)])
		.collect();
	Arc::new(MemTable::from_rows(orders_schema(), &rows).unwrap())
}

#[test]
fn inner_join_fans_out_duplicate_keys() {
	init_tracing();
	let mut ctx = QueryContext::new();
	ctx.add_table("Left", orders(&[("a", 1), ("a", 2), ("b", 3)])).unwrap();
	ctx.add_table("Right", orders(&[("a", 10), ("a", 20), ("c", 30)])).unwrap();
	let query = pipe(
		tbl("Left", &orders_schema()),
		join(
			JoinKind::Inner,
			tbl("Right", &orders_schema()),
			("Name", Type::Utf8),
			("Name", Type::Utf8),
		),
	);
	let out = eval_table(&ctx, &query);
	// 2 left "a" rows x 2 right "a" rows; "b" and "c" are unmatched.
	assert_eq!(rows(out.as_ref()).len(), 4);
}

#[test]
fn join_renames_colliding_right_columns() {
	let mut ctx = QueryContext::new();
	ctx.add_table("Left", orders(&[("a", 1)])).unwrap();
	ctx.add_table("Right", orders(&[("a", 10)])).unwrap();
	let query = pipe(
		tbl("Left", &orders_schema()),
		join(
			JoinKind::Inner,
			tbl("Right", &orders_schema()),
			("Name", Type::Utf8),
			("Name", Type::Utf8),
		),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(
		out.schema().to_string(),
		"Name:string; Qty:long; Name1:string; Qty1:long",
	);
	assert_eq!(
		rows(out.as_ref()),
		vec![vec![
			Value::utf8("a"),
			Value::long(1),
			Value::utf8("a"),
			Value::long(10),
		]],
	);
}

#[test]
fn left_outer_join_keeps_unmatched_left_rows() {
	let mut ctx = QueryContext::new();
	ctx.add_table("Left", orders(&[("a", 1), ("b", 2)])).unwrap();
	ctx.add_table("Right", orders(&[("a", 10)])).unwrap();
	let query = pipe(
		tbl("Left", &orders_schema()),
		join(
			JoinKind::LeftOuter,
			tbl("Right", &orders_schema()),
			("Name", Type::Utf8),
			("Name", Type::Utf8),
		),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(
		rows(out.as_ref()),
		vec![
			vec![Value::utf8("a"), Value::long(1), Value::utf8("a"), Value::long(10)],
			vec![Value::utf8("b"), Value::long(2), Value::Undefined, Value::Undefined],
		],
	);
}

#[test]
fn right_outer_join_keeps_unmatched_right_rows() {
	let mut ctx = QueryContext::new();
	ctx.add_table("Left", orders(&[("a", 1)])).unwrap();
	ctx.add_table("Right", orders(&[("a", 10), ("c", 30)])).unwrap();
	let query = pipe(
		tbl("Left", &orders_schema()),
		join(
			JoinKind::RightOuter,
			tbl("Right", &orders_schema()),
			("Name", Type::Utf8),
			("Name", Type::Utf8),
		),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(
		rows(out.as_ref()),
		vec![
			vec![Value::utf8("a"), Value::long(1), Value::utf8("a"), Value::long(10)],
			vec![Value::Undefined, Value::Undefined, Value::utf8("c"), Value::long(30)],
		],
	);
}

#[test]
fn join_null_keys_never_match() {
	let schema = orders_schema();
	let left = Arc::new(
		MemTable::from_rows(
			schema.clone(),
			&[vec![Value::Undefined, Value::long(1)]],
		)
		.unwrap(),
	);
	let mut ctx = QueryContext::new();
	ctx.add_table("Left", left).unwrap();
	ctx.add_table("Right", orders(&[("a", 10)])).unwrap();
	let inner = pipe(
		tbl("Left", &schema),
		join(
			JoinKind::Inner,
			tbl("Right", &schema),
			("Name", Type::Utf8),
			("Name", Type::Utf8),
		),
	);
	let out = eval_table(&ctx, &inner);
	assert!(rows(out.as_ref()).is_empty());

	let outer = pipe(
		tbl("Left", &schema),
		join(
			JoinKind::LeftOuter,
			tbl("Right", &schema),
			("Name", Type::Utf8),
			("Name", Type::Utf8),
		),
	);
	let out = eval_table(&ctx, &outer);
	assert_eq!(
		rows(out.as_ref()),
		vec![vec![Value::Undefined, Value::long(1), Value::Undefined, Value::Undefined]],
	);
}

#[test]
fn derived_sources_are_reenumerable() {
	let ctx = context_with("People", people());
	let query = pipe(
		pipe(
			tbl("People", &people_schema()),
			filter(binary(
				BinaryOp::GreaterThan,
				col("Count", Type::Long),
				lit(Value::long(5)),
			)),
		),
		summarize(vec![], vec![count_call()]),
	);
	let out = eval_table(&ctx, &query);
	let first = rows(out.as_ref());
	let second = rows(out.as_ref());
	assert_eq!(first, second);
	assert_eq!(first, vec![vec![Value::long(3)]]);
}

#[test]
fn zero_row_chunks_flow_through_operators() {
	let schema = Arc::new(TableSchema::new(vec![ColumnDef::new("N", Type::Long)]).unwrap());
	let chunks = vec![
		TableChunk::new(schema.clone(), vec![ColumnData::long([1, 2])]).unwrap(),
		TableChunk::empty(schema.clone()),
		TableChunk::new(schema.clone(), vec![ColumnData::long([3])]).unwrap(),
	];
	let table = Arc::new(MemTable::new(schema.clone(), chunks).unwrap());
	let ctx = context_with("T", table);
	let query = pipe(
		pipe(
			tbl("T", &schema),
			filter(binary(
				BinaryOp::GreaterThanOrEqual,
				col("N", Type::Long),
				lit(Value::long(0)),
			)),
		),
		summarize(vec![], vec![count_call()]),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(rows(out.as_ref()), vec![vec![Value::long(3)]]);
}

#[test]
fn scalar_expression_query() {
	let ctx = QueryContext::new();
	let query = binary(BinaryOp::Add, lit(Value::long(2)), lit(Value::long(3)));
	match ctx.evaluate(&query).unwrap() {
		QueryResult::Scalar(value) => assert_eq!(value, Value::long(5)),
		QueryResult::Table(_) => panic!("expected a scalar"),
	}
}

#[test]
fn datatable_literal_feeds_a_pipeline() {
	let ctx = QueryContext::new();
	let source = SyntaxNode::DataTable(DataTableNode {
		columns: vec![ColumnDef::new("Name", Type::Utf8), ColumnDef::new("Age", Type::Long)],
		values: vec![
			Value::utf8("alice"),
			Value::long(30),
			Value::utf8("bob"),
			Value::long(40),
		],
		fragment: frag(),
	});
	let query = pipe(
		source,
		filter(binary(BinaryOp::GreaterThan, col("Age", Type::Long), lit(Value::long(35)))),
	);
	let out = eval_table(&ctx, &query);
	assert_eq!(rows(out.as_ref()), vec![vec![Value::utf8("bob"), Value::long(40)]]);
}

#[test]
fn project_scalar_functions_columnar() {
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		project(vec![named(
			"Len",
			call(
				FunctionSymbol::Strlen,
				vec![col("Name", Type::Utf8)],
				TypeSymbol::Long,
			),
		)]),
	);
	let out = eval_table(&ctx, &query);
	let values: Vec<Value> = rows(out.as_ref()).into_iter().map(|mut r| r.remove(0)).collect();
	assert_eq!(
		values,
		vec![Value::long(5), Value::long(6), Value::long(6), Value::long(4)],
	);
}

#[test]
fn tolong_failure_is_attributed_to_the_value() {
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		project(vec![named(
			"L",
			call(
				FunctionSymbol::Tolong,
				vec![col("Name", Type::Utf8)],
				TypeSymbol::Long,
			),
		)]),
	);
	let out = eval_table(&ctx, &query);
	let err = out.collect_rows().unwrap_err();
	match err {
		Error::Conversion { value, .. } => assert_eq!(value, "apple"),
		other => panic!("expected a conversion error, got {other}"),
	}
}

#[test]
fn duplicate_table_registration_is_rejected() {
	let mut ctx = QueryContext::new();
	ctx.add_table("People", people()).unwrap();
	let err = ctx.add_table("People", people()).unwrap_err();
	assert!(matches!(err, Error::DuplicateTable { .. }));
}

#[test]
fn aggregate_outside_summarize_is_rejected() {
	let ctx = context_with("People", people());
	let query = pipe(tbl("People", &people_schema()), project(vec![count_call()]));
	let err = ctx.evaluate(&query).unwrap_err();
	assert!(matches!(err, Error::AggregateOutsideSummarize { .. }));
}

#[test]
fn unsupported_operator_reports_both_kinds() {
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		filter(binary(BinaryOp::Add, col("Name", Type::Utf8), col("Count", Type::Long))),
	);
	match ctx.evaluate(&query).unwrap_err() {
		Error::UnsupportedOperator { op, left, right, .. } => {
			assert_eq!(op, "+");
			assert_eq!(left, Type::Utf8);
			assert_eq!(right, Type::Long);
		}
		other => panic!("expected an operator error, got {other}"),
	}
}

#[test]
fn non_boolean_predicate_is_rejected_at_build() {
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		filter(binary(BinaryOp::Add, col("Count", Type::Long), lit(Value::long(1)))),
	);
	let err = ctx.evaluate(&query).unwrap_err();
	assert!(matches!(err, Error::NonBooleanPredicate { found: Type::Long, .. }));
}

#[test]
fn unknown_table_is_a_build_error() {
	let ctx = QueryContext::new();
	let query = pipe(
		tbl("Missing", &people_schema()),
		filter(lit(Value::bool(true))),
	);
	let err = ctx.evaluate(&query).unwrap_err();
	assert!(matches!(err, Error::UnknownTable { .. }));
}

#[test]
fn unknown_column_surfaces_when_chunks_are_pulled() {
	let ctx = context_with("People", people());
	let query = pipe(tbl("People", &people_schema()), filter(col("Missing", Type::Bool)));
	let out = eval_table(&ctx, &query);
	let err = out.collect_rows().unwrap_err();
	assert!(matches!(err, Error::UnknownColumn { .. }));
}

#[test]
fn wrong_argument_count_is_a_build_error() {
	let ctx = context_with("People", people());
	let query = pipe(
		tbl("People", &people_schema()),
		project(vec![call(
			FunctionSymbol::Strlen,
			vec![col("Name", Type::Utf8), col("Name", Type::Utf8)],
			TypeSymbol::Long,
		)]),
	);
	let err = ctx.evaluate(&query).unwrap_err();
	assert!(matches!(err, Error::ArgumentCount { expected: 1, found: 2, .. }));
}
