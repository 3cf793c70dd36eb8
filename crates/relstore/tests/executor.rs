mod support;

use support::*;

use relstore::stmt::{FetchRequest, Query, ResultOperator, Value};
use relstore::{ActiveContext, ExecutableQuery, QueryExecutor, QueryGenerator};

use pretty_assertions::assert_eq;

/// A storage stand-in returning the same canned rows for every command.
struct CannedRows(Vec<Value>);

impl ActiveContext for CannedRows {
    fn execute(&self, _query: &ExecutableQuery) -> relstore::Result<Vec<Value>> {
        Ok(self.0.clone())
    }
}

/// A storage stand-in whose every execution fails.
struct FailingContext;

impl ActiveContext for FailingContext {
    fn execute(&self, _query: &ExecutableQuery) -> relstore::Result<Vec<Value>> {
        Err(relstore::Error::record_not_found().context("storage backend unavailable"))
    }
}

fn order_query(schema: &relstore::Schema) -> ExecutableQuery {
    QueryGenerator::new(schema, "test-unit")
        .generate(&Query::entity(ORDER))
        .unwrap()
}

// =============================================================================
// Scalar execution
// =============================================================================

#[test]
fn scalar_execution_returns_the_first_row_value() {
    let schema = schema();
    let query = QueryGenerator::new(&schema, "test-unit")
        .generate(&Query::entity(ORDER).operator(ResultOperator::Count))
        .unwrap();

    let context = CannedRows(vec![Value::I64(42)]);
    let value = QueryExecutor::new()
        .execute_scalar(&query, Some(&context))
        .unwrap();
    assert_eq!(value, Value::I64(42));
}

#[test]
fn scalar_execution_with_no_rows_yields_null() {
    let schema = schema();
    let query = QueryGenerator::new(&schema, "test-unit")
        .generate(&Query::entity(ORDER).operator(ResultOperator::Count))
        .unwrap();

    let context = CannedRows(vec![]);
    let value = QueryExecutor::new()
        .execute_scalar(&query, Some(&context))
        .unwrap();
    assert_eq!(value, Value::Null);
}

#[test]
fn execution_without_a_context_is_rejected() {
    let schema = schema();
    let query = order_query(&schema);

    let err = QueryExecutor::new()
        .execute_collection(&query, None)
        .unwrap_err();
    assert!(err.is_no_active_context());
}

// =============================================================================
// Single-element extraction
// =============================================================================

#[test]
fn single_with_exactly_one_row_returns_it() {
    let schema = schema();
    let query = order_query(&schema);
    let context = CannedRows(vec![Value::I64(7)]);

    let value = QueryExecutor::new()
        .execute_single(&query, Some(&context), false)
        .unwrap();
    assert_eq!(value, Value::I64(7));
}

#[test]
fn single_with_no_rows_is_a_fault() {
    let schema = schema();
    let query = order_query(&schema);
    let context = CannedRows(vec![]);

    let err = QueryExecutor::new()
        .execute_single(&query, Some(&context), false)
        .unwrap_err();
    assert!(err.is_record_not_found());
    assert_eq!(err.to_string(), "sequence contains no elements");
}

#[test]
fn single_or_default_with_no_rows_yields_null() {
    let schema = schema();
    let query = order_query(&schema);
    let context = CannedRows(vec![]);

    let value = QueryExecutor::new()
        .execute_single(&query, Some(&context), true)
        .unwrap();
    assert_eq!(value, Value::Null);
}

#[test]
fn single_with_two_rows_is_a_fault_regardless_of_the_default_flag() {
    let schema = schema();
    let query = order_query(&schema);
    let context = CannedRows(vec![Value::I64(1), Value::I64(2)]);
    let executor = QueryExecutor::new();

    for or_default in [false, true] {
        let err = executor
            .execute_single(&query, Some(&context), or_default)
            .unwrap_err();
        assert!(err.is_too_many_records());
        assert_eq!(err.to_string(), "sequence contains more than one element");
    }
}

// =============================================================================
// Collaborator faults
// =============================================================================

#[test]
fn collaborator_faults_propagate_unaltered() {
    let schema = schema();
    let query = order_query(&schema);

    let err = QueryExecutor::new()
        .execute_collection(&query, Some(&FailingContext))
        .unwrap_err();
    // Neither rewrapped nor reinterpreted by the executor.
    assert!(err.to_string().contains("storage backend unavailable"));
    assert!(err.chain().any(|cause| cause.is_record_not_found()));
}

#[test]
fn collection_execution_returns_every_row() {
    let schema = schema();
    let query = order_query(&schema);
    let context = CannedRows(vec![Value::I64(1), Value::I64(2), Value::I64(3)]);

    let rows = QueryExecutor::new()
        .execute_collection(&query, Some(&context))
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn scalar_fetch_rejection_happens_before_any_storage_call() {
    let schema = schema();
    let query = QueryGenerator::new(&schema, "test-unit")
        .generate(
            &Query::entity(ORDER)
                .operator(ResultOperator::fetch(FetchRequest::one("Customer"))),
        )
        .unwrap();
    assert!(query.has_fetches());

    // FailingContext would surface its own fault if it were consulted.
    let err = QueryExecutor::new()
        .execute_scalar(&query, Some(&FailingContext))
        .unwrap_err();
    assert!(err.is_not_supported());
}

#[test]
fn executable_queries_get_distinct_identities() {
    let schema = schema();
    let a = order_query(&schema);
    let b = order_query(&schema);
    assert_ne!(a.id, b.id);
}
