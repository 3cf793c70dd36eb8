use super::ExecutableQuery;
use relstore_core::{stmt, Error, Result};

/// The transaction/session collaborator queries execute against.
///
/// Implemented outside this core; any fault it raises propagates to the
/// caller unaltered.
pub trait ActiveContext {
    /// Executes the command and returns the post-projected result rows.
    fn execute(&self, query: &ExecutableQuery) -> Result<Vec<stmt::Value>>;
}

/// Executes translated queries against an active context.
///
/// Holds no state across calls; each call is independent.
#[derive(Default)]
pub struct QueryExecutor;

impl QueryExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Executes a scalar query and returns its single value.
    pub fn execute_scalar(
        &self,
        query: &ExecutableQuery,
        context: Option<&dyn ActiveContext>,
    ) -> Result<stmt::Value> {
        // Checked before any storage access.
        if query.has_fetches() {
            return Err(Error::not_supported(
                "scalar queries cannot perform eager fetching",
            ));
        }
        let context = context.ok_or_else(Error::no_active_context)?;
        let rows = context.execute(query)?;
        Ok(rows.into_iter().next().unwrap_or(stmt::Value::Null))
    }

    pub fn execute_collection(
        &self,
        query: &ExecutableQuery,
        context: Option<&dyn ActiveContext>,
    ) -> Result<Vec<stmt::Value>> {
        let context = context.ok_or_else(Error::no_active_context)?;
        context.execute(query)
    }

    /// Executes as a collection query, then extracts exactly one element.
    pub fn execute_single(
        &self,
        query: &ExecutableQuery,
        context: Option<&dyn ActiveContext>,
        return_default_if_empty: bool,
    ) -> Result<stmt::Value> {
        let mut rows = self.execute_collection(query, context)?;
        match rows.len() {
            0 if return_default_if_empty => Ok(stmt::Value::Null),
            0 => Err(Error::record_not_found()),
            1 => Ok(rows.remove(0)),
            _ => Err(Error::too_many_records()),
        }
    }
}
