//! Static checks on the query document before execution: operation-name
//! resolution and the mutation-over-GET gate.

use async_graphql_parser::types::{DocumentOperations, ExecutableDocument, OperationType};
use http::Method;

use crate::error::{GraphqlError, RequestError};

/// Parses the query, turning parser failures into response-ready errors
/// carrying the source position.
pub(crate) fn parse(query: &str) -> Result<ExecutableDocument, GraphqlError> {
    async_graphql_parser::parse_query(query)
        .map_err(|err| GraphqlError::new(err.to_string()).with_locations(err.positions().map(Into::into)))
}

/// Enforces the two rules that are decidable without executing anything: a
/// document with several operations needs an explicit operation name, and
/// the selected operation may only be a mutation when it arrived via POST.
/// An operation name matching nothing is left for the engine to reject.
pub(crate) fn check(
    method: &Method,
    document: ExecutableDocument,
    operation_name: Option<&str>,
) -> Result<(), RequestError> {
    let operation = match (document.operations, operation_name) {
        (DocumentOperations::Single(operation), _) => Some(operation),
        (DocumentOperations::Multiple(mut operations), Some(name)) => operations.remove(name),
        (DocumentOperations::Multiple(operations), None) => {
            if operations.len() > 1 {
                return Err(RequestError::OperationNameRequired);
            }
            operations.into_iter().next().map(|(_, operation)| operation)
        }
    };
    let Some(operation) = operation else {
        return Ok(());
    };
    if operation.node.ty == OperationType::Mutation && *method != Method::POST {
        return Err(RequestError::MutationOverGet);
    }
    Ok(())
}
