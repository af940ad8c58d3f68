//! Dynamic endpoint call model
//!
//! A published view is reachable as an [`Endpoint`]: a dynamically
//! invocable object. Operations are addressed by name and carry opaque
//! JSON arguments, so the namespace can hold views of any contract behind
//! one object-safe trait.

use crate::error::CallError;
use serde_json::Value;
use std::sync::Arc;

/// A dynamically invocable target published in the namespace.
pub trait Endpoint: Send + Sync {
    /// Invoke a named operation. Failures raised by the target propagate
    /// to the caller unchanged.
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, CallError>;
}

/// Shared handle to a published endpoint.
pub type EndpointRef = Arc<dyn Endpoint>;

/// Endpoint that answers every operation with a fixed value.
///
/// Useful for simple marker bindings and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantEndpoint {
    value: Value,
}

impl ConstantEndpoint {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Endpoint for ConstantEndpoint {
    fn invoke(&self, _method: &str, _args: &[Value]) -> Result<Value, CallError> {
        Ok(self.value.clone())
    }
}
