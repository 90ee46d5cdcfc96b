//! Callable objects backed by native Rust closures

use std::sync::Arc;

use super::{Object, Value};
use crate::error::Result;

/// Type alias for native function pointers: `(this, args) -> result`
pub type NativeFnPtr = Arc<dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync>;

/// The call behaviour attached to a function object.
#[derive(Clone)]
pub struct NativeFn {
    /// Function name (for display and error messages)
    pub name: Arc<str>,

    /// The function pointer
    pub func: NativeFnPtr,
}

impl NativeFn {
    /// Create a new native function
    pub fn new(
        name: impl Into<Arc<str>>,
        func: impl Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Invoke with an explicit receiver
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        (self.func)(this, args)
    }
}

impl std::fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Object {
    /// Create a function object from a native closure.
    ///
    /// # Example
    ///
    /// ```
    /// use record_tuple::{Object, Value};
    ///
    /// let double = Object::function("double", |_this, args| {
    ///     let n = args.first().and_then(Value::as_number).unwrap_or(0.0);
    ///     Ok(Value::Number(n * 2.0))
    /// });
    ///
    /// assert!(double.is_callable());
    /// assert_eq!(double.call(&Value::Undefined, &[Value::from(21)]).unwrap(), Value::from(42));
    /// ```
    pub fn function(
        name: impl Into<Arc<str>>,
        func: impl Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Object::with_call(Some(NativeFn::new(name, func)))
    }

    /// Create a getter-shaped function object: it ignores its arguments
    /// and computes a value from the receiver.
    pub fn getter(
        name: impl Into<Arc<str>>,
        get: impl Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Object::function(name, move |this, _args| get(this))
    }
}
