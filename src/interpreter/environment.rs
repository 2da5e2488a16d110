use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Lexically-nested name→value store.
///
/// `Environment` is a cheap handle: cloning it yields another reference to
/// the same frame, which is how closures capture their defining scope.
/// Lookup walks the `outer` chain; writes only touch the innermost frame.
#[derive(Clone, Default)]
pub struct Environment {
    data: Rc<RefCell<EnvironmentData>>,
}

#[derive(Default)]
struct EnvironmentData {
    store: HashMap<Rc<str>, Value>,
    outer: Option<Environment>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh frame whose lookups fall back to `outer`.
    pub fn enclosing(outer: &Environment) -> Self {
        Environment {
            data: Rc::new(RefCell::new(EnvironmentData {
                store: HashMap::new(),
                outer: Some(outer.clone()),
            })),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.data.borrow();
        match data.store.get(name) {
            Some(value) => Some(value.clone()),
            None => data.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    pub fn set(&self, name: impl Into<Rc<str>>, value: Value) {
        self.data.borrow_mut().store.insert(name.into(), value);
    }
}

// Environments can participate in cycles through captured closures, so the
// derived Debug would recurse.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        write!(
            f,
            "Environment({} bindings{})",
            data.store.len(),
            if data.outer.is_some() { ", enclosed" } else { "" }
        )
    }
}
