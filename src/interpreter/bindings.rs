use std::{collections::HashMap, fmt, sync::Arc};

use crate::interpreter::value::{
    callable::{CallResult, VariadicFn},
    core::Number,
};

/// Specifies the allowed number of arguments for a bound function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exact(usize),
    /// `n` or more arguments.
    AtLeast(usize),
    /// Any count listed in the slice.
    OneOf(&'static [usize]),
    /// No restriction; the function checks its arguments itself.
    Any,
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::AtLeast(m) => n >= *m,
            Self::OneOf(counts) => counts.contains(&n),
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::OneOf(counts) => {
                let counts = counts.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}", counts.join(" or "))
            },
            Self::Any => write!(f, "any number of"),
        }
    }
}

/// A caller-supplied function together with the argument counts it accepts.
#[derive(Clone)]
pub struct Function {
    arity: Arity,
    func:  VariadicFn,
}

impl Function {
    /// Wraps a closure as a bindable function.
    pub fn new<F>(arity: Arity, func: F) -> Self
        where F: Fn(&[Number]) -> CallResult + Send + Sync + 'static
    {
        Self { arity,
               func: Arc::new(func) }
    }

    /// The argument counts this function accepts.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Invokes the function. Arity is not checked here.
    ///
    /// # Errors
    /// Whatever the wrapped closure returns.
    pub fn call(&self, args: &[Number]) -> CallResult {
        (self.func)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// What a name is bound to.
#[derive(Debug, Clone)]
pub enum Binding {
    /// A plain number, used as `x`.
    Value(Number),
    /// A function, used as `f(x, ...)`.
    Function(Function),
}

/// Per-call mapping from names to values and functions.
///
/// ## Usage
///
/// ```
/// use safecalc::{Arity, Bindings, Number};
///
/// let bindings = Bindings::new().with_value("x", 2)
///                               .with_function("twice", Arity::Exact(1), |args| {
///                                   Ok(Number::Real(args[0].as_real() * 2.0))
///                               });
///
/// assert!(bindings.contains("x"));
/// assert_eq!(bindings.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: HashMap<String, Binding>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value binding, builder style.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Number>) -> Self {
        self.insert_value(name, value);
        self
    }

    /// Adds a function binding, builder style.
    #[must_use]
    pub fn with_function<F>(mut self, name: impl Into<String>, arity: Arity, func: F) -> Self
        where F: Fn(&[Number]) -> CallResult + Send + Sync + 'static
    {
        self.insert_function(name, arity, func);
        self
    }

    /// Binds `name` to a value, replacing any previous binding.
    pub fn insert_value(&mut self, name: impl Into<String>, value: impl Into<Number>) {
        self.insert(name, Binding::Value(value.into()));
    }

    /// Binds `name` to a function, replacing any previous binding.
    pub fn insert_function<F>(&mut self, name: impl Into<String>, arity: Arity, func: F)
        where F: Fn(&[Number]) -> CallResult + Send + Sync + 'static
    {
        self.insert(name, Binding::Function(Function::new(arity, func)));
    }

    /// Binds `name`, returning the binding it replaced.
    pub fn insert(&mut self, name: impl Into<String>, binding: Binding) -> Option<Binding> {
        self.entries.insert(name.into(), binding)
    }

    /// Looks up a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries.get(name)
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every binding of `other` into `self`. Names bound in both take
    /// the binding from `other`.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Iterates over all bound names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, Number)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (S, Number)>>(iter: T) -> Self {
        let mut bindings = Self::new();
        for (name, value) in iter {
            bindings.insert_value(name, value);
        }
        bindings
    }
}
