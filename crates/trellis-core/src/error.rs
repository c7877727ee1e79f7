use std::sync::Arc;

/// Build an ad-hoc [`Error`] from a format string and return it from the
/// enclosing function.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Build an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Trellis.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    /// Metadata or statement construction is invalid. Raised at registration
    /// or statement-build time and always fatal to that call.
    InvalidSchema(String),

    /// A named parameter referenced by the rendered SQL has no bound value.
    UnboundParam(String),

    /// An update or delete that had to match key/version columns affected
    /// zero rows.
    OptimisticLock(String),

    /// Key column values are required but absent: a reuse-mode selection
    /// without key columns, or an entity submitted without key values.
    MissingKey(String),

    /// The translator has no handler for an operator in the token tree.
    UnknownOperator(String),

    /// A mandatory column was given no value.
    Validation(String),

    /// Error surfaced by the connection layer.
    Driver(anyhow::Error),

    /// Any other error.
    Adhoc(String),
}

impl Error {
    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        ErrorKind::InvalidSchema(msg.into()).into()
    }

    pub fn unbound_param(name: impl Into<String>) -> Self {
        ErrorKind::UnboundParam(name.into()).into()
    }

    pub fn optimistic_lock(msg: impl Into<String>) -> Self {
        ErrorKind::OptimisticLock(msg.into()).into()
    }

    pub fn missing_key(msg: impl Into<String>) -> Self {
        ErrorKind::MissingKey(msg.into()).into()
    }

    pub fn unknown_operator(op: impl Into<String>) -> Self {
        ErrorKind::UnknownOperator(op.into()).into()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ErrorKind::Validation(msg.into()).into()
    }

    pub fn driver(err: impl Into<anyhow::Error>) -> Self {
        ErrorKind::Driver(err.into()).into()
    }

    pub fn is_invalid_schema(&self) -> bool {
        matches!(*self.inner, ErrorKind::InvalidSchema(_))
    }

    pub fn is_unbound_param(&self) -> bool {
        matches!(*self.inner, ErrorKind::UnboundParam(_))
    }

    /// Returns true if the error signals an optimistic-lock conflict. Callers
    /// are expected to branch on this rather than on the message.
    pub fn is_optimistic_lock(&self) -> bool {
        matches!(*self.inner, ErrorKind::OptimisticLock(_))
    }

    pub fn is_missing_key(&self) -> bool {
        matches!(*self.inner, ErrorKind::MissingKey(_))
    }

    pub fn is_unknown_operator(&self) -> bool {
        matches!(*self.inner, ErrorKind::UnknownOperator(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(*self.inner, ErrorKind::Validation(_))
    }

    pub fn is_driver(&self) -> bool {
        matches!(*self.inner, ErrorKind::Driver(_))
    }

    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        ErrorKind::Adhoc(args.to_string()).into()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.inner {
            ErrorKind::Driver(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use ErrorKind::*;

        match &*self.inner {
            InvalidSchema(msg) => write!(f, "invalid schema: {msg}"),
            UnboundParam(name) => write!(f, "no value bound for parameter `{name}`"),
            OptimisticLock(msg) => write!(f, "optimistic lock failure: {msg}"),
            MissingKey(msg) => write!(f, "missing key: {msg}"),
            UnknownOperator(op) => write!(f, "no translation for operator `{op}`"),
            Validation(msg) => write!(f, "validation failed: {msg}"),
            Driver(err) => core::fmt::Display::fmt(err, f),
            Adhoc(msg) => f.write_str(msg),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if f.alternate() {
            f.debug_struct("Error").field("kind", &self.inner).finish()
        } else {
            core::fmt::Display::fmt(self, f)
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            inner: Arc::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::driver(err)
    }
}
