//! Raising errors decorated with their call site.
//!
//! [`throw!`](crate::throw) builds an error of a given kind from a list of
//! arguments and returns it from the enclosing function. When the first
//! argument is text and the kind can be built from `(String, rest..)`, the
//! text is prefixed with the enclosing function, file and line.
//!
//! Which construction applies is decided at compile time by autoref-based
//! dispatch on [`Probe`]: the decorated form is found first, the plain form
//! one auto-reference later, and if neither applies the macro does not
//! compile.

use std::{borrow::Cow, fmt, marker::PhantomData, panic::Location};

/// Where an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorContext {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Captures the caller's file and line.
    ///
    /// Use this in helpers that raise on behalf of their caller; pass the
    /// caller's name, for example from [`function_name!`](crate::function_name).
    #[must_use]
    #[track_caller]
    pub fn capture(function: &'static str) -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), function)
    }

    /// Prefixes `what` with this context.
    ///
    /// The layout is one labelled line each for the function, the location
    /// and the original text.
    #[must_use]
    pub fn decorate(&self, what: &str) -> String {
        format!(
            "\nfunction: {}\nwhere: {}, {}\nwhat: {}\n",
            self.function, self.file, self.line, what
        )
    }

    /// Builds an error of kind `E` from `what`, decorated with this context.
    pub fn error<E: From<String>>(&self, what: impl Text) -> E {
        trace::<E>(self);
        E::from(self.decorate(&what.into_text()))
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.function, self.file, self.line)
    }
}

/// Text-like values accepted as an error message.
pub trait Text {
    fn into_text(self) -> String;
}

impl Text for String {
    fn into_text(self) -> String {
        self
    }
}

impl Text for &String {
    fn into_text(self) -> String {
        self.clone()
    }
}

impl Text for &str {
    fn into_text(self) -> String {
        self.to_owned()
    }
}

impl Text for Box<str> {
    fn into_text(self) -> String {
        self.into_string()
    }
}

impl Text for Cow<'_, str> {
    fn into_text(self) -> String {
        self.into_owned()
    }
}

/// Construction of an error kind from a tuple of arguments.
///
/// No arguments means [`Default`], one argument means [`From`] of that
/// argument, and two to four arguments mean [`From`] of the tuple.
pub trait Construct<Args>: Sized {
    fn construct(args: Args) -> Self;
}

impl<E: Default> Construct<()> for E {
    fn construct((): ()) -> Self {
        E::default()
    }
}

impl<E: From<A>, A> Construct<(A,)> for E {
    fn construct((a,): (A,)) -> Self {
        E::from(a)
    }
}

impl<E: From<(A, B)>, A, B> Construct<(A, B)> for E {
    fn construct(args: (A, B)) -> Self {
        E::from(args)
    }
}

impl<E: From<(A, B, C)>, A, B, C> Construct<(A, B, C)> for E {
    fn construct(args: (A, B, C)) -> Self {
        E::from(args)
    }
}

impl<E: From<(A, B, C, D)>, A, B, C, D> Construct<(A, B, C, D)> for E {
    fn construct(args: (A, B, C, D)) -> Self {
        E::from(args)
    }
}

/// Argument tuples whose first element is text and whose remaining elements,
/// after a decorated `String`, construct `E`.
pub trait Decorate<E> {
    fn decorate(self, context: &ErrorContext) -> E;
}

impl<E, S> Decorate<E> for (S,)
where
    S: Text,
    E: Construct<(String,)>,
{
    fn decorate(self, context: &ErrorContext) -> E {
        E::construct((context.decorate(&self.0.into_text()),))
    }
}

impl<E, S, A> Decorate<E> for (S, A)
where
    S: Text,
    E: Construct<(String, A)>,
{
    fn decorate(self, context: &ErrorContext) -> E {
        let (what, a) = self;
        E::construct((context.decorate(&what.into_text()), a))
    }
}

impl<E, S, A, B> Decorate<E> for (S, A, B)
where
    S: Text,
    E: Construct<(String, A, B)>,
{
    fn decorate(self, context: &ErrorContext) -> E {
        let (what, a, b) = self;
        E::construct((context.decorate(&what.into_text()), a, b))
    }
}

impl<E, S, A, B, C> Decorate<E> for (S, A, B, C)
where
    S: Text,
    E: Construct<(String, A, B, C)>,
{
    fn decorate(self, context: &ErrorContext) -> E {
        let (what, a, b, c) = self;
        E::construct((context.decorate(&what.into_text()), a, b, c))
    }
}

/// Zero-sized stand-in for an argument tuple `A` raised as `E`.
#[doc(hidden)]
pub struct Probe<E, A>(PhantomData<fn() -> (E, A)>);

impl<E, A> Probe<E, A> {
    #[doc(hidden)]
    #[must_use]
    pub fn new(_args: &A) -> Self {
        Self(PhantomData)
    }
}

#[doc(hidden)]
pub struct Decorated;

#[doc(hidden)]
pub struct Direct;

#[doc(hidden)]
pub trait DecoratedKind {
    #[inline]
    fn kind(&self) -> Decorated {
        Decorated
    }
}

impl<E, A: Decorate<E>> DecoratedKind for Probe<E, A> {}

#[doc(hidden)]
pub trait DirectKind {
    #[inline]
    fn kind(&self) -> Direct {
        Direct
    }
}

impl<E: Construct<A>, A> DirectKind for &Probe<E, A> {}

impl Decorated {
    #[doc(hidden)]
    pub fn build<E, A: Decorate<E>>(self, args: A, context: ErrorContext) -> E {
        trace::<E>(&context);
        args.decorate(&context)
    }
}

impl Direct {
    #[doc(hidden)]
    pub fn build<E: Construct<A>, A>(self, args: A, context: ErrorContext) -> E {
        trace::<E>(&context);
        E::construct(args)
    }
}

#[inline]
fn trace<E>(_context: &ErrorContext) {
    #[cfg(feature = "tracing")]
    {
        let kind = std::any::type_name::<E>();
        tracing::debug!(
            function = _context.function,
            file = _context.file,
            line = _context.line,
            kind,
            "raising error"
        );
    }
}

#[doc(hidden)]
#[must_use]
pub fn trim_closures(mut name: &str) -> &str {
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// Expands to the path of the enclosing function, as a `&'static str`.
///
/// Closures resolve to the function that defines them.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = type_name_of(f);
        $crate::raise::trim_closures(name.strip_suffix("::f").unwrap_or(name))
    }};
}

/// Builds an error and returns it from the enclosing function.
///
/// `throw!(Kind, args..)` constructs a `Kind` and expands to
/// `return Err(From::from(error))`, so it never yields a value.
///
/// - If the first argument is text (`&str`, `String`, `&String`, `Box<str>`
///   or `Cow<str>`) and `Kind` can be built from `(String, rest..)`, the text
///   is decorated with the enclosing function, file and line before
///   construction.
/// - Otherwise `Kind` is built unchanged from the arguments: `Default` for
///   none, `From<A>` for one, `From<(A, B, ..)>` for up to four.
/// - If neither applies, the invocation does not compile.
///
/// Integer and float literals should carry a suffix so the construction can be
/// resolved.
///
/// # Example
///
/// ```
/// use optcap_core::throw;
///
/// #[derive(Debug)]
/// struct InvalidInput(String);
///
/// impl From<String> for InvalidInput {
///     fn from(message: String) -> Self {
///         Self(message)
///     }
/// }
///
/// fn check(x: &[f64]) -> Result<(), InvalidInput> {
///     if x.is_empty() {
///         throw!(InvalidInput, "empty decision vector");
///     }
///     Ok(())
/// }
///
/// let InvalidInput(message) = check(&[]).unwrap_err();
/// assert!(message.contains("function: "));
/// assert!(message.ends_with("what: empty decision vector\n"));
/// ```
///
/// A kind that cannot be built from the arguments is rejected at compile time:
///
/// ```compile_fail
/// use optcap_core::throw;
///
/// #[derive(Debug)]
/// struct Fatal;
///
/// fn run() -> Result<(), Fatal> {
///     throw!(Fatal, 42_u8, "no such constructor");
/// }
/// ```
///
/// Text alone is not enough when the kind cannot be built from a `String`:
///
/// ```compile_fail
/// use optcap_core::throw;
///
/// #[derive(Debug)]
/// struct Fatal;
///
/// fn run() -> Result<(), Fatal> {
///     throw!(Fatal, "boom");
/// }
/// ```
#[macro_export]
macro_rules! throw {
    ($kind:ty $(, $arg:expr)* $(,)?) => {{
        let args = ($($arg,)*);
        let context = $crate::raise::ErrorContext::new(
            ::core::file!(),
            ::core::line!(),
            $crate::function_name!(),
        );
        let error: $kind = {
            #[allow(unused_imports)]
            use $crate::raise::{DecoratedKind as _, DirectKind as _};
            let probe = $crate::raise::Probe::<$kind, _>::new(&args);
            (&probe).kind().build(args, context)
        };
        return ::core::result::Result::Err(::core::convert::From::from(error));
    }};
}
