//! Tri-state outcomes for fallible operations.
//!
//! Every fallible operation in the workspace returns an [`Outcome`]: a
//! severity code ([`OutcomeCode`]), an ordered sequence of diagnostic
//! messages, and an optional value. The carrier distinguishes total failure
//! (no usable value) from degraded success (usable value plus warnings),
//! which a plain `Result` cannot express.
//!
//! # Invariant
//!
//! An outcome carries a value if and only if its code is not
//! [`OutcomeCode::Failure`]. The constructors and [`Outcome::absorb`]
//! maintain this; there is no way to build a `Failure` with a value or a
//! `Success` without one.
//!
//! # Examples
//!
//! ```
//! use hangar_core::{Outcome, OutcomeCode};
//!
//! let mut copy = Outcome::success("copied");
//! let verify: Outcome<()> = Outcome::failure("digest mismatch");
//!
//! // Composing operations: a failed sub-step fails the parent.
//! copy.absorb(&verify);
//! assert_eq!(copy.code(), OutcomeCode::Failure);
//! assert!(copy.value().is_none());
//! assert_eq!(copy.messages(), ["digest mismatch"]);
//! ```

/// Severity of an [`Outcome`].
///
/// Variants are ordered by severity (`Success < Warning < Failure`), so the
/// worst of two codes is their maximum.
///
/// # Examples
///
/// ```
/// use hangar_core::OutcomeCode;
///
/// assert!(OutcomeCode::Success < OutcomeCode::Warning);
/// assert_eq!(
///     OutcomeCode::Warning.combine(OutcomeCode::Failure),
///     OutcomeCode::Failure,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeCode {
    /// The operation produced its value without reservations.
    Success,
    /// The operation produced a usable but degraded value.
    Warning,
    /// The operation produced no usable value.
    Failure,
}

impl OutcomeCode {
    /// Returns the more severe of `self` and `other`.
    #[inline]
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        self.max(other)
    }

    /// Returns `true` for [`OutcomeCode::Success`].
    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns `true` for [`OutcomeCode::Warning`].
    #[inline]
    #[must_use]
    pub const fn is_warning(self) -> bool {
        matches!(self, Self::Warning)
    }

    /// Returns `true` for [`OutcomeCode::Failure`].
    #[inline]
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failure)
    }
}

impl std::fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Failure => "failure",
        };
        write!(f, "{name}")
    }
}

/// Result carrier for a fallible operation.
///
/// Combines a severity code, diagnostic messages in emission order, and the
/// produced value (absent exactly when the code is `Failure`). Callers must
/// inspect the code before dereferencing the value.
///
/// # Examples
///
/// ```
/// use hangar_core::Outcome;
///
/// fn halve(n: u32) -> Outcome<u32> {
///     if n % 2 == 0 {
///         Outcome::success(n / 2)
///     } else {
///         Outcome::failure(format!("{n} is not even"))
///     }
/// }
///
/// assert_eq!(halve(8).into_value(), Some(4));
/// assert!(halve(7).is_failure());
/// ```
#[must_use = "outcomes report failures that must be inspected"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    code: OutcomeCode,
    messages: Vec<String>,
    value: Option<T>,
}

impl<T> Outcome<T> {
    /// Creates a `Success` outcome carrying `value` and no messages.
    pub const fn success(value: T) -> Self {
        Self {
            code: OutcomeCode::Success,
            messages: Vec::new(),
            value: Some(value),
        }
    }

    /// Creates a `Success` outcome carrying `value` and one message.
    pub fn success_with(value: T, message: impl Into<String>) -> Self {
        Self {
            code: OutcomeCode::Success,
            messages: vec![message.into()],
            value: Some(value),
        }
    }

    /// Creates a `Warning` outcome: the value is usable, the message says
    /// why it is degraded.
    pub fn warning(value: T, message: impl Into<String>) -> Self {
        Self {
            code: OutcomeCode::Warning,
            messages: vec![message.into()],
            value: Some(value),
        }
    }

    /// Creates a `Failure` outcome with no value.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            code: OutcomeCode::Failure,
            messages: vec![message.into()],
            value: None,
        }
    }

    /// Returns the severity code.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> OutcomeCode {
        self.code
    }

    /// Returns the diagnostic messages in emission order.
    #[inline]
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns `true` when the code is `Success`.
    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Returns `true` when the code is `Warning`.
    #[inline]
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        self.code.is_warning()
    }

    /// Returns `true` when the code is `Failure`.
    #[inline]
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.code.is_failure()
    }

    /// Returns the carried value, if any.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns a mutable reference to the carried value, if any.
    #[inline]
    pub const fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Consumes the outcome and returns the carried value, if any.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Appends a diagnostic message without changing the code.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Appends a message and degrades the code to at least `Warning`.
    ///
    /// A `Failure` stays a `Failure`; a `Success` becomes a `Warning`.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.code = self.code.combine(OutcomeCode::Warning);
        self.messages.push(message.into());
    }

    /// Folds another outcome's verdict into this one.
    ///
    /// The code degrades to the more severe of the two and `other`'s
    /// messages are appended in order. If the combined code is `Failure`
    /// the carried value is dropped, preserving the value/code invariant.
    /// `other`'s value, if any, is not taken; extract it first when it is
    /// needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangar_core::{Outcome, OutcomeCode};
    ///
    /// let mut parent = Outcome::success(10);
    /// parent.absorb(&Outcome::warning((), "partial data"));
    /// assert_eq!(parent.code(), OutcomeCode::Warning);
    /// assert_eq!(parent.value(), Some(&10));
    /// ```
    pub fn absorb<U>(&mut self, other: &Outcome<U>) {
        self.code = self.code.combine(other.code);
        self.messages.extend(other.messages.iter().cloned());
        if self.code.is_failure() {
            self.value = None;
        }
    }

    /// Maps the carried value to another type, keeping code and messages.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            code: self.code,
            messages: self.messages,
            value: self.value.map(f),
        }
    }

    /// Splits the outcome into a unit verdict and the carried value.
    ///
    /// The verdict keeps the code and messages; pattern-matching the value
    /// side then covers the failure path without touching the messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangar_core::Outcome;
    ///
    /// let (verdict, value) = Outcome::success(7).split();
    /// assert!(verdict.is_success());
    /// assert_eq!(value, Some(7));
    /// ```
    pub fn split(self) -> (Outcome<()>, Option<T>) {
        let unit = if self.code.is_failure() {
            None
        } else {
            Some(())
        };
        (
            Outcome {
                code: self.code,
                messages: self.messages,
                value: unit,
            },
            self.value,
        )
    }

    /// Converts a valueless outcome to a different value type.
    ///
    /// Used to propagate a `Failure` from a sub-step as the result of the
    /// calling operation. Any carried value would be lost, so converting a
    /// value-bearing outcome is a programming error.
    pub fn retype<U>(self) -> Outcome<U> {
        debug_assert!(
            self.value.is_none(),
            "retype discards a live value; extract it first"
        );
        Outcome {
            code: self.code,
            messages: self.messages,
            value: None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Outcome<T> {
    /// Converts a typed result into an outcome, rendering the error's
    /// `Display` form as the failure message.
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(error.to_string()),
        }
    }
}
