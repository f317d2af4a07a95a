mod macros;

/// The version of the formrelay workspace.
pub fn formrelay_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use formrelay_utils::Apply;
    /// fn join(base: String, suffix: Option<&str>) -> String {
    ///     base.apply_map(suffix, |slf, suffix| slf + suffix)
    /// }
    /// assert_eq!(join("a".into(), None), "a");
    /// assert_eq!(join("a".into(), Some("b")), "ab");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        if let Some(value) = value {
            f(self, value)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}
