use std::{collections::BTreeMap, fmt, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `local@domain.tld` where neither part contains whitespace or `@`.
///
/// Whitespace is the set matched by [`is_input_whitespace`].
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    const PART: &str = r"[^@\t\n\x0B\x0C\r\p{Zs}\x{2028}\x{2029}\x{FEFF}]+";
    Regex::new(&format!(r"^{PART}@{PART}\.{PART}$")).unwrap()
});

/// Space separators, line terminators and the byte order mark.
///
/// Unlike [`char::is_whitespace`], U+0085 (next line) is not whitespace.
pub fn is_input_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// Strips leading and trailing [input whitespace](is_input_whitespace).
pub fn trim_input(input: &str) -> &str {
    input.trim_matches(is_input_whitespace)
}

/// The length of an input in UTF-16 code units.
pub fn input_length(input: &str) -> usize {
    input.encode_utf16().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// The key used for this field in the multipart request body.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of the raw input values of a contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        }
    }
}

/// The live, editable inputs of a single contact form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    inputs: FormFields,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        self.inputs.get(field)
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.inputs.get_mut(field) = value.into();
    }

    /// Reads the current input values into a fresh [`FormFields`].
    pub fn fields(&self) -> FormFields {
        self.inputs.clone()
    }

    /// Clears every input.
    pub fn reset(&mut self) {
        self.inputs = FormFields::default();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }
}

impl From<FormFields> for ContactForm {
    fn from(inputs: FormFields) -> Self {
        Self { inputs }
    }
}

#[nutype(
    validate(predicate = |name: &str| {
        crate::contact::input_length(crate::contact::trim_input(name)) >= 2
    }),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(predicate = |email: &str| {
        crate::contact::CONTACT_EMAIL_REGEX.is_match(crate::contact::trim_input(email))
    }),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    validate(predicate = |message: &str| {
        crate::contact::input_length(crate::contact::trim_input(message)) >= 10
    }),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

/// Form fields which passed validation. The raw input is kept untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessage,
}

impl From<ValidatedFields> for FormFields {
    fn from(value: ValidatedFields) -> Self {
        Self {
            name: value.name.into_inner(),
            email: value.email.into_inner(),
            message: value.message.into_inner(),
        }
    }
}

/// Field level validation errors. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FormField, &'static str>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(&field, &message)| (field, message))
    }

    pub fn messages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.values().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}
