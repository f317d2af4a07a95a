use formrelay_models::contact::{
    ContactEmail, ContactMessage, ContactName, FormField, FormFields, ValidatedFields,
    ValidationErrors,
};

pub const NAME_ERROR: &str = "Name must be at least 2 characters.";
pub const EMAIL_ERROR: &str = "Please enter a valid email address.";
pub const MESSAGE_ERROR: &str = "Message must be at least 10 characters.";

/// Check every field and collect all errors.
pub fn validate(fields: FormFields) -> ValidationErrors {
    parse(fields).err().unwrap_or_default()
}

/// Like [`validate`], but return the typed fields if all of them are valid.
pub fn parse(fields: FormFields) -> Result<ValidatedFields, ValidationErrors> {
    let FormFields {
        name,
        email,
        message,
    } = fields;

    let mut errors = ValidationErrors::new();
    let mut check = |ok: bool, field: FormField, error: &'static str| {
        if !ok {
            errors.insert(field, error);
        }
    };

    let name = ContactName::try_new(name).ok();
    check(name.is_some(), FormField::Name, NAME_ERROR);
    let email = ContactEmail::try_new(email).ok();
    check(email.is_some(), FormField::Email, EMAIL_ERROR);
    let message = ContactMessage::try_new(message).ok();
    check(message.is_some(), FormField::Message, MESSAGE_ERROR);

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) => Ok(ValidatedFields {
            name,
            email,
            message,
        }),
        _ => Err(errors),
    }
}
