//! Локальная проверка форм до отправки на бэкенд.
//!
//! Формы описаны через `validator`. На каждое поле одно правило-функция,
//! чтобы пользователь видел только первую нарушенную проверку.

use std::borrow::Cow;
use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const MIN_PERSON_NAME_LENGTH: usize = 2;
pub const MIN_ATTENDEE_NAME_LENGTH: usize = 3;

/// Ошибки по полям: имя поля -> сообщение.
pub type FieldErrors = BTreeMap<String, String>;

fn rule(code: &'static str, message: impl Into<String>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message.into()));
    err
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn validate_login_username(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", "username is required"));
    }
    if char_len(value.trim()) < MIN_USERNAME_LENGTH {
        return Err(rule(
            "length",
            format!("username must have at least {} characters", MIN_USERNAME_LENGTH),
        ));
    }
    Ok(())
}

fn validate_new_username(value: &str) -> Result<(), ValidationError> {
    validate_login_username(value)?;
    if value.contains(' ') {
        return Err(rule("spaces", "username must not contain spaces"));
    }
    Ok(())
}

fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", "password is required"));
    }
    if char_len(value) < MIN_PASSWORD_LENGTH {
        return Err(rule(
            "length",
            format!("password must have at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}

fn validate_confirmation(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", "confirm your password"));
    }
    Ok(())
}

fn person_name(value: &str, what: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", format!("{} is required", what)));
    }
    if char_len(value.trim()) < MIN_PERSON_NAME_LENGTH {
        return Err(rule(
            "length",
            format!("{} must have at least {} characters", what, MIN_PERSON_NAME_LENGTH),
        ));
    }
    Ok(())
}

fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    person_name(value, "first name")
}

fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    person_name(value, "last name")
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", "email is required"));
    }
    if !value.contains('@') || !value.contains('.') {
        return Err(rule("email", "email is not valid"));
    }
    Ok(())
}

/// Имя зрителя на месте: обязательно, не короче трёх символов без пробелов по краям.
pub fn validate_attendee_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", "name is required"));
    }
    if char_len(value.trim()) < MIN_ATTENDEE_NAME_LENGTH {
        return Err(rule(
            "length",
            format!("name must have at least {} characters", MIN_ATTENDEE_NAME_LENGTH),
        ));
    }
    Ok(())
}

/// Текст ошибки, пригодный для показа пользователю.
pub fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

/// Первое сообщение для каждого поля.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| errs.first().map(|e| (field.to_string(), message_of(e))))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "validate_login_username"))]
    pub username: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl LoginForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|e| field_errors(&e))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RegistrationForm {
    #[validate(custom(function = "validate_new_username"))]
    pub username: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(custom(function = "validate_confirmation"))]
    pub confirm_password: String,
    #[validate(custom(function = "validate_first_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_last_name"))]
    pub last_name: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
}

impl RegistrationForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => field_errors(&e),
        };
        if !errors.contains_key("confirm_password") && self.confirm_password != self.password {
            errors.insert(
                "confirm_password".to_string(),
                "passwords do not match".to_string(),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::name::en::{FirstName, LastName, Name};
    use fake::Fake;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            username: "maria".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
            email: "maria@example.com".to_string(),
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().check().unwrap_err();
        assert_eq!(errors["username"], "username is required");
        assert_eq!(errors["password"], "password is required");
    }

    #[test]
    fn login_username_length_is_measured_trimmed() {
        let form = LoginForm {
            username: "  ab  ".to_string(),
            password: "1234".to_string(),
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors["username"], "username must have at least 3 characters");
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn short_password_is_rejected() {
        let form = LoginForm {
            username: "pedro".to_string(),
            password: "123".to_string(),
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors["password"].contains("4"));
    }

    #[test]
    fn valid_registration_passes() {
        assert_eq!(registration().check(), Ok(()));
    }

    #[test]
    fn registration_rejects_spaces_in_username() {
        let form = RegistrationForm {
            username: "ma ria".to_string(),
            ..registration()
        };
        assert_eq!(
            form.check().unwrap_err()["username"],
            "username must not contain spaces"
        );
    }

    #[test]
    fn registration_rejects_mismatched_confirmation() {
        let form = RegistrationForm {
            confirm_password: "secreT".to_string(),
            ..registration()
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["confirm_password"], "passwords do not match");
    }

    #[test]
    fn blank_confirmation_reports_required_not_mismatch() {
        let form = RegistrationForm {
            confirm_password: String::new(),
            ..registration()
        };
        assert_eq!(form.check().unwrap_err()["confirm_password"], "confirm your password");
    }

    #[test]
    fn registration_checks_names_and_email() {
        let form = RegistrationForm {
            first_name: "M".to_string(),
            last_name: " ".to_string(),
            email: "maria-at-example".to_string(),
            ..registration()
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors["first_name"], "first name must have at least 2 characters");
        assert_eq!(errors["last_name"], "last name is required");
        assert_eq!(errors["email"], "email is not valid");
    }

    #[test]
    fn generated_full_names_are_valid_attendees() {
        for _ in 0..20 {
            let name: String = Name().fake();
            assert!(validate_attendee_name(&name).is_ok(), "{name}");
        }
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        assert!(validate_attendee_name(&format!("  {} {}  ", first, last)).is_ok());
    }

    #[test]
    fn short_attendee_name_is_rejected() {
        let err = validate_attendee_name(" Al ").unwrap_err();
        assert_eq!(message_of(&err), "name must have at least 3 characters");
        assert_eq!(message_of(&validate_attendee_name("").unwrap_err()), "name is required");
    }
}
