//! Client-side form validation.
//!
//! Runs synchronously before submission; a form that fails here never
//! reaches the network layer.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::ProfileUpdate;

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const USERNAME_TOO_SHORT: &str = "Username must be at least 3 characters";
pub const USERNAME_INVALID_CHARS: &str =
    "Username can only contain letters, numbers, and underscores";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const OTP_INVALID: &str = "Enter the verification code sent to your email";

const MIN_USERNAME_LEN: usize = 3;
const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 8;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern is valid"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static OTP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4,6}$").expect("otp pattern is valid"));

/// A form field that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Username,
    Email,
    Password,
    ConfirmPassword,
    Otp,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Otp => "otp",
        }
    }
}

/// Per-field validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message of the first failing field, for a toast.
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn check(&mut self, field: Field, result: Result<(), &'static str>) {
        if let Err(message) = result {
            self.insert(field, message);
        }
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field.as_str(), message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let username = username.trim();
    if username.is_empty() {
        Err(USERNAME_REQUIRED)
    } else if username.chars().count() < MIN_USERNAME_LEN {
        Err(USERNAME_TOO_SHORT)
    } else if !USERNAME_RE.is_match(username) {
        Err(USERNAME_INVALID_CHARS)
    } else {
        Ok(())
    }
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        Err(EMAIL_REQUIRED)
    } else if !EMAIL_RE.is_match(email) {
        Err(EMAIL_INVALID)
    } else {
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        Err(NAME_REQUIRED)
    } else if name.chars().count() < MIN_NAME_LEN {
        Err(NAME_TOO_SHORT)
    } else {
        Ok(())
    }
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        Err(PASSWORD_REQUIRED)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Err(PASSWORD_TOO_SHORT)
    } else {
        Ok(())
    }
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), &'static str> {
    if password == confirmation {
        Ok(())
    } else {
        Err(PASSWORDS_DO_NOT_MATCH)
    }
}

pub fn validate_otp(otp: &str) -> Result<(), &'static str> {
    if OTP_RE.is_match(otp.trim()) {
        Ok(())
    } else {
        Err(OTP_INVALID)
    }
}

/// The edit-profile form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub username: String,
    pub email: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check(Field::Name, validate_name(&self.name));
        errors.check(Field::Username, validate_username(&self.username));
        errors.check(Field::Email, validate_email(&self.email));
        errors.into_result(ProfileUpdate {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}

/// The login form. Only checks shape; the server decides if it is correct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check(Field::Email, validate_email(&self.email));
        if self.password.is_empty() {
            errors.insert(Field::Password, PASSWORD_REQUIRED);
        }
        errors.into_result(())
    }
}

/// The sign-up form, also used for password reset (without `name`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check(Field::Name, validate_name(&self.name));
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Password, validate_password(&self.password));
        errors.check(
            Field::ConfirmPassword,
            validate_password_confirmation(&self.password, &self.confirm_password),
        );
        errors.into_result(())
    }
}

/// The one-time code that confirms a new account's email.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OtpForm {
    pub email: String,
    pub otp: String,
}

impl OtpForm {
    pub fn new(email: impl Into<String>, otp: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            otp: otp.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Otp, validate_otp(&self.otp));
        errors.into_result(())
    }
}
