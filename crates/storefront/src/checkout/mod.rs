//! Checkout and registration forms.
//!
//! Forms arrive as plain deserialized structs and are turned into domain
//! values only after every field passes validation. Card data never outlives
//! validation: an accepted card keeps only its last four digits.

pub mod validation;

pub use validation::FieldErrors;

use chrono::{DateTime, Utc};
use enzobay_core::{PaymentMethod, ShippingAddress, UserRole};
use secrecy::SecretString;
use serde::Deserialize;

/// Payment option picked on the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentChoice {
    #[default]
    Card,
    CashOnDelivery,
}

/// Checkout form data.
///
/// Implements `Debug` manually to redact card fields.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(default)]
    pub payment_method: PaymentChoice,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub card_expiry: Option<String>,
    #[serde(default)]
    pub card_cvv: Option<String>,
}

impl std::fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("city", &self.city)
            .field("payment_method", &self.payment_method)
            .field("card_number", &"[REDACTED]")
            .field("card_cvv", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// A checkout form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCheckout {
    pub shipping: ShippingAddress,
    pub payment: PaymentMethod,
}

impl CheckoutForm {
    /// Validate every field, checking card expiry against `now`.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` naming each failing field.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<ValidCheckout, FieldErrors> {
        let mut errors = FieldErrors::new();

        validation::require(&mut errors, "fullName", &self.full_name, "Full name");
        validation::email(&mut errors, "email", &self.email);
        validation::phone(&mut errors, "phone", &self.phone);
        validation::require(&mut errors, "addressLine", &self.address_line, "Address");
        validation::require(&mut errors, "city", &self.city, "City");
        validation::require(&mut errors, "state", &self.state, "State");
        validation::postal_code(&mut errors, "postalCode", &self.postal_code);

        if self.payment_method == PaymentChoice::Card {
            let card_number = self.card_number.as_deref().unwrap_or_default();
            validation::card_number(&mut errors, "cardNumber", card_number);
            validation::card_expiry(
                &mut errors,
                "cardExpiry",
                self.card_expiry.as_deref().unwrap_or_default(),
                now,
            );
            validation::cvv(&mut errors, "cardCvv", self.card_cvv.as_deref().unwrap_or_default());
        }

        errors.into_result()?;

        let payment = match self.payment_method {
            PaymentChoice::Card => PaymentMethod::Card {
                last4: last_four_digits(self.card_number.as_deref().unwrap_or_default()),
            },
            PaymentChoice::CashOnDelivery => PaymentMethod::CashOnDelivery,
        };

        Ok(ValidCheckout {
            shipping: ShippingAddress {
                full_name: self.full_name.trim().to_owned(),
                email: self.email.trim().to_owned(),
                phone: self.phone.trim().to_owned(),
                address_line: self.address_line.trim().to_owned(),
                city: self.city.trim().to_owned(),
                state: self.state.trim().to_owned(),
                postal_code: self.postal_code.trim().to_owned(),
            },
            payment,
        })
    }
}

fn last_four_digits(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
    digits.iter().skip(digits.len().saturating_sub(4)).collect()
}

/// Registration form data.
///
/// Implements `Debug` manually to redact passwords.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub role: UserRole,
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirm", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// A registration form that passed validation.
#[derive(Debug)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: UserRole,
}

impl RegistrationForm {
    /// Validate name, email, password length and confirmation.
    ///
    /// Self-registration may pick the customer or seller role only.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` naming each failing field.
    pub fn validate(self) -> Result<ValidRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        validation::require(&mut errors, "name", &self.name, "Name");
        validation::email(&mut errors, "email", &self.email);
        validation::password(&mut errors, "password", &self.password);
        if self.password != self.password_confirm {
            errors.add("passwordConfirm", "Passwords do not match");
        }
        if self.role == UserRole::Admin {
            errors.add("role", "Admin accounts cannot be self-registered");
        }

        errors.into_result()?;

        Ok(ValidRegistration {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_lowercase(),
            password: SecretString::from(self.password),
            role: self.role,
        })
    }
}
