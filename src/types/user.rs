use handle_errors::Error;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub subscribed: bool,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, PartialOrd, Ord)]
pub struct UserId(pub i32);

/// Body of a subscribe request.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewUser {
    pub email: String,
    #[serde(default = "subscribed_by_default")]
    pub subscribed: bool,
}

/// Body of an unsubscribe request. The email is optional here so a missing
/// field is reported as a missing parameter instead of a body error.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Unsubscribe {
    pub email: Option<String>,
}

fn subscribed_by_default() -> bool {
    true
}

impl NewUser {
    /// Trims the email and checks that it looks like an address.
    pub fn validated(self) -> Result<NewUser, Error> {
        Ok(NewUser {
            email: validate_email(&self.email)?,
            subscribed: self.subscribed,
        })
    }
}

/// Accepts `local@domain.tld` shaped addresses without whitespace.
pub fn validate_email(email: &str) -> Result<String, Error> {
    let email = email.trim();
    let invalid = || Error::InvalidEmail(email.to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.rsplit_once('@').ok_or_else(invalid)?;
    if local.is_empty() || local.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || domain.contains("..")
    {
        return Err(invalid());
    }

    Ok(email.to_string())
}
