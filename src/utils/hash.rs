// src/utils/hash.rs

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Secret affixes wrapped around every password before hashing.
#[derive(Debug, Clone, Default)]
pub struct PasswordPepper {
    pub prefix: String,
    pub suffix: String,
}

impl PasswordPepper {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    fn extend(&self, password: &str) -> String {
        format!("{}{}{}", self.prefix, password, self.suffix)
    }
}

pub fn hash_password(password: &str, pepper: &PasswordPepper) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(pepper.extend(password).as_bytes(), &salt)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

pub fn verify_password(
    password: &str,
    password_hash: &str,
    pepper: &PasswordPepper,
) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let result =
        Argon2::default().verify_password(pepper.extend(password).as_bytes(), &parsed_hash);

    Ok(result.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_roundtrip_with_pepper() {
        let pepper = PasswordPepper::new("pre-", "-post");
        let hash = hash_password("hunter2", &pepper).unwrap();

        assert!(verify_password("hunter2", &hash, &pepper).unwrap());
        assert!(!verify_password("hunter3", &hash, &pepper).unwrap());
    }

    #[test]
    fn different_pepper_does_not_verify() {
        let hash = hash_password("hunter2", &PasswordPepper::new("a", "b")).unwrap();
        assert!(!verify_password("hunter2", &hash, &PasswordPepper::default()).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let pepper = PasswordPepper::default();
        let a = hash_password("same", &pepper).unwrap();
        let b = hash_password("same", &pepper).unwrap();
        assert_ne!(a, b);
    }
}
