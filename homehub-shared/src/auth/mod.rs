/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id credential hashing and verification
/// - [`jwt`]: Bearer token issuance and validation
/// - [`middleware`]: Bearer header extraction into an `AuthContext`
///
/// # Example
///
/// ```
/// use homehub_shared::auth::password::{hash_password, verify_credentials};
/// use homehub_shared::auth::jwt::{issue_token, validate_token};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-secret-of-at-least-thirty-two-bytes!";
///
/// let hash = hash_password("user_password")?;
/// assert!(verify_credentials("user_password", Some(&hash))?);
///
/// let token = issue_token(1, "tenant", secret, Duration::minutes(15))?;
/// assert_eq!(validate_token(&token, secret)?.sub, 1);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
