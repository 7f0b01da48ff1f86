//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Account Roles
// =============================================================================

/// Role assigned to accounts without a recognised `userType`
pub const ROLE_USER: &str = "user";

/// Role allowed to list every account through the audit endpoint
pub const ROLE_AUDITOR: &str = "auditor";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;
