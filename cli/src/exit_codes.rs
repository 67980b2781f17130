//! # Exit Codes
//!
//! Standard exit codes for the sqlchat CLI.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// General error (unspecified)
pub const EXIT_ERROR: i32 = 1;

/// Configuration error (unreadable or invalid config file)
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Invalid input (empty query, out-of-range threshold, etc.)
pub const EXIT_INVALID_INPUT: i32 = 6;

/// Embedding provider could not be built from the configuration
pub const EXIT_PROVIDER_ERROR: i32 = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_CONFIG_ERROR,
            EXIT_INVALID_INPUT,
            EXIT_PROVIDER_ERROR,
        ];

        for (i, &code1) in codes.iter().enumerate() {
            for (j, &code2) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(code1, code2, "Exit codes {} and {} are not unique", i, j);
                }
            }
        }
    }

    #[test]
    fn test_success_is_zero() {
        assert_eq!(EXIT_SUCCESS, 0);
    }
}
