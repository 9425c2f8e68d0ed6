//! Session cookie construction.
//!
//! Issuance and clearing must use the same name, path, and attributes or
//! browsers will not remove the cookie on logout.

use super::claims::SESSION_TTL_SECS;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Build the Set-Cookie value carrying a session token.
pub fn session_cookie(token: &str, production_mode: bool) -> String {
    let secure_flag = if production_mode { " Secure;" } else { "" };
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax;{secure_flag} Max-Age={SESSION_TTL_SECS}"
    )
}

/// Build the Set-Cookie value that clears the session cookie.
pub fn clear_session_cookie(production_mode: bool) -> String {
    let secure_flag = if production_mode { " Secure;" } else { "" };
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax;{secure_flag} Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc.def.ghi", false);
        assert!(cookie.starts_with("token=abc.def.ghi;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=172800"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_secure_flag_in_production() {
        assert!(session_cookie("t", true).contains("Secure"));
        assert!(clear_session_cookie(true).contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_matches_issuance_attributes() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
