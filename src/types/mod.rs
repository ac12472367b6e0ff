//! Wire types for the platform's form-encoded endpoints

use serde::Serialize;

/// Credentials form posted to the login endpoint
#[derive(Debug, Serialize)]
pub struct LoginForm<'a> {
    /// Account username
    pub username: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Form posted to the logout endpoint
#[derive(Debug, Serialize)]
pub struct LogoutForm<'a> {
    /// CSRF token echoed back under the server's expected field name
    pub csrfmiddlewaretoken: &'a str,
}

/// Form posted to the comment endpoint
#[derive(Debug, Serialize)]
pub struct CommentForm<'a> {
    /// Comment body
    pub comment_text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_encoding() {
        let form = LoginForm {
            username: "myuser",
            password: "p@ss word",
        };
        let encoded = serde_urlencoded::to_string(&form).unwrap();
        assert_eq!(encoded, "username=myuser&password=p%40ss+word");
    }

    #[test]
    fn test_logout_form_encoding() {
        let form = LogoutForm {
            csrfmiddlewaretoken: "abc123",
        };
        let encoded = serde_urlencoded::to_string(&form).unwrap();
        assert_eq!(encoded, "csrfmiddlewaretoken=abc123");
    }

    #[test]
    fn test_comment_form_encoding() {
        let form = CommentForm {
            comment_text: "nice shot",
        };
        let encoded = serde_urlencoded::to_string(&form).unwrap();
        assert_eq!(encoded, "comment_text=nice+shot");
    }
}
