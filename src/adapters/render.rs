//! Helpers for rendering credentials into connection URIs and container
//! commands

use url::Url;

/// Percent-encodes a value for the user-info part of a connection URI
///
/// Characters that would end the user-info component (`@`, `:`, `/`, `?`,
/// `#`, whitespace) and `%` itself are encoded, so clients decode the
/// original value.
///
/// # Examples
///
/// ```
/// use unidb::adapters::render::encode_userinfo;
///
/// assert_eq!(encode_userinfo("p@ss/w:rd"), "p%40ss%2Fw%3Ard");
/// assert_eq!(encode_userinfo("hunter2"), "hunter2");
/// ```
pub fn encode_userinfo(value: &str) -> String {
    // The user-info encode set leaves `%` alone
    let escaped = value.replace('%', "%25");

    let Ok(mut url) = Url::parse("unidb://localhost") else {
        return escaped;
    };
    if url.set_password(Some(&escaped)).is_err() {
        return escaped;
    }
    url.password().unwrap_or_default().to_string()
}

/// Quotes a value as a single shell word
///
/// Values made only of characters that are safe unquoted are returned as is.
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-.,/:=+@%".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_userinfo_reserved_characters() {
        assert_eq!(encode_userinfo("a@b:c/d?e#f"), "a%40b%3Ac%2Fd%3Fe%23f");
        assert_eq!(encode_userinfo("open sesame"), "open%20sesame");
        assert_eq!(encode_userinfo("100%"), "100%25");
        assert_eq!(encode_userinfo(""), "");
    }

    #[test]
    fn test_encoded_userinfo_parses_back() {
        let uri = format!(
            "postgresql://u:{}@localhost:5432/app",
            encode_userinfo("p@ss/w:rd#1?x%")
        );
        let url = Url::parse(&uri).unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(5432));
        assert_eq!(url.path(), "/app");
        assert_eq!(url.password(), Some("p%40ss%2Fw%3Ard%231%3Fx%25"));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("pw"), "pw");
        assert_eq!(shell_quote("open sesame"), "'open sesame'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
        assert_eq!(shell_quote(""), "''");
    }
}
