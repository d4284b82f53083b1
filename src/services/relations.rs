use crate::error::ApiError;
use email_address::EmailAddress;
use std::collections::HashSet;

/// Set intersection of two friend lists, preserving the order of `a`.
/// Symmetric as a set: swapping the arguments yields the same members.
pub fn mutual_friends(a: &[String], b: &[String]) -> Vec<String> {
    let b_set: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter()
        .filter(|name| b_set.contains(name.as_str()))
        .cloned()
        .collect()
}

/// A friend list must not reference its owner and must not contain
/// duplicates. Checked whenever a list arrives from outside the store.
pub fn validate_friend_list(username: &str, friends: &[String]) -> Result<(), ApiError> {
    let mut seen = HashSet::new();
    for friend in friends {
        if friend == username {
            return Err(ApiError::InvalidArgument(format!(
                "user {} cannot be their own friend",
                username
            )));
        }
        if !seen.insert(friend.as_str()) {
            return Err(ApiError::InvalidArgument(format!(
                "duplicate friend entry: {}",
                friend
            )));
        }
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if EmailAddress::is_valid(email) {
        Ok(())
    } else {
        Err(ApiError::InvalidArgument(format!(
            "malformed email address: {}",
            email
        )))
    }
}

/// Pattern for the strict variant of the email-domain match: the address
/// ends in `@domain`. Combined with the `i` option by the store, so the
/// match is case-insensitive.
pub fn email_domain_pattern(domain: &str) -> String {
    format!("@{}$", regex_escape(domain))
}

/// Loose variant: case-insensitive substring match anywhere in the address.
/// Kept separate because the two behaviors differ on addresses like
/// `alice@mail.example.com.org`.
pub fn email_contains_domain(email: &str, domain: &str) -> bool {
    email.to_lowercase().contains(&domain.to_lowercase())
}

/// Escapes a user-supplied string for literal use inside a BSON regex, so
/// keyword and domain searches keep substring semantics instead of becoming
/// patterns. Only regex metacharacters are escaped; everything else,
/// non-ASCII letters included, passes through unchanged.
pub fn regex_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
