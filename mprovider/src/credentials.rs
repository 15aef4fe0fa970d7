//! Redacted API keys and the rotating credential pool.
//!
//! ```rust
//! use mprovider::CredentialPool;
//!
//! let pool = CredentialPool::from_delimited("key-a, key-b,key-c").expect("pool");
//! assert_eq!(pool.len(), 3);
//! assert_eq!(pool.current().index, 0);
//!
//! pool.rotate();
//! assert_eq!(pool.current().index, 1);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ProviderError;

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes are valid UTF-8.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

/// The credential chosen for one attempt, together with its pool position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialLease {
    pub index: usize,
    pub key: SecretString,
}

/// Ordered, non-empty, immutable set of API keys with a shared cursor.
///
/// The cursor is shared by every clone of the pool, so a rotation triggered by
/// one dispatch is observed by all later ones.
#[derive(Clone)]
pub struct CredentialPool {
    keys: Arc<[SecretString]>,
    cursor: Arc<AtomicUsize>,
}

impl CredentialPool {
    pub fn new<I, S>(keys: I) -> Result<Self, ProviderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys
            .into_iter()
            .map(Into::<String>::into)
            .map(|key| SecretString::new(key.trim()))
            .filter(|key| !key.is_empty())
            .collect::<Vec<_>>();

        if keys.is_empty() {
            return Err(ProviderError::configuration(
                "credential pool requires at least one non-empty API key",
            ));
        }

        Ok(Self {
            keys: keys.into(),
            cursor: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Parses a comma or newline separated key list.
    pub fn from_delimited(value: &str) -> Result<Self, ProviderError> {
        Self::new(value.split([',', '\n']))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    pub fn current(&self) -> CredentialLease {
        let index = self.current_index();
        CredentialLease {
            index,
            key: self.keys[index].clone(),
        }
    }

    /// Advances the cursor unconditionally and returns the new index.
    pub fn rotate(&self) -> usize {
        let len = self.keys.len();
        let previous = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |index| {
                Some((index + 1) % len)
            })
            .unwrap_or_else(|index| index);
        (previous + 1) % len
    }

    /// Advances the cursor past `failed` only if it still points there.
    ///
    /// Returns the cursor after the call. When another dispatch already moved
    /// the cursor, it is left untouched.
    pub fn rotate_past(&self, failed: usize) -> usize {
        let next = (failed + 1) % self.keys.len();
        match self
            .cursor
            .compare_exchange(failed, next, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => next,
            Err(current) => current,
        }
    }
}

impl std::fmt::Debug for CredentialPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPool")
            .field("len", &self.keys.len())
            .field("cursor", &self.current_index())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn secret_string_debug_is_redacted() {
        let secret = SecretString::new("AIza-secret");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(secret.expose(), "AIza-secret");
    }

    #[test]
    fn pool_rejects_empty_and_blank_key_lists() {
        let empty = CredentialPool::new(Vec::<String>::new()).expect_err("empty must fail");
        assert_eq!(empty.kind, ProviderErrorKind::Configuration);

        let blank = CredentialPool::from_delimited(" , \n ,").expect_err("blank must fail");
        assert_eq!(blank.kind, ProviderErrorKind::Configuration);
    }

    #[test]
    fn from_delimited_trims_and_skips_blank_entries() {
        let pool = CredentialPool::from_delimited(" a ,, b\nc ").expect("pool");
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.current().key.expose(), "a");
    }

    #[test]
    fn rotate_wraps_modulo_pool_size() {
        let pool = CredentialPool::new(["a", "b", "c"]).expect("pool");

        assert_eq!(pool.rotate(), 1);
        assert_eq!(pool.rotate(), 2);
        assert_eq!(pool.rotate(), 0);
        assert_eq!(pool.current().key.expose(), "a");
    }

    #[test]
    fn rotate_past_skips_when_cursor_already_moved() {
        let pool = CredentialPool::new(["a", "b", "c"]).expect("pool");
        let stale = pool.current();

        assert_eq!(pool.rotate_past(stale.index), 1);
        assert_eq!(pool.rotate_past(stale.index), 1);
        assert_eq!(pool.current_index(), 1);
    }

    #[test]
    fn clones_share_the_cursor() {
        let pool = CredentialPool::new(["a", "b"]).expect("pool");
        let shared = pool.clone();

        pool.rotate();
        assert_eq!(shared.current_index(), 1);
        assert_eq!(format!("{shared:?}"), "CredentialPool { len: 2, cursor: 1 }");
    }
}
