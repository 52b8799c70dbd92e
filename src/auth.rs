/// Login gate for the dashboard.
///
/// The core only ever sees the boolean answer to "is this username/password
/// pair authorized" — the `AccessGate` trait is that boundary. The default
/// backend is a Postgres user table storing salted SHA-256 digests; a
/// static in-memory gate exists for tests and offline use.
///
/// This gate is access control for a single-user dashboard, not hardened
/// credential storage. SHA-256 is a fast hash; a production system would
/// use a memory-hard password KDF.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;

use postgres::Client;

use crate::model::AuthError;

// ---------------------------------------------------------------------------
// Access gate boundary
// ---------------------------------------------------------------------------

/// Opaque capability check: `Ok(true)` means the pair is authorized.
/// Backend failures are errors, a wrong password is an ordinary `false`.
pub trait AccessGate {
    fn authorize(&self, username: &str, password: &str) -> Result<bool, AuthError>;
}

// ---------------------------------------------------------------------------
// Credential hashing
// ---------------------------------------------------------------------------

/// Hex SHA-256 digest of `salt` followed by `secret`.
pub fn hash_credential(secret: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(secret.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Per-user salt. Salts are stored beside the digest and need to be unique,
/// not secret; the creation timestamp mixed with the username is enough.
fn generate_salt(username: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    hash_credential(username, &nanos.to_string())
}

// ---------------------------------------------------------------------------
// Postgres-backed store
// ---------------------------------------------------------------------------

/// Credential store backed by the `dashboard_users` table.
pub struct PgCredentialStore {
    client: Mutex<Client>,
}

impl PgCredentialStore {
    pub fn new(client: Client) -> PgCredentialStore {
        PgCredentialStore { client: Mutex::new(client) }
    }

    /// Creates the user table if it does not exist yet.
    pub fn ensure_schema(&self) -> Result<(), AuthError> {
        let mut client = self.client.lock().unwrap();
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS dashboard_users (
                    username TEXT PRIMARY KEY,
                    salt     TEXT NOT NULL,
                    digest   TEXT NOT NULL
                )",
            )
            .map_err(|e| AuthError::Database(e.to_string()))
    }

    /// Registers a new user. Returns `false` when the username is taken.
    pub fn add_user(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let salt = generate_salt(username);
        let digest = hash_credential(password, &salt);
        let mut client = self.client.lock().unwrap();
        let inserted = client
            .execute(
                "INSERT INTO dashboard_users (username, salt, digest)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (username) DO NOTHING",
                &[&username, &salt, &digest],
            )
            .map_err(|e| AuthError::Database(e.to_string()))?;
        Ok(inserted == 1)
    }

    /// All registered usernames, for administrative inspection. Salts and
    /// digests are not exposed.
    pub fn list_users(&self) -> Result<Vec<String>, AuthError> {
        let mut client = self.client.lock().unwrap();
        let rows = client
            .query("SELECT username FROM dashboard_users ORDER BY username", &[])
            .map_err(|e| AuthError::Database(e.to_string()))?;
        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    /// Removes a user. Returns `false` when no such user existed.
    pub fn remove_user(&self, username: &str) -> Result<bool, AuthError> {
        let mut client = self.client.lock().unwrap();
        let deleted = client
            .execute("DELETE FROM dashboard_users WHERE username = $1", &[&username])
            .map_err(|e| AuthError::Database(e.to_string()))?;
        Ok(deleted == 1)
    }
}

impl AccessGate for PgCredentialStore {
    fn authorize(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let mut client = self.client.lock().unwrap();
        let row = client
            .query_opt(
                "SELECT salt, digest FROM dashboard_users WHERE username = $1",
                &[&username],
            )
            .map_err(|e| AuthError::Database(e.to_string()))?;

        match row {
            Some(row) => {
                let salt: String = row.get(0);
                let digest: String = row.get(1);
                Ok(hash_credential(password, &salt) == digest)
            }
            None => Ok(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Static in-memory gate
// ---------------------------------------------------------------------------

/// In-memory gate with the same hashing scheme, for tests and for running
/// the dashboard without a database.
pub struct StaticGate {
    users: HashMap<String, (String, String)>, // username -> (salt, digest)
}

impl StaticGate {
    pub fn new() -> StaticGate {
        StaticGate { users: HashMap::new() }
    }

    pub fn with_user(username: &str, password: &str) -> StaticGate {
        let mut gate = StaticGate::new();
        gate.add_user(username, password);
        gate
    }

    pub fn add_user(&mut self, username: &str, password: &str) -> bool {
        if self.users.contains_key(username) {
            return false;
        }
        let salt = generate_salt(username);
        let digest = hash_credential(password, &salt);
        self.users.insert(username.to_string(), (salt, digest));
        true
    }
}

impl Default for StaticGate {
    fn default() -> Self {
        StaticGate::new()
    }
}

impl AccessGate for StaticGate {
    fn authorize(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        Ok(self
            .users
            .get(username)
            .map(|(salt, digest)| hash_credential(password, salt) == *digest)
            .unwrap_or(false))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_for_same_secret_and_salt() {
        let a = hash_credential("hunter2", "salt");
        let b = hash_credential("hunter2", "salt");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64, "hex SHA-256 digest is 64 characters");
    }

    #[test]
    fn test_hash_differs_across_salts() {
        assert_ne!(hash_credential("hunter2", "a"), hash_credential("hunter2", "b"));
    }

    #[test]
    fn test_static_gate_authorizes_correct_credentials() {
        let gate = StaticGate::with_user("alice", "hunter2");
        assert_eq!(gate.authorize("alice", "hunter2").unwrap(), true);
    }

    #[test]
    fn test_static_gate_rejects_wrong_password_as_false_not_error() {
        let gate = StaticGate::with_user("alice", "hunter2");
        assert_eq!(gate.authorize("alice", "wrong").unwrap(), false);
    }

    #[test]
    fn test_static_gate_rejects_unknown_user() {
        let gate = StaticGate::with_user("alice", "hunter2");
        assert_eq!(gate.authorize("bob", "hunter2").unwrap(), false);
    }

    #[test]
    fn test_static_gate_refuses_duplicate_usernames() {
        let mut gate = StaticGate::with_user("alice", "hunter2");
        assert!(!gate.add_user("alice", "other"));
        assert_eq!(
            gate.authorize("alice", "hunter2").unwrap(),
            true,
            "original credentials must survive a duplicate sign-up"
        );
    }
}
