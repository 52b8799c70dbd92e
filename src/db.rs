/// Database connection helper for the credential store.
///
/// The only database this service touches is the dashboard user table;
/// the temperature data itself lives in memory for the process lifetime.

use postgres::{Client, NoTls};
use std::env;

use crate::model::AuthError;

/// Connects using `DATABASE_URL` from the environment (a `.env` file is
/// honored if present).
pub fn connect() -> Result<Client, AuthError> {
    dotenv::dotenv().ok();
    let database_url = env::var("DATABASE_URL").map_err(|_| AuthError::MissingEnv("DATABASE_URL"))?;
    Client::connect(&database_url, NoTls).map_err(|e| AuthError::Database(e.to_string()))
}
