use sqlx::{Pool, Sqlite};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use Common::utils::log_entry::database::DatabaseEntry;
use crate::portal::utils::sign_in::ExternalIdentity;
use crate::portal::utils::user_profile::{PreferenceUpdate, UserProfile};
use crate::utils::config::Config;
use crate::utils::logging::*;

#[derive(Clone)]
pub struct PreferenceStore {
    pool: Pool<Sqlite>,
}

impl PreferenceStore {
    pub async fn connect(config: &Config) -> Result<Self, LogEntry> {
        Self::open(&config.database_path, config.database_max_connections).await
    }

    pub async fn open(database_path: &str, max_connections: u32) -> Result<Self, LogEntry> {
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|err| error_entry!(DatabaseEntry::ConnectError(database_path.to_string(), err.to_string())))?;
        let store = Self { pool };
        store.prepare_schema().await?;
        Ok(store)
    }

    async fn prepare_schema(&self) -> Result<(), LogEntry> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                name TEXT,
                image TEXT,
                allergies TEXT,
                dislikes TEXT,
                preferences TEXT
            )",
        )
            .execute(&self.pool)
            .await
            .map_err(|err| error_entry!(DatabaseEntry::SchemaError(err.to_string())))?;
        Ok(())
    }

    //First sign-in creates the row from the external identity; later
    //sign-ins leave the stored profile untouched.
    pub async fn ensure_user(&self, identity: &ExternalIdentity) -> Result<(UserProfile, bool), LogEntry> {
        let created = sqlx::query("INSERT OR IGNORE INTO users (email, name, image) VALUES (?, ?, ?)")
            .bind(&identity.email)
            .bind(identity.name.as_deref())
            .bind(identity.picture.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|err| error_entry!(DatabaseEntry::QueryError(err.to_string())))?
            .rows_affected() > 0_u64;
        let profile = self.user_details(&identity.email).await?
            .ok_or(error_entry!(DatabaseEntry::QueryError("User row missing after insert".to_string())))?;
        Ok((profile, created))
    }

    pub async fn user_details(&self, email: &str) -> Result<Option<UserProfile>, LogEntry> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT name, email, image, allergies, dislikes, preferences FROM users WHERE email = ?",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| error_entry!(DatabaseEntry::QueryError(err.to_string())))
    }

    pub async fn update_preferences(&self, update: &PreferenceUpdate) -> Result<bool, LogEntry> {
        let result = sqlx::query("UPDATE users SET allergies = ?, dislikes = ?, preferences = ? WHERE email = ?")
            .bind(update.allergies.as_deref())
            .bind(update.dislikes.as_deref())
            .bind(update.preferences.as_deref())
            .bind(&update.email)
            .execute(&self.pool)
            .await
            .map_err(|err| error_entry!(DatabaseEntry::QueryError(err.to_string())))?;
        Ok(result.rows_affected() > 0_u64)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
