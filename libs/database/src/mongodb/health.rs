use mongodb::{Database, bson::doc};

use crate::common::{DatabaseError, DatabaseResult};

/// Ping the database; `Err` carries the driver message.
///
/// ```ignore
/// let db = client.database("tasky");
/// check_health(&db).await?;
/// ```
pub async fn check_health(db: &Database) -> DatabaseResult<()> {
    db.run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
