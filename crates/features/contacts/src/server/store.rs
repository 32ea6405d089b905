use crate::domain::{Contact, ContactDraft};
use crate::error::{ContactError, ContactErrorExt};
use cdesk_database::{Database, DatabaseSession};
use cdesk_kernel::domain::constants::{CONTACT, SEQUENCE};
use surrealdb::types::SurrealValue;


/// A `contact` row with its numeric record key flattened into `id`.
#[derive(Debug, SurrealValue)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
    message: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self { id: row.id, name: row.name, email: row.email, message: row.message }
    }
}

/// Data-access layer over the `contact` table.
#[derive(Debug, Clone)]
pub struct ContactStore {
    db: Database,
}

impl ContactStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens a scoped session; it is released when the returned value is dropped.
    #[must_use]
    pub fn session(&self) -> ContactSession {
        ContactSession { session: self.db.session() }
    }
}

/// Contact operations bound to one database session.
#[derive(Debug)]
pub struct ContactSession {
    session: DatabaseSession,
}

impl ContactSession {
    /// All contacts in identifier order.
    ///
    /// # Errors
    /// [`ContactError::Store`] when the query fails.
    pub async fn find_all(&self) -> Result<Vec<Contact>, ContactError> {
        let rows = self
            .session
            .query(format!(
                "SELECT record::id(id) AS id, name, email, message FROM {CONTACT} ORDER BY id"
            ))
            .await
            .context("Listing contacts")?
            .take::<Vec<ContactRow>>(0)
            .context("Reading contacts")?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    /// # Errors
    /// [`ContactError::Store`] when the query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, ContactError> {
        let rows = self
            .session
            .query(format!(
                "SELECT record::id(id) AS id, name, email, message FROM {CONTACT}:{id}"
            ))
            .await
            .context("Finding contact")?
            .take::<Vec<ContactRow>>(0)
            .context("Reading contact")?;

        Ok(rows.into_iter().next().map(Contact::from))
    }

    /// Persists a new contact under the next identifier of `sequence:contact`.
    ///
    /// # Errors
    /// [`ContactError::Store`] when the counter or the insert is rejected. An identifier
    /// taken by a failed insert is not reused.
    pub async fn create(&self, draft: ContactDraft) -> Result<Contact, ContactError> {
        let id = self.next_id().await?;

        self.session
            .query(format!(
                "CREATE {CONTACT}:{id} CONTENT {{ name: $name, email: $email, message: $message }} RETURN NONE"
            ))
            .bind(("name", draft.name.clone()))
            .bind(("email", draft.email.clone()))
            .bind(("message", draft.message.clone()))
            .await
            .context("Creating contact")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Creating contact")?;

        Ok(Contact::new(id, draft))
    }

    /// Replaces all three fields of an existing contact.
    ///
    /// # Errors
    /// [`ContactError::NotFound`] when no contact has `id`; [`ContactError::Store`] when the
    /// update is rejected.
    pub async fn update_by_id(&self, id: i64, draft: ContactDraft) -> Result<Contact, ContactError> {
        self.ensure_exists(id).await.context("Updating contact")?;

        self.session
            .query(format!(
                "UPDATE {CONTACT}:{id} SET name = $name, email = $email, message = $message RETURN NONE"
            ))
            .bind(("name", draft.name.clone()))
            .bind(("email", draft.email.clone()))
            .bind(("message", draft.message.clone()))
            .await
            .context("Updating contact")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Updating contact")?;

        Ok(Contact::new(id, draft))
    }

    /// # Errors
    /// [`ContactError::NotFound`] when no contact has `id`; [`ContactError::Store`] when the
    /// delete is rejected.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ContactError> {
        self.ensure_exists(id).await.context("Deleting contact")?;

        self.session
            .query(format!("DELETE {CONTACT}:{id}"))
            .await
            .context("Deleting contact")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Deleting contact")?;

        Ok(())
    }

    async fn ensure_exists(&self, id: i64) -> Result<(), ContactError> {
        match self.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ContactError::NotFound { id, context: None }),
        }
    }

    async fn next_id(&self) -> Result<i64, ContactError> {
        let id = self
            .session
            // The new counter value is the result of the second statement.
            .query(format!(
                "LET $seq = UPSERT ONLY {SEQUENCE}:{CONTACT} SET last = (last ?? 0) + 1;
                RETURN $seq.last;"
            ))
            .await
            .context("Advancing contact sequence")?
            .take::<Option<i64>>(1)
            .context("Reading contact sequence")?;

        id.ok_or_else(|| ContactError::Internal {
            message: "Sequence returned no value".into(),
            context: Some(format!("{SEQUENCE}:{CONTACT}").into()),
        })
    }
}
