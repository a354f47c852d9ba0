//! Ownership check in front of joke deletion.

use thiserror::Error;
use uuid::Uuid;

use crate::repository::{DeleteError, Store};

#[derive(Debug, Error)]
pub enum OwnershipError {
    /// No joke with that id (including ids that aren't uuids)
    #[error("Cant find that joke")]
    NotFound,

    #[error("Joke {joke_id} isn't owned by {user_id}")]
    NotOwner { joke_id: Uuid, user_id: Uuid },

    /// The checks passed but the store failed to look up or remove the row
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// Delete `joke_id` on behalf of `user_id`.
///
/// The joke must exist and belong to the user. The existence check and the
/// delete are separate statements, so a concurrent delete shows up as
/// `Delete(DeleteError::NotFound)`.
pub async fn delete_owned_joke(
    store: &dyn Store,
    joke_id: &str,
    user_id: Uuid,
) -> Result<Uuid, OwnershipError> {
    let Ok(joke_id) = Uuid::parse_str(joke_id) else {
        return Err(OwnershipError::NotFound);
    };

    let joke = store
        .find_joke(joke_id)
        .await
        .map_err(DeleteError::from)?
        .ok_or(OwnershipError::NotFound)?;

    if joke.jokester_id != user_id {
        return Err(OwnershipError::NotOwner { joke_id, user_id });
    }

    store.delete_joke(joke_id).await?;
    Ok(joke_id)
}
