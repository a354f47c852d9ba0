//! Demo data.

use shared_types::NewJoke;

use crate::auth::password;
use crate::repository::Store;

pub const DEMO_USERNAME: &str = "kody";
pub const DEMO_PASSWORD: &str = "twixrox";

const DEMO_JOKES: &[(&str, &str)] = &[
    (
        "Road worker",
        "I never wanted to believe that my Dad was stealing from his job as a road worker. But when I got home, all the signs were there.",
    ),
    (
        "Frisbee",
        "I was wondering why the frisbee was getting bigger, then it hit me.",
    ),
    (
        "Trees",
        "Why do trees seem suspicious on sunny days? Dunno, they're just a bit shady.",
    ),
    (
        "Skeletons",
        "Why don't skeletons ride roller coasters? They don't have the stomach for it.",
    ),
    (
        "Hippos",
        "Why don't you find hippopotamuses hiding in trees? They're really good at it.",
    ),
    (
        "Dinner",
        "What did one plate say to the other plate? Dinner is on me!",
    ),
    (
        "Elevator",
        "My first time using an elevator was an uplifting experience. The second time let me down.",
    ),
];

/// Create the demo user with its jokes. Does nothing if the user already
/// exists, so running it twice doesn't duplicate jokes.
pub async fn run(store: &dyn Store) -> anyhow::Result<()> {
    if store.find_user_by_username(DEMO_USERNAME).await?.is_some() {
        tracing::info!("Demo user {} already exists, skipping seed", DEMO_USERNAME);
        return Ok(());
    }

    let password_hash = password::hash_password(DEMO_PASSWORD)?;
    let user = store.create_user(DEMO_USERNAME, &password_hash).await?;

    for (name, content) in DEMO_JOKES {
        store
            .create_joke(NewJoke {
                jokester_id: user.id,
                name: name.to_string(),
                content: content.to_string(),
            })
            .await?;
    }

    tracing::info!(
        "Seeded demo user {} with {} jokes",
        DEMO_USERNAME,
        DEMO_JOKES.len()
    );
    Ok(())
}
