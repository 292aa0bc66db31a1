use crate::output::print_json;
use anyhow::Context;
use deckhand_client::{ActionApi, SyncCoordinator};
use deckhand_core::store::Removal;

pub async fn run(server: &str, id: u32, json: bool) -> anyhow::Result<()> {
    let mut coordinator = SyncCoordinator::new(ActionApi::new(server));
    coordinator
        .refresh()
        .await
        .context("failed to fetch actions")?;
    let removal = coordinator
        .request_deletion(id)
        .await
        .with_context(|| format!("failed to delete action {id}"))?;

    if json {
        return print_json(&serde_json::json!({
            "id": id,
            "removed": removal == Removal::Removed,
        }));
    }

    match removal {
        Removal::Removed => println!("Deleted action {id}"),
        Removal::Absent => println!("Deleted action {id} (was not in the local view)"),
    }
    Ok(())
}
