use crate::output::print_json;
use anyhow::Context;
use deckhand_client::ActionApi;
use deckhand_core::ActionRecord;

pub async fn run(server: &str, id: u32, json: bool) -> anyhow::Result<()> {
    let api = ActionApi::new(server);
    let record: ActionRecord = api
        .get_action(id)
        .await
        .with_context(|| format!("failed to fetch action {id}"))?
        .into();

    if json {
        return print_json(&record);
    }

    println!("Action {}", record.id);
    println!("  repository: {}", record.repo_url);
    println!("  image:      {}", record.image);
    println!("  state:      {}", record.state_label());
    Ok(())
}
