use anyhow::bail;
use kih_core::enums::Collection;
use kih_db::{DocumentStore, Query};
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocCommands;
use crate::cli::subcommands::doc::DocQueryArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_enum, parse_object, parse_order, parse_pair};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DocAck {
    collection: &'static str,
    id: String,
    action: &'static str,
}

/// Handle `kih doc`.
pub async fn handle(
    action: &DocCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.service.store();
    match action {
        DocCommands::Get { collection, id } => {
            let collection = collection_of(collection)?;
            let Some(doc) = store.get_by_id(collection.as_str(), id).await? else {
                bail!("{} {id} not found", collection.as_str());
            };
            output(&doc.into_value(), flags.format)
        }
        DocCommands::Query(args) => {
            let collection = collection_of(&args.collection)?;
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let query = build_query(args, limit)?;
            let docs: Vec<Value> = store
                .get_by_query(collection.as_str(), &query)
                .await?
                .into_iter()
                .map(kih_db::StoredDocument::into_value)
                .collect();
            output(&docs, flags.format)
        }
        DocCommands::Add { collection, json } => {
            let collection = collection_of(collection)?;
            let id = store.add(collection.as_str(), parse_object(json)?).await?;
            output(&ack(collection, id, "added"), flags.format)
        }
        DocCommands::Update {
            collection,
            id,
            json,
        } => {
            let collection = collection_of(collection)?;
            store.update(collection.as_str(), id, parse_object(json)?).await?;
            output(&ack(collection, id.clone(), "updated"), flags.format)
        }
        DocCommands::Delete { collection, id } => {
            let collection = collection_of(collection)?;
            store.remove(collection.as_str(), id).await?;
            output(&ack(collection, id.clone(), "deleted"), flags.format)
        }
    }
}

fn collection_of(raw: &str) -> anyhow::Result<Collection> {
    parse_enum::<Collection>(raw, "collection")
}

const fn ack(collection: Collection, id: String, action: &'static str) -> DocAck {
    DocAck {
        collection: collection.as_str(),
        id,
        action,
    }
}

/// Constraints apply in flag order: equality, containment, ordering, limit.
fn build_query(args: &DocQueryArgs, limit: usize) -> anyhow::Result<Query> {
    let mut query = Query::new();
    for raw in &args.where_eq {
        let (field, value) = parse_pair(raw)?;
        query = query.where_eq(field, value);
    }
    for raw in &args.contains {
        let (field, value) = parse_pair(raw)?;
        query = query.array_contains(field, value);
    }
    if let Some(raw) = &args.order {
        let (field, direction) = parse_order(raw)?;
        query = query.order_by(field, direction);
    }
    Ok(query.limit(u32::try_from(limit).unwrap_or(u32::MAX)))
}

#[cfg(test)]
mod tests {
    use kih_db::Direction;
    use kih_db::document::Constraint;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn query_keeps_constraint_order() {
        let args = DocQueryArgs {
            collection: "kosHomestay".into(),
            where_eq: vec!["type=kos".into(), "isVerified=true".into()],
            contains: vec!["facilities=WiFi".into()],
            order: Some("pricePerMonth:desc".into()),
        };
        let query = build_query(&args, 5).unwrap();
        let expected = Query::new()
            .where_eq("type", "kos")
            .where_eq("isVerified", true)
            .array_contains("facilities", "WiFi")
            .order_by("pricePerMonth", Direction::Desc)
            .limit(5);
        assert_eq!(query, expected);
        assert_eq!(query.constraints().len(), 5);
        assert!(matches!(query.constraints()[4], Constraint::Limit(5)));
    }

    #[test]
    fn bad_pair_is_rejected() {
        let args = DocQueryArgs {
            collection: "replies".into(),
            where_eq: vec!["postId".into()],
            contains: vec![],
            order: None,
        };
        assert!(build_query(&args, 10).is_err());
    }

    #[test]
    fn unknown_collection_is_rejected() {
        assert!(collection_of("users").is_err());
        assert_eq!(collection_of("forumPosts").unwrap(), Collection::ForumPosts);
    }

    #[tokio::test]
    async fn raw_round_trip_through_store() {
        let service = crate::pages::test_support::service().await;
        let store = service.store();
        let id = store
            .add("locations", parse_object(r#"{"name":"BRI Pare","category":"bank"}"#).unwrap())
            .await
            .unwrap();
        let doc = store.get_by_id("locations", &id).await.unwrap().unwrap();
        let value = doc.into_value();
        assert_eq!(value["name"], json!("BRI Pare"));
        assert_eq!(value["id"], json!(id));
    }
}
