/// Integration tests: views over the in-memory store, driven like a template
mod test_utilities;

use relationship_view::prelude::*;
use std::time::Duration;
use test_utilities::harness::{id, named, Harness, Mode, MODES};
use test_utilities::mocks::*;
use tokio::task::LocalSet;

const LATENCY: Duration = Duration::from_millis(20);

#[tokio::test]
async fn test_classic_sync_belongs_to() {
    LocalSet::new()
        .run_until(async {
            for mode in MODES {
                let store = MemoryStore::new();
                store.push(named("person:1", "Chris").with_relationship(
                    "bestDog",
                    RelationshipData::belongs_to(true, Some(id("pet:1"))),
                ));
                let pet = store.push(named("pet:1", "Shen").with_relationship(
                    "bestHuman",
                    RelationshipData::belongs_to(false, Some(id("person:1"))),
                ));

                let mut harness = Harness::render(&store, &pet, "bestHuman", mode, "has no human!");
                assert_eq!(harness.text(), "Chris", "{:?}", mode);

                store.set_one(&pet, "bestHuman", None).unwrap();
                harness.settled().await;

                assert_eq!(harness.text(), "has no human!", "{:?}", mode);
                assert_eq!(store.fetch_count(), 0);
            }
        })
        .await;
}

#[tokio::test]
async fn test_classic_async_belongs_to_sideloaded() {
    LocalSet::new()
        .run_until(async {
            for mode in MODES {
                let store = MemoryStore::new();
                let person = store.push(named("person:1", "Chris").with_relationship(
                    "bestDog",
                    RelationshipData::belongs_to(true, Some(id("pet:1"))),
                ));
                store.push(named("pet:1", "Shen"));

                let mut harness = Harness::render(&store, &person, "bestDog", mode, "has no pet!");
                assert_eq!(harness.text(), "Shen");

                harness.settled().await;
                assert_eq!(harness.renders, 1, "identical load result must not re-render");

                store.set_one(&person, "bestDog", None).unwrap();
                harness.settled().await;

                assert_eq!(harness.text(), "has no pet!");
                assert_eq!(store.fetch_count(), 0, "{:?}", mode);
            }
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_classic_async_belongs_to_fetched() {
    LocalSet::new()
        .run_until(async {
            for mode in MODES {
                let store = MemoryStore::with_fetch_policy(FetchPolicy::with_latency(LATENCY));
                let person = store.push(named("person:1", "Chris").with_relationship(
                    "bestDog",
                    RelationshipData::belongs_to(true, Some(id("pet:1"))),
                ));
                store.stage_remote(named("pet:1", "Shen"));

                let mut harness = Harness::render(&store, &person, "bestDog", mode, "has no pet!");
                assert_eq!(harness.text(), "has no pet!");
                assert!(harness.view.is_loading());

                tokio::time::sleep(LATENCY).await;
                harness.settled().await;

                assert_eq!(harness.text(), "Shen", "{:?}", mode);
                assert_eq!(store.fetch_count(), 1, "fetch must happen exactly once");

                store.set_one(&person, "bestDog", None).unwrap();
                harness.settled().await;

                assert_eq!(harness.text(), "has no pet!");
                assert_eq!(store.fetch_count(), 1);
            }
        })
        .await;
}

#[tokio::test]
async fn test_classic_sync_has_many() {
    LocalSet::new()
        .run_until(async {
            for mode in MODES {
                let store = MemoryStore::new();
                store.push(named("person:2", "John"));
                let renee = store.push(named("person:3", "Renee"));
                let person = store.push(named("person:1", "Chris").with_relationship(
                    "parents",
                    RelationshipData::has_many(false, vec![id("person:2")]),
                ));

                let mut harness =
                    Harness::render(&store, &person, "parents", mode, "has no parents!");
                assert_eq!(harness.text(), "John|");

                store.push_related(&person, "parents", &renee).unwrap();
                harness.settled().await;
                assert_eq!(harness.text(), "John|Renee|", "{:?}", mode);

                store.set_many(&person, "parents", &[]).unwrap();
                harness.settled().await;
                assert_eq!(harness.text(), "has no parents!");
            }
        })
        .await;
}

#[tokio::test]
async fn test_classic_async_has_many_sideloaded() {
    LocalSet::new()
        .run_until(async {
            for mode in MODES {
                let store = MemoryStore::new();
                store.push(named("person:2", "Chris"));
                let william = store.push(named("person:3", "William"));
                let person = store.push(named("person:1", "James").with_relationship(
                    "children",
                    RelationshipData::has_many(true, vec![id("person:2")]),
                ));

                let mut harness =
                    Harness::render(&store, &person, "children", mode, "has no children!");
                assert_eq!(harness.text(), "Chris|");

                store.push_related(&person, "children", &william).unwrap();
                harness.settled().await;
                assert_eq!(harness.text(), "Chris|William|", "{:?}", mode);

                store.set_many(&person, "children", &[]).unwrap();
                harness.settled().await;
                assert_eq!(harness.text(), "has no children!");
                assert_eq!(store.fetch_count(), 0);
            }
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_classic_async_has_many_fetched() {
    LocalSet::new()
        .run_until(async {
            for mode in MODES {
                let store = MemoryStore::with_fetch_policy(FetchPolicy::with_latency(LATENCY));
                store.stage_remote(named("person:2", "Chris"));
                let william = store.push(named("person:3", "William"));
                let person = store.push(named("person:1", "James").with_relationship(
                    "children",
                    RelationshipData::has_many(true, vec![id("person:2")]),
                ));

                let mut harness =
                    Harness::render(&store, &person, "children", mode, "has no children!");
                assert_eq!(harness.text(), "has no children!");

                tokio::time::sleep(LATENCY).await;
                harness.settled().await;
                assert_eq!(harness.text(), "Chris|", "{:?}", mode);

                store.push_related(&person, "children", &william).unwrap();
                harness.settled().await;
                assert_eq!(harness.text(), "Chris|William|");

                store.set_many(&person, "children", &[]).unwrap();
                harness.settled().await;
                assert_eq!(harness.text(), "has no children!");
                assert_eq!(store.fetch_count(), 1);
            }
        })
        .await;
}

#[tokio::test]
async fn test_repush_of_subscribed_record_rerenders() {
    LocalSet::new()
        .run_until(async {
            for mode in MODES {
                let store = MemoryStore::new();
                store.push(named("pet:1", "Shen"));
                store.push(named("pet:2", "Rex"));
                let person = store.push(named("person:1", "Chris").with_relationship(
                    "bestDog",
                    RelationshipData::belongs_to(false, Some(id("pet:1"))),
                ));

                let mut harness = Harness::render(&store, &person, "bestDog", mode, "has no pet!");
                assert_eq!(harness.text(), "Shen");

                store.push(named("person:1", "Chris").with_relationship(
                    "bestDog",
                    RelationshipData::belongs_to(false, Some(id("pet:2"))),
                ));
                harness.settled().await;

                assert_eq!(harness.text(), "Rex", "{:?}", mode);
                assert_eq!(harness.renders, 2);
            }
        })
        .await;
}

#[tokio::test]
async fn test_fetch_failure_reaches_host() {
    LocalSet::new()
        .run_until(async {
            let store = MemoryStore::with_fetch_policy(FetchPolicy::failing("ServerError"));
            let person = store.push(named("person:1", "Chris").with_relationship(
                "bestDog",
                RelationshipData::belongs_to(true, Some(id("pet:1"))),
            ));
            store.stage_remote(named("pet:1", "Shen"));

            let mut harness =
                Harness::render(&store, &person, "bestDog", Mode::Value, "has no pet!");
            harness.settled().await;

            assert_eq!(harness.text(), "has no pet!");
            assert_eq!(harness.failures.len(), 1);
            assert!(harness.failures[0].to_string().contains("ServerError"));
            assert!(!harness.view.is_loading());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_dropping_view_mid_load_releases_everything() {
    LocalSet::new()
        .run_until(async {
            let store = MemoryStore::with_fetch_policy(FetchPolicy::with_latency(LATENCY));
            let person = store.push(named("person:1", "Chris").with_relationship(
                "bestDog",
                RelationshipData::belongs_to(true, Some(id("pet:1"))),
            ));
            store.stage_remote(named("pet:1", "Shen"));

            let harness = Harness::render(&store, &person, "bestDog", Mode::Value, "has no pet!");
            assert!(store.notifier().is_observed(&person, "bestDog"));
            drop(harness);

            tokio::time::sleep(LATENCY * 2).await;
            tokio::task::yield_now().await;

            assert_eq!(store.notifier().registration_count(), 0);
            assert_eq!(store.fetch_count(), 0, "cancelled load must not fetch");
            assert!(store.peek(&id("pet:1")).is_none());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_use_case_over_fixture_store() {
    LocalSet::new()
        .run_until(async {
            let config: ConfigFile = serde_yaml_ng::from_str(
                r#"
fetch_latency_ms: 20
records:
  - type: person
    id: 1
    attributes: { name: James }
    relationships:
      children: { kind: hasMany, async: true, data: ["person:2", "person:3"] }
remote:
  - type: person
    id: 2
    attributes: { name: Chris }
  - type: person
    id: 3
    attributes: { name: William }
"#,
            )
            .unwrap();
            let store = config.build_store().unwrap();
            let record = store.find(&id("person:1")).unwrap();

            let reporter = MockProgressReporter::new();
            let presenter = MockPresenter::new();
            let use_case =
                FetchRelationshipUseCase::new(reporter.clone(), JsonFormatter::new(), presenter.clone());

            let response = use_case
                .execute(
                    record,
                    store.notifier(),
                    FetchRequest::new("children", false, Duration::from_secs(1)),
                )
                .await
                .unwrap();

            assert_eq!(response.renderings, 2);
            let lines = presenter.get_lines();
            let interim: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
            let last: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
            assert_eq!(interim["loading"], true);
            assert_eq!(last["loading"], false);
            assert_eq!(last["value"][1]["label"], "William");

            let messages = reporter.get_messages();
            assert!(messages.iter().any(|m| m.starts_with("Waiting:")));
            assert!(messages.last().unwrap().starts_with("Completed:"));
        })
        .await;
}
