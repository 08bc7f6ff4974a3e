//! End-to-end scenarios walking the service the way a client would.
//!
//! Each scenario seeds a handful of accounts, then drives the API through
//! a full flow and checks what a caller observes.

mod common;

use serde_json::{json, Value};

use common::TestHarness;

/// Background: the service holds three known accounts.
async fn given_seeded_accounts(harness: &TestHarness) -> Vec<Value> {
    let mut created = Vec::new();
    for (name, balance, active) in [
        ("John Doe", "100.00", 1),
        ("Jane Roe", "2,500", 1),
        ("Hugh Jass", "0.5", 0),
    ] {
        created.push(
            harness
                .create_account(json!({"name": name, "balance": balance, "active": active}))
                .await,
        );
    }
    created
}

#[tokio::test]
async fn scenario_home_page() {
    let harness = TestHarness::new();

    // When I visit the home page
    let response = harness.server.get("/").await;

    // Then I should see the service name
    response.assert_status_ok();
    assert!(response.text().contains("Banking System REST API Service"));
}

#[tokio::test]
async fn scenario_create_then_list() {
    let harness = TestHarness::new();
    let seeded = given_seeded_accounts(&harness).await;
    let next_id = harness.next_id();

    // When I post a new account
    let created = harness
        .create_account(json!({"name": "Mary Major", "balance": 75, "active": 1}))
        .await;

    // Then it receives the next id
    assert_eq!(created["id"], next_id.as_str());

    // And the listing contains every account
    let listed: Vec<Value> = harness.server.get("/accounts").await.json();
    assert_eq!(listed.len(), seeded.len() + 1);
    assert!(listed.iter().any(|a| a["id"] == created["id"]));
}

#[tokio::test]
async fn scenario_search_by_name() {
    let harness = TestHarness::new();
    given_seeded_accounts(&harness).await;

    // When I search for "Jane Roe"
    let response = harness
        .server
        .get("/accounts")
        .add_query_param("name", "Jane Roe")
        .await;

    // Then only her account is returned
    response.assert_status_ok();
    let found: Vec<Value> = response.json();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["balance"], "2500.00");
}

#[tokio::test]
async fn scenario_read_most_recent_account() {
    let harness = TestHarness::new();
    given_seeded_accounts(&harness).await;

    // When I read the account just below the counter
    let next: u64 = harness.next_id().parse().unwrap();
    let response = harness.server.get(&format!("/accounts/{}", next - 1)).await;

    // Then I see the last seeded account
    response.assert_status_ok();
    let account: Value = response.json();
    assert_eq!(account["name"], "Hugh Jass");
    assert_eq!(account["balance"], "0.50");
    assert_eq!(account["active"], "0");
}

#[tokio::test]
async fn scenario_deactivate_account() {
    let harness = TestHarness::new();
    let seeded = given_seeded_accounts(&harness).await;
    let id = seeded[0]["id"].as_str().unwrap();

    // When I deactivate John's account
    harness
        .server
        .put(&format!("/accounts/{id}/deactivate"))
        .await
        .assert_status_ok();

    // Then reading it shows the account inactive with its balance kept
    let account: Value = harness.server.get(&format!("/accounts/{id}")).await.json();
    assert_eq!(account["active"], "0");
    assert_eq!(account["balance"], "100.00");
}

#[tokio::test]
async fn scenario_update_account() {
    let harness = TestHarness::new();
    let seeded = given_seeded_accounts(&harness).await;
    let id = seeded[1]["id"].as_str().unwrap();

    // When I change Jane's balance
    let response = harness
        .server
        .put(&format!("/accounts/{id}"))
        .json(&json!({"name": "Jane Roe", "balance": "3,000.25", "active": 1}))
        .await;

    // Then the new balance is stored
    response.assert_status_ok();
    let account: Value = harness.server.get(&format!("/accounts/{id}")).await.json();
    assert_eq!(account["balance"], "3000.25");
    assert_eq!(account["created_time"], seeded[1]["created_time"]);
}

#[tokio::test]
async fn scenario_delete_account() {
    let harness = TestHarness::new();
    let seeded = given_seeded_accounts(&harness).await;
    let id = seeded[2]["id"].as_str().unwrap();

    // When I delete Hugh's account
    harness
        .server
        .delete(&format!("/accounts/{id}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    // Then it no longer appears in the listing
    let listed: Vec<Value> = harness.server.get("/accounts").await.json();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|a| a["id"] != id));
}
