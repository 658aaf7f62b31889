//! HTTP-level integration tests for membership endpoints: add-member with
//! retroactive activity attachment, and bulk advance updates.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, mint_token, patch_json, post_json, seed_user};
use sqlx::PgPool;

/// Seed an owner, mint their token, and create a group; returns
/// (owner_id, token, group_id).
async fn setup_group(pool: &PgPool) -> (i64, String, i64) {
    let owner = seed_user(pool, "Alice").await;
    let token = mint_token(owner);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/group",
        &token,
        serde_json::json!({"name": "Member Trip"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (owner, token, json["id"].as_i64().unwrap())
}

// ---------------------------------------------------------------------------
// Add member
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_member_by_user_id(pool: PgPool) {
    let (_owner, token, group_id) = setup_group(&pool).await;
    let bob = seed_user(&pool, "Bob").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({"userId": bob}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["groupId"], group_id);
    assert_eq!(json["userId"], bob);
    assert_eq!(json["userName"], "Bob");
    assert_eq!(json["processedActivities"].as_array().unwrap().len(), 0);
    assert!(json["addedAt"].is_string());

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/group/detail/{group_id}"), &token).await;
    let detail = body_json(response).await;
    assert_eq!(detail["groupUsers"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_member_duplicate_returns_409(pool: PgPool) {
    let (_owner, token, group_id) = setup_group(&pool).await;
    let bob = seed_user(&pool, "Bob").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({"userId": bob}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({"userId": bob}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "User is already a member of this group");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_member_by_user_name(pool: PgPool) {
    let (_owner, token, group_id) = setup_group(&pool).await;
    let bob = seed_user(&pool, "Bob Tam").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({"userName": "Bob Tam"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["userId"], bob);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_member_unknown_name_returns_404(pool: PgPool) {
    let (_owner, token, group_id) = setup_group(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({"userName": "No Such Person"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "User not found with name: No Such Person");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_member_without_id_or_name_returns_400(pool: PgPool) {
    let (_owner, token, group_id) = setup_group(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Either userId or userName must be provided");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_member_attaches_to_activities_idempotently(pool: PgPool) {
    let (owner, token, group_id) = setup_group(&pool).await;
    let bob = seed_user(&pool, "Bob").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/group/activity",
        &token,
        serde_json::json!({
            "groupId": group_id,
            "name": "Hotel",
            "isBalance": false,
            "payers": [{"userId": owner, "paymentAmount": 100.0}],
            "senders": [{"userId": owner, "amount": 100.0}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let activity_id = body_json(response).await["id"].as_i64().unwrap();

    // Attach Bob plus the already-present owner; only Bob's row is new.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({
            "userId": bob,
            "groupActivities": [{
                "groupActivityId": activity_id,
                "senders": [
                    {"userId": bob, "amount": 50.0},
                    {"userId": owner, "amount": 999.0}
                ]
            }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let processed = json["processedActivities"].as_array().unwrap();
    assert_eq!(processed.len(), 1);
    assert_eq!(processed[0]["groupActivityId"], activity_id);
    assert_eq!(processed[0]["name"], "Hotel");
    // The stored total is reported untouched by the attachment.
    assert_eq!(processed[0]["totalAmount"], 100.0);

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/group/activity/detail/{activity_id}"),
        &token,
    )
    .await;
    let detail = body_json(response).await;
    let senders = detail["senders"].as_array().unwrap();
    assert_eq!(senders.len(), 2);
    // The owner's original share survives; the 999 was never written.
    assert_eq!(senders[0]["userId"], owner);
    assert_eq!(senders[0]["amount"], 100.0);
    assert_eq!(senders[1]["userId"], bob);
    assert_eq!(senders[1]["amount"], 50.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_member_attachment_from_other_group_returns_404(pool: PgPool) {
    let (owner, token, group_id) = setup_group(&pool).await;
    let bob = seed_user(&pool, "Bob").await;

    // An activity that lives in a different group.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/group",
        &token,
        serde_json::json!({"name": "Elsewhere"}),
    )
    .await;
    let other_group = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/group/activity",
        &token,
        serde_json::json!({
            "groupId": other_group,
            "name": "Foreign",
            "isBalance": false,
            "senders": [{"userId": owner, "amount": 10.0}]
        }),
    )
    .await;
    let foreign_activity = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({
            "userId": bob,
            "groupActivities": [{
                "groupActivityId": foreign_activity,
                "senders": [{"userId": bob, "amount": 5.0}]
            }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The whole transaction rolled back: Bob never joined.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/group/detail/{group_id}"), &token).await;
    let detail = body_json(response).await;
    assert_eq!(detail["groupUsers"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Update advance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_advance_sets_values(pool: PgPool) {
    let (_owner, token, group_id) = setup_group(&pool).await;
    let bob = seed_user(&pool, "Bob").await;
    let carol = seed_user(&pool, "Carol").await;

    for user_id in [bob, carol] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/group/add-member/{group_id}"),
            &token,
            serde_json::json!({"userId": user_id}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/group/update-advance/{group_id}"),
        &token,
        serde_json::json!({
            "userUpdate": [
                {"userId": bob, "advance": 200.0},
                {"userId": carol, "advance": 0.0}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["groupId"], group_id);
    let updated = json["updated"].as_array().unwrap();
    assert_eq!(updated.len(), 2);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/group/detail/{group_id}"), &token).await;
    let detail = body_json(response).await;
    let users = detail["groupUsers"].as_array().unwrap();
    assert_eq!(users[0]["advance"], 200.0);
    assert_eq!(users[1]["advance"], 0.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_advance_empty_list_returns_400(pool: PgPool) {
    let (_owner, token, group_id) = setup_group(&pool).await;

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/group/update-advance/{group_id}"),
        &token,
        serde_json::json!({"userUpdate": []}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Choose at least one member to update");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_advance_non_key_member_returns_403(pool: PgPool) {
    let (_owner, token, group_id) = setup_group(&pool).await;
    let bob = seed_user(&pool, "Bob").await;
    let bob_token = mint_token(bob);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({"userId": bob}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Bob is a member but not the key member.
    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/group/update-advance/{group_id}"),
        &bob_token,
        serde_json::json!({"userUpdate": [{"userId": bob, "advance": 50.0}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Nothing was written.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/group/detail/{group_id}"), &token).await;
    let detail = body_json(response).await;
    assert!(detail["groupUsers"][0]["advance"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_advance_skips_non_members(pool: PgPool) {
    let (_owner, token, group_id) = setup_group(&pool).await;
    let bob = seed_user(&pool, "Bob").await;
    let stranger = seed_user(&pool, "Stranger").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/group/add-member/{group_id}"),
        &token,
        serde_json::json!({"userId": bob}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // One matching entry is enough; the stranger is skipped.
    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/group/update-advance/{group_id}"),
        &token,
        serde_json::json!({
            "userUpdate": [
                {"userId": bob, "advance": 75.0},
                {"userId": stranger, "advance": 75.0}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let updated = json["updated"].as_array().unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0], bob);

    // All entries missing the group is a validation failure.
    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/group/update-advance/{group_id}"),
        &token,
        serde_json::json!({"userUpdate": [{"userId": stranger, "advance": 10.0}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No matching members in this group");
}
