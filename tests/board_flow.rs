mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{acquire_db_lock, read_json, TestApp};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct BoardView {
    id: Uuid,
    department_id: Uuid,
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TaskView {
    id: Uuid,
    board_id: Uuid,
    assignee_id: Option<Uuid>,
    title: String,
    is_completed: bool,
}

async fn seed_department(app: &TestApp) -> Result<Uuid> {
    let company_id = app.create("company", &json!({ "name": "Acme" })).await?;
    app.create(
        "department",
        &json!({ "company_id": company_id, "name": "Product" }),
    )
    .await
}

#[tokio::test]
async fn board_soft_delete_keeps_record_readable() -> Result<()> {
    let _lock = acquire_db_lock().await;
    let app = TestApp::connect().await?;

    let department_id = seed_department(&app).await?;
    let board_id = app
        .create(
            "board",
            &json!({
                "department_id": department_id,
                "name": "Roadmap",
                "description": "Quarterly goals",
            }),
        )
        .await?;
    let other_id = app
        .create(
            "board",
            &json!({ "department_id": department_id, "name": "Support" }),
        )
        .await?;
    let path = format!("/api/board/{board_id}");

    let board: BoardView = read_json(app.get(&path).await?).await?;
    assert_eq!(board.id, board_id);
    assert_eq!(board.department_id, department_id);
    assert_eq!(board.name, "Roadmap");
    assert_eq!(board.description.as_deref(), Some("Quarterly goals"));

    let deleted = app.delete(&path).await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let deleted_again = app.delete(&path).await?;
    assert_eq!(deleted_again.status(), StatusCode::NO_CONTENT);

    let still_readable = app.get(&path).await?;
    assert_eq!(still_readable.status(), StatusCode::OK);

    let active: Vec<BoardView> = read_json(app.get("/api/board").await?).await?;
    let active_ids: Vec<Uuid> = active.iter().map(|board| board.id).collect();
    assert_eq!(active_ids, vec![other_id]);

    let update_deleted = app
        .put_json(
            &path,
            &json!({
                "id": board_id,
                "department_id": department_id,
                "name": "Revived",
            }),
        )
        .await?;
    assert_eq!(update_deleted.status(), StatusCode::NOT_FOUND);

    app.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn board_requires_existing_department() -> Result<()> {
    let _lock = acquire_db_lock().await;
    let app = TestApp::connect().await?;

    let response = app
        .post_json(
            "/api/board",
            &json!({ "department_id": Uuid::new_v4(), "name": "Orphan" }),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let boards: Vec<BoardView> = read_json(app.get("/api/board").await?).await?;
    assert!(boards.is_empty());

    app.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn task_update_replaces_full_record() -> Result<()> {
    let _lock = acquire_db_lock().await;
    let app = TestApp::connect().await?;

    let department_id = seed_department(&app).await?;
    let board_id = app
        .create(
            "board",
            &json!({ "department_id": department_id, "name": "Sprint 12" }),
        )
        .await?;
    let assignee_id = app
        .create(
            "user",
            &json!({ "display_name": "Grace", "email": "grace@example.com" }),
        )
        .await?;

    let task_id = app
        .create(
            "task",
            &json!({
                "board_id": board_id,
                "assignee_id": assignee_id,
                "title": "Draft release notes",
            }),
        )
        .await?;
    let path = format!("/api/task/{task_id}");

    let task: TaskView = read_json(app.get(&path).await?).await?;
    assert_eq!(task.id, task_id);
    assert_eq!(task.board_id, board_id);
    assert_eq!(task.assignee_id, Some(assignee_id));
    assert!(!task.is_completed);

    let updated = app
        .put_json(
            &path,
            &json!({
                "id": task_id,
                "board_id": board_id,
                "title": "Publish release notes",
                "is_completed": true,
            }),
        )
        .await?;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: TaskView = read_json(updated).await?;
    assert_eq!(updated.title, "Publish release notes");
    assert!(updated.is_completed);
    assert_eq!(updated.assignee_id, None);

    let comment_id = app
        .create(
            "comment",
            &json!({ "task_id": task_id, "user_id": assignee_id, "body": "Done!" }),
        )
        .await?;
    let comment: serde_json::Value =
        read_json(app.get(&format!("/api/comment/{comment_id}")).await?).await?;
    assert_eq!(comment["body"], "Done!");
    assert_eq!(comment["task_id"], task_id.to_string());

    app.cleanup().await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[tokio::test]
async fn writes_refuse_soft_deleted_parents() -> Result<()> {
    let _lock = acquire_db_lock().await;
    let app = TestApp::connect().await?;

    let department_id = seed_department(&app).await?;
    let board_id = app
        .create(
            "board",
            &json!({ "department_id": department_id, "name": "Archive" }),
        )
        .await?;
    let user_id = app
        .create(
            "user",
            &json!({ "display_name": "Margaret", "email": "margaret@example.com" }),
        )
        .await?;
    let existing_task = app
        .create(
            "task",
            &json!({ "board_id": board_id, "title": "Written before archiving" }),
        )
        .await?;

    let deleted = app.delete(&format!("/api/board/{board_id}")).await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let task = app
        .post_json(
            "/api/task",
            &json!({ "board_id": board_id, "title": "Too late" }),
        )
        .await?;
    assert_eq!(task.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = read_json(task).await?;
    assert!(body.error.contains("board_id"), "{}", body.error);

    let member = app
        .post_json(
            "/api/board-user",
            &json!({ "board_id": board_id, "user_id": user_id }),
        )
        .await?;
    assert_eq!(member.status(), StatusCode::BAD_REQUEST);

    let touched = app
        .put_json(
            &format!("/api/task/{existing_task}"),
            &json!({
                "id": existing_task,
                "board_id": board_id,
                "title": "Renamed after archiving",
            }),
        )
        .await?;
    assert_eq!(touched.status(), StatusCode::BAD_REQUEST);

    let tasks: Vec<TaskView> = read_json(app.get("/api/task").await?).await?;
    let task_ids: Vec<Uuid> = tasks.iter().map(|task| task.id).collect();
    assert_eq!(task_ids, vec![existing_task]);
    assert_eq!(tasks[0].title, "Written before archiving");

    let members: Vec<serde_json::Value> = read_json(app.get("/api/board-user").await?).await?;
    assert!(members.is_empty());

    app.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn task_assignee_must_be_active_user() -> Result<()> {
    let _lock = acquire_db_lock().await;
    let app = TestApp::connect().await?;

    let department_id = seed_department(&app).await?;
    let board_id = app
        .create(
            "board",
            &json!({ "department_id": department_id, "name": "Hiring" }),
        )
        .await?;
    let user_id = app
        .create(
            "user",
            &json!({ "display_name": "Ken", "email": "ken@example.com" }),
        )
        .await?;
    let removed = app.delete(&format!("/api/user/{user_id}")).await?;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let response = app
        .post_json(
            "/api/task",
            &json!({
                "board_id": board_id,
                "assignee_id": user_id,
                "title": "Schedule interviews",
            }),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = read_json(response).await?;
    assert!(body.error.contains("assignee_id"), "{}", body.error);

    app.create(
        "task",
        &json!({ "board_id": board_id, "title": "Schedule interviews" }),
    )
    .await?;

    app.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn deleted_tasks_and_comments_leave_listings() -> Result<()> {
    let _lock = acquire_db_lock().await;
    let app = TestApp::connect().await?;

    let department_id = seed_department(&app).await?;
    let board_id = app
        .create(
            "board",
            &json!({ "department_id": department_id, "name": "Bugs" }),
        )
        .await?;
    let user_id = app
        .create(
            "user",
            &json!({ "display_name": "Barbara", "email": "barbara@example.com" }),
        )
        .await?;
    let task_id = app
        .create(
            "task",
            &json!({ "board_id": board_id, "title": "Fix login redirect" }),
        )
        .await?;
    let comment_id = app
        .create(
            "comment",
            &json!({ "task_id": task_id, "user_id": user_id, "body": "Reproduced" }),
        )
        .await?;

    let comment_path = format!("/api/comment/{comment_id}");
    let deleted = app.delete(&comment_path).await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let comment: serde_json::Value = read_json(app.get(&comment_path).await?).await?;
    assert_eq!(comment["body"], "Reproduced");
    let comments: Vec<serde_json::Value> = read_json(app.get("/api/comment").await?).await?;
    assert!(comments.is_empty());

    let task_path = format!("/api/task/{task_id}");
    let deleted = app.delete(&task_path).await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let task: TaskView = read_json(app.get(&task_path).await?).await?;
    assert_eq!(task.id, task_id);
    assert_eq!(task.board_id, board_id);
    let tasks: Vec<TaskView> = read_json(app.get("/api/task").await?).await?;
    assert!(tasks.is_empty());

    app.cleanup().await?;
    Ok(())
}
