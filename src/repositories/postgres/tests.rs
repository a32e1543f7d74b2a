use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use super::PgAssignmentRepo;
use crate::core::time::primitive_now_utc;
use crate::db::models::Assignment;
use crate::db::types::{ElementKind, UserRole};
use crate::repositories::{
    is_foreign_key_violation, is_unique_violation, AssignmentRepo, CreateAssignment,
    NewGameElement,
};
use crate::services::assignments::{self, AssignmentError};
use crate::test_support;

async fn seed_course(pool: &PgPool) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO courses (id, title, created_at) VALUES ($1, $2, $3)")
        .bind(&id)
        .bind("Maze basics")
        .bind(primitive_now_utc())
        .execute(pool)
        .await
        .expect("seed course");
    id
}

fn new_assignment(course_id: &str) -> CreateAssignment {
    CreateAssignment {
        id: Uuid::new_v4().to_string(),
        course_id: course_id.to_string(),
        title: "Collect the coins".to_string(),
        description: None,
        field_width: 4,
        field_height: 4,
        start_x: 0,
        start_y: 0,
        created_at: primitive_now_utc(),
    }
}

async fn seed_assignment(repo: &PgAssignmentRepo, course_id: &str) -> Assignment {
    repo.create_assignment(new_assignment(course_id))
        .await
        .expect("create assignment")
        .expect("assignment row")
}

fn element(assignment_id: &str, x: i32, y: i32) -> NewGameElement {
    NewGameElement {
        assignment_id: assignment_id.to_string(),
        kind: ElementKind::Wall,
        pos_x: x,
        pos_y: y,
    }
}

async fn seeded_action_ids(pool: &PgPool) -> Vec<i32> {
    sqlx::query_scalar("SELECT id FROM actions WHERE name IN ('move_up', 'pick_up') ORDER BY id")
        .fetch_all(pool)
        .await
        .expect("seeded actions")
}

#[tokio::test]
async fn create_lists_and_ignores_duplicate_ids() {
    let Some(pool) = test_support::pg_test_pool().await else { return };
    let repo = PgAssignmentRepo::new(pool.clone());
    let course_id = seed_course(&pool).await;

    let params = new_assignment(&course_id);
    let created = repo.create_assignment(params.clone()).await.expect("create");
    assert_eq!(created.map(|a| a.id), Some(params.id.clone()));
    assert!(repo.create_assignment(params).await.expect("create again").is_none());

    assert!(repo.course_exists(&course_id).await.expect("course lookup"));
    assert!(!repo.course_exists(&Uuid::new_v4().to_string()).await.expect("course lookup"));
    assert_eq!(repo.list_course_assignments(&course_id).await.expect("list").len(), 1);
}

#[tokio::test]
async fn find_user_decodes_role() {
    let Some(pool) = test_support::pg_test_pool().await else { return };
    let repo = PgAssignmentRepo::new(pool.clone());
    let user_id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO users (id, username, full_name, role, is_active, created_at)
         VALUES ($1, $2, $3, $4, TRUE, $5)",
    )
    .bind(&user_id)
    .bind(format!("t-{user_id}"))
    .bind("Ada Teacher")
    .bind(UserRole::Teacher)
    .bind(primitive_now_utc())
    .execute(&pool)
    .await
    .expect("seed user");

    let user = repo.find_user(&user_id).await.expect("find user").expect("user row");
    assert_eq!(user.role, UserRole::Teacher);
    assert!(repo.find_user(&Uuid::new_v4().to_string()).await.expect("find user").is_none());
}

#[tokio::test]
async fn batch_with_duplicate_cell_is_rolled_back() {
    let Some(pool) = test_support::pg_test_pool().await else { return };
    let repo = PgAssignmentRepo::new(pool.clone());
    let course_id = seed_course(&pool).await;
    let assignment = seed_assignment(&repo, &course_id).await;

    let batch = [
        element(&assignment.id, 1, 1),
        element(&assignment.id, 2, 2),
        element(&assignment.id, 1, 1),
    ];
    let err = repo.insert_elements(&batch).await.unwrap_err();

    assert!(is_unique_violation(&err), "error: {err}");
    assert!(repo.list_elements(&assignment.id).await.expect("elements").is_empty());
}

#[tokio::test]
async fn batch_with_unknown_assignment_is_rolled_back() {
    let Some(pool) = test_support::pg_test_pool().await else { return };
    let repo = PgAssignmentRepo::new(pool.clone());
    let course_id = seed_course(&pool).await;
    let assignment = seed_assignment(&repo, &course_id).await;

    let batch = [element(&assignment.id, 1, 1), element(&Uuid::new_v4().to_string(), 1, 1)];
    let err = repo.insert_elements(&batch).await.unwrap_err();

    assert!(is_foreign_key_violation(&err), "error: {err}");
    assert!(repo.list_elements(&assignment.id).await.expect("elements").is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_batches_for_one_cell_place_exactly_one() {
    let Some(pool) = test_support::pg_test_pool().await else { return };
    let repo = Arc::new(PgAssignmentRepo::new(pool.clone()));
    let course_id = seed_course(&pool).await;
    let assignment = seed_assignment(&repo, &course_id).await;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let repo = repo.clone();
        let batch = vec![element(&assignment.id, 2, 2)];
        handles.push(tokio::spawn(async move { assignments::add_elements(&*repo, batch).await }));
    }

    let (mut placed, mut rejected) = (0, 0);
    for handle in handles {
        match handle.await.expect("join") {
            Ok(inserted) => {
                assert_eq!(inserted.len(), 1);
                placed += 1;
            }
            Err(AssignmentError::ElementPlacement(_)) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!((placed, rejected), (1, 15));
    assert_eq!(repo.list_elements(&assignment.id).await.expect("elements").len(), 1);
}

#[tokio::test]
async fn add_actions_skips_duplicates_and_rejects_unknown_ids() {
    let Some(pool) = test_support::pg_test_pool().await else { return };
    let repo = PgAssignmentRepo::new(pool.clone());
    let course_id = seed_course(&pool).await;
    let assignment = seed_assignment(&repo, &course_id).await;
    let ids = seeded_action_ids(&pool).await;
    let (first, second) = (ids[0], ids[1]);

    let linked = repo.add_actions(&assignment.id, &[second, first, second]).await.expect("link");
    assert_eq!(linked.iter().map(|action| action.id).collect::<Vec<_>>(), vec![first, second]);

    let relinked = repo.add_actions(&assignment.id, &[first]).await.expect("relink");
    assert_eq!(relinked.len(), 2);

    let err = repo.add_actions(&assignment.id, &[first, i32::MAX]).await.unwrap_err();
    assert!(is_foreign_key_violation(&err), "error: {err}");
    assert_eq!(repo.get_assignment_actions(&assignment.id).await.expect("actions").len(), 2);
}

#[tokio::test]
async fn delete_cascades_to_elements_and_action_links() {
    let Some(pool) = test_support::pg_test_pool().await else { return };
    let repo = PgAssignmentRepo::new(pool.clone());
    let course_id = seed_course(&pool).await;
    let assignment = seed_assignment(&repo, &course_id).await;
    let ids = seeded_action_ids(&pool).await;

    repo.insert_elements(&[element(&assignment.id, 1, 2)]).await.expect("elements");
    repo.add_actions(&assignment.id, &ids).await.expect("actions");

    let deleted = repo.delete_assignment(&assignment.id).await.expect("delete");
    assert_eq!(deleted.map(|a| a.id), Some(assignment.id.clone()));

    let links: i64 =
        sqlx::query_scalar("SELECT count(*) FROM assignment_actions WHERE assignment_id = $1")
            .bind(&assignment.id)
            .fetch_one(&pool)
            .await
            .expect("link count");
    assert_eq!(links, 0);
    assert!(repo.list_elements(&assignment.id).await.expect("elements").is_empty());
    assert!(repo.delete_assignment(&assignment.id).await.expect("delete again").is_none());
}
