//! Contract tests for the in-memory store used through the trait object the
//! server holds.

use std::sync::Arc;

use student_server::db::{
    LocalRepository, RepositoryError, RepositoryFactory, RepositoryType, StudentRepository,
};
use student_server::models::Student;

fn student(id: &str, name: &str, age: i32, grade: &str) -> Student {
    Student::new(id, name, age, grade)
}

#[tokio::test]
async fn test_factory_local_repository_round_trip() {
    let repo: Arc<dyn StudentRepository> = RepositoryFactory::create(RepositoryType::Local, None)
        .await
        .unwrap();

    repo.create_student(student("1", "Al Mamun", 23, "A+")).await.unwrap();
    repo.create_student(student("2", "Efaz", 22, "B+")).await.unwrap();
    repo.update_student("2", student("2", "Efaz", 23, "A-")).await.unwrap();
    repo.delete_student("1").await.unwrap();

    assert_eq!(
        repo.list_students().await.unwrap(),
        vec![student("2", "Efaz", 23, "A-")]
    );
}

#[tokio::test]
async fn test_duplicate_ids_act_on_first_match() {
    let repo = LocalRepository::new();
    repo.create_student(student("1", "First", 20, "A")).await.unwrap();
    repo.create_student(student("1", "Second", 21, "B")).await.unwrap();

    repo.update_student("1", student("1", "First Updated", 20, "A")).await.unwrap();
    assert_eq!(
        repo.snapshot(),
        vec![student("1", "First Updated", 20, "A"), student("1", "Second", 21, "B")]
    );

    repo.delete_student("1").await.unwrap();
    assert_eq!(repo.get_student("1").await.unwrap().name, "Second");
}

#[tokio::test]
async fn test_not_found_carries_student_context() {
    let repo = LocalRepository::new();
    let err = repo.get_student("39").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
    assert_eq!(err.context().entity_id.as_deref(), Some("39"));
    assert!(err.to_string().contains("Student 39 not found"));
}

#[tokio::test]
async fn test_unhealthy_store_fails_every_operation_without_mutating() {
    let repo = LocalRepository::with_students(vec![student("1", "Al Mamun", 20, "A")]);
    repo.set_healthy(false);

    assert!(repo.create_student(student("2", "B", 1, "B")).await.is_err());
    assert!(repo.get_student("1").await.is_err());
    assert!(repo
        .update_student("1", student("1", "X", 1, "F"))
        .await
        .is_err());
    assert!(repo.delete_student("1").await.is_err());

    repo.set_healthy(true);
    assert_eq!(repo.snapshot(), vec![student("1", "Al Mamun", 20, "A")]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_are_serialized() {
    let repo = Arc::new(LocalRepository::new());
    let mut handles = Vec::new();
    for i in 0..50 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            let id = i.to_string();
            repo.create_student(student(&id, "Concurrent", 20, "A"))
                .await
                .unwrap();
            if i % 2 == 0 {
                repo.delete_student(&id).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let remaining = repo.snapshot();
    assert_eq!(remaining.len(), 25);
    assert!(remaining
        .iter()
        .all(|s| s.id.parse::<u32>().unwrap() % 2 == 1));
}
