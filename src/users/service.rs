//! User service: the four operation contracts over [`UserStore`].

use super::{StoreError, User, UserStore};

/// Forwards to the accessor; outcomes pass through unchanged. Existence
/// checks come from affected-row counts, never from a prior read.
#[derive(Clone)]
pub struct UserService {
    store: UserStore,
}

impl UserService {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    pub async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        self.store.insert(user.id, &user.name).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, StoreError> {
        self.store.fetch_by_id(id).await
    }

    pub async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        self.store.update_name(user.id, &user.name).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete_by_id(id).await
    }

    pub async fn is_ready(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::db;

    async fn service() -> UserService {
        UserService::new(UserStore::new(db::memory_pool().await.unwrap()))
    }

    fn user(id: i64, name: &str) -> User {
        User { id, name: name.to_owned() }
    }

    #[rstest]
    #[case(1, "Alice")]
    #[case(0, "zero")]
    #[case(-42, "negative")]
    #[case(i64::MAX, "max")]
    #[case(5, "名前 with unicode")]
    #[tokio::test]
    async fn create_then_get_round_trips(#[case] id: i64, #[case] name: &str) {
        let service = service().await;
        service.create_user(&user(id, name)).await.unwrap();
        assert_eq!(service.get_user(id).await.unwrap(), user(id, name));
    }

    #[tokio::test]
    async fn duplicate_create_keeps_original_row() {
        let service = service().await;
        service.create_user(&user(1, "Alice")).await.unwrap();
        let err = service.create_user(&user(1, "Mallory")).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation { id: 1 }));
        assert_eq!(service.get_user(1).await.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn get_missing_user_is_not_found() {
        let service = service().await;
        assert!(matches!(service.get_user(404).await, Err(StoreError::NotFound { id: 404 })));
    }

    #[tokio::test]
    async fn update_missing_user_does_not_create_it() {
        let service = service().await;
        assert!(matches!(
            service.update_user(&user(2, "ghost")).await,
            Err(StoreError::NotFound { id: 2 })
        ));
        assert!(matches!(service.get_user(2).await, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn update_changes_only_the_name() {
        let service = service().await;
        service.create_user(&user(3, "Alice")).await.unwrap();
        service.update_user(&user(3, "Bob")).await.unwrap();
        assert_eq!(service.get_user(3).await.unwrap(), user(3, "Bob"));
    }

    #[tokio::test]
    async fn delete_twice_fails_the_second_time() {
        let service = service().await;
        service.create_user(&user(4, "Alice")).await.unwrap();
        service.delete_user(4).await.unwrap();
        assert!(matches!(service.get_user(4).await, Err(StoreError::NotFound { .. })));
        assert!(matches!(service.delete_user(4).await, Err(StoreError::NotFound { id: 4 })));
    }

    #[tokio::test]
    async fn ready_while_store_answers() {
        let pool = db::memory_pool().await.unwrap();
        let service = UserService::new(UserStore::new(pool.clone()));
        assert!(service.is_ready().await);
        pool.close().await;
        assert!(!service.is_ready().await);
    }
}
