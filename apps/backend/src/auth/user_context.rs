//! Task-local user context for web requests.
//!
//! Holds the authenticated identity and raw token for the current request.
//! Storage is keyed by the executing task, so two requests handled
//! concurrently can never observe each other's identity; there is no shared
//! mutable state and therefore no locking.
//!
//! The guard middleware establishes the slots with [`scope`] around the whole
//! authenticate + dispatch sequence. When the scoped future completes,
//! whatever the outcome, the slots are destroyed with it; that is the
//! unconditional clear at request end.

use std::cell::RefCell;

use tokio::task_local;

use crate::repos::users::WechatUser;

task_local! {
    static CURRENT_USER: RefCell<Option<WechatUser>>;
    static CURRENT_TOKEN: RefCell<Option<String>>;
}

/// Run a future with empty user-context slots established for its task.
pub async fn scope<F, R>(future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    CURRENT_USER
        .scope(
            RefCell::new(None),
            CURRENT_TOKEN.scope(RefCell::new(None), future),
        )
        .await
}

/// Set the current user. No-op outside a context scope.
pub fn set_current_user(user: WechatUser) {
    let _ = CURRENT_USER.try_with(|cell| {
        *cell.borrow_mut() = Some(user);
    });
}

/// Get the current user, if a request has been authenticated.
pub fn current_user() -> Option<WechatUser> {
    CURRENT_USER
        .try_with(|cell| cell.borrow().clone())
        .unwrap_or(None)
}

/// Get the current user's id, if a request has been authenticated.
pub fn current_user_id() -> Option<String> {
    current_user().map(|user| user.id)
}

/// Set the raw token for the current request. No-op outside a context scope.
pub fn set_current_token(token: String) {
    let _ = CURRENT_TOKEN.try_with(|cell| {
        *cell.borrow_mut() = Some(token);
    });
}

/// Get the raw token for the current request, if one was presented.
pub fn current_token() -> Option<String> {
    CURRENT_TOKEN
        .try_with(|cell| cell.borrow().clone())
        .unwrap_or(None)
}

/// Whether the current request carries an authenticated identity.
pub fn is_logged_in() -> bool {
    CURRENT_USER
        .try_with(|cell| cell.borrow().is_some())
        .unwrap_or(false)
}

/// Clear both slots. The scope exit already does this at request end; this
/// exists for callers that drop the identity mid-request (e.g. logout).
pub fn clear() {
    let _ = CURRENT_USER.try_with(|cell| {
        *cell.borrow_mut() = None;
    });
    let _ = CURRENT_TOKEN.try_with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(id: &str) -> WechatUser {
        WechatUser {
            id: id.to_string(),
            openid: format!("openid-{id}"),
            unionid: None,
            nickname: "测试用户".to_string(),
            avatar_url: String::new(),
            gender: None,
            country: None,
            province: None,
            city: None,
            language: None,
            session_key: "sk".to_string(),
            last_login_time: None,
            last_login_ip: None,
            user_agent: None,
            status: 1,
            created_time: 0,
            updated_time: 0,
        }
    }

    #[tokio::test]
    async fn test_empty_outside_scope() {
        assert_eq!(current_user(), None);
        assert_eq!(current_user_id(), None);
        assert_eq!(current_token(), None);
        assert!(!is_logged_in());
    }

    #[tokio::test]
    async fn test_set_and_get_within_scope() {
        scope(async {
            assert!(!is_logged_in());

            set_current_user(test_user("FP17351234"));
            set_current_token("tok".to_string());

            assert!(is_logged_in());
            assert_eq!(current_user_id(), Some("FP17351234".to_string()));
            assert_eq!(current_token(), Some("tok".to_string()));
        })
        .await;
    }

    #[tokio::test]
    async fn test_cleared_after_scope_ends() {
        scope(async {
            set_current_user(test_user("FP17351234"));
        })
        .await;

        assert_eq!(current_user(), None);
        assert_eq!(current_token(), None);
    }

    #[tokio::test]
    async fn test_clear_within_scope() {
        scope(async {
            set_current_user(test_user("FP17351234"));
            set_current_token("tok".to_string());
            clear();
            assert_eq!(current_user(), None);
            assert_eq!(current_token(), None);
        })
        .await;
    }

    #[tokio::test]
    async fn test_concurrent_scopes_are_isolated() {
        let first = scope(async {
            set_current_user(test_user("FP11110001"));
            // Yield so the other task runs while this identity is set.
            tokio::task::yield_now().await;
            current_user_id()
        });
        let second = scope(async {
            set_current_user(test_user("FP22220002"));
            tokio::task::yield_now().await;
            current_user_id()
        });

        let (a, b) = tokio::join!(first, second);
        assert_eq!(a, Some("FP11110001".to_string()));
        assert_eq!(b, Some("FP22220002".to_string()));
    }
}
