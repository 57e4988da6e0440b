use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;

/// Capabilities of the signed-in operator, provided once at the app root.
///
/// Views read admin rights from here only; nothing below the provider looks
/// at storage or globals to decide what a user may do.
#[derive(Clone, Copy, Debug)]
pub struct AuthContext {
    user: RwSignal<Option<UserInfo>>,
}

impl AuthContext {
    pub fn new(user: Option<UserInfo>) -> Self {
        Self {
            user: RwSignal::new(user),
        }
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.user.get()
    }

    pub fn set_user(&self, user: Option<UserInfo>) {
        self.user.set(user);
    }

    /// Reactive: re-runs dependants when the user changes
    pub fn is_admin(&self) -> bool {
        self.user.with(|u| can_administer(u.as_ref()))
    }

    /// For event handlers, outside any reactive scope
    pub fn is_admin_untracked(&self) -> bool {
        self.user.with_untracked(|u| can_administer(u.as_ref()))
    }
}

/// Admin-only actions need a known user with the admin flag
pub fn can_administer(user: Option<&UserInfo>) -> bool {
    user.is_some_and(|u| u.is_admin)
}

/// Loads the current operator and provides `AuthContext` to its children
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new(None);

    spawn_local(async move {
        match api::get_current_user().await {
            Ok(user) => {
                log::info!("Signed in as {} (admin: {})", user.username, user.is_admin);
                auth.set_user(Some(user));
            }
            Err(e) => log::warn!("Could not load current user, admin actions disabled: {}", e),
        }
    });

    provide_context(auth);
    children()
}

/// Hook to access the injected auth context
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}
