use anyhow::Result;
use shelflog_models::User;
use shelflog_store::JsonStore;
use tracing::info;

pub const CURRENT_USER_KEY: &str = "currentUser";

/// Mock identity holder backed by the `currentUser` key. There is no real
/// authentication; pages gate on the mere presence of a stored user.
pub struct Session {
    store: JsonStore,
    user: Option<User>,
}

impl Session {
    pub fn load(store: JsonStore) -> Self {
        let user = store.read(CURRENT_USER_KEY);
        Self { store, user }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, user: User) -> Result<()> {
        self.store.write(CURRENT_USER_KEY, &user)?;
        info!("Logged in as {}", user.email);
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY)?;
        self.user = None;
        info!("Logged out");
        Ok(())
    }
}
