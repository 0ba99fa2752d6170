//! Who is currently signed in

use tokio::sync::watch;

use crate::task::UserId;

/// See [`Identity::state_changes`]
pub type AuthStateReceiver = watch::Receiver<Option<UserId>>;

/// An identity provider: tells which user is currently signed in, if any
pub trait Identity {
    /// The id of the signed-in user, or `None` on a signed-out device
    fn current_user(&self) -> Option<UserId>;

    /// A channel that delivers the new auth state whenever it changes
    fn state_changes(&self) -> AuthStateReceiver;
}

/// An in-process identity provider, for demos and tests.
/// A real app plugs its auth SDK behind [`Identity`] instead
pub struct LocalIdentity {
    state: watch::Sender<Option<UserId>>,
}

impl LocalIdentity {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    /// An identity provider that starts with `user` already signed in
    pub fn signed_in(user: UserId) -> Self {
        let (state, _) = watch::channel(Some(user));
        Self { state }
    }

    pub fn sign_in(&self, user: UserId) {
        self.state.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        self.state.send_replace(None);
    }
}

impl Default for LocalIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl Identity for LocalIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.state.borrow().clone()
    }

    fn state_changes(&self) -> AuthStateReceiver {
        self.state.subscribe()
    }
}
