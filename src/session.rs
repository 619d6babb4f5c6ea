use crate::store::KeyValueStore;

pub const STORAGE_KEY: &str = "eztech_is_authenticated";

/// Whether the user has come back from the identity provider signed in.
pub struct Session<S> {
    store: S,
    signed_in: bool,
}

impl<S> Session<S>
where
    S: KeyValueStore,
{
    pub fn load(store: S) -> Self {
        let signed_in = match store.get(STORAGE_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                log::warn!("failed to read sign-in state: {}", e);
                false
            }
        };
        Self { store, signed_in }
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    pub fn sign_in(&mut self) {
        self.set(true);
    }

    pub fn sign_out(&mut self) {
        self.set(false);
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn set(&mut self, signed_in: bool) {
        self.signed_in = signed_in;
        let value = if signed_in { "true" } else { "false" };
        if let Err(e) = self.store.set(STORAGE_KEY, value) {
            log::warn!("failed to save sign-in state: {}", e);
        }
    }
}
