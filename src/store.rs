//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the
//! collections several screens look names up in.

use acs_domain::{Client, Entity, Project, RecordId, User};
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All clients
    pub clients: Vec<Client>,
    /// All projects
    pub projects: Vec<Project>,
    /// Dashboard users
    pub users: Vec<User>,
    /// Whether the first load of clients and projects finished
    pub loaded: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Replace a record with the same id, or append it
fn upsert<T: Entity>(records: &mut Vec<T>, record: T) {
    match records.iter().position(|r| r.id() == record.id()) {
        Some(pos) => records[pos] = record,
        None => records.push(record),
    }
}

// ========================
// Store Helper Functions
// ========================

pub fn store_upsert_client(store: &AppStore, client: Client) {
    upsert(&mut *store.clients().write(), client);
}

pub fn store_remove_client(store: &AppStore, id: &RecordId) {
    store.clients().write().retain(|c| c.id != *id);
}

pub fn store_upsert_project(store: &AppStore, project: Project) {
    upsert(&mut *store.projects().write(), project);
}

pub fn store_remove_project(store: &AppStore, id: &RecordId) {
    store.projects().write().retain(|p| p.id != *id);
}

pub fn store_upsert_user(store: &AppStore, user: User) {
    upsert(&mut *store.users().write(), user);
}

pub fn store_remove_user(store: &AppStore, id: &RecordId) {
    store.users().write().retain(|u| u.id != *id);
}

/// Client name for table cells, falling back to the raw id
pub fn client_name(store: &AppStore, id: &RecordId) -> String {
    store.clients().with(|clients| {
        clients
            .iter()
            .find(|c| c.id == *id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    })
}

pub fn project_name(store: &AppStore, id: &RecordId) -> String {
    store.projects().with(|projects| {
        projects
            .iter()
            .find(|p| p.id == *id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> User {
        User {
            id: RecordId::from(id),
            name: name.to_string(),
            email: format!("{}@acs.in", name),
            role: Default::default(),
            active: true,
            last_login: None,
        }
    }

    #[test]
    fn test_upsert_replaces_or_appends() {
        let mut users = vec![user(1, "asha"), user(2, "ravi")];
        upsert(&mut users, user(2, "ravi k"));
        upsert(&mut users, user(3, "meera"));
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["asha", "ravi k", "meera"]);
    }
}
