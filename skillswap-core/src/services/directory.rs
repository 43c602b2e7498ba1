//! Directory service - the single store of known member profiles

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::User;
use crate::ports::{PartitionStore, RemoteApi, USERS_PARTITION};
use crate::store::PersistedSnapshot;

/// Every user record this client knows about, persisted to `users-storage`
pub struct DirectoryService {
    users: PersistedSnapshot<Vec<User>>,
    api: Arc<dyn RemoteApi>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn PartitionStore>, api: Arc<dyn RemoteApi>) -> Result<Self> {
        Ok(Self {
            users: PersistedSnapshot::load(store, USERS_PARTITION)?,
            api,
        })
    }

    /// All known users, insertion order
    pub fn all_users(&self) -> Vec<User> {
        self.users.snapshot().to_vec()
    }

    /// Users who chose to be listed
    pub fn get_public_users(&self) -> Vec<User> {
        self.users
            .snapshot()
            .iter()
            .filter(|u| u.is_public)
            .cloned()
            .collect()
    }

    pub fn get_user_by_id(&self, id: &str) -> Option<User> {
        self.users.snapshot().iter().find(|u| u.id == id).cloned()
    }

    /// Public users with an offered or wanted skill whose name contains `query`
    /// (case-insensitive). A blank query lists every public user.
    pub fn search_users_by_skill(&self, query: &str) -> Vec<User> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.get_public_users();
        }
        self.users
            .snapshot()
            .iter()
            .filter(|u| u.is_public && u.has_skill_matching(&needle))
            .cloned()
            .collect()
    }

    /// Replace the record with the same id, or append it
    pub fn upsert_user(&self, user: User) -> Result<()> {
        self.upsert_many(vec![user]).map(|_| ())
    }

    /// Upsert a batch in one write; returns how many records were new
    fn upsert_many(&self, incoming: Vec<User>) -> Result<usize> {
        self.users.replace(|current| {
            let mut next = current.clone();
            let mut added = 0;
            for user in incoming {
                match next.iter_mut().find(|u| u.id == user.id) {
                    Some(existing) => *existing = user,
                    None => {
                        next.push(user);
                        added += 1;
                    }
                }
            }
            Ok((next, added))
        })
    }

    /// Pull the public member list from the server and merge it in
    pub fn refresh(&self, token: &str) -> Result<RefreshSummary> {
        let users = self.api.public_users(token)?;
        let fetched = users.len();
        let added = self.upsert_many(users)?;
        Ok(RefreshSummary {
            fetched,
            added,
            updated: fetched - added,
        })
    }
}

/// Result of a directory refresh
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RefreshSummary {
    pub fetched: usize,
    pub added: usize,
    pub updated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Skill;
    use crate::services::testing::FakeApi;
    use crate::store::testing::MemoryPartitionStore;

    fn member(id: &str, offered: &str, wanted: &str, public: bool) -> User {
        let mut user = User::new(id, format!("{}@example.com", id), id.to_uppercase());
        user.skills_offered.push(Skill::new(format!("{}-o", id), offered, ""));
        user.skills_wanted.push(Skill::new(format!("{}-w", id), wanted, ""));
        user.is_public = public;
        user
    }

    fn directory(api: Arc<FakeApi>) -> DirectoryService {
        let store: Arc<dyn PartitionStore> = Arc::new(MemoryPartitionStore::default());
        DirectoryService::new(store, api).unwrap()
    }

    fn seeded() -> DirectoryService {
        let dir = directory(Arc::new(FakeApi::default()));
        dir.upsert_user(member("u1", "Guitar", "Yoga", true)).unwrap();
        dir.upsert_user(member("u2", "Yoga", "Spanish", true)).unwrap();
        dir.upsert_user(member("u3", "Guitar Repair", "Chess", false)).unwrap();
        dir
    }

    #[test]
    fn test_public_users_keep_insertion_order() {
        let dir = seeded();
        let ids: Vec<String> = dir.get_public_users().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["u1", "u2"]);
        assert_eq!(dir.all_users().len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_and_public_only() {
        let dir = seeded();
        let ids: Vec<String> = dir
            .search_users_by_skill("GUITAR")
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec!["u1"]);

        // wanted skills count too
        let ids: Vec<String> = dir
            .search_users_by_skill("span")
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec!["u2"]);
    }

    #[test]
    fn test_empty_search_equals_public_users() {
        let dir = seeded();
        assert_eq!(dir.search_users_by_skill(""), dir.get_public_users());
        assert_eq!(dir.search_users_by_skill("   "), dir.get_public_users());
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let dir = seeded();
        let mut renamed = dir.get_user_by_id("u2").unwrap();
        renamed.name = "Bea".to_string();
        dir.upsert_user(renamed).unwrap();

        assert_eq!(dir.all_users().len(), 3);
        assert_eq!(dir.get_user_by_id("u2").unwrap().name, "Bea");
        assert!(dir.get_user_by_id("nobody").is_none());
    }

    #[test]
    fn test_refresh_merges_server_list() {
        let api = Arc::new(FakeApi::default());
        api.set_public_users(vec![
            member("u1", "Guitar", "Yoga", true),
            member("u9", "Pottery", "Guitar", true),
        ]);
        let dir = directory(api);
        dir.upsert_user(member("u1", "Drums", "Yoga", true)).unwrap();

        let summary = dir.refresh("token").unwrap();
        assert_eq!(
            summary,
            RefreshSummary {
                fetched: 2,
                added: 1,
                updated: 1
            }
        );
        assert_eq!(dir.get_user_by_id("u1").unwrap().skills_offered[0].name, "Guitar");
        assert!(dir.get_user_by_id("u9").is_some());
    }
}
