use tempfile::TempDir;
use PortalLibrary::portal::preference_store::PreferenceStore;
use PortalLibrary::portal::utils::sign_in::ExternalIdentity;
use PortalLibrary::portal::utils::user_profile::PreferenceUpdate;

fn identity(email: &str) -> ExternalIdentity {
    ExternalIdentity {
        email: email.to_string(),
        name: Some("Alex".to_string()),
        picture: Some("https://example.com/alex.png".to_string()),
    }
}

async fn open_store(directory: &TempDir) -> PreferenceStore {
    let path = directory.path().join("portal.db");
    match PreferenceStore::open(path.to_str().unwrap(), 2).await {
        Ok(store) => store,
        Err(entry) => panic!("{entry}"),
    }
}

#[tokio::test]
async fn first_sign_in_creates_the_user_row() {
    let directory = TempDir::new().unwrap();
    let store = open_store(&directory).await;
    let (profile, created) = store.ensure_user(&identity("cook@example.com")).await.map_err(|entry| entry.to_string()).unwrap();
    assert!(created);
    assert_eq!(profile.email, "cook@example.com");
    assert_eq!(profile.name.as_deref(), Some("Alex"));
    assert!(!profile.has_preferences());
    store.close().await;
}

#[tokio::test]
async fn repeated_sign_in_keeps_the_stored_profile() {
    let directory = TempDir::new().unwrap();
    let store = open_store(&directory).await;
    store.ensure_user(&identity("cook@example.com")).await.map_err(|entry| entry.to_string()).unwrap();
    let mut changed = identity("cook@example.com");
    changed.name = Some("Somebody Else".to_string());
    let (profile, created) = store.ensure_user(&changed).await.map_err(|entry| entry.to_string()).unwrap();
    assert!(!created);
    assert_eq!(profile.name.as_deref(), Some("Alex"));
    store.close().await;
}

#[tokio::test]
async fn preferences_update_and_read_back() {
    let directory = TempDir::new().unwrap();
    let store = open_store(&directory).await;
    store.ensure_user(&identity("cook@example.com")).await.map_err(|entry| entry.to_string()).unwrap();
    let update = PreferenceUpdate {
        email: "cook@example.com".to_string(),
        allergies: Some("Peanuts".to_string()),
        dislikes: Some("Broccoli".to_string()),
        preferences: Some("Pasta, Chicken".to_string()),
    };
    let updated = store.update_preferences(&update).await.map_err(|entry| entry.to_string()).unwrap();
    assert!(updated);
    let profile = store.user_details("cook@example.com").await.map_err(|entry| entry.to_string()).unwrap().unwrap();
    assert_eq!(profile.allergies.as_deref(), Some("Peanuts"));
    assert_eq!(profile.dislikes.as_deref(), Some("Broccoli"));
    assert_eq!(profile.preferences.as_deref(), Some("Pasta, Chicken"));
    assert!(profile.has_preferences());
    store.close().await;
}

#[tokio::test]
async fn updating_an_unknown_user_reports_no_change() {
    let directory = TempDir::new().unwrap();
    let store = open_store(&directory).await;
    let update = PreferenceUpdate {
        email: "nobody@example.com".to_string(),
        allergies: Some("Gluten".to_string()),
        dislikes: None,
        preferences: None,
    };
    let updated = store.update_preferences(&update).await.map_err(|entry| entry.to_string()).unwrap();
    assert!(!updated);
    store.close().await;
}

#[tokio::test]
async fn unknown_user_details_are_absent() {
    let directory = TempDir::new().unwrap();
    let store = open_store(&directory).await;
    let profile = store.user_details("nobody@example.com").await.map_err(|entry| entry.to_string()).unwrap();
    assert!(profile.is_none());
    store.close().await;
}

#[tokio::test]
async fn blank_preferences_do_not_count_as_onboarded() {
    let directory = TempDir::new().unwrap();
    let store = open_store(&directory).await;
    store.ensure_user(&identity("cook@example.com")).await.map_err(|entry| entry.to_string()).unwrap();
    let update = PreferenceUpdate {
        email: "cook@example.com".to_string(),
        allergies: Some("   ".to_string()),
        dislikes: Some(String::new()),
        preferences: None,
    };
    store.update_preferences(&update).await.map_err(|entry| entry.to_string()).unwrap();
    let profile = store.user_details("cook@example.com").await.map_err(|entry| entry.to_string()).unwrap().unwrap();
    assert!(!profile.has_preferences());
    store.close().await;
}
