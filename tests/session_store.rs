// tests/session_store.rs
//! Suggestion progress persisted on disk survives a restart

use resume_builder::resume::suggestion::{Answer, Field, Purpose, Step, Tone, STORAGE_KEY};
use resume_builder::resume::{FileSessionStore, SessionStore, SessionStoreExt, SuggestionFlow, SuggestionState};
use resume_builder::types::TemplateType;
use std::time::Duration;

fn session_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_flow_resumes_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileSessionStore::new(dir.path()).await.unwrap();
        let flow = SuggestionFlow::new(&store);
        flow.answer(Answer::Purpose(Purpose::Internship)).await.unwrap();
        flow.answer(Answer::Tone(Tone::Creative)).await.unwrap();
    }

    let store = FileSessionStore::new(dir.path()).await.unwrap();
    let flow = SuggestionFlow::new(&store);
    let state = flow.state().await.unwrap();
    assert_eq!(state.step, Step::Field);
    assert_eq!(state.purpose, Some(Purpose::Internship));
    assert_eq!(state.tone, Some(Tone::Creative));

    let done = flow.answer(Answer::Field(Field::Design)).await.unwrap();
    assert_eq!(done.step, Step::Results);
    assert_eq!(done.recommendations[0].template, TemplateType::Creative);
}

#[tokio::test]
async fn test_sessions_are_isolated_and_reset_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path()).await.unwrap();

    let alice = SuggestionFlow::for_session(&store, "alice");
    let bob = SuggestionFlow::for_session(&store, "bob");
    alice.answer(Answer::Purpose(Purpose::Job)).await.unwrap();

    assert_eq!(bob.state().await.unwrap(), SuggestionState::default());
    assert_eq!(session_files(dir.path()), 1);

    alice.reset().await.unwrap();
    assert_eq!(session_files(dir.path()), 0);
    assert_eq!(alice.state().await.unwrap().step, Step::Purpose);
}

#[tokio::test]
async fn test_similar_session_ids_do_not_share_progress() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path()).await.unwrap();

    let ids = ["Tab.1", "tab_1", "TAB 1", "tab-1", "tab/1", "../tab1"];
    SuggestionFlow::for_session(&store, ids[0])
        .answer(Answer::Purpose(Purpose::Job))
        .await
        .unwrap();

    for id in &ids[1..] {
        let state = SuggestionFlow::for_session(&store, id).state().await.unwrap();
        assert_eq!(state, SuggestionState::default(), "{} saw another session", id);
    }

    for id in &ids[1..] {
        SuggestionFlow::for_session(&store, id)
            .answer(Answer::Purpose(Purpose::College))
            .await
            .unwrap();
    }
    assert_eq!(session_files(dir.path()), ids.len());

    let first = SuggestionFlow::for_session(&store, ids[0]).state().await.unwrap();
    assert_eq!(first.purpose, Some(Purpose::Job));
}

#[tokio::test]
async fn test_corrupt_file_reads_as_fresh_flow() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path()).await.unwrap();
    store.save_raw(STORAGE_KEY, "{\"step\": 12").await.unwrap();

    assert_eq!(store.load::<SuggestionState>(STORAGE_KEY).await.unwrap(), None);
    let flow = SuggestionFlow::new(&store);
    assert_eq!(flow.state().await.unwrap().step, Step::Purpose);
}

#[tokio::test]
async fn test_clear_missing_key_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("nested/sessions")).await.unwrap();
    assert!(store.clear("never-saved").await.is_ok());
    assert!(store.load_raw("never-saved").await.unwrap().is_none());
}

#[tokio::test]
async fn test_sweep_removes_abandoned_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path()).await.unwrap();
    SuggestionFlow::for_session(&store, "abandoned")
        .answer(Answer::Purpose(Purpose::Student))
        .await
        .unwrap();

    assert_eq!(store.sweep_expired(Duration::from_secs(72 * 3600)).await.unwrap(), 0);
    assert_eq!(session_files(dir.path()), 1);

    assert_eq!(store.sweep_expired(Duration::ZERO).await.unwrap(), 1);
    assert_eq!(session_files(dir.path()), 0);
}
