use std::sync::Arc;

use builder_hub::storage::keys;
use builder_hub::{
    vote_key, EventMetadata, EventOutcome, HubError, HubEvent, KvStore, Severity, MAIN_ITEM,
};
use integration_tests::support::{mem_store, session_with_store, test_session, FailingStore};

const T0: u64 = 1_740_000_000_000;

fn at(offset_ms: u64) -> EventMetadata {
    EventMetadata::at(T0 + offset_ms)
}

#[test]
fn full_member_flow_from_signup_to_logout() {
    let store = mem_store();
    let (mut session, notifier) = session_with_store(store.clone());

    // Gated actions bounce while anonymous and present the login prompt.
    let err = session
        .handle(&HubEvent::PostComment { text: "nice!".to_string() }, &at(0))
        .unwrap_err();
    assert!(matches!(err, HubError::AuthRequired));
    assert_eq!(notifier.login_prompts(), 1);
    assert!(session.comments().is_empty());

    // Bad signup first, then a good one.
    let err = session
        .handle(
            &HubEvent::Signup {
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                password: "abcdef".to_string(),
                confirm_password: "abcdez".to_string(),
                agreed_terms: true,
            },
            &at(10),
        )
        .unwrap_err();
    assert!(matches!(err, HubError::PasswordMismatch));
    assert!(session.current_user().is_none());
    assert_eq!(notifier.last_error().as_deref(), Some("Passwords do not match"));

    let outcome = session
        .handle(
            &HubEvent::Signup {
                name: "Ada".to_string(),
                email: "ada@b.com".to_string(),
                password: "abcdef".to_string(),
                confirm_password: "abcdef".to_string(),
                agreed_terms: true,
            },
            &at(20),
        )
        .unwrap();
    assert_eq!(outcome, EventOutcome::SignedUp { name: "Ada".to_string() });
    assert!(store.get(keys::CURRENT_USER).unwrap().is_some(), "signup persists the user");

    // Vote round trip on the main content: 12 -> 13 -> 12.
    let outcome = session
        .handle(&HubEvent::ToggleVote { scope: "feed".to_string(), item_id: "main".to_string(), displayed_count: 12 }, &at(30))
        .unwrap();
    assert_eq!(outcome, EventOutcome::VoteToggled { key: "feed-main".to_string(), voted: true, count: 13 });
    let outcome = session
        .handle(&HubEvent::ToggleVote { scope: "feed".to_string(), item_id: "main".to_string(), displayed_count: 13 }, &at(40))
        .unwrap();
    assert_eq!(outcome, EventOutcome::VoteToggled { key: "feed-main".to_string(), voted: false, count: 12 });

    // A board entry votes independently of the main item.
    session
        .handle(&HubEvent::ToggleVote { scope: "board".to_string(), item_id: "0".to_string(), displayed_count: 21 }, &at(50))
        .unwrap();
    assert!(session.has_voted(&vote_key("board", "0")));
    assert!(!session.has_voted(&vote_key("feed", MAIN_ITEM)));

    // Comment, then submit a post.
    session.handle(&HubEvent::PostComment { text: "great launch".to_string() }, &at(60)).unwrap();
    assert_eq!(session.comments().len(), 1);
    assert_eq!(session.current_user().unwrap().comment_count, 1);

    let outcome = session
        .handle(
            &HubEvent::SubmitPost {
                title: "My first post".to_string(),
                content: "hello builders".to_string(),
                category: "general".to_string(),
            },
            &at(70),
        )
        .unwrap();
    let EventOutcome::PostSubmitted { id } = outcome else { panic!("expected PostSubmitted") };
    assert_eq!(session.current_user().unwrap().post_count, 1);
    assert_eq!(session.newest()[0].id, id);
    assert_eq!(session.newest()[0].title, "My first post");

    // Tab switch clears comments and the new tab's main toggle, but the
    // submission stays in the newest listing.
    session.handle(&HubEvent::SwitchTab { tab_id: "projects".to_string() }, &at(80)).unwrap();
    assert!(session.comments().is_empty());
    assert_eq!(session.newest()[0].title, "My first post");
    assert!(!session.has_voted(&vote_key("projects", MAIN_ITEM)));

    // Logout clears the persisted session.
    session.handle(&HubEvent::Logout, &at(90)).unwrap();
    assert!(session.current_user().is_none());
    assert!(store.get(keys::CURRENT_USER).unwrap().is_none());
    assert!(store.get(keys::REMEMBER_ME).unwrap().is_none());
}

#[test]
fn submissions_persist_across_sessions_via_store() {
    let store = mem_store();
    {
        let (mut session, _) = session_with_store(store.clone());
        session.handle(&HubEvent::Login { email: "sarah@example.com".to_string(), password: "abcdef".to_string() }, &at(0)).unwrap();
        session
            .handle(
                &HubEvent::SubmitPost {
                    title: "durable".to_string(),
                    content: "written through".to_string(),
                    category: "general".to_string(),
                },
                &at(10),
            )
            .unwrap();
    }

    let (fresh, _) = session_with_store(store);
    assert_eq!(fresh.current_user().map(|u| u.name.as_str()), Some("sarah"), "remember-me restores the user");
    assert_eq!(fresh.newest()[0].title, "durable");
}

#[test]
fn project_and_discussion_intake_flow() {
    let store = mem_store();
    let (mut session, notifier) = session_with_store(store.clone());

    // Both intakes are gated while anonymous.
    let err = session
        .handle(
            &HubEvent::AddProject {
                name: "My Tool".to_string(),
                description: "does things".to_string(),
                status: "idea".to_string(),
                url: String::new(),
                github: String::new(),
            },
            &at(0),
        )
        .unwrap_err();
    assert!(matches!(err, HubError::AuthRequired));
    assert_eq!(notifier.login_prompts(), 1);

    session.handle(&HubEvent::Login { email: "ada@b.com".to_string(), password: "abcdef".to_string() }, &at(10)).unwrap();

    // Required-field validation mirrors the forms: projects need name and
    // description, discussions need title and content.
    let err = session
        .handle(
            &HubEvent::AddProject {
                name: "My Tool".to_string(),
                description: String::new(),
                status: "idea".to_string(),
                url: String::new(),
                github: String::new(),
            },
            &at(20),
        )
        .unwrap_err();
    assert!(matches!(err, HubError::MissingRequiredFields));
    assert_eq!(notifier.last_error().as_deref(), Some("Please fill in required fields"));

    let err = session
        .handle(
            &HubEvent::StartDiscussion { title: "Hiring?".to_string(), content: String::new(), category: "general".to_string() },
            &at(30),
        )
        .unwrap_err();
    assert!(matches!(err, HubError::MissingFields));
    assert_eq!(notifier.last_error().as_deref(), Some("Please fill in all fields"));

    // Accepted entries land newest-first, ahead of the seeded samples.
    let outcome = session
        .handle(
            &HubEvent::AddProject {
                name: "My Tool".to_string(),
                description: "does things".to_string(),
                status: "in-progress".to_string(),
                url: "https://tool.example.com".to_string(),
                github: String::new(),
            },
            &at(40),
        )
        .unwrap();
    let EventOutcome::ProjectAdded { id: project_id } = outcome else { panic!("expected ProjectAdded") };

    let outcome = session
        .handle(
            &HubEvent::StartDiscussion {
                title: "Hiring advice?".to_string(),
                content: "Who was your first hire?".to_string(),
                category: "general".to_string(),
            },
            &at(50),
        )
        .unwrap();
    let EventOutcome::DiscussionStarted { id: discussion_id } = outcome else { panic!("expected DiscussionStarted") };

    assert_eq!(session.projects()[0].id, project_id);
    assert!(session.projects().iter().any(|p| p.name == "TaskFlow - Project Management"));
    assert_eq!(session.discussions()[0].id, discussion_id);
    assert_eq!(session.discussions()[0].replies, 0);

    // Both lists are restored from the store by a fresh session.
    let (fresh, _) = session_with_store(store);
    assert_eq!(fresh.projects()[0].id, project_id);
    assert_eq!(fresh.discussions()[0].id, discussion_id);
}

#[test]
fn storage_outage_degrades_to_in_memory() {
    let (mut session, notifier) = session_with_store(Arc::new(FailingStore));

    // Construction already survived failing reads. Every mutating action
    // still succeeds; persistence is fire-and-forget.
    session.handle(&HubEvent::Login { email: "a@b.com".to_string(), password: "abcdef".to_string() }, &at(0)).unwrap();
    assert!(session.current_user().is_some());

    session
        .handle(&HubEvent::SubmitPost { title: "t".to_string(), content: "c".to_string(), category: "general".to_string() }, &at(10))
        .unwrap();
    assert_eq!(session.newest()[0].title, "t");

    session.handle(&HubEvent::PostComment { text: "still works".to_string() }, &at(20)).unwrap();
    assert_eq!(session.comments().len(), 1);

    session.handle(&HubEvent::Logout, &at(30)).unwrap();
    assert!(session.current_user().is_none());

    // Nothing in the flow surfaced a storage error to the user.
    assert!(notifier.messages().iter().all(|(severity, message)| {
        *severity == Severity::Success || !message.contains("storage")
    }));
}

#[test]
fn unknown_tab_is_ignored_end_to_end() {
    let (mut session, _) = test_session();
    session.handle(&HubEvent::SwitchTab { tab_id: "projects".to_string() }, &at(0)).unwrap();

    let outcome = session.handle(&HubEvent::SwitchTab { tab_id: "crossword".to_string() }, &at(10)).unwrap();
    assert_eq!(outcome, EventOutcome::Ignored);
    assert_eq!(session.current_tab(), "projects");
    assert_eq!(session.current_content().map(|c| c.tab_id.as_str()), Some("projects"));
}

#[test]
fn every_catalog_tab_switches_cleanly() {
    let (mut session, _) = test_session();
    let tabs: Vec<String> = session.catalog().tab_ids().map(str::to_string).collect();
    assert!(!tabs.is_empty());

    for tab in tabs {
        let outcome = session.handle(&HubEvent::SwitchTab { tab_id: tab.clone() }, &at(0)).unwrap();
        assert_eq!(outcome, EventOutcome::TabSwitched { tab_id: tab.clone() });
        let item = session.current_content().expect("catalog tab has content");
        assert_eq!(item.tab_id, tab);
        assert!(session.comments().is_empty());
    }
}
