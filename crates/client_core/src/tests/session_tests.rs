use super::*;
use std::sync::Arc;

use storage::MemoryStore;

use crate::roster::TEAM_STORAGE_KEY;
use crate::test_support::sample_character;

fn session() -> TeamSession<MemoryStore> {
    TeamSession::new(RosterStore::open(MemoryStore::new()))
}

fn select(session: &mut TeamSession<MemoryStore>, character: Character) {
    let generation = session.begin_detail_request();
    assert!(session.apply_detail(generation, character));
}

fn team_names<S: KeyValueStore>(session: &TeamSession<S>) -> Vec<String> {
    session.team().iter().map(|m| m.name.clone()).collect()
}

#[test]
fn starts_with_empty_transient_state() {
    let session = session();

    assert!(session.selected().is_none());
    assert_eq!(session.overlay(), Overlay::Hidden);
    assert_eq!(session.notification(), None);
    assert_eq!(session.empty_slots(), 6);
    assert!(session.picker_enabled());
}

#[test]
fn adding_a_new_member_clears_selection_and_notification() {
    let mut session = session();
    let rick = sample_character(1, "Rick Sanchez");
    select(&mut session, rick.clone());
    assert!(session.add_selected().expect("add rick"));

    select(&mut session, rick.clone());
    assert!(session.add_selected().is_err());
    assert!(session.notification().is_some());

    let morty = sample_character(2, "Morty Smith");
    select(&mut session, morty);
    assert!(session.add_selected().expect("add morty"));

    assert!(session.selected().is_none());
    assert_eq!(session.notification(), None);
    assert_eq!(team_names(&session), vec!["Rick Sanchez", "Morty Smith"]);
}

#[test]
fn add_a_then_b_then_a_again_keeps_two_and_notifies_once() {
    let mut session = session();
    let a = sample_character(1, "Rick Sanchez");
    let b = sample_character(2, "Morty Smith");
    let mut rejections = 0;

    for candidate in [a.clone(), b.clone(), a.clone()] {
        select(&mut session, candidate);
        if session.add_selected().is_err() {
            rejections += 1;
        }
    }

    assert_eq!(rejections, 1);
    assert_eq!(session.team(), &[a.clone(), b][..]);
    assert_eq!(
        session.notification(),
        Some("Rick Sanchez is already on the team!")
    );
    assert_eq!(session.selected(), Some(&a));
}

#[test]
fn add_without_selection_is_a_no_op() {
    let mut session = session();

    assert!(!session.add_selected().expect("nothing to add"));
    assert!(session.team().is_empty());
}

#[test]
fn picker_is_disabled_once_the_team_is_full() {
    let mut session = session();
    for id in 1..=6 {
        assert!(session.picker_enabled());
        select(&mut session, sample_character(id, &format!("Member {id}")));
        session.add_selected().expect("add member");
    }

    assert!(!session.picker_enabled());
    assert_eq!(session.empty_slots(), 0);

    select(&mut session, sample_character(7, "Member 7"));
    let err = session.add_selected().expect_err("store gate");
    assert_eq!(err, RosterError::Full { capacity: 6 });
    assert_eq!(session.notification(), Some("The team is full!"));
    assert_eq!(session.team().len(), 6);
}

#[test]
fn removing_a_member_reopens_the_picker() {
    let mut session = session();
    for id in 1..=6 {
        select(&mut session, sample_character(id, &format!("Member {id}")));
        session.add_selected().expect("add member");
    }

    assert_eq!(session.remove("Member 3").expect("remove"), 1);
    assert_eq!(session.remove("Nobody").expect("remove absent"), 0);

    assert!(session.picker_enabled());
    assert_eq!(session.empty_slots(), 1);
}

#[test]
fn highlighting_b_while_a_is_shown_replaces_the_overlay() {
    let mut session = session();
    let a = sample_character(1, "Rick Sanchez");
    let b = sample_character(2, "Morty Smith");

    session.highlight(a.clone());
    assert_eq!(session.overlay(), Overlay::Shown(&a));

    session.highlight(b.clone());
    assert_eq!(session.overlay(), Overlay::Shown(&b));

    session.dismiss_overlay();
    assert_eq!(session.overlay(), Overlay::Hidden);
}

#[test]
fn stale_detail_response_is_discarded() {
    let mut session = session();
    let first = session.begin_detail_request();
    let second = session.begin_detail_request();

    assert!(!session.is_latest_detail_request(first));
    assert!(session.is_latest_detail_request(second));
    assert!(session.apply_detail(second, sample_character(2, "Morty Smith")));
    assert!(!session.apply_detail(first, sample_character(1, "Rick Sanchez")));

    assert_eq!(
        session.selected().map(|c| c.name.as_str()),
        Some("Morty Smith")
    );
}

#[test]
fn selecting_does_not_touch_other_slots() {
    let mut session = session();
    let rick = sample_character(1, "Rick Sanchez");
    session.highlight(rick.clone());
    select(&mut session, rick.clone());
    session.add_selected().expect("add");
    select(&mut session, rick);
    let _ = session.add_selected();
    assert!(session.notification().is_some());

    select(&mut session, sample_character(2, "Morty Smith"));

    assert!(session.notification().is_some());
    assert!(matches!(session.overlay(), Overlay::Shown(_)));
}

#[test]
fn dismissing_the_notification_clears_it() {
    let mut session = session();
    let rick = sample_character(1, "Rick Sanchez");
    select(&mut session, rick.clone());
    session.add_selected().expect("add");
    select(&mut session, rick);
    let _ = session.add_selected();

    session.dismiss_notification();

    assert_eq!(session.notification(), None);
}

#[test]
fn catalog_options_filter_by_name_ignoring_case() {
    let mut session = session();
    session.replace_catalog(vec![
        sample_character(1, "Rick Sanchez"),
        sample_character(2, "Morty Smith"),
        sample_character(3, "Summer Smith"),
    ]);

    let labels: Vec<String> = session
        .catalog_options("SMITH")
        .into_iter()
        .map(|option| option.label)
        .collect();
    assert_eq!(labels, vec!["Morty Smith", "Summer Smith"]);
    assert_eq!(session.catalog_options("  ").len(), 3);
}

#[test]
fn session_restores_team_written_by_an_earlier_session() {
    let store = Arc::new(MemoryStore::new());
    {
        let mut earlier = TeamSession::new(RosterStore::open(Arc::clone(&store)));
        let generation = earlier.begin_detail_request();
        earlier.apply_detail(generation, sample_character(1, "Rick Sanchez"));
        earlier.add_selected().expect("add");
    }
    assert!(store.get(TEAM_STORAGE_KEY).expect("get").is_some());

    let later = TeamSession::new(RosterStore::open(Arc::clone(&store)));
    assert_eq!(team_names(&later), vec!["Rick Sanchez"]);
    assert!(later.selected().is_none());
    assert_eq!(later.notification(), None);
}
