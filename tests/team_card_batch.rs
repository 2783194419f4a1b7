mod common;

use clubhouse::application::services::{TeamCardRun, TeamCardService};
use clubhouse::compose::PageTemplate;
use std::path::Path;
use std::sync::Arc;

fn make_run(dir: &Path) -> TeamCardRun {
    TeamCardRun {
        teams: Vec::new(),
        output_dir: dir.to_path_buf(),
        template: PageTemplate::Card,
        generated_at: common::stamp(),
    }
}

fn seeded_sources() -> (common::StubTeams, common::StubCards) {
    let teams = common::StubTeams::new(vec![
        common::team("The Sharks", 7),
        common::team("Lightning Bolts", 12),
    ]);

    let mut sharks = common::team_card("The Sharks", 7);
    sharks.players = vec![
        clubhouse::domain::entities::RosterEntry {
            name: Some("Sam".to_string()),
            number: Some(31),
            email: None,
        },
        clubhouse::domain::entities::RosterEntry {
            name: Some("Alex".to_string()),
            number: Some(32),
            email: None,
        },
    ];

    let cards = common::StubCards::new()
        .with_team_card(sharks)
        .with_team_card(common::team_card("Lightning Bolts", 12));

    (teams, cards)
}

#[tokio::test]
async fn test_one_deterministic_file_per_team() {
    let dir = tempfile::tempdir().unwrap();
    let (teams, cards) = seeded_sources();

    let service = TeamCardService::new(Arc::new(teams), Arc::new(cards));
    let report = service.run(&make_run(dir.path())).await.unwrap();

    assert_eq!(report.succeeded, 2);
    assert!(report.is_clean());

    for name in [
        "team_card_The Sharks_#007.pdf",
        "team_card_Lightning Bolts_#012.pdf",
    ] {
        let bytes = std::fs::read(dir.path().join(name)).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "{name} is not a PDF");
    }
}

#[tokio::test]
async fn test_selection_matches_names_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let (teams, cards) = seeded_sources();

    let service = TeamCardService::new(Arc::new(teams), Arc::new(cards));
    let mut run = make_run(dir.path());
    run.teams = vec!["the sharks".to_string()];
    let report = service.run(&run).await.unwrap();

    assert_eq!(report.succeeded, 1);
    assert!(dir.path().join("team_card_The Sharks_#007.pdf").exists());
    assert!(
        !dir.path()
            .join("team_card_Lightning Bolts_#012.pdf")
            .exists()
    );
}

#[tokio::test]
async fn test_missing_card_record_is_a_per_team_skip() {
    let dir = tempfile::tempdir().unwrap();

    // Two teams in the listing, a card record for only one.
    let teams = common::StubTeams::new(vec![
        common::team("The Sharks", 7),
        common::team("Lightning Bolts", 12),
    ]);
    let cards = common::StubCards::new().with_team_card(common::team_card("The Sharks", 7));

    let service = TeamCardService::new(Arc::new(teams), Arc::new(cards));
    let report = service.run(&make_run(dir.path())).await.unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.skipped, 1);
    assert!(!report.is_clean());
    assert!(dir.path().join("team_card_The Sharks_#007.pdf").exists());
}

#[tokio::test]
async fn test_rerun_with_pinned_timestamp_is_byte_identical() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    for dir in [first.path(), second.path()] {
        let (teams, cards) = seeded_sources();
        let service = TeamCardService::new(Arc::new(teams), Arc::new(cards));
        service.run(&make_run(dir)).await.unwrap();
    }

    let name = "team_card_The Sharks_#007.pdf";
    let a = std::fs::read(first.path().join(name)).unwrap();
    let b = std::fs::read(second.path().join(name)).unwrap();
    assert_eq!(a, b, "{name} changed between reruns");
}
