//! Integration tests for eligibility, sign-up and withdrawal.

mod common;

use common::{competition, competitor, date};
use fencing_tournament::{
    can_register_on, register_fencer, register_referee, register_team_member, withdraw,
    Category, CompetitionError, CompetitionKind, CompetitionState, Gender, Role,
};

const TODAY: (i32, u32, u32) = (2024, 5, 1);

fn today() -> chrono::NaiveDate {
    date(TODAY.0, TODAY.1, TODAY.2)
}

#[test]
fn gender_mismatch_is_refused() {
    let c = competition(CompetitionKind::Individual);
    let f = competitor("F1", date(1995, 1, 1), Gender::Female);
    assert!(!can_register_on(&f, &c, today()));
}

#[test]
fn natural_and_next_older_category_only() {
    // Senior competition
    let c = competition(CompetitionKind::Individual);
    let senior = competitor("S", date(1995, 1, 1), Gender::Male); // 29
    let junior = competitor("J", date(2004, 1, 1), Gender::Male); // 20, M20 promoted once
    let cadet = competitor("C", date(2007, 1, 1), Gender::Male); // 17, two levels below
    let veteran = competitor("V", date(1980, 1, 1), Gender::Male); // 44
    assert!(can_register_on(&senior, &c, today()));
    assert!(can_register_on(&junior, &c, today()));
    assert!(!can_register_on(&cadet, &c, today()));
    assert!(!can_register_on(&veteran, &c, today()));
}

#[test]
fn boundary_age_is_inclusive() {
    let mut c = competition(CompetitionKind::Individual);
    c.category = Category::M20;
    // turns 20 on the competition day: still M20
    let twenty = competitor("T", date(2004, 5, 1), Gender::Male);
    assert!(can_register_on(&twenty, &c, today()));
    c.category = Category::M17;
    assert!(!can_register_on(&twenty, &c, today()));
}

#[test]
fn duplicate_registration_is_refused() {
    let mut c = competition(CompetitionKind::Individual);
    let f = competitor("S", date(1995, 1, 1), Gender::Male);
    register_fencer(&mut c, &f, today()).unwrap();
    assert!(!can_register_on(&f, &c, today()));
    assert_eq!(
        register_fencer(&mut c, &f, today()),
        Err(CompetitionError::AlreadyRegistered("S".to_string()))
    );
    assert_eq!(
        register_referee(&mut c, &f),
        Err(CompetitionError::AlreadyRegistered("S".to_string()))
    );
}

#[test]
fn ineligible_registration_leaves_no_trace() {
    let mut c = competition(CompetitionKind::Individual);
    let f = competitor("F", date(1995, 1, 1), Gender::Female);
    assert_eq!(
        register_fencer(&mut c, &f, today()),
        Err(CompetitionError::NotEligible("F".to_string()))
    );
    assert!(c.registrations.is_empty());
}

#[test]
fn referees_skip_category_rules() {
    let mut c = competition(CompetitionKind::Individual);
    let r = competitor("R", date(1960, 1, 1), Gender::Female);
    register_referee(&mut c, &r).unwrap();
    assert_eq!(c.registration("R").unwrap().role, Role::Referee);
    assert!(c.fencers().is_empty());
    assert_eq!(c.referees(), vec!["R".to_string()]);
}

#[test]
fn withdraw_only_before_start() {
    let mut c = competition(CompetitionKind::Individual);
    let f = competitor("S", date(1995, 1, 1), Gender::Male);
    register_fencer(&mut c, &f, today()).unwrap();
    withdraw(&mut c, "S").unwrap();
    assert!(!c.is_registered("S"));
    assert_eq!(
        withdraw(&mut c, "S"),
        Err(CompetitionError::NotRegistered("S".to_string()))
    );

    register_fencer(&mut c, &f, today()).unwrap();
    c.state = CompetitionState::Pools;
    assert!(matches!(
        withdraw(&mut c, "S"),
        Err(CompetitionError::InvalidState { .. })
    ));
    c.state = CompetitionState::Closed;
    assert_eq!(withdraw(&mut c, "S"), Err(CompetitionError::AlreadyClosed));
}

#[test]
fn team_members_and_single_leader() {
    let mut c = competition(CompetitionKind::Team);
    let a = competitor("A", date(1995, 1, 1), Gender::Male);
    let b = competitor("B", date(1996, 1, 1), Gender::Male);
    let d = competitor("D", date(1997, 1, 1), Gender::Male);
    register_team_member(&mut c, &a, 1, true, today()).unwrap();
    register_team_member(&mut c, &b, 1, false, today()).unwrap();
    assert_eq!(
        register_team_member(&mut c, &d, 1, true, today()),
        Err(CompetitionError::DuplicateGroupLeader(1))
    );
    assert!(!c.is_registered("D"));
    let r = c.registration("B").unwrap();
    assert_eq!((r.group, r.group_leader), (Some(1), false));
    assert_eq!(c.ranked_entrants(), vec!["A".to_string()]);
}

#[test]
fn closed_team_event_reports_closure_before_leader_clash() {
    let mut c = competition(CompetitionKind::Team);
    let a = competitor("A", date(1995, 1, 1), Gender::Male);
    let b = competitor("B", date(1996, 1, 1), Gender::Male);
    register_team_member(&mut c, &a, 1, true, today()).unwrap();
    c.state = CompetitionState::Closed;
    assert_eq!(
        register_team_member(&mut c, &b, 1, true, today()),
        Err(CompetitionError::AlreadyClosed)
    );
    c.state = CompetitionState::Elimination;
    assert!(matches!(
        register_team_member(&mut c, &b, 1, true, today()),
        Err(CompetitionError::InvalidState { .. })
    ));
}

#[test]
fn team_registration_refused_for_individual_event() {
    let mut c = competition(CompetitionKind::Individual);
    let a = competitor("A", date(1995, 1, 1), Gender::Male);
    assert!(matches!(
        register_team_member(&mut c, &a, 1, true, today()),
        Err(CompetitionError::InvalidState { .. })
    ));
}
