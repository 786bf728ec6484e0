//! Registration: eligibility rules, sign-up and withdrawal.

use crate::error::{CompetitionError, Result};
use crate::models::{
    Category, Competition, CompetitionKind, CompetitionState, Competitor, Registration, Role,
};
use chrono::{Local, NaiveDate};

/// Whether `competitor` may register for `competition`, judged on today's date.
pub fn can_register(competitor: &Competitor, competition: &Competition) -> bool {
    can_register_on(competitor, competition, Local::now().date_naive())
}

/// Eligibility with an explicit reference date.
///
/// Genders must match, the competitor must not already be registered, and the competition
/// category must be the competitor's natural category or the single next-older one.
pub fn can_register_on(
    competitor: &Competitor,
    competition: &Competition,
    today: NaiveDate,
) -> bool {
    if competitor.gender != competition.gender {
        return false;
    }
    if competition.is_registered(&competitor.license) {
        return false;
    }
    let natural = Category::natural_for_age(competitor.age_on(today));
    competition.category == natural || natural.next_older() == Some(competition.category)
}

/// Register a fencer after checking eligibility on `today`.
pub fn register_fencer(
    competition: &mut Competition,
    competitor: &Competitor,
    today: NaiveDate,
) -> Result<()> {
    competition.ensure_state(CompetitionState::Registration, "register")?;
    if competition.is_registered(&competitor.license) {
        return Err(CompetitionError::AlreadyRegistered(competitor.license.clone()));
    }
    if !can_register_on(competitor, competition, today) {
        log::warn!(
            "Registration of {} refused for {}",
            competitor.license,
            competition.name
        );
        return Err(CompetitionError::NotEligible(competitor.license.clone()));
    }
    competition
        .registrations
        .push(Registration::new(competitor.license.clone(), Role::Fencer));
    Ok(())
}

/// Register a referee. Referees are not subject to the category rules.
pub fn register_referee(competition: &mut Competition, competitor: &Competitor) -> Result<()> {
    competition.ensure_state(CompetitionState::Registration, "register")?;
    if competition.is_registered(&competitor.license) {
        return Err(CompetitionError::AlreadyRegistered(competitor.license.clone()));
    }
    competition
        .registrations
        .push(Registration::new(competitor.license.clone(), Role::Referee));
    Ok(())
}

/// Register a fencer into team `group` of a team event. Each team has exactly one leader.
pub fn register_team_member(
    competition: &mut Competition,
    competitor: &Competitor,
    group: u32,
    leader: bool,
    today: NaiveDate,
) -> Result<()> {
    competition.ensure_state(CompetitionState::Registration, "register")?;
    if competition.kind != CompetitionKind::Team {
        return Err(CompetitionError::InvalidState {
            action: "register a team member",
            state: competition.state,
        });
    }
    if leader
        && competition
            .registrations
            .iter()
            .any(|r| r.group == Some(group) && r.group_leader)
    {
        return Err(CompetitionError::DuplicateGroupLeader(group));
    }
    register_fencer(competition, competitor, today)?;
    if let Some(r) = competition.registration_mut(&competitor.license) {
        r.group = Some(group);
        r.group_leader = leader;
    }
    Ok(())
}

/// Remove a registration (only before the competition starts).
pub fn withdraw(competition: &mut Competition, license: &str) -> Result<()> {
    competition.ensure_state(CompetitionState::Registration, "withdraw")?;
    let idx = competition
        .registrations
        .iter()
        .position(|r| r.license == license)
        .ok_or_else(|| CompetitionError::NotRegistered(license.to_string()))?;
    competition.registrations.remove(idx);
    Ok(())
}
