use std::collections::HashSet;

use crate::error::{TeamError, ValidationError};
use crate::model::entity::{Catalog, PickKind};
use crate::model::team::{Member, Team};

/// Builds a team from display names, marking `bonus_name` as the bonus pick.
///
/// Only lookup and bonus rules are checked here. Size, composition and
/// budget are the caller's to check with [`Team::validate`].
pub fn build_team<'a, S: AsRef<str>>(names: &[S], bonus_name: &str, catalog: &'a Catalog) -> Result<Team<'a>, TeamError> {
    let bonus = catalog.find_by_name(bonus_name)?;
    if bonus.kind == PickKind::Constructor {
        return Err(ValidationError::BonusIsConstructor(bonus.name.clone()).into());
    }

    let mut seen = HashSet::new();
    let mut members = Vec::with_capacity(names.len());
    for name in names {
        let pick = catalog.find_by_name(name.as_ref())?;
        if !seen.insert(pick.id) {
            return Err(ValidationError::DuplicatePick(pick.name.clone()).into());
        }
        members.push(Member { pick, is_bonus: pick.id == bonus.id });
    }
    if !seen.contains(&bonus.id) {
        return Err(ValidationError::BonusNotInTeam(bonus.name.clone()).into());
    }
    Ok(Team::new(members))
}
