// src/identity.rs
//
// Short on-air display names → (full roster name, per-episode player id).
//
// The transcript names responders by whatever the scoreboard showed ("Ben",
// "Ben S.", a nickname). Resolution runs once per episode over the distinct
// names, and the resulting map is then applied row by row.

use std::collections::HashMap;

use crate::core::sanitize::name_key;
use crate::model::Contestant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub full_name: String,
    /// 1-based roster position. Only meaningful within one episode.
    pub player_id: u32,
}

/// Built once by [`resolve_identities`]; read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityMap {
    by_key: HashMap<String, Identity>,
}

impl IdentityMap {
    pub fn lookup(&self, short_name: &str) -> Option<&Identity> {
        self.by_key.get(&name_key(short_name))
    }

    pub fn len(&self) -> usize { self.by_key.len() }
    pub fn is_empty(&self) -> bool { self.by_key.is_empty() }

    fn bind(&mut self, short_name: &str, roster: &[Contestant], idx: usize) {
        self.by_key.insert(
            name_key(short_name),
            Identity { full_name: roster[idx].full_name.clone(), player_id: idx as u32 + 1 },
        );
    }
}

#[derive(Clone, Debug, Default)]
pub struct Resolution {
    pub map: IdentityMap,
    /// Display names no contestant matched, first-observed order.
    pub unresolved: Vec<String>,
}

/// Bind every observed display name to at most one contestant.
///
/// Names with a single candidate go first and claim that contestant. Names
/// matching several contestants are then taken in first-observed order and
/// bound to the best candidate: an exact full-name match, then an exact
/// scoreboard nickname, then one no other name has claimed, then roster order.
/// So with "Ben Stone" and "Ben Chan" on the roster, "Ben S." claims Stone and
/// a bare "Ben" falls to Chan.
pub fn resolve_identities<S: AsRef<str>>(roster: &[Contestant], observed: &[S]) -> Resolution {
    let mut names: Vec<&str> = Vec::new();
    for name in observed.iter().map(|n| n.as_ref()) {
        if !names.iter().any(|n| name_key(n) == name_key(name)) {
            names.push(name);
        }
    }

    let candidates: Vec<Vec<usize>> = names
        .iter()
        .map(|name| (0..roster.len()).filter(|&i| roster[i].matches(name)).collect())
        .collect();

    let mut res = Resolution::default();
    let mut claimed = vec![false; roster.len()];

    for (name, cands) in names.iter().zip(&candidates) {
        if let [only] = cands.as_slice() {
            res.map.bind(name, roster, *only);
            claimed[*only] = true;
        }
    }

    for (name, cands) in names.iter().zip(&candidates) {
        match cands.len() {
            0 => {
                logd!("Identity: no contestant matches {name:?}");
                res.unresolved.push(s!(*name));
            }
            1 => {}
            _ => {
                let key = name_key(name);
                let best = cands.iter().copied().min_by_key(|&i| {
                    (name_key(&roster[i].full_name) != key, !roster[i].has_nickname(name), claimed[i], i)
                });
                if let Some(i) = best {
                    logd!("Identity: {name:?} matched {} contestants; chose {}", cands.len(), roster[i].full_name);
                    res.map.bind(name, roster, i);
                    claimed[i] = true;
                }
            }
        }
    }
    res
}

/// Identity of one row's responder. Pure; rows without a responder or with an
/// unresolved name get `(None, None)`.
pub fn resolve(short_name: Option<&str>, map: &IdentityMap) -> (Option<String>, Option<u32>) {
    match short_name.and_then(|n| map.lookup(n)) {
        Some(id) => (Some(id.full_name.clone()), Some(id.player_id)),
        None => (None, None),
    }
}
