use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    // Opaque avatar token; the app renders it as-is (the web frontend used
    // emoji glyphs).
    pub avatar: String,
}

/// Weak-reference lookup. Entities point at members by id only; a missing
/// referent resolves to `None` and renders as unassigned.
pub fn find_member<'a>(
    members: &'a HashMap<String, FamilyMember>,
    id: &str,
) -> Option<&'a FamilyMember> {
    members.get(id)
}

pub fn assignee_label(members: &HashMap<String, FamilyMember>, id: Option<&str>) -> String {
    match id.and_then(|id| find_member(members, id)) {
        Some(member) => member.name.clone(),
        None => "Unassigned".to_string(),
    }
}
