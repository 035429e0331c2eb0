use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::app_data::{AppData, Collection};
use crate::models::member::FamilyMember;
use crate::service::identity;
use crate::service::storage_service::FamilyStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingStatus {
    /// Local identity accepted. When the roster is still empty the member
    /// document may simply not have arrived yet, so the id stands.
    Ready { member_id: String },
    /// The roster is loaded and the stored id is not in it: the local
    /// token is stale, pick a profile again.
    ChooseProfile,
    /// No local identity on this device yet.
    NeedsOnboarding,
}

pub fn onboarding_status(
    local_id: Option<&str>,
    members: &Collection<FamilyMember>,
) -> OnboardingStatus {
    let Some(id) = local_id else {
        return OnboardingStatus::NeedsOnboarding;
    };
    if members.is_empty() || members.contains_key(id) {
        OnboardingStatus::Ready {
            member_id: id.to_string(),
        }
    } else {
        OnboardingStatus::ChooseProfile
    }
}

pub struct MemberService;

impl MemberService {
    /// The local identity is written first so the app can move on
    /// immediately; the remote member document follows, and a failed write
    /// leaves local state in place for the next snapshot to reconcile.
    pub async fn complete_onboarding(
        data: &Arc<Mutex<AppData>>,
        remote: &dyn FamilyStore,
        identity_path: &str,
        member: FamilyMember,
    ) -> Result<FamilyMember, String> {
        identity::store_local_user_id(identity_path, &member.id)
            .map_err(|err| format!("Failed to store local identity: {}", err))?;
        {
            let mut data = data.lock().await;
            data.members.insert(member.id.clone(), member.clone());
        }
        if let Err(err) = remote.set_member(&member).await {
            eprintln!("Failed to save member to the family store: {}", err);
        }
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn roster(ids: &[&str]) -> Collection<FamilyMember> {
        let mut members = HashMap::new();
        for id in ids {
            members.insert(
                id.to_string(),
                FamilyMember {
                    id: id.to_string(),
                    name: format!("member {}", id),
                    avatar: "🐱".to_string(),
                },
            );
        }
        members
    }

    #[test]
    fn no_local_identity_needs_onboarding() {
        assert_eq!(
            onboarding_status(None, &roster(&["m1"])),
            OnboardingStatus::NeedsOnboarding
        );
    }

    #[test]
    fn identity_in_roster_is_ready() {
        assert_eq!(
            onboarding_status(Some("m1"), &roster(&["m1", "m2"])),
            OnboardingStatus::Ready {
                member_id: "m1".to_string()
            }
        );
    }

    #[test]
    fn stale_identity_against_loaded_roster_reonboards() {
        assert_eq!(
            onboarding_status(Some("gone"), &roster(&["m1"])),
            OnboardingStatus::ChooseProfile
        );
    }

    #[test]
    fn identity_trusted_while_roster_empty() {
        assert_eq!(
            onboarding_status(Some("m1"), &roster(&[])),
            OnboardingStatus::Ready {
                member_id: "m1".to_string()
            }
        );
    }
}
