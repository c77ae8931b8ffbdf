use crate::event::UserId;
use crate::force::Force;


// Which of the two fixed participants the local viewer is. Derived once per
// session from the stored viewer identity; `Unknown` covers a viewer matching
// neither participant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    Host,
    Guest,
    Unknown,
}

impl Role {
    pub fn of(viewer: UserId, host: Option<UserId>, guest: Option<UserId>) -> Role {
        if host == Some(viewer) {
            Role::Host
        } else if guest == Some(viewer) {
            Role::Guest
        } else {
            Role::Unknown
        }
    }

    // The host always plays the first-moving side.
    pub fn plays(self, force: Force) -> bool {
        match self {
            Role::Host => force == Force::White,
            Role::Guest => force == Force::Black,
            Role::Unknown => false,
        }
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn derived_from_participant_ids() {
        let (alice, bob, carol) = (UserId::new(1), UserId::new(2), UserId::new(3));
        assert_eq!(Role::of(alice, Some(alice), Some(bob)), Role::Host);
        assert_eq!(Role::of(bob, Some(alice), Some(bob)), Role::Guest);
        assert_eq!(Role::of(carol, Some(alice), Some(bob)), Role::Unknown);
        assert_eq!(Role::of(alice, None, Some(bob)), Role::Unknown);
    }

    #[test]
    fn plays_maps_host_to_white() {
        assert!(Role::Host.plays(Force::White));
        assert!(!Role::Host.plays(Force::Black));
        assert!(Role::Guest.plays(Force::Black));
        assert!(!Role::Guest.plays(Force::White));
        assert!(!Role::Unknown.plays(Force::White));
        assert!(!Role::Unknown.plays(Force::Black));
    }
}
