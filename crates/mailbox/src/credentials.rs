//! Random mailbox names and passwords.

use mail_gw::Domain;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::MailboxError;

/// Length of the generated local part.
pub const LOCAL_PART_LEN: usize = 6;

/// Length of the generated password.
pub const PASSWORD_LEN: usize = 12;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// A string of `len` random lowercase ASCII letters.
pub fn random_lowercase<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Pick a registrable domain uniformly at random.
pub fn pick_domain<'a, R: Rng + ?Sized>(
    rng: &mut R,
    domains: &'a [Domain],
) -> Result<&'a Domain, MailboxError> {
    let usable: Vec<&Domain> = domains.iter().filter(|d| d.is_usable()).collect();
    usable
        .choose(rng)
        .copied()
        .ok_or(MailboxError::NoDomains)
}

/// Local part and password for a new mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLogin {
    pub local_part: String,
    pub password: String,
}

impl GeneratedLogin {
    /// Generate a fresh login.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            local_part: random_lowercase(rng, LOCAL_PART_LEN),
            password: random_lowercase(rng, PASSWORD_LEN),
        }
    }

    /// Full address on a domain.
    pub fn address(&self, domain: &Domain) -> String {
        format!("{}@{}", self.local_part, domain.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_lowercase_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = random_lowercase(&mut rng, 12);
        assert_eq!(s.len(), 12);
        assert!(s.chars().all(|c| c.is_ascii_lowercase()));
        assert_eq!(random_lowercase(&mut rng, 0), "");
    }

    #[test]
    fn test_generated_login() {
        let mut rng = StdRng::seed_from_u64(42);
        let login = GeneratedLogin::random(&mut rng);
        assert_eq!(login.local_part.len(), LOCAL_PART_LEN);
        assert_eq!(login.password.len(), PASSWORD_LEN);
        assert_eq!(
            login.address(&Domain::new("mail.gw")),
            format!("{}@mail.gw", login.local_part)
        );
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = GeneratedLogin::random(&mut StdRng::seed_from_u64(1));
        let b = GeneratedLogin::random(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick_domain_skips_unusable() {
        let mut private = Domain::new("private.gw");
        private.is_private = true;
        let mut inactive = Domain::new("old.gw");
        inactive.is_active = false;
        let domains = vec![private, inactive, Domain::new("mail.gw")];

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(pick_domain(&mut rng, &domains).unwrap().domain, "mail.gw");
        }
    }

    #[test]
    fn test_pick_domain_covers_all_choices() {
        let domains = vec![Domain::new("a.gw"), Domain::new("b.gw")];
        let mut rng = StdRng::seed_from_u64(9);
        let picks: std::collections::HashSet<String> = (0..64)
            .map(|_| pick_domain(&mut rng, &domains).unwrap().domain.clone())
            .collect();
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn test_pick_domain_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            pick_domain(&mut rng, &[]),
            Err(MailboxError::NoDomains)
        ));
    }
}
