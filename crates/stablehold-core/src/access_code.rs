//! Access codes handed out after signup.

use crate::selection::RandomSource;

/// Uppercase letters and digits minus the look-alikes (I, O, 0, 1).
pub const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const CODE_LENGTH: usize = 8;

pub fn generate_access_code<R>(rng: &mut R) -> String
where
    R: RandomSource + ?Sized,
{
    (0..CODE_LENGTH)
        .map(|_| {
            let unit = rng.next_unit().clamp(0.0, 1.0);
            let index = ((unit * ALPHABET.len() as f64) as usize).min(ALPHABET.len() - 1);
            ALPHABET[index] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::RngSource;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn code_has_fixed_length_and_alphabet() {
        let mut rng = RngSource(Mcg128Xsl64::seed_from_u64(7));
        for _ in 0..100 {
            let code = generate_access_code(&mut rng);
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "{code}");
        }
    }

    #[test]
    fn edges_of_the_unit_interval_map_to_first_and_last_symbol() {
        assert_eq!(generate_access_code(&mut || 0.0), "AAAAAAAA");
        assert_eq!(generate_access_code(&mut || 0.999_999), "99999999");
        assert_eq!(generate_access_code(&mut || 1.0), "99999999");
    }
}
